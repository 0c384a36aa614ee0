//! Juu Climb entry point
//!
//! On the web this hands off to the browser host. Natively it plays one run
//! on autopilot (throttle held) and prints the final HUD as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    juu_climb::platform::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use juu_climb::renderer::{Renderer, Scene};

    /// Logs the HUD once a second of frames instead of drawing
    #[derive(Default)]
    pub struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, scene: &Scene<'_>) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                let hud = &scene.hud;
                log::debug!(
                    "frame {}: {} m, fuel {}%, {} coins",
                    self.frames,
                    hud.distance_meters,
                    hud.fuel_percent,
                    hud.coins
                );
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use juu_climb::{Game, Tuning};

    /// Five minutes at 60 fps
    const MAX_FRAMES: u32 = 60 * 60 * 5;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const VIEW_WIDTH: f32 = 800.0;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    let tuning = Tuning::load();

    let mut game = Game::new(seed, tuning);
    game.resize(VIEW_WIDTH);
    game.key_down("ArrowRight");
    game.start();

    let mut renderer = headless::LogRenderer::default();
    let mut frames = 0;
    while frames < MAX_FRAMES && game.session.is_running() {
        game.frame(frames as f64 * FRAME_MS, &mut renderer);
        frames += 1;
    }
    game.stop();

    log::info!(
        "Autopilot finished after {} frames ({} ticks), phase {:?}",
        frames,
        game.session.time_ticks,
        game.session.phase
    );
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize HUD: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
