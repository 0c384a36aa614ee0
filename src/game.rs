//! Frame scheduling around the simulation
//!
//! The host calls [`Game::frame`] once per display refresh with its clock
//! reading. [`GameLoop`] turns wall time into a number of fixed simulation
//! steps; the game runs them and then hands one scene to the renderer.

use crate::config::{LoopMode, Tuning};
use crate::consts::{MAX_FRAME_DELTA, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{Renderer, Scene, Viewport};
use crate::sim::{self, GameSession, HudSnapshot, InputState, KeyBindings};

/// Wall clock to simulation step conversion
#[derive(Debug, Clone)]
pub struct GameLoop {
    mode: LoopMode,
    running: bool,
    /// Previous frame timestamp (ms), unset until the first frame after start
    last_time: Option<f64>,
    accumulator: f32,
}

impl GameLoop {
    pub fn new(mode: LoopMode) -> Self {
        Self {
            mode,
            running: false,
            last_time: None,
            accumulator: 0.0,
        }
    }

    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.reset_clock();
        log::info!("Game loop started ({})", self.mode.as_str());
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.reset_clock();
        log::info!("Game loop stopped");
    }

    fn reset_clock(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Number of simulation steps owed for a frame at `time_ms`
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        if !self.running {
            return 0;
        }

        let dt = match self.last_time {
            Some(prev) => ((time_ms - prev) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);

        match self.mode {
            LoopMode::PerFrame => 1,
            LoopMode::FixedStep => {
                // A backgrounded tab can hand us seconds at once
                self.accumulator += dt.clamp(0.0, MAX_FRAME_DELTA);

                let mut steps = 0;
                while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
                    self.accumulator -= SIM_DT;
                    steps += 1;
                }
                steps
            }
        }
    }
}

/// Everything the host drives: session, held input, view size and clock
#[derive(Debug)]
pub struct Game {
    pub session: GameSession,
    pub input: InputState,
    pub bindings: KeyBindings,
    pub viewport: Viewport,
    pub clock: GameLoop,
}

impl Game {
    /// New game with the loop stopped and no viewport width yet
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let clock = GameLoop::new(tuning.loop_mode);
        let viewport = Viewport::new(0.0, tuning.camera.viewport_height);
        Self {
            session: GameSession::new(seed, tuning),
            input: InputState::default(),
            bindings: KeyBindings::default(),
            viewport,
            clock,
        }
    }

    pub fn start(&mut self) {
        self.clock.start();
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Run the steps owed at `time_ms`, then render once.
    /// A stopped game neither steps nor renders. Returns the steps taken.
    pub fn frame(&mut self, time_ms: f64, renderer: &mut impl Renderer) -> u32 {
        if !self.clock.is_running() {
            return 0;
        }

        let steps = self.clock.advance(time_ms);
        for _ in 0..steps {
            sim::step(&mut self.session, &self.input, self.viewport.width, SIM_DT);
        }

        let scene = Scene::build(&self.session, self.viewport, renderer.sprites());
        renderer.render(&scene);
        steps
    }

    /// Returns true when the key is bound
    pub fn key_down(&mut self, key: &str) -> bool {
        self.bindings.key_down(&mut self.input, key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.bindings.key_up(&mut self.input, key)
    }

    /// Match the render width to the container; the height is fixed by tuning
    pub fn resize(&mut self, container_width: f32) {
        self.viewport.width = container_width.max(0.0);
        self.viewport.height = self.session.tuning.camera.viewport_height;
    }

    pub fn restart(&mut self) {
        self.session.restart();
        self.input.clear();
        log::info!("Game restarted with seed {}", self.session.seed);
    }

    pub fn restart_with_seed(&mut self, seed: u64) {
        self.session.restart_with_seed(seed);
        self.input.clear();
        log::info!("Game restarted with seed {}", seed);
    }

    pub fn snapshot(&self) -> HudSnapshot {
        self.session.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{SpriteAvailability, Viewport};
    use crate::sim::{Action, EndCause};

    /// Keeps what each render call saw
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Viewport, HudSnapshot, usize)>,
        sprites: SpriteAvailability,
    }

    impl Renderer for Recorder {
        fn sprites(&self) -> SpriteAvailability {
            self.sprites
        }

        fn render(&mut self, scene: &Scene<'_>) {
            self.frames
                .push((scene.viewport, scene.hud, scene.commands.len()));
        }
    }

    fn running_game(mode: LoopMode) -> Game {
        let tuning = Tuning {
            loop_mode: mode,
            ..Default::default()
        };
        let mut game = Game::new(42, tuning);
        game.resize(800.0);
        game.start();
        game
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut clock = GameLoop::new(LoopMode::FixedStep);
        clock.start();
        assert_eq!(clock.advance(0.0), 1);
        // 40 ms is two whole steps with some left over
        assert_eq!(clock.advance(40.0), 2);
        // Leftover plus 12 ms makes a third
        assert_eq!(clock.advance(52.0), 1);
        assert_eq!(clock.advance(55.0), 0);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut clock = GameLoop::new(LoopMode::FixedStep);
        clock.start();
        clock.advance(0.0);
        let steps = clock.advance(5000.0);
        assert!(steps >= 5 && steps <= MAX_SUBSTEPS, "got {steps} steps");
    }

    #[test]
    fn test_backwards_clock_runs_nothing() {
        let mut clock = GameLoop::new(LoopMode::FixedStep);
        clock.start();
        clock.advance(1000.0);
        assert_eq!(clock.advance(900.0), 0);
    }

    #[test]
    fn test_per_frame_runs_one_step() {
        let mut clock = GameLoop::new(LoopMode::PerFrame);
        clock.start();
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(3.0), 1);
        assert_eq!(clock.advance(500.0), 1);
    }

    #[test]
    fn test_stopped_loop_resets_clock() {
        let mut clock = GameLoop::new(LoopMode::FixedStep);
        clock.start();
        clock.advance(0.0);
        clock.stop();
        assert_eq!(clock.advance(16.0), 0);

        // A long pause is not replayed after restarting
        clock.start();
        assert_eq!(clock.advance(60_000.0), 1);
    }

    #[test]
    fn test_frame_renders_once_after_steps() {
        let mut game = running_game(LoopMode::FixedStep);
        game.key_down("ArrowRight");
        let mut recorder = Recorder::default();

        let steps = game.frame(0.0, &mut recorder);
        assert_eq!(steps, 1);
        assert_eq!(recorder.frames.len(), 1);

        let steps = game.frame(40.0, &mut recorder);
        assert_eq!(steps, 2);
        assert_eq!(recorder.frames.len(), 2);
        assert_eq!(game.session.time_ticks, 3);

        let (viewport, hud, _) = recorder.frames[1];
        assert_eq!(viewport, Viewport::new(800.0, 400.0));
        assert_eq!(hud, game.snapshot());
    }

    #[test]
    fn test_stopped_game_does_not_render() {
        let mut game = Game::new(1, Tuning::default());
        let mut recorder = Recorder::default();
        assert_eq!(game.frame(0.0, &mut recorder), 0);
        assert!(recorder.frames.is_empty());
        assert_eq!(game.session.time_ticks, 0);
    }

    #[test]
    fn test_ended_game_keeps_rendering_frozen_state() {
        let mut game = running_game(LoopMode::PerFrame);
        game.session.end(EndCause::OutOfFuel);
        let before = game.session.vehicle.clone();
        let mut recorder = Recorder::default();

        for i in 0..5 {
            game.frame(i as f64 * 16.0, &mut recorder);
        }
        assert_eq!(recorder.frames.len(), 5);
        assert!(recorder.frames.iter().all(|(_, hud, _)| hud.ended));
        assert_eq!(game.session.vehicle, before);
    }

    #[test]
    fn test_zero_width_viewport_still_steps() {
        let mut game = Game::new(3, Tuning::default());
        game.start();
        let mut recorder = Recorder::default();
        game.frame(0.0, &mut recorder);
        assert_eq!(game.session.time_ticks, 1);
        assert_eq!(game.session.camera.offset, glam::Vec2::ZERO);
    }

    #[test]
    fn test_keys_drive_input() {
        let mut game = running_game(LoopMode::PerFrame);
        assert!(game.key_down("d"));
        assert!(game.input.is_held(Action::Accelerate));
        assert!(!game.key_down("Space"));
        assert!(game.key_up("d"));
        assert!(!game.input.is_held(Action::Accelerate));
    }

    #[test]
    fn test_restart_clears_input_and_state() {
        let mut game = running_game(LoopMode::PerFrame);
        game.key_down("ArrowLeft");
        let mut recorder = Recorder::default();
        for i in 0..30 {
            game.frame(i as f64 * 16.0, &mut recorder);
        }
        game.session.end(EndCause::FellOff);

        game.restart_with_seed(7);
        assert_eq!(game.session.seed, 7);
        assert!(game.session.is_running());
        assert_eq!(game.session.time_ticks, 0);
        assert_eq!(game.input, InputState::default());
        assert!(game.is_running());
    }

    #[test]
    fn test_resize_uses_tuned_height() {
        let mut tuning = Tuning::default();
        tuning.camera.viewport_height = 480.0;
        let mut game = Game::new(1, tuning);
        game.resize(1024.0);
        assert_eq!(game.viewport, Viewport::new(1024.0, 480.0));
        game.resize(-5.0);
        assert_eq!(game.viewport.width, 0.0);
    }
}
