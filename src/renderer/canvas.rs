//! Canvas 2D backend
//!
//! Paints a [`Scene`] onto an `HtmlCanvasElement`. Sprite images load in the
//! background; until one is decoded its commands arrive as fallback shapes.

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCommand, Renderer, Scene, SpriteAvailability, SpriteKind};

/// Where the sprite images are served from
#[derive(Debug, Clone)]
pub struct SpriteUrls {
    pub vehicle: String,
    pub coin: String,
    pub fuel_canister: String,
}

impl Default for SpriteUrls {
    fn default() -> Self {
        Self {
            vehicle: "assets/car.png".into(),
            coin: "assets/juucoin.png".into(),
            fuel_canister: "assets/fuel.png".into(),
        }
    }
}

struct Sprites {
    vehicle: Option<HtmlImageElement>,
    coin: Option<HtmlImageElement>,
    fuel_canister: Option<HtmlImageElement>,
}

impl Sprites {
    fn load(urls: &SpriteUrls) -> Self {
        Self {
            vehicle: load_image(&urls.vehicle),
            coin: load_image(&urls.coin),
            fuel_canister: load_image(&urls.fuel_canister),
        }
    }

    fn get(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
        let img = match kind {
            SpriteKind::Vehicle => &self.vehicle,
            SpriteKind::Coin => &self.coin,
            SpriteKind::FuelCanister => &self.fuel_canister,
        };
        img.as_ref().filter(|img| is_decoded(img))
    }
}

fn load_image(url: &str) -> Option<HtmlImageElement> {
    match HtmlImageElement::new() {
        Ok(img) => {
            img.set_src(url);
            Some(img)
        }
        Err(e) => {
            log::warn!("Could not create image for {}: {:?}", url, e);
            None
        }
    }
}

/// Broken images report `complete` with a zero natural size
fn is_decoded(img: &HtmlImageElement) -> bool {
    img.complete() && img.natural_width() > 0
}

fn css(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    /// Only the first draw failure is logged
    reported_error: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, urls: &SpriteUrls) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        log::info!("Canvas renderer ready, loading sprites");
        Ok(Self {
            canvas,
            ctx,
            sprites: Sprites::load(urls),
            reported_error: false,
        })
    }

    fn fit_surface(&self, width: f32, height: f32) {
        let (w, h) = (width as u32, height as u32);
        if self.canvas.width() != w {
            self.canvas.set_width(w);
        }
        if self.canvas.height() != h {
            self.canvas.set_height(h);
        }
    }

    fn draw_scene(&self, scene: &Scene<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (scene.viewport.width as f64, scene.viewport.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        ctx.save();
        ctx.translate(-scene.camera.x as f64, -scene.camera.y as f64)?;
        let drawn = scene
            .commands
            .iter()
            .try_for_each(|cmd| self.draw(cmd, w, h, scene.camera));
        ctx.restore();
        drawn
    }

    fn draw(&self, cmd: &DrawCommand<'_>, w: f64, h: f64, camera: Vec2) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCommand::Sky { top, bottom } => {
                // Screen space: undo the camera translation
                let (x, y) = (camera.x as f64, camera.y as f64);
                let gradient = ctx.create_linear_gradient(0.0, y, 0.0, y + h);
                gradient.add_color_stop(0.0, &css(*top))?;
                gradient.add_color_stop(1.0, &css(*bottom))?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                ctx.fill_rect(x, y, w, h);
            }
            DrawCommand::TerrainFill {
                points,
                floor,
                color,
            } => {
                let (Some(first), Some(last)) = (points.first(), points.last()) else {
                    return Ok(());
                };
                trace(ctx, points);
                ctx.line_to(last.x as f64, *floor as f64);
                ctx.line_to(first.x as f64, *floor as f64);
                ctx.close_path();
                ctx.set_fill_style_str(&css(*color));
                ctx.fill();
            }
            DrawCommand::TerrainLine {
                points,
                width,
                color,
            } => {
                trace(ctx, points);
                ctx.set_stroke_style_str(&css(*color));
                ctx.set_line_width(*width as f64);
                ctx.stroke();
            }
            DrawCommand::Sprite {
                kind,
                center,
                size,
                angle,
                flip_x,
                alpha,
            } => {
                let Some(img) = self.sprites.get(*kind) else {
                    return Ok(());
                };
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*angle as f64)?;
                if *flip_x {
                    ctx.scale(-1.0, 1.0)?;
                }
                let drawn = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    -size.x as f64 / 2.0,
                    -size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
                drawn?;
            }
            DrawCommand::Rect {
                center,
                size,
                angle,
                color,
                alpha,
            } => {
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                ctx.translate(center.x as f64, center.y as f64)?;
                ctx.rotate(*angle as f64)?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill_rect(
                    -size.x as f64 / 2.0,
                    -size.y as f64 / 2.0,
                    size.x as f64,
                    size.y as f64,
                );
                ctx.restore();
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.save();
                ctx.set_global_alpha(*alpha as f64);
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.set_fill_style_str(&css(*color));
                ctx.fill();
                ctx.restore();
            }
        }
        Ok(())
    }
}

fn trace(ctx: &CanvasRenderingContext2d, points: &[Vec2]) {
    ctx.begin_path();
    let mut iter = points.iter();
    if let Some(p) = iter.next() {
        ctx.move_to(p.x as f64, p.y as f64);
    }
    for p in iter {
        ctx.line_to(p.x as f64, p.y as f64);
    }
}

impl Renderer for CanvasRenderer {
    fn sprites(&self) -> SpriteAvailability {
        SpriteAvailability {
            vehicle: self.sprites.get(SpriteKind::Vehicle).is_some(),
            coin: self.sprites.get(SpriteKind::Coin).is_some(),
            fuel_canister: self.sprites.get(SpriteKind::FuelCanister).is_some(),
        }
    }

    fn render(&mut self, scene: &Scene<'_>) {
        if !scene.viewport.is_ready() {
            return;
        }
        self.fit_surface(scene.viewport.width, scene.viewport.height);

        if let Err(e) = self.draw_scene(scene) {
            if !self.reported_error {
                log::error!("Canvas draw failed: {:?}", e);
                self.reported_error = true;
            }
        }
    }
}
