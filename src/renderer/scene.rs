//! Display list for one frame
//!
//! A [`Scene`] borrows the session read-only and lists what to draw, in
//! painter's order, in world coordinates. Backends translate by the camera
//! offset and decide how to paint each command.

use glam::Vec2;

use crate::sim::{GameSession, HudSnapshot};

/// Colors for game elements (RGBA, 0-1)
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const SKY_BOTTOM: [f32; 4] = [0.88, 0.96, 1.0, 1.0];
    pub const DIRT: [f32; 4] = [0.55, 0.27, 0.07, 1.0];
    pub const GRASS: [f32; 4] = [0.13, 0.55, 0.13, 1.0];
    pub const CANISTER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const COIN: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const VEHICLE: [f32; 4] = [0.8, 0.1, 0.1, 1.0];
}

/// Grass line thickness
pub const GRASS_WIDTH: f32 = 3.0;
/// Coin sprites are drawn at a fixed size regardless of the hit radius
pub const COIN_SPRITE_SIZE: f32 = 200.0;

/// Render surface size in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Laid out and drawable
    pub fn is_ready(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Vehicle,
    Coin,
    FuelCanister,
}

/// Which sprite images have finished loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpriteAvailability {
    pub vehicle: bool,
    pub coin: bool,
    pub fuel_canister: bool,
}

impl SpriteAvailability {
    pub const ALL: Self = Self {
        vehicle: true,
        coin: true,
        fuel_canister: true,
    };

    pub fn has(&self, kind: SpriteKind) -> bool {
        match kind {
            SpriteKind::Vehicle => self.vehicle,
            SpriteKind::Coin => self.coin,
            SpriteKind::FuelCanister => self.fuel_canister,
        }
    }
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Vertical gradient over the whole viewport (screen space)
    Sky { top: [f32; 4], bottom: [f32; 4] },
    /// Closed polygon from the surface down to `floor`
    TerrainFill {
        points: &'a [Vec2],
        floor: f32,
        color: [f32; 4],
    },
    /// Open polyline along the surface
    TerrainLine {
        points: &'a [Vec2],
        width: f32,
        color: [f32; 4],
    },
    Sprite {
        kind: SpriteKind,
        center: Vec2,
        size: Vec2,
        angle: f32,
        flip_x: bool,
        alpha: f32,
    },
    Rect {
        center: Vec2,
        size: Vec2,
        angle: f32,
        color: [f32; 4],
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        alpha: f32,
    },
}

/// Everything a backend needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene<'a> {
    pub viewport: Viewport,
    /// Top-left of the view in world space
    pub camera: Vec2,
    pub commands: Vec<DrawCommand<'a>>,
    pub hud: HudSnapshot,
}

impl<'a> Scene<'a> {
    pub fn build(session: &'a GameSession, viewport: Viewport, sprites: SpriteAvailability) -> Self {
        let mut commands = Vec::with_capacity(4 + session.canisters.len() + session.coins.len());

        commands.push(DrawCommand::Sky {
            top: colors::SKY_TOP,
            bottom: colors::SKY_BOTTOM,
        });

        let points = session.terrain.points();
        if !points.is_empty() {
            commands.push(DrawCommand::TerrainFill {
                points,
                floor: session.tuning.vehicle.death_depth,
                color: colors::DIRT,
            });
            commands.push(DrawCommand::TerrainLine {
                points,
                width: GRASS_WIDTH,
                color: colors::GRASS,
            });
        }

        for can in session.canisters.iter().filter(|c| c.active) {
            commands.push(if sprites.has(SpriteKind::FuelCanister) {
                DrawCommand::Sprite {
                    kind: SpriteKind::FuelCanister,
                    center: can.pos,
                    size: can.size,
                    angle: 0.0,
                    flip_x: false,
                    alpha: 1.0,
                }
            } else {
                DrawCommand::Rect {
                    center: can.pos,
                    size: can.size,
                    angle: 0.0,
                    color: colors::CANISTER,
                    alpha: 1.0,
                }
            });
        }

        let fade = session.tuning.collectibles.coin_animation_duration;
        for coin in session.coins.iter().filter(|c| c.is_active()) {
            let alpha = coin.opacity(fade);
            commands.push(if sprites.has(SpriteKind::Coin) {
                DrawCommand::Sprite {
                    kind: SpriteKind::Coin,
                    center: coin.pos,
                    size: Vec2::splat(COIN_SPRITE_SIZE),
                    angle: 0.0,
                    flip_x: false,
                    alpha,
                }
            } else {
                DrawCommand::Circle {
                    center: coin.pos,
                    radius: coin.radius,
                    color: colors::COIN,
                    alpha,
                }
            });
        }

        let car = &session.vehicle;
        commands.push(if sprites.has(SpriteKind::Vehicle) {
            DrawCommand::Sprite {
                kind: SpriteKind::Vehicle,
                center: car.pos,
                size: car.size,
                angle: car.angle,
                flip_x: car.facing() < 0.0,
                alpha: 1.0,
            }
        } else {
            DrawCommand::Rect {
                center: car.pos,
                size: car.size,
                angle: car.angle,
                color: colors::VEHICLE,
                alpha: 1.0,
            }
        });

        Self {
            viewport,
            camera: session.camera.offset,
            commands,
            hud: session.snapshot(),
        }
    }
}

/// A render backend
///
/// Receives the scene by shared reference, after the frame's simulation
/// steps have finished.
pub trait Renderer {
    /// Sprites ready to draw this frame; missing ones fall back to shapes
    fn sprites(&self) -> SpriteAvailability {
        SpriteAvailability::default()
    }

    fn render(&mut self, scene: &Scene<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::sim::CoinState;

    fn session() -> GameSession {
        GameSession::new(8, Tuning::default())
    }

    fn count(scene: &Scene<'_>, pred: impl Fn(&DrawCommand<'_>) -> bool) -> usize {
        scene.commands.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_fallback_shapes_without_sprites() {
        let session = session();
        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), SpriteAvailability::default());

        assert!(matches!(scene.commands[0], DrawCommand::Sky { .. }));
        assert!(matches!(scene.commands[1], DrawCommand::TerrainFill { floor, .. } if floor == 600.0));
        assert!(matches!(scene.commands[2], DrawCommand::TerrainLine { .. }));
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Sprite { .. })), 0);
        assert_eq!(
            count(&scene, |c| matches!(c, DrawCommand::Circle { .. })),
            session.coins.len()
        );
        // Canisters plus the vehicle
        assert_eq!(
            count(&scene, |c| matches!(c, DrawCommand::Rect { .. })),
            session.canisters.len() + 1
        );
    }

    #[test]
    fn test_sprites_when_loaded() {
        let session = session();
        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), SpriteAvailability::ALL);
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Rect { .. })), 0);
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::Circle { .. })), 0);
        assert!(matches!(
            scene.commands.last(),
            Some(DrawCommand::Sprite {
                kind: SpriteKind::Vehicle,
                ..
            })
        ));
    }

    #[test]
    fn test_partial_sprites() {
        let session = session();
        let sprites = SpriteAvailability {
            coin: true,
            ..Default::default()
        };
        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), sprites);
        assert!(matches!(scene.commands.last(), Some(DrawCommand::Rect { .. })));
        assert_eq!(
            count(&scene, |c| matches!(c, DrawCommand::Sprite { kind: SpriteKind::Coin, .. })),
            session.coins.len()
        );
    }

    #[test]
    fn test_inactive_pickups_are_skipped_and_fading_coins_dim() {
        let mut session = session();
        session.canisters[0].active = false;
        session.coins[0].state = CoinState::Collected;
        session.coins[1].state = CoinState::Collecting {
            elapsed: 0.5,
            start_y: session.coins[1].pos.y,
        };

        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), SpriteAvailability::default());
        assert_eq!(
            count(&scene, |c| matches!(c, DrawCommand::Circle { .. })),
            session.coins.len() - 1
        );
        assert_eq!(
            count(&scene, |c| matches!(c, DrawCommand::Rect { .. })),
            session.canisters.len()
        );
        let faded = scene.commands.iter().find_map(|c| match c {
            DrawCommand::Circle { alpha, .. } if *alpha < 1.0 => Some(*alpha),
            _ => None,
        });
        assert_eq!(faded, Some(0.5));
    }

    #[test]
    fn test_vehicle_mirrors_when_reversing() {
        let mut session = session();
        session.vehicle.vel.x = -10.0;
        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), SpriteAvailability::ALL);
        assert!(matches!(
            scene.commands.last(),
            Some(DrawCommand::Sprite { flip_x: true, .. })
        ));
    }

    #[test]
    fn test_empty_terrain_skips_ground() {
        let mut session = session();
        session.terrain = crate::sim::TerrainProfile::default();
        let scene = Scene::build(&session, Viewport::new(800.0, 400.0), SpriteAvailability::default());
        assert_eq!(count(&scene, |c| matches!(c, DrawCommand::TerrainFill { .. })), 0);
    }
}
