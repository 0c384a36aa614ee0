//! Juu Climb - a side-scrolling hill climb arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, pickups, camera)
//! - `game`: Frame scheduling around the simulation
//! - `renderer`: Display list built from simulation state, plus the canvas backend
//! - `platform`: Browser host glue (frame callbacks, input, HUD)
//! - `config`: Data-driven tuning

pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{LoopMode, Tuning};
pub use error::ConfigError;
pub use game::{Game, GameLoop};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (all tuning assumes 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap a single frame may feed the accumulator (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Terrain sampling
    pub const TERRAIN_STEP: f32 = 20.0;
    pub const TERRAIN_LENGTH: f32 = 5000.0;
    pub const TERRAIN_BASELINE: f32 = 350.0;
    /// Height reported when no terrain has been generated
    pub const TERRAIN_DEFAULT_HEIGHT: f32 = 300.0;

    /// Opening stretch: near-flat, tight band
    pub const FLAT_ZONE_END: f32 = 500.0;
    pub const FLAT_JITTER: f32 = 8.0;
    pub const FLAT_MIN_HEIGHT: f32 = 330.0;
    pub const FLAT_MAX_HEIGHT: f32 = 370.0;

    /// Mountains: a new level every band step past the flat zone
    pub const MOUNTAIN_BAND_STEP: f32 = 800.0;
    pub const MOUNTAIN_BASE_JITTER: f32 = 15.0;
    pub const MOUNTAIN_JITTER_PER_LEVEL: f32 = 10.0;
    pub const MOUNTAIN_BAND_PER_LEVEL: f32 = 30.0;
    pub const TERRAIN_MIN_HEIGHT: f32 = 250.0;
    pub const TERRAIN_MAX_HEIGHT: f32 = 500.0;

    /// Fuel canisters
    pub const CANISTER_START_X: f32 = 500.0;
    pub const CANISTER_SPACING: f32 = 700.0;
    pub const CANISTER_WIDTH: f32 = 30.0;
    pub const CANISTER_HEIGHT: f32 = 40.0;
    pub const CANISTER_CLEARANCE: f32 = 10.0;

    /// Coins
    pub const COIN_START_X: f32 = 100.0;
    pub const COIN_PITCH: f32 = 280.0;
    pub const COIN_RADIUS: f32 = 30.0;
    pub const COIN_HOVER: f32 = 20.0;
    /// (count, gap after set); the last set repeats until the terrain ends
    pub const COIN_SETS: [(u32, f32); 4] = [(10, 500.0), (15, 500.0), (15, 500.0), (20, 500.0)];
    pub const COIN_ANIMATION_DURATION: f32 = 1.0;
    pub const COIN_ANIMATION_RISE: f32 = 100.0;

    /// Vehicle
    pub const VEHICLE_START_X: f32 = 100.0;
    pub const VEHICLE_START_Y: f32 = 200.0;
    pub const VEHICLE_WIDTH: f32 = 180.0;
    pub const VEHICLE_HEIGHT: f32 = 140.0;
    pub const FUEL_CAPACITY: f32 = 100.0;
    pub const ACCELERATION: f32 = 200.0;
    pub const ACCELERATION_FUEL_RATE: f32 = 10.0;
    pub const BRAKE_ACCELERATION: f32 = 100.0;
    pub const BRAKE_FUEL_RATE: f32 = 5.0;
    pub const GRAVITY: f32 = 500.0;
    /// Per-tick multipliers
    pub const FRICTION: f32 = 0.995;
    pub const ANGULAR_DAMPING: f32 = 0.9;
    /// How far the body sinks below the contact point when snapped to ground
    pub const CONTACT_SINK: f32 = 5.0;
    pub const RESTITUTION: f32 = 0.3;
    pub const SLOPE_SPAN: f32 = 10.0;
    /// Fraction of the ground slope a grounded body is tilted to
    pub const SLOPE_ALIGNMENT: f32 = 0.1;
    /// Falling below this y ends the run
    pub const DEATH_DEPTH: f32 = 600.0;
    /// World units per metre of reported distance
    pub const UNITS_PER_METRE: f32 = 10.0;

    /// Camera keeps the vehicle this far below the top of the view
    pub const CAMERA_LEAD: f32 = 200.0;

    /// Render surface height (width follows the container)
    pub const VIEWPORT_HEIGHT: f32 = 400.0;
}
