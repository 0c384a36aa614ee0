//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (placement order for pickups)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collectibles;
pub mod collision;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collectibles::{Coin, CoinState, CollectibleGenerator, FuelCanister};
pub use collision::Aabb;
pub use input::{Action, InputState, KeyBindings};
pub use interaction::Pickups;
pub use state::{Camera, EndCause, GameSession, HudSnapshot, SessionPhase, Vehicle};
pub use terrain::{HeightBand, TerrainGenerator, TerrainProfile};
pub use tick::step;
