//! Rendering module
//!
//! The simulation is drawn through a [`Scene`] display list. Backends only
//! read it; nothing here mutates game state.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{DrawCommand, Renderer, Scene, SpriteAvailability, SpriteKind, Viewport, colors};

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, SpriteUrls};
