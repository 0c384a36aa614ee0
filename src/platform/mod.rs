//! Platform glue
//!
//! The browser host lives here. Native builds have no interactive host;
//! the binary drives [`crate::Game`] headlessly instead.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run;
