//! # Orbit Library
//!
//! This library exposes the Orbit modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod intake;
pub mod views;

// Re-export the workspace crates for convenience
pub use orbit_core;
pub use orbit_sdk;
