//! Text helpers (display width, fitting, wrapping).
//!
//! These helpers are pure (string in/string out) and live under `core` so blocks can depend on
//! them without importing anything from the render layer.

pub mod width;
pub mod wrap;
