//! Color model shared between materials and shaders.
//!
//! Scope:
//! - display-encoded RGB values as authored by the host
//! - sRGB <-> linear transfer functions used before GPU upload

pub mod color;

pub use color::ColorRgb;
