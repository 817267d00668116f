//! Layout geometry handed over by the host.
//!
//! Canonical layout space:
//! - logical points, origin top-left
//! - +X right, +Y down
//!
//! The camera offset maps this space onto the orthographic projection.

mod insets;
mod rect;

pub use glam::Vec2;
pub use insets::EdgeInsets;
pub use rect::Rect;
