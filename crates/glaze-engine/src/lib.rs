//! Glaze engine crate.
//!
//! Renders host-described meshes with composable, tessellation-driven materials:
//! - `scene` holds the descriptors a host hands over each tick
//! - `compose` links a mesh's materials into one pipeline
//! - `render` owns render nodes, tessellation and the frame orchestrator
//! - `window`, `device`, `core` and `time` form the host runtime around them

pub mod compose;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod material;
pub mod paint;
pub mod path;
pub mod render;
pub mod resources;
pub mod scene;
pub mod time;
pub mod window;

pub use glam;
