//! Patch geometry: control points grouped in quads, procedural or provided.

mod gpu;
mod loaded;
mod plane;
mod source;
mod vertex;

pub use gpu::GeometryBuffers;
pub use loaded::{LoadedGeometry, PATCH_SIZE};
pub use plane::plane;
pub use source::{GeometryLibrary, GeometryProvider, GeometrySource};
pub use vertex::{Indices, MeshVertex};
