//! Scene description handed over by the host, and the identity-keyed node registry.

mod descriptor;
mod registry;

pub use descriptor::{
    AspectRatio, ContentMode, FrameSize, LayoutOptions, MeshDescriptor, Rotation, ShapeOutline,
};
pub use registry::{NodeRegistry, SyncReport};
