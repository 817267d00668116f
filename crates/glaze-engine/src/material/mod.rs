//! Materials and their GPU shading functions.
//!
//! A [`Material`] is what the host attaches to a mesh. Each material produces a
//! [`MaterialFunction`]: a named WGSL function plus a fixed-size argument block
//! and optional external resources (textures). Functions sharing a name are
//! linked once per composition; see `compose`.

mod color;
mod fresnel;
mod function;
mod kind;
mod normal;
mod texture;

pub use color::ColorFunction;
pub use fresnel::FresnelFunction;
pub use function::{MaterialFunction, TextureSource};
pub use kind::{BlendMode, Material, default_materials};
pub use normal::NormalFunction;
pub use texture::{MatcapFunction, TextureFunction};
