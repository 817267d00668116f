//! Material composition: many shading functions, one pipeline.
//!
//! For an ordered material list the composer
//! - links each distinct function once (`plan`, `shader`)
//! - packs every material's arguments at `slot * stride` in one buffer
//! - writes one descriptor per material: function index, argument slot, blend, opacity
//! - generates a `dispatch_material` switch so each fragment selects its function
//!   by index at draw time (`shader`)
//! - creates the pipeline and its material bind group (`pipeline`)
//!
//! The CPU side (`CompositionPlan`) is GPU-independent and carries the invariants;
//! `Composition` owns the GPU objects built from it.

mod pipeline;
mod plan;
mod shader;

pub use pipeline::{Composition, CompositionTargets, padded, storage_size};
pub use plan::{CompositionPlan, LinkedFunction, MATERIAL_DESCRIPTOR_SIZE, MaterialDescriptor};
pub use shader::{ComposedShader, MAX_MATERIAL_TEXTURES, generate, link};
