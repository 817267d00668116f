//! GPU rendering: render nodes, tessellation and the frame orchestrator.
//!
//! Convention:
//! - layout space is in logical points, top-left origin, +Y down
//! - the camera offset and orthographic projection map it to clip space
//! - every frame runs one compute pass (patch factors) then one render pass

mod camera;
mod config;
mod ctx;
mod frame;
mod gate;
mod node;
mod tessellation;
mod transform;
mod uniforms;

pub use camera::{Camera, Projection};
pub use config::RendererConfig;
pub use ctx::{RenderCtx, RenderTarget};
pub use frame::{DrawOutcome, FrameOrchestrator};
pub use gate::FrameGate;
pub use node::{NodeResources, NodeSources, RenderNode, deformation_path};
pub use tessellation::{PatchFactors, Tessellator, edge_level, grid_indices, patch_factors};
pub use transform::{Transform, layout_scale, normal_matrix};
pub use uniforms::{FrameParams, NodeUniforms, ShapeParams};
