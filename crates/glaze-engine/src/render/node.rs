use std::num::NonZeroU64;

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::compose::{Composition, CompositionTargets, padded};
use crate::coords::Rect;
use crate::error::SetupError;
use crate::geometry::{GeometryBuffers, GeometryProvider};
use crate::path::{Outline, ParameterizedPath};
use crate::resources::ImageProvider;
use crate::scene::MeshDescriptor;

use super::config::RendererConfig;
use super::ctx::RenderCtx;
use super::tessellation::Tessellator;
use super::transform::Transform;
use super::uniforms::{FrameParams, NodeUniforms, ShapeParams};

/// Providers consulted when a node is set up.
#[derive(Clone, Copy)]
pub struct NodeSources<'a> {
    pub images: &'a dyn ImageProvider,
    pub geometry: &'a dyn GeometryProvider,
}

/// GPU state shared by every node of a renderer.
pub struct NodeResources {
    layout: wgpu::BindGroupLayout,
    corner: wgpu::Buffer,
    corner_count: u32,
    tessellator: Tessellator,
    polygon_mode: wgpu::PolygonMode,
    curve_samples: u32,
    slots: usize,
}

impl NodeResources {
    pub fn new(device: &wgpu::Device, config: &RendererConfig) -> Self {
        let layout = node_layout(device);

        let arc = ParameterizedPath::corner_arc(config.curve_samples);
        let corner = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glaze corner arc"),
            contents: bytemuck::cast_slice(&arc.to_gpu()),
            usage: wgpu::BufferUsages::STORAGE,
        });

        Self {
            layout,
            corner,
            corner_count: arc.len() as u32,
            tessellator: Tessellator::new(
                device,
                config.tessellation_level(),
                config.tessellation_density,
            ),
            polygon_mode: config.polygon_mode(),
            curve_samples: config.curve_samples,
            slots: config.frames_in_flight.max(1),
        }
    }

    #[inline]
    pub fn tessellator(&self) -> &Tessellator {
        &self.tessellator
    }
}

struct NodeSlot {
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// One mesh on the GPU: geometry, composition, transform.
///
/// Geometry, outline and pipeline are built in `setup` and kept for the
/// node's lifetime; `update` only rewrites transform and material arguments.
pub struct RenderNode {
    geometry: GeometryBuffers,
    composition: Composition,
    transform: Transform,
    shape: ShapeParams,
    tessellation: wgpu::BindGroup,
    slots: Vec<NodeSlot>,
}

impl RenderNode {
    pub fn setup(
        ctx: &RenderCtx<'_>,
        shared: &NodeResources,
        sources: NodeSources<'_>,
        descriptor: &MeshDescriptor,
    ) -> Result<Self, SetupError> {
        let label = descriptor.id.as_str();

        let loaded = descriptor.source.load(sources.geometry)?;
        let geometry = GeometryBuffers::upload(ctx.device, &loaded, label);

        let targets = CompositionTargets {
            node_layout: &shared.layout,
            polygon_mode: shared.polygon_mode,
        };
        let composition =
            Composition::compose(ctx, &targets, sources.images, &descriptor.materials)?;

        let outline = match &descriptor.shape {
            Some(shape) => deformation_path(&shape.outline, shared.curve_samples),
            None => ParameterizedPath::default(),
        };
        let outline_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} outline")),
            contents: &padded(bytemuck::cast_slice(&outline.to_gpu())),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let tessellation = shared.tessellator.bind(ctx.device, &geometry, label);

        let slots = (0..shared.slots)
            .map(|slot| {
                let uniforms = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("{label} uniforms #{slot}")),
                    size: std::mem::size_of::<NodeUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("{label} node bind group #{slot}")),
                    layout: &shared.layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniforms.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: geometry.vertices.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: geometry.indices.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 3,
                            resource: geometry.factors.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 4,
                            resource: outline_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 5,
                            resource: shared.corner.as_entire_binding(),
                        },
                    ],
                });
                NodeSlot { uniforms, bind_group }
            })
            .collect();

        log::debug!(
            "node {label}: {} patches, {} outline segments, functions [{}]",
            geometry.patch_count,
            outline.len(),
            composition.plan().function_names().join(", ")
        );

        Ok(Self {
            geometry,
            composition,
            transform: Transform::default(),
            shape: ShapeParams {
                depth: 0.0,
                bevel: 0.0,
                outline_count: outline.len() as u32,
                corner_count: shared.corner_count,
            },
            tessellation,
            slots,
        })
    }

    /// Re-lays the node in `viewport` and rewrites its material arguments.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        descriptor: &MeshDescriptor,
        viewport: Rect,
    ) -> Result<(), SetupError> {
        let layout = &descriptor.layout;
        let rect = layout.resolve(descriptor.bounds.unwrap_or(viewport));

        self.transform = Transform::from_layout(layout, self.geometry.bounding_size, rect);
        self.shape.depth = self.transform.local_depth(layout.depth);
        self.shape.bevel = descriptor.shape.as_ref().map_or(0.0, |s| s.bevel);

        self.composition.update(queue, &descriptor.materials)
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[inline]
    pub fn patch_count(&self) -> u32 {
        self.geometry.patch_count
    }

    /// Records the tessellation factor dispatch. The compute pipeline must be set.
    pub fn dispatch(&self, pass: &mut wgpu::ComputePass<'_>, tessellator: &Tessellator) {
        tessellator.dispatch(pass, &self.tessellation, self.geometry.patch_count);
    }

    /// Writes this frame's uniforms into `slot`.
    pub fn prepare(&self, queue: &wgpu::Queue, slot: usize, frame: &FrameParams, level: u32) {
        let Some(target) = self.slots.get(slot) else {
            return;
        };
        let uniforms = NodeUniforms::new(
            frame,
            self.transform.model_matrix(),
            self.shape,
            level,
            self.geometry.index_u16,
        );
        queue.write_buffer(&target.uniforms, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Issues the node's single instanced draw.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, slot: usize, tessellator: &Tessellator) {
        let Some(target) = self.slots.get(slot) else {
            return;
        };
        self.composition.activate(pass);
        pass.set_bind_group(0, &target.bind_group, &[]);
        tessellator.draw(pass, self.geometry.patch_count);
    }
}

/// Outline centered on its bounds and scaled into the unit square `[-0.5, 0.5]²`.
pub fn deformation_path(outline: &Outline, curve_samples: u32) -> ParameterizedPath {
    let Some(bounds) = outline.bounds() else {
        return ParameterizedPath::default();
    };
    let center = bounds.center();
    let centered = outline.map_points(|p| p - center);

    let mut path = ParameterizedPath::parameterize_with_samples(&centered, curve_samples);
    let inverse = |v: f32| if v > f32::EPSILON { 1.0 / v } else { 0.0 };
    path.multiply(Vec2::new(inverse(bounds.size.x), inverse(bounds.size.y)));
    path
}

fn node_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let storage = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glaze node bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<NodeUniforms>() as u64),
                },
                count: None,
            },
            storage(1),
            storage(2),
            storage(3),
            storage(4),
            storage(5),
        ],
    })
}
