use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::geometry::GeometryBuffers;

const WORKGROUP_SIZE: u32 = 64;

/// Per-patch factors written by the compute pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PatchFactors {
    /// Bottom, right, top, left edges (corner order 0-1, 1-2, 3-2, 0-3).
    pub edge: [f32; 4],
    pub inside: [f32; 2],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TessellationParams {
    patch_count: u32,
    index_u16: u32,
    density: f32,
    max_level: f32,
}

/// Level for one edge: `length * density`, rounded up to a power of two,
/// clamped to `[1, max_level]`. Mirrors `level_for` in the compute shader.
pub fn edge_level(length: f32, density: f32, max_level: u32) -> f32 {
    let raw = (length * density).max(1.0);
    raw.log2().ceil().exp2().clamp(1.0, max_level as f32)
}

/// Factors of a quad patch from its corners.
pub fn patch_factors(corners: [Vec3; 4], density: f32, max_level: u32) -> PatchFactors {
    let [p0, p1, p2, p3] = corners;
    let edge = [
        edge_level(p0.distance(p1), density, max_level),
        edge_level(p1.distance(p2), density, max_level),
        edge_level(p3.distance(p2), density, max_level),
        edge_level(p0.distance(p3), density, max_level),
    ];
    PatchFactors {
        edge,
        inside: [edge[0].max(edge[2]), edge[1].max(edge[3])],
    }
}

/// Triangle list over a `(level + 1)²` vertex grid, two triangles per cell.
pub fn grid_indices(level: u32) -> Vec<u16> {
    let row = level + 1;
    let mut out = Vec::with_capacity((level * level * 6) as usize);
    for y in 0..level {
        for x in 0..level {
            let a = (y * row + x) as u16;
            let b = a + 1;
            let c = a + row as u16;
            let d = c + 1;
            out.extend_from_slice(&[a, b, d, a, d, c]);
        }
    }
    out
}

/// Compute pipeline for patch factors plus the shared grid drawn per patch.
pub struct Tessellator {
    pipeline: wgpu::ComputePipeline,
    layout: wgpu::BindGroupLayout,
    grid: wgpu::Buffer,
    grid_index_count: u32,
    level: u32,
    density: f32,
}

impl Tessellator {
    pub fn new(device: &wgpu::Device, level: u32, density: f32) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glaze tessellation shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tessellation.wgsl").into()),
        });

        let storage = |binding: u32, read_only: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::COMPUTE,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glaze tessellation bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                storage(1, true),
                storage(2, true),
                storage(3, false),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glaze tessellation pipeline layout"),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("glaze tessellation pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        let indices = grid_indices(level);
        let grid = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glaze patch grid"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            pipeline,
            layout,
            grid,
            grid_index_count: indices.len() as u32,
            level,
            density,
        }
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Binds one node's geometry for the factor pass.
    pub fn bind(&self, device: &wgpu::Device, geometry: &GeometryBuffers, label: &str) -> wgpu::BindGroup {
        let params = TessellationParams {
            patch_count: geometry.patch_count,
            index_u16: u32::from(geometry.index_u16),
            density: self.density,
            max_level: self.level as f32,
        };
        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} tessellation params")),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} tessellation bind group")),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params.as_entire_binding(),
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
            ],
        })
    }

    pub fn begin(&self, pass: &mut wgpu::ComputePass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }

    pub fn dispatch(&self, pass: &mut wgpu::ComputePass<'_>, bind_group: &wgpu::BindGroup, patch_count: u32) {
        pass.set_bind_group(0, bind_group, &[]);
        pass.dispatch_workgroups(patch_count.div_ceil(WORKGROUP_SIZE), 1, 1);
    }

    /// Draws `patch_count` instances of the grid with the bound node pipeline.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, patch_count: u32) {
        pass.set_index_buffer(self.grid.slice(..), wgpu::IndexFormat::Uint16);
        pass.draw_indexed(0..self.grid_index_count, 0, 0..patch_count);
    }
}
