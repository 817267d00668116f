use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::compose::padded;
use crate::render::PatchFactors;

use super::loaded::LoadedGeometry;

/// GPU-resident patch geometry of one node. Built once, never replaced.
pub struct GeometryBuffers {
    pub vertices: wgpu::Buffer,
    pub indices: wgpu::Buffer,
    /// Written by the tessellation compute pass every frame.
    pub factors: wgpu::Buffer,
    pub patch_count: u32,
    pub index_u16: bool,
    pub bounding_size: Vec3,
}

impl GeometryBuffers {
    pub fn upload(device: &wgpu::Device, geometry: &LoadedGeometry, label: &str) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} control points")),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} patch indices")),
            contents: &padded(&geometry.indices.to_bytes()),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let patch_count = geometry.patch_count();
        let factors = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} patch factors")),
            size: u64::from(patch_count.max(1)) * std::mem::size_of::<PatchFactors>() as u64,
            usage: wgpu::BufferUsages::STORAGE,
            mapped_at_creation: false,
        });

        Self {
            vertices,
            indices,
            factors,
            patch_count,
            index_u16: geometry.indices.is_u16(),
            bounding_size: geometry.bounding_size,
        }
    }
}
