/// A single acquired frame.
///
/// Holding the surface texture prevents acquisition of subsequent frames, so the
/// frame is submitted (or dropped) within the draw call that acquired it.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    /// Depth attachment matching the current surface size.
    pub depth_view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
