/// Startup parameters for `Gpu::new`.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one exists.
    ///
    /// Materials output linear color and rely on the encode at store.
    pub prefer_srgb: bool,

    pub present_mode: wgpu::PresentMode,

    /// Preferred alpha mode; falls back to the first supported one.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device must be created with. Startup fails if the adapter lacks any.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint passed to the surface configuration.
    pub desired_maximum_frame_latency: u32,

    /// Format of the depth attachment recreated on every resize.
    pub depth_format: wgpu::TextureFormat,
}

impl GpuInit {
    /// Adds `features` to the required set.
    pub fn with_features(mut self, features: wgpu::Features) -> Self {
        self.required_features |= features;
        self
    }

    pub fn with_depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = format;
        self
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            depth_format: wgpu::TextureFormat::Depth32Float,
        }
    }
}
