use crate::paint::ColorRgb;
use crate::path::DEFAULT_CURVE_SAMPLES;

/// Renderer tuning. Defaults suit a desktop window at 1x-2x scale.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Frames allowed between submission and GPU completion.
    pub frames_in_flight: usize,
    /// Chord samples per cubic when measuring outline length.
    pub curve_samples: u32,
    /// Upper bound of a patch's tessellation level; a power of two.
    pub max_tessellation_level: u32,
    /// Tessellation level per unit of object-space edge length.
    pub tessellation_density: f32,
    /// Display-encoded clear color; converted to linear before the pass.
    pub clear_color: ColorRgb,
    /// Clear coverage. `0.0` leaves the surface transparent so meshes composite
    /// over whatever the host shows behind it.
    pub clear_alpha: f64,
    pub depth_format: wgpu::TextureFormat,
    /// Draws patch edges only; needs `Features::POLYGON_MODE_LINE`.
    pub wireframe: bool,
}

impl RendererConfig {
    /// `max_tessellation_level` rounded to a power of two in `[1, 64]`.
    pub fn tessellation_level(&self) -> u32 {
        self.max_tessellation_level.clamp(1, 64).next_power_of_two()
    }

    /// Device features this configuration depends on.
    pub fn required_features(&self) -> wgpu::Features {
        if self.wireframe {
            wgpu::Features::POLYGON_MODE_LINE
        } else {
            wgpu::Features::empty()
        }
    }

    pub(crate) fn polygon_mode(&self) -> wgpu::PolygonMode {
        if self.wireframe {
            wgpu::PolygonMode::Line
        } else {
            wgpu::PolygonMode::Fill
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            frames_in_flight: 3,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            max_tessellation_level: 16,
            tessellation_density: 32.0,
            clear_color: ColorRgb::black(),
            clear_alpha: 0.0,
            depth_format: wgpu::TextureFormat::Depth32Float,
            wireframe: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_a_clamped_power_of_two() {
        let mut config = RendererConfig::default();
        assert_eq!(config.tessellation_level(), 16);
        config.max_tessellation_level = 12;
        assert_eq!(config.tessellation_level(), 16);
        config.max_tessellation_level = 0;
        assert_eq!(config.tessellation_level(), 1);
        config.max_tessellation_level = 1000;
        assert_eq!(config.tessellation_level(), 64);
    }

    #[test]
    fn wireframe_needs_line_mode() {
        let config = RendererConfig {
            wireframe: true,
            ..Default::default()
        };
        assert!(config.required_features().contains(wgpu::Features::POLYGON_MODE_LINE));
        assert_eq!(config.polygon_mode(), wgpu::PolygonMode::Line);
    }
}
