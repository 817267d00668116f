use crate::paint::ColorRgb;

use super::color::ColorFunction;
use super::fresnel::FresnelFunction;
use super::function::MaterialFunction;
use super::normal::NormalFunction;
use super::texture::{MatcapFunction, TextureFunction};

/// How a material's output combines with the materials before it.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    #[default]
    Normal = 0,
    Multiply = 1,
    Screen = 2,
    Overlay = 3,
}

impl BlendMode {
    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }
}

/// Shading behavior attached to a mesh.
///
/// Materials are plain values. A mesh carries an ordered list of them and the
/// composer turns the list into one pipeline. Colors are display-encoded (sRGB).
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Color {
        color: ColorRgb,
    },
    Fresnel {
        color: ColorRgb,
        bias: f64,
        scale: f64,
        intensity: f64,
    },
    Texture {
        name: String,
    },
    Matcap {
        name: String,
    },
    Normal,
    /// Decorator overriding blend mode and opacity of `base`.
    Blended {
        base: Box<Material>,
        blend: BlendMode,
        opacity: f64,
    },
}

impl Material {
    pub fn color(color: ColorRgb) -> Self {
        Material::Color { color }
    }

    /// Fresnel rim with `bias = 0` and `scale = 1`.
    pub fn fresnel(color: ColorRgb, intensity: f64) -> Self {
        Material::Fresnel {
            color,
            bias: 0.0,
            scale: 1.0,
            intensity,
        }
    }

    pub fn texture(name: impl Into<String>) -> Self {
        Material::Texture { name: name.into() }
    }

    pub fn matcap(name: impl Into<String>) -> Self {
        Material::Matcap { name: name.into() }
    }

    pub fn normal() -> Self {
        Material::Normal
    }

    /// Wraps the material with a blend mode and opacity.
    ///
    /// The shading function is unchanged; only the descriptor fields differ.
    pub fn blend(self, blend: BlendMode, opacity: f64) -> Self {
        Material::Blended {
            base: Box::new(self),
            blend,
            opacity,
        }
    }

    /// Innermost material, skipping every blend wrapper.
    pub fn base(&self) -> &Material {
        match self {
            Material::Blended { base, .. } => base.base(),
            other => other,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Material::Blended { opacity, .. } => *opacity,
            _ => 1.0,
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        match self {
            Material::Blended { blend, .. } => *blend,
            _ => BlendMode::Normal,
        }
    }

    /// Name of the shading function this material links into a composition.
    pub fn function_name(&self) -> &'static str {
        match self.base() {
            Material::Color { .. } => ColorFunction::NAME,
            Material::Fresnel { .. } => FresnelFunction::NAME,
            Material::Texture { .. } => TextureFunction::NAME,
            Material::Matcap { .. } => MatcapFunction::NAME,
            Material::Normal => NormalFunction::NAME,
            Material::Blended { base, .. } => base.function_name(),
        }
    }

    pub fn make_function(&self) -> Box<dyn MaterialFunction> {
        match self.base() {
            Material::Color { color } => Box::new(ColorFunction::new(*color)),
            Material::Fresnel {
                color,
                bias,
                scale,
                intensity,
            } => Box::new(FresnelFunction::new(*color, *bias, *scale, *intensity)),
            Material::Texture { name } => Box::new(TextureFunction::new(name.clone())),
            Material::Matcap { name } => Box::new(MatcapFunction::new(name.clone())),
            Material::Normal => Box::new(NormalFunction),
            Material::Blended { base, .. } => base.make_function(),
        }
    }
}

/// Material list used when a mesh declares none.
pub fn default_materials() -> Vec<Material> {
    vec![Material::color(ColorRgb::black())]
}
