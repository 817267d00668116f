use bytemuck::{Pod, Zeroable};

use crate::paint::ColorRgb;

use super::Material;
use super::function::{MaterialFunction, write_pod};

/// Word layout read by `fresnel.wgsl`: color at 0..3, then intensity, scale, bias.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct FresnelArguments {
    color: [f32; 3],
    intensity: f32,
    scale: f32,
    bias: f32,
    _pad: [f32; 2],
}

/// Rim light: `bias + scale * (1 + dot(I, N))^intensity`.
#[derive(Debug, Clone)]
pub struct FresnelFunction {
    args: FresnelArguments,
}

impl FresnelFunction {
    pub const NAME: &'static str = "fresnel_material";

    pub fn new(color: ColorRgb, bias: f64, scale: f64, intensity: f64) -> Self {
        Self {
            args: FresnelArguments {
                color: color.srgb_to_linear().to_f32_array(),
                intensity: intensity as f32,
                scale: scale as f32,
                bias: bias as f32,
                _pad: [0.0; 2],
            },
        }
    }
}

impl MaterialFunction for FresnelFunction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn argument_size(&self) -> usize {
        std::mem::size_of::<FresnelArguments>()
    }

    fn wgsl(&self) -> &'static str {
        include_str!("shaders/fresnel.wgsl")
    }

    fn write_arguments(&self, out: &mut [u8]) {
        write_pod(out, &self.args);
    }

    fn update(&mut self, material: &Material) {
        if let Material::Fresnel {
            color,
            bias,
            scale,
            intensity,
        } = material.base()
        {
            *self = Self::new(*color, *bias, *scale, *intensity);
        }
    }
}
