use bytemuck::{Pod, Zeroable};

use crate::paint::ColorRgb;

use super::Material;
use super::function::{MaterialFunction, write_pod};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ColorArguments {
    color: [f32; 3],
    _pad: f32,
}

/// Flat linear color.
#[derive(Debug, Clone)]
pub struct ColorFunction {
    color: [f32; 3],
}

impl ColorFunction {
    pub const NAME: &'static str = "color_material";

    pub fn new(color: ColorRgb) -> Self {
        Self {
            color: color.srgb_to_linear().to_f32_array(),
        }
    }
}

impl MaterialFunction for ColorFunction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn argument_size(&self) -> usize {
        std::mem::size_of::<ColorArguments>()
    }

    fn wgsl(&self) -> &'static str {
        include_str!("shaders/color.wgsl")
    }

    fn write_arguments(&self, out: &mut [u8]) {
        write_pod(out, &ColorArguments { color: self.color, _pad: 0.0 });
    }

    fn update(&mut self, material: &Material) {
        if let Material::Color { color } = material.base() {
            self.color = color.srgb_to_linear().to_f32_array();
        }
    }
}
