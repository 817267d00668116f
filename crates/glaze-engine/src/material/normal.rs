use super::Material;
use super::function::MaterialFunction;

/// Visualizes world-space normals. Takes no arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalFunction;

impl NormalFunction {
    pub const NAME: &'static str = "normal_material";
}

impl MaterialFunction for NormalFunction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn argument_size(&self) -> usize {
        0
    }

    fn wgsl(&self) -> &'static str {
        include_str!("shaders/normal.wgsl")
    }

    fn write_arguments(&self, _out: &mut [u8]) {}

    fn update(&mut self, _material: &Material) {}
}
