use std::fmt;

use crate::error::ResourceError;

use super::Material;

/// Loads named textures for one composition.
///
/// Returns the texture's slot, the index the shader passes to
/// `sample_material_texture`.
pub trait TextureSource {
    fn load_texture(&mut self, name: &str) -> Result<u32, ResourceError>;
}

/// GPU-side shading behavior of a material.
///
/// A function is identified by its `name`, which is also the WGSL function the
/// composer links and dispatches to. Instances carry their own arguments; two
/// materials with the same name share the linked code but not the arguments.
pub trait MaterialFunction: fmt::Debug {
    /// WGSL function name, e.g. `color_material`.
    fn name(&self) -> &'static str;

    /// Size in bytes of the argument block written by `write_arguments`.
    ///
    /// Must be a multiple of 4; the shader reads arguments as 32-bit words.
    fn argument_size(&self) -> usize;

    /// WGSL source defining `fn <name>(input: MaterialInput, args: u32) -> vec4<f32>`.
    fn wgsl(&self) -> &'static str;

    /// Loads external resources. Called once, before the first `write_arguments`.
    fn load_resources(&mut self, textures: &mut dyn TextureSource) -> Result<(), ResourceError> {
        let _ = textures;
        Ok(())
    }

    /// Writes the argument block into `out` (`out.len() >= argument_size()`).
    fn write_arguments(&self, out: &mut [u8]);

    /// Refreshes scalar arguments from a new value of the same material.
    ///
    /// Loaded resources are kept.
    fn update(&mut self, material: &Material);
}

/// Copies a `Pod` argument struct to the front of `out`.
pub(crate) fn write_pod<T: bytemuck::Pod>(out: &mut [u8], value: &T) {
    let bytes = bytemuck::bytes_of(value);
    out[..bytes.len()].copy_from_slice(bytes);
}
