use crate::error::ResourceError;

use super::Material;
use super::function::{MaterialFunction, TextureSource};

/// Image mapped with the mesh's own uv coordinates.
#[derive(Debug, Clone)]
pub struct TextureFunction {
    image: ImageBinding,
}

/// Image sampled by view-space normal (material capture).
#[derive(Debug, Clone)]
pub struct MatcapFunction {
    image: ImageBinding,
}

/// Named texture and, once loaded, its slot in the composition.
#[derive(Debug, Clone)]
struct ImageBinding {
    name: String,
    slot: Option<u32>,
}

impl ImageBinding {
    fn new(name: String) -> Self {
        Self { name, slot: None }
    }

    fn load(&mut self, textures: &mut dyn TextureSource) -> Result<(), ResourceError> {
        if self.slot.is_none() {
            self.slot = Some(textures.load_texture(&self.name)?);
        }
        Ok(())
    }

    fn write(&self, out: &mut [u8]) {
        // Unloaded bindings point at slot 0; the composer never writes before loading.
        let slot = self.slot.unwrap_or(0);
        out[..4].copy_from_slice(&slot.to_le_bytes());
    }
}

impl TextureFunction {
    pub const NAME: &'static str = "texture_material";

    pub fn new(name: String) -> Self {
        Self { image: ImageBinding::new(name) }
    }

    pub fn slot(&self) -> Option<u32> {
        self.image.slot
    }
}

impl MatcapFunction {
    pub const NAME: &'static str = "matcap_material";

    pub fn new(name: String) -> Self {
        Self { image: ImageBinding::new(name) }
    }

    pub fn slot(&self) -> Option<u32> {
        self.image.slot
    }
}

impl MaterialFunction for TextureFunction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn argument_size(&self) -> usize {
        std::mem::size_of::<u32>()
    }

    fn wgsl(&self) -> &'static str {
        include_str!("shaders/texture.wgsl")
    }

    fn load_resources(&mut self, textures: &mut dyn TextureSource) -> Result<(), ResourceError> {
        self.image.load(textures)
    }

    fn write_arguments(&self, out: &mut [u8]) {
        self.image.write(out);
    }

    fn update(&mut self, _material: &Material) {}
}

impl MaterialFunction for MatcapFunction {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn argument_size(&self) -> usize {
        std::mem::size_of::<u32>()
    }

    fn wgsl(&self) -> &'static str {
        include_str!("shaders/matcap.wgsl")
    }

    fn load_resources(&mut self, textures: &mut dyn TextureSource) -> Result<(), ResourceError> {
        self.image.load(textures)
    }

    fn write_arguments(&self, out: &mut [u8]) {
        self.image.write(out);
    }

    fn update(&mut self, _material: &Material) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slots(Vec<String>);

    impl TextureSource for Slots {
        fn load_texture(&mut self, name: &str) -> Result<u32, ResourceError> {
            if name == "missing" {
                return Err(ResourceError::NotFound(name.to_string()));
            }
            self.0.push(name.to_string());
            Ok(self.0.len() as u32 - 1)
        }
    }

    #[test]
    fn loaded_slot_is_written() {
        let mut source = Slots(vec!["a".into(), "b".into()]);
        let mut f = MatcapFunction::new("clay".into());
        f.load_resources(&mut source).unwrap();
        assert_eq!(f.slot(), Some(2));

        let mut out = [0u8; 4];
        f.write_arguments(&mut out);
        assert_eq!(u32::from_le_bytes(out), 2);
    }

    #[test]
    fn loading_twice_keeps_first_slot() {
        let mut source = Slots(Vec::new());
        let mut f = TextureFunction::new("wood".into());
        f.load_resources(&mut source).unwrap();
        f.load_resources(&mut source).unwrap();
        assert_eq!(source.0.len(), 1);
    }

    #[test]
    fn missing_texture_surfaces_error() {
        let mut f = TextureFunction::new("missing".into());
        let err = f.load_resources(&mut Slots(Vec::new())).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(name) if name == "missing"));
        assert_eq!(f.slot(), None);
    }
}
