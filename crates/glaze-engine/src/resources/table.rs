use crate::error::ResourceError;
use crate::material::TextureSource;

use super::library::{ImageProvider, TextureImage};

/// GPU textures loaded for one composition, in slot order.
///
/// Loading the same name twice returns the existing slot.
pub struct TextureTable<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    images: &'a dyn ImageProvider,
    names: Vec<String>,
    textures: Vec<wgpu::Texture>,
}

impl<'a> TextureTable<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        images: &'a dyn ImageProvider,
    ) -> Self {
        Self {
            device,
            queue,
            images,
            names: Vec::new(),
            textures: Vec::new(),
        }
    }

    pub fn len(&self) -> u32 {
        self.textures.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Consumes the table, returning the textures in slot order.
    pub fn into_textures(self) -> Vec<wgpu::Texture> {
        self.textures
    }

    fn upload(&self, name: &str, image: &TextureImage) -> wgpu::Texture {
        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.rgba(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width()),
                rows_per_image: Some(image.height()),
            },
            size,
        );

        texture
    }
}

/// Rejects images the device cannot hold in one 2D texture.
fn check_size(name: &str, image: &TextureImage, max: u32) -> Result<(), ResourceError> {
    if image.width() > max || image.height() > max {
        return Err(ResourceError::TooLarge {
            name: name.to_string(),
            width: image.width(),
            height: image.height(),
            max,
        });
    }
    Ok(())
}

impl TextureSource for TextureTable<'_> {
    fn load_texture(&mut self, name: &str) -> Result<u32, ResourceError> {
        if let Some(slot) = self.names.iter().position(|n| n == name) {
            return Ok(slot as u32);
        }

        let image = self.images.load_image(name)?;
        check_size(name, &image, self.device.limits().max_texture_dimension_2d)?;
        let texture = self.upload(name, &image);

        self.names.push(name.to_string());
        self.textures.push(texture);
        Ok(self.textures.len() as u32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_within_the_limit_pass() {
        let image = TextureImage::checker(64, 4, [0; 4], [255; 4]);
        assert_eq!(check_size("checker", &image, 64), Ok(()));
    }

    #[test]
    fn oversized_images_are_a_resource_error() {
        let image = TextureImage::checker(64, 4, [0; 4], [255; 4]);
        assert_eq!(
            check_size("huge", &image, 32),
            Err(ResourceError::TooLarge {
                name: "huge".to_string(),
                width: 64,
                height: 64,
                max: 32,
            })
        );
    }
}
