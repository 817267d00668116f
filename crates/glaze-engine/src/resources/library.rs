use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ResourceError;

/// Decoded RGBA8 image, display-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    /// Returns `None` when `rgba` does not hold exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self { width, height, rgba })
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Two-color checkerboard with `cells × cells` squares.
    pub fn checker(size: u32, cells: u32, a: [u8; 4], b: [u8; 4]) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let even = ((x / cell) + (y / cell)) % 2 == 0;
                rgba.extend_from_slice(if even { &a } else { &b });
            }
        }
        Self { width: size, height: size, rgba }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Resolves texture names to decoded images.
pub trait ImageProvider {
    fn load_image(&self, name: &str) -> Result<TextureImage, ResourceError>;
}

/// In-memory images plus an optional asset directory.
///
/// Lookup order: registered images, then `<root>/<name>` with the extensions
/// `""`, `.png`, `.jpg`, `.jpeg`.
#[derive(Debug, Default)]
pub struct TextureLibrary {
    root: Option<PathBuf>,
    images: HashMap<String, TextureImage>,
}

const EXTENSIONS: [&str; 4] = ["", ".png", ".jpg", ".jpeg"];

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            images: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, image: TextureImage) {
        self.images.insert(name.into(), image);
    }

    fn find_file(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_deref()?;
        EXTENSIONS
            .iter()
            .map(|ext| root.join(format!("{name}{ext}")))
            .find(|p| p.is_file())
    }
}

impl ImageProvider for TextureLibrary {
    fn load_image(&self, name: &str) -> Result<TextureImage, ResourceError> {
        if let Some(image) = self.images.get(name) {
            return Ok(image.clone());
        }

        let path = self
            .find_file(name)
            .ok_or_else(|| ResourceError::NotFound(name.to_string()))?;
        decode_file(name, &path)
    }
}

fn decode_file(name: &str, path: &Path) -> Result<TextureImage, ResourceError> {
    let img = image::open(path).map_err(|e| ResourceError::Decode {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded texture {name} ({width}x{height}) from {}", path.display());

    TextureImage::new(width, height, rgba.into_raw()).ok_or_else(|| ResourceError::Decode {
        name: name.to_string(),
        reason: "empty image".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_pixel_data() {
        assert!(TextureImage::new(2, 2, vec![0; 15]).is_none());
        assert!(TextureImage::new(0, 2, Vec::new()).is_none());
        assert!(TextureImage::new(2, 1, vec![0; 8]).is_some());
    }

    #[test]
    fn checker_alternates_cells() {
        let img = TextureImage::checker(4, 2, [255; 4], [0, 0, 0, 255]);
        assert_eq!(img.width(), 4);
        assert_eq!(&img.rgba()[0..4], &[255; 4]);
        // Pixel (2, 0) is in the second cell.
        assert_eq!(&img.rgba()[8..12], &[0, 0, 0, 255]);
    }

    #[test]
    fn registered_images_resolve_first() {
        let mut lib = TextureLibrary::new();
        lib.insert("white", TextureImage::solid([255; 4]));
        assert_eq!(lib.load_image("white").unwrap().rgba(), &[255; 4]);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let lib = TextureLibrary::with_root(std::env::temp_dir().join("glaze-no-such-dir"));
        let err = lib.load_image("missing").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(n) if n == "missing"));
    }

    #[test]
    fn undecodable_file_reports_decode_error() {
        let dir = std::env::temp_dir().join(format!("glaze-textures-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.png"), b"not a png").unwrap();

        let lib = TextureLibrary::with_root(&dir);
        let err = lib.load_image("broken").unwrap_err();
        assert!(matches!(err, ResourceError::Decode { .. }));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
