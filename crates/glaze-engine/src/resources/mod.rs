//! External resources: texture images and their GPU upload.

mod library;
mod table;

pub use library::{ImageProvider, TextureImage, TextureLibrary};
pub use table::TextureTable;
