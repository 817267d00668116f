use std::collections::HashMap;
use std::fmt;

use crate::error::GeometryError;

use super::loaded::LoadedGeometry;
use super::plane::plane;

/// Where a mesh's geometry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeometrySource {
    /// Procedural unit plane with `segments × segments` patches.
    Plane { segments: u32 },
    /// Named asset resolved by a [`GeometryProvider`].
    Asset(String),
}

impl GeometrySource {
    pub fn plane(segments: u32) -> Self {
        GeometrySource::Plane { segments }
    }

    pub fn asset(name: impl Into<String>) -> Self {
        GeometrySource::Asset(name.into())
    }

    /// Produces validated geometry.
    pub fn load(&self, provider: &dyn GeometryProvider) -> Result<LoadedGeometry, GeometryError> {
        let geometry = match self {
            GeometrySource::Plane { segments } => plane(*segments),
            GeometrySource::Asset(name) => provider.load_geometry(name)?,
        };
        geometry.validate()?;
        Ok(geometry)
    }
}

impl fmt::Display for GeometrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometrySource::Plane { segments } => write!(f, "plane({segments})"),
            GeometrySource::Asset(name) => write!(f, "asset({name})"),
        }
    }
}

/// Resolves named geometry assets.
pub trait GeometryProvider {
    fn load_geometry(&self, name: &str) -> Result<LoadedGeometry, GeometryError>;
}

/// In-memory asset table.
#[derive(Debug, Default)]
pub struct GeometryLibrary {
    assets: HashMap<String, LoadedGeometry>,
}

impl GeometryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, geometry: LoadedGeometry) {
        self.assets.insert(name.into(), geometry);
    }
}

impl GeometryProvider for GeometryLibrary {
    fn load_geometry(&self, name: &str) -> Result<LoadedGeometry, GeometryError> {
        self.assets
            .get(name)
            .cloned()
            .ok_or_else(|| GeometryError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Indices;

    #[test]
    fn planes_need_no_provider_entry() {
        let library = GeometryLibrary::new();
        let g = GeometrySource::plane(2).load(&library).unwrap();
        assert_eq!(g.patch_count(), 4);
    }

    #[test]
    fn missing_asset_is_not_found() {
        let library = GeometryLibrary::new();
        let err = GeometrySource::asset("teapot").load(&library).unwrap_err();
        assert_eq!(err, GeometryError::NotFound("teapot".into()));
    }

    #[test]
    fn assets_are_validated() {
        let mut library = GeometryLibrary::new();
        let mut broken = plane(1);
        broken.indices = Indices::U16(vec![0, 1]);
        library.insert("broken", broken);
        assert!(matches!(
            GeometrySource::asset("broken").load(&library),
            Err(GeometryError::Malformed(_))
        ));
    }
}
