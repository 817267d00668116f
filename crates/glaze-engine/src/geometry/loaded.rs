use glam::Vec3;

use crate::error::GeometryError;

use super::vertex::{Indices, MeshVertex};

/// Indices per patch (one quad).
pub const PATCH_SIZE: usize = 4;

/// Decoded geometry ready for upload: quad patches over a control point list.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedGeometry {
    /// Natural size of the mesh, used by the layout scale policy.
    pub bounding_size: Vec3,
    pub vertices: Vec<MeshVertex>,
    pub indices: Indices,
}

impl LoadedGeometry {
    /// Builds geometry and derives `bounding_size` from the vertex positions.
    pub fn from_parts(vertices: Vec<MeshVertex>, indices: Indices) -> Self {
        let bounding_size = bounds(&vertices);
        Self {
            bounding_size,
            vertices,
            indices,
        }
    }

    #[inline]
    pub fn patch_count(&self) -> u32 {
        (self.indices.len() / PATCH_SIZE) as u32
    }

    /// Rejects geometry the patch pipeline cannot draw.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() {
            return Err(GeometryError::Malformed("no vertices".into()));
        }
        if self.indices.is_empty() {
            return Err(GeometryError::Malformed("no patches".into()));
        }
        if self.indices.len() % PATCH_SIZE != 0 {
            return Err(GeometryError::Malformed(format!(
                "{} indices do not form quad patches",
                self.indices.len()
            )));
        }
        let count = self.vertices.len() as u32;
        if let Some(bad) = self.indices.iter().find(|&i| i >= count) {
            return Err(GeometryError::Malformed(format!(
                "index {bad} out of range for {count} vertices"
            )));
        }
        Ok(())
    }
}

fn bounds(vertices: &[MeshVertex]) -> Vec3 {
    let mut iter = vertices.iter().map(MeshVertex::position);
    let Some(first) = iter.next() else {
        return Vec3::ZERO;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    max - min
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn vertex(x: f32, y: f32) -> MeshVertex {
        MeshVertex::new(Vec3::new(x, y, 0.0), Vec3::Z, Vec2::ZERO)
    }

    fn quad() -> Vec<MeshVertex> {
        vec![vertex(0.0, 0.0), vertex(2.0, 0.0), vertex(2.0, 1.0), vertex(0.0, 1.0)]
    }

    #[test]
    fn bounding_size_spans_positions() {
        let g = LoadedGeometry::from_parts(quad(), Indices::U16(vec![0, 1, 2, 3]));
        assert_eq!(g.bounding_size, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(g.patch_count(), 1);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn empty_geometry_is_malformed() {
        let g = LoadedGeometry::from_parts(Vec::new(), Indices::U32(Vec::new()));
        assert!(matches!(g.validate(), Err(GeometryError::Malformed(_))));
    }

    #[test]
    fn partial_patch_is_malformed() {
        let g = LoadedGeometry::from_parts(quad(), Indices::U32(vec![0, 1, 2]));
        assert!(matches!(g.validate(), Err(GeometryError::Malformed(_))));
    }

    #[test]
    fn out_of_range_index_is_malformed() {
        let g = LoadedGeometry::from_parts(quad(), Indices::U32(vec![0, 1, 2, 4]));
        let err = g.validate().unwrap_err();
        assert!(err.to_string().contains("index 4"));
    }
}
