use glam::{Vec2, Vec3};

use super::loaded::LoadedGeometry;
use super::vertex::{Indices, MeshVertex};

/// Unit square in XY centered on the origin, split into `segments²` quad patches.
///
/// Each patch lists its corners as (0,0), (1,0), (1,1), (0,1) in grid space;
/// +Y grows with `v`, which is down in layout space. Normals face +Z.
pub fn plane(segments: u32) -> LoadedGeometry {
    let n = segments.max(1);
    let row = n + 1;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for y in 0..row {
        for x in 0..row {
            let uv = Vec2::new(x as f32 / n as f32, y as f32 / n as f32);
            let position = (uv - Vec2::splat(0.5)).extend(0.0);
            vertices.push(MeshVertex::new(position, Vec3::Z, uv));
        }
    }

    let mut indices = Vec::with_capacity((n * n * 4) as usize);
    for y in 0..n {
        for x in 0..n {
            let i = y * row + x;
            indices.extend_from_slice(&[i, i + 1, i + row + 1, i + row]);
        }
    }

    let indices = if vertices.len() <= usize::from(u16::MAX) + 1 {
        Indices::U16(indices.into_iter().map(|i| i as u16).collect())
    } else {
        Indices::U32(indices)
    };

    LoadedGeometry::from_parts(vertices, indices)
}
