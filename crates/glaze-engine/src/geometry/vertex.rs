use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Control point of a quad patch, as read by the vertex and compute stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 4],
    pub normal: [f32; 4],
    pub uv: [f32; 2],
    _pad: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.extend(1.0).to_array(),
            normal: normal.extend(0.0).to_array(),
            uv: uv.to_array(),
            _pad: [0.0; 2],
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }
}

/// Patch index list; the element type is kept on the GPU.
#[derive(Debug, Clone, PartialEq)]
pub enum Indices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl Indices {
    pub fn len(&self) -> usize {
        match self {
            Indices::U16(v) => v.len(),
            Indices::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_u16(&self) -> bool {
        matches!(self, Indices::U16(_))
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = u32> + '_> {
        match self {
            Indices::U16(v) => Box::new(v.iter().map(|&i| u32::from(i))),
            Indices::U32(v) => Box::new(v.iter().copied()),
        }
    }

    /// Raw bytes padded to a whole number of 32-bit words.
    ///
    /// 16-bit indices stay packed two per word; the shaders unpack them.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = match self {
            Indices::U16(v) => bytemuck::cast_slice(v).to_vec(),
            Indices::U32(v) => bytemuck::cast_slice(v).to_vec(),
        };
        bytes.resize(bytes.len().div_ceil(4) * 4, 0);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_48_bytes() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), 48);
    }

    #[test]
    fn odd_u16_lists_are_padded_to_words() {
        let indices = Indices::U16(vec![1, 2, 3]);
        let bytes = indices.to_bytes();
        assert_eq!(bytes.len(), 8);
        let words: &[u32] = bytemuck::cast_slice(&bytes);
        assert_eq!(words[0], 1 | (2 << 16));
        assert_eq!(words[1], 3);
    }

    #[test]
    fn iteration_widens_u16() {
        let indices = Indices::U16(vec![7, 65535]);
        assert_eq!(indices.iter().collect::<Vec<_>>(), vec![7, 65535]);
        assert!(indices.is_u16());
    }
}
