use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::transform::normal_matrix;

/// Per-draw uniform block, group 0 binding 0.
///
/// `normal_matrix` is stored as three padded columns (WGSL `mat3x3<f32>`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct NodeUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 3],
    pub time: f32,
    pub depth: f32,
    pub bevel: f32,
    pub max_level: f32,
    pub outline_count: u32,
    pub corner_count: u32,
    pub index_u16: u32,
    _pad: u32,
}

/// Per-frame values shared by every node.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParams {
    pub view_projection: Mat4,
    pub view: Mat4,
    /// Seconds since the renderer started.
    pub time: f32,
}

/// Shape parameters that travel with the matrices.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShapeParams {
    pub depth: f32,
    pub bevel: f32,
    pub outline_count: u32,
    pub corner_count: u32,
}

impl NodeUniforms {
    pub fn new(
        frame: &FrameParams,
        model: Mat4,
        shape: ShapeParams,
        max_level: u32,
        index_u16: bool,
    ) -> Self {
        let normal = normal_matrix(model);
        Self {
            mvp: (frame.view_projection * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            normal_matrix: [
                normal.x_axis.extend(0.0).to_array(),
                normal.y_axis.extend(0.0).to_array(),
                normal.z_axis.extend(0.0).to_array(),
            ],
            time: frame.time,
            depth: shape.depth,
            bevel: shape.bevel,
            max_level: max_level as f32,
            outline_count: shape.outline_count,
            corner_count: shape.corner_count,
            index_u16: u32::from(index_u16),
            _pad: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(std::mem::size_of::<NodeUniforms>(), 272);
        assert_eq!(std::mem::offset_of!(NodeUniforms, normal_matrix), 192);
        assert_eq!(std::mem::offset_of!(NodeUniforms, time), 240);
        assert_eq!(std::mem::offset_of!(NodeUniforms, outline_count), 256);
    }

    #[test]
    fn mvp_is_view_projection_times_model() {
        let frame = FrameParams {
            view_projection: Mat4::from_scale(Vec3::splat(2.0)),
            view: Mat4::IDENTITY,
            time: 0.5,
        };
        let model = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let u = NodeUniforms::new(&frame, model, ShapeParams::default(), 16, true);
        assert_eq!(u.mvp[3][0], 2.0);
        assert_eq!(u.index_u16, 1);
        assert_eq!(u.max_level, 16.0);
        assert_eq!(u.normal_matrix[1], [0.0, 1.0, 0.0, 0.0]);
    }
}
