use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::coords::Rect;
use crate::scene::{ContentMode, LayoutOptions};

const DEGENERATE_DETERMINANT: f32 = 1e-12;

#[inline]
fn safe_div(a: f32, b: f32) -> f32 {
    if b.abs() <= f32::EPSILON { 0.0 } else { a / b }
}

/// Scale that lays geometry of `natural` size into a `target` rectangle.
///
/// Non-resizable content gets zero. Otherwise each axis is `target / natural`,
/// then the aspect policy rewrites one axis from the other. An explicit ratio
/// wins over the geometry's own aspect. Z follows the smaller planar axis.
pub fn layout_scale(layout: &LayoutOptions, natural: Vec3, target: Vec2) -> Vec3 {
    if !layout.resizable {
        return Vec3::ZERO;
    }

    let mut scale = Vec2::new(safe_div(target.x, natural.x), safe_div(target.y, natural.y));

    if let Some(aspect) = layout.aspect_ratio {
        let mesh_ratio = safe_div(natural.x, natural.y);
        let target_ratio = aspect.ratio.unwrap_or(mesh_ratio);
        let wider = target_ratio > mesh_ratio;

        match (aspect.mode, wider) {
            (ContentMode::Fit, true) | (ContentMode::Fill, false) => {
                scale.x = scale.y * safe_div(mesh_ratio, target_ratio);
            }
            (ContentMode::Fit, false) | (ContentMode::Fill, true) => {
                scale.y = scale.x * safe_div(target_ratio, mesh_ratio);
            }
        }
    }

    Vec3::new(scale.x, scale.y, scale.x.min(scale.y))
}

/// Node placement in layout space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Places geometry of `natural` size in the resolved `rect`.
    pub fn from_layout(layout: &LayoutOptions, natural: Vec3, rect: Rect) -> Self {
        Self {
            position: rect.center().extend(0.0),
            rotation: layout.rotation.quat(),
            scale: layout_scale(layout, natural, rect.size),
        }
    }

    /// Local-space z that extrudes `depth` layout points once the model scale applies.
    #[inline]
    pub fn local_depth(&self, depth: f32) -> f32 {
        safe_div(depth, self.scale.z)
    }

    /// `scale * rotation`, translated to `position`.
    pub fn model_matrix(&self) -> Mat4 {
        let mut m = Mat4::from_scale(self.scale) * Mat4::from_quat(self.rotation);
        m.w_axis = self.position.extend(1.0);
        m
    }
}

/// Inverse-transpose of the upper 3×3; identity for degenerate matrices.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model);
    if m.determinant().abs() < DEGENERATE_DETERMINANT {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::AspectRatio;
    use approx::assert_relative_eq;

    fn resizable(aspect: Option<AspectRatio>) -> LayoutOptions {
        LayoutOptions {
            resizable: true,
            aspect_ratio: aspect,
            ..Default::default()
        }
    }

    fn fit(ratio: Option<f32>) -> Option<AspectRatio> {
        Some(AspectRatio { ratio, mode: ContentMode::Fit })
    }

    fn fill(ratio: Option<f32>) -> Option<AspectRatio> {
        Some(AspectRatio { ratio, mode: ContentMode::Fill })
    }

    #[test]
    fn fit_with_matching_aspect_is_uniform() {
        let s = layout_scale(
            &resizable(fit(None)),
            Vec3::new(100.0, 50.0, 0.0),
            Vec2::new(200.0, 100.0),
        );
        assert_relative_eq!(s.x, 2.0);
        assert_relative_eq!(s.y, 2.0);
        assert_relative_eq!(s.z, 2.0);
    }

    #[test]
    fn not_resizable_is_zero() {
        let layout = LayoutOptions::default();
        let s = layout_scale(&layout, Vec3::ONE, Vec2::new(10.0, 10.0));
        assert_eq!(s, Vec3::ZERO);
    }

    #[test]
    fn without_aspect_axes_stretch_independently() {
        let s = layout_scale(&resizable(None), Vec3::new(10.0, 10.0, 1.0), Vec2::new(30.0, 20.0));
        assert_eq!(s, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn explicit_ratio_overrides_natural_aspect() {
        let natural = Vec3::new(100.0, 50.0, 0.0);
        let target = Vec2::new(200.0, 200.0);

        let s = layout_scale(&resizable(fit(Some(1.0))), natural, target);
        assert_relative_eq!(s.x, 2.0);
        assert_relative_eq!(s.y, 1.0);

        let s = layout_scale(&resizable(fill(Some(1.0))), natural, target);
        assert_relative_eq!(s.x, 8.0);
        assert_relative_eq!(s.y, 4.0);
        assert_relative_eq!(s.z, 4.0);
    }

    #[test]
    fn fit_and_fill_yield_opposite_axes() {
        let natural = Vec3::new(1.0, 1.0, 0.0);
        let target = Vec2::new(4.0, 2.0);

        let s = layout_scale(&resizable(fit(Some(2.0))), natural, target);
        assert_relative_eq!(s.x, 1.0);
        assert_relative_eq!(s.y, 2.0);

        let s = layout_scale(&resizable(fill(Some(2.0))), natural, target);
        assert_relative_eq!(s.x, 4.0);
        assert_relative_eq!(s.y, 8.0);
    }

    #[test]
    fn zero_natural_size_does_not_divide_by_zero() {
        let s = layout_scale(&resizable(fit(None)), Vec3::ZERO, Vec2::new(10.0, 10.0));
        assert!(s.is_finite());
    }

    #[test]
    fn model_places_center_and_scales() {
        let layout = resizable(None);
        let t = Transform::from_layout(&layout, Vec3::ONE, Rect::new(10.0, 20.0, 4.0, 6.0));
        let m = t.model_matrix();
        let corner = m.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert_relative_eq!(corner.x, 14.0);
        assert_relative_eq!(corner.y, 26.0);
    }

    #[test]
    fn extruded_face_stays_inside_the_depth_range() {
        use crate::render::{Camera, Projection};
        use crate::scene::Rotation;

        let (w, h) = (1280.0, 720.0);
        let layout = LayoutOptions {
            resizable: true,
            aspect_ratio: fit(Some(1.6)),
            rotation: Rotation::new(0.4, Vec3::Y),
            depth: 24.0,
            ..Default::default()
        };
        let rect = Rect::new(32.0, 32.0, w * 0.5 - 64.0, h - 64.0);
        let t = Transform::from_layout(&layout, Vec3::new(1.0, 1.0, 0.0), rect);

        let z = t.local_depth(layout.depth);
        let model = t.model_matrix();
        let top = model.transform_point3(Vec3::new(0.0, 0.0, z)) - t.position;
        assert_relative_eq!(top.length(), 24.0, epsilon = 1e-3);

        let clip = Projection::new(w, h, 0.1, 2000.0).matrix()
            * Camera::for_layout(w, h, 1000.0).view_matrix()
            * model;
        for corner in [Vec3::new(-0.5, -0.5, z), Vec3::new(0.5, 0.5, z), Vec3::new(0.5, -0.5, 0.0)] {
            let ndc = clip.project_point3(corner);
            assert!((0.0..=1.0).contains(&ndc.z), "depth {} out of range", ndc.z);
        }
    }

    #[test]
    fn local_depth_of_a_collapsed_node_is_zero() {
        let t = Transform::from_layout(&LayoutOptions::default(), Vec3::ONE, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(t.local_depth(24.0), 0.0);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model) * Vec3::new(1.0, 1.0, 0.0);
        assert_relative_eq!(n.x, 0.5);
        assert_relative_eq!(n.y, 1.0);
    }

    #[test]
    fn degenerate_normal_matrix_is_identity() {
        assert_eq!(normal_matrix(Mat4::from_scale(Vec3::ZERO)), Mat3::IDENTITY);
    }
}
