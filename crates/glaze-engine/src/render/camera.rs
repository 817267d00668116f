use glam::{Mat4, Vec3};

/// Look-at camera. `offset` shifts the world before viewing.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub offset: Vec3,
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            target,
            up,
            offset: Vec3::ZERO,
        }
    }

    /// Camera on +Z looking at the origin, offset so that layout point (0, 0)
    /// is the top-left corner of a `width × height` projection.
    pub fn for_layout(width: f32, height: f32, distance: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            offset: Vec3::new(-width * 0.5, -height * 0.5, 0.0),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up) * Mat4::from_translation(self.offset)
    }
}

/// Orthographic projection with +Y down and depth in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            width,
            height,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let (hw, hh) = (self.width * 0.5, self.height * 0.5);
        Mat4::orthographic_rh(-hw, hw, hh, -hh, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn layout_corners_map_to_ndc_corners() {
        let camera = Camera::for_layout(200.0, 100.0, 10.0);
        let projection = Projection::new(200.0, 100.0, 0.1, 100.0);
        let vp = projection.matrix() * camera.view_matrix();

        let top_left = vp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);

        let bottom_right = vp * Vec4::new(200.0, 100.0, 0.0, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn depth_spans_zero_to_one() {
        let projection = Projection::new(2.0, 2.0, 1.0, 11.0);
        let m = projection.matrix();
        let near = m * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -11.0, 1.0);
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-6);
    }
}
