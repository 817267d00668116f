use std::fmt;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// Segment type tag, mirrored by the vertex shader.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SegmentKind {
    Line = 0,
    Cubic = 1,
}

/// One typed piece of a parameterized outline.
///
/// `[t_start, t_end)` is the fraction of the total outline length consumed by
/// this segment. Control points are zero for lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub control1: Vec2,
    pub control2: Vec2,
    pub kind: SegmentKind,
    pub t_start: f32,
    pub t_end: f32,
}

/// Weight of a straight segment in the arc-length parameterization.
///
/// Lines are counted by number, not by Euclidean length: the tessellator only
/// needs a handful of positions along a straight edge regardless of its size.
pub const LINE_WEIGHT: f32 = 1.0;

impl PathSegment {
    #[inline]
    pub fn line(from: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            control1: Vec2::ZERO,
            control2: Vec2::ZERO,
            kind: SegmentKind::Line,
            t_start: 0.0,
            t_end: 0.0,
        }
    }

    #[inline]
    pub fn cubic(from: Vec2, control1: Vec2, control2: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            control1,
            control2,
            kind: SegmentKind::Cubic,
            t_start: 0.0,
            t_end: 0.0,
        }
    }

    /// Quadratic curves are stored as cubics with a duplicated control point.
    #[inline]
    pub fn quadratic(from: Vec2, control: Vec2, to: Vec2) -> Self {
        Self::cubic(from, control, control, to)
    }

    /// Scales every point of the segment component-wise.
    #[inline]
    pub fn multiply(&mut self, by: Vec2) {
        self.from *= by;
        self.to *= by;
        self.control1 *= by;
        self.control2 *= by;
    }

    /// Position at local parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        match self.kind {
            SegmentKind::Line => self.from.lerp(self.to, t),
            SegmentKind::Cubic => {
                let a = self.from.lerp(self.control1, t);
                let b = self.control1.lerp(self.control2, t);
                let c = self.control2.lerp(self.to, t);
                let ab = a.lerp(b, t);
                let bc = b.lerp(c, t);
                ab.lerp(bc, t)
            }
        }
    }

    /// Length estimate used for the arc-length weights.
    pub fn weight(&self, curve_samples: u32) -> f32 {
        match self.kind {
            SegmentKind::Line => LINE_WEIGHT,
            SegmentKind::Cubic => self.curve_length(curve_samples),
        }
    }

    /// Sums chord lengths between `samples` points on the curve.
    ///
    /// Points are evaluated four at a time; `samples == 0` yields `0.0`.
    /// A curve whose points coincide has length exactly `0.0`.
    pub fn curve_length(&self, samples: u32) -> f32 {
        if samples == 0 {
            return 0.0;
        }

        let n = samples as f32;
        let mut length = 0.0;
        let mut last = self.from;

        let mut i = 1u32;
        while i <= samples {
            let t = Vec4::new(
                i as f32 / n,
                (i + 1) as f32 / n,
                (i + 2) as f32 / n,
                (i + 3) as f32 / n,
            )
            .min(Vec4::ONE);
            let xs = de_casteljau4([self.from.x, self.control1.x, self.control2.x, self.to.x], t);
            let ys = de_casteljau4([self.from.y, self.control1.y, self.control2.y, self.to.y], t);

            for k in 0..4 {
                let p = Vec2::new(xs[k], ys[k]);
                length += (p - last).length();
                last = p;
            }

            i += 4;
        }

        length
    }

    #[inline]
    pub fn to_gpu(&self) -> GpuPathSegment {
        GpuPathSegment {
            from: self.from.to_array(),
            to: self.to.to_array(),
            control1: self.control1.to_array(),
            control2: self.control2.to_array(),
            t_start: self.t_start,
            t_end: self.t_end,
            kind: self.kind as u32,
            _pad: 0,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind {
            SegmentKind::Line => "Line",
            SegmentKind::Cubic => "Curve",
        };
        write!(
            f,
            "{name} from [{}...{}] - {}%",
            self.t_start,
            self.t_end,
            ((self.t_end - self.t_start) * 100.0) as i32
        )
    }
}

/// One coordinate of a cubic at four parameters, by repeated interpolation.
///
/// Equal coordinates interpolate to themselves exactly.
fn de_casteljau4(p: [f32; 4], t: Vec4) -> Vec4 {
    let lerp = |a: Vec4, b: Vec4| a + (b - a) * t;
    let [p0, p1, p2, p3] = p.map(Vec4::splat);
    let (a, b, c) = (lerp(p0, p1), lerp(p1, p2), lerp(p2, p3));
    lerp(lerp(a, b), lerp(b, c))
}

/// GPU layout of a segment (48 bytes), matching `PathSegment` in `mesh.wgsl`.
///
///  offset  0  from      vec2<f32>
///  offset  8  to        vec2<f32>
///  offset 16  control1  vec2<f32>
///  offset 24  control2  vec2<f32>
///  offset 32  t_start   f32
///  offset 36  t_end     f32
///  offset 40  kind      u32
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GpuPathSegment {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub control1: [f32; 2],
    pub control2: [f32; 2],
    pub t_start: f32,
    pub t_end: f32,
    pub kind: u32,
    pub _pad: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn gpu_segment_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GpuPathSegment>(), 48);
    }

    #[test]
    fn line_weight_ignores_euclidean_length() {
        let short = PathSegment::line(Vec2::ZERO, Vec2::new(0.1, 0.0));
        let long = PathSegment::line(Vec2::ZERO, Vec2::new(500.0, 0.0));
        assert_eq!(short.weight(40), LINE_WEIGHT);
        assert_eq!(long.weight(40), LINE_WEIGHT);
    }

    #[test]
    fn straight_cubic_length_matches_chord() {
        let seg = PathSegment::cubic(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
        );
        assert_relative_eq!(seg.curve_length(40), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn coincident_cubic_has_zero_length() {
        let seg = PathSegment::cubic(Vec2::ONE, Vec2::ONE, Vec2::ONE, Vec2::ONE);
        assert_eq!(seg.curve_length(40), 0.0);
        assert_eq!(seg.point_at(0.37), Vec2::ONE);
    }

    #[test]
    fn quarter_circle_length_is_close_to_half_pi() {
        let k = crate::path::outline::QUARTER_ARC_KAPPA;
        let seg = PathSegment::cubic(
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, k),
            Vec2::new(k, 1.0),
            Vec2::new(0.0, 1.0),
        );
        assert_relative_eq!(seg.curve_length(40), std::f32::consts::FRAC_PI_2, epsilon = 2e-3);
    }

    #[test]
    fn zero_samples_yield_zero_length() {
        let seg = PathSegment::quadratic(Vec2::ZERO, Vec2::ONE, Vec2::X);
        assert_eq!(seg.curve_length(0), 0.0);
    }

    #[test]
    fn sample_count_not_multiple_of_four_still_reaches_end() {
        let seg = PathSegment::cubic(Vec2::ZERO, Vec2::X, Vec2::X * 2.0, Vec2::X * 3.0);
        assert_relative_eq!(seg.curve_length(7), 3.0, epsilon = 1e-4);
    }

    #[test]
    fn quadratic_duplicates_control_point() {
        let seg = PathSegment::quadratic(Vec2::ZERO, Vec2::new(1.0, 2.0), Vec2::X);
        assert_eq!(seg.kind, SegmentKind::Cubic);
        assert_eq!(seg.control1, seg.control2);
    }

    #[test]
    fn display_reports_share() {
        let mut seg = PathSegment::line(Vec2::ZERO, Vec2::X);
        seg.t_start = 0.25;
        seg.t_end = 0.75;
        assert_eq!(seg.to_string(), "Line from [0.25...0.75] - 50%");
    }
}
