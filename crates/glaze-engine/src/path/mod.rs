//! Arc-length parameterization of vector outlines.
//!
//! An [`Outline`] (move/line/quad/cubic/close commands) becomes an ordered list of
//! [`PathSegment`]s, each tagged with the `[t_start, t_end)` share of the whole
//! outline it covers. The vertex shader walks that list to map a linear boundary
//! parameter onto a position along the outline.
//!
//! Invariants of a parameterized path:
//! - segment `i` ends where segment `i + 1` starts (`t_end[i] == t_start[i + 1]`)
//! - the first segment starts at `0`, the last ends at `1`
//! - an empty path, or one of total length `0`, has every fraction set to `0`

mod outline;
mod segment;

pub use outline::{Outline, PathCommand};
pub use segment::{GpuPathSegment, LINE_WEIGHT, PathSegment, SegmentKind};

use glam::Vec2;

/// Default number of samples used to estimate a cubic's length.
pub const DEFAULT_CURVE_SAMPLES: u32 = 40;

/// Outline converted into arc-length parameterized segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterizedPath {
    segments: Vec<PathSegment>,
}

impl ParameterizedPath {
    /// Parameterizes `outline` with the default curve sample count.
    pub fn parameterize(outline: &Outline) -> Self {
        Self::parameterize_with_samples(outline, DEFAULT_CURVE_SAMPLES)
    }

    /// Parameterizes `outline`, estimating cubic lengths from `curve_samples` points.
    pub fn parameterize_with_samples(outline: &Outline, curve_samples: u32) -> Self {
        let mut segments = build_segments(outline);
        assign_fractions(&mut segments, curve_samples);
        Self { segments }
    }

    /// Quarter circle of radius 1 from `(1, 0)` to `(0, 1)`.
    ///
    /// Shared by every node to shape the rounded bevel along the outline edge.
    pub fn corner_arc(curve_samples: u32) -> Self {
        let k = outline::QUARTER_ARC_KAPPA;
        let arc = Outline::new()
            .move_to(Vec2::new(1.0, 0.0))
            .cubic_to(Vec2::new(1.0, k), Vec2::new(k, 1.0), Vec2::new(0.0, 1.0));
        Self::parameterize_with_samples(&arc, curve_samples)
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Rescales every point of every segment in place.
    ///
    /// Fractions are ratios and stay untouched.
    pub fn multiply(&mut self, by: Vec2) {
        for segment in &mut self.segments {
            segment.multiply(by);
        }
    }

    /// Position at the global parameter `t` in `[0, 1]`.
    ///
    /// Returns `None` for an empty path.
    pub fn point_at(&self, t: f32) -> Option<Vec2> {
        let t = t.clamp(0.0, 1.0);
        let segment = self
            .segments
            .iter()
            .find(|s| t < s.t_end)
            .or_else(|| self.segments.last())?;

        let span = segment.t_end - segment.t_start;
        let local = if span > 0.0 { (t - segment.t_start) / span } else { 0.0 };
        Some(segment.point_at(local.clamp(0.0, 1.0)))
    }

    /// GPU upload form. Never empty: a zeroed segment stands in for a no-op path
    /// so the storage binding stays valid.
    pub fn to_gpu(&self) -> Vec<GpuPathSegment> {
        if self.segments.is_empty() {
            return vec![GpuPathSegment::default()];
        }
        self.segments.iter().map(PathSegment::to_gpu).collect()
    }
}

fn build_segments(outline: &Outline) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut pen = Vec2::ZERO;

    for command in outline.commands() {
        match *command {
            PathCommand::MoveTo(to) => pen = to,
            PathCommand::LineTo(to) => {
                segments.push(PathSegment::line(pen, to));
                pen = to;
            }
            PathCommand::QuadTo { control, to } => {
                segments.push(PathSegment::quadratic(pen, control, to));
                pen = to;
            }
            PathCommand::CubicTo { control1, control2, to } => {
                segments.push(PathSegment::cubic(pen, control1, control2, to));
                pen = to;
            }
            PathCommand::Close => {
                let Some(first) = segments.first().map(|s| s.from) else {
                    continue;
                };
                if pen != first {
                    segments.push(PathSegment::line(pen, first));
                }
                pen = first;
            }
        }
    }

    segments
}

fn assign_fractions(segments: &mut [PathSegment], curve_samples: u32) {
    let weights: Vec<f32> = segments.iter().map(|s| s.weight(curve_samples)).collect();
    let total: f32 = weights.iter().sum();

    let fraction = |length: f32| if total > 0.0 { length / total } else { 0.0 };

    let mut current = 0.0;
    for (segment, weight) in segments.iter_mut().zip(weights) {
        segment.t_start = fraction(current);
        segment.t_end = fraction(current + weight);
        current += weight;
    }
}
