use glam::Vec2;

use crate::coords::Rect;

/// One drawing command of a vector outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    QuadTo { control: Vec2, to: Vec2 },
    CubicTo { control1: Vec2, control2: Vec2, to: Vec2 },
    Close,
}

/// Control-point distance for approximating a quarter circle with one cubic.
pub(crate) const QUARTER_ARC_KAPPA: f32 = 0.552_284_8;

/// Ordered list of drawing commands.
///
/// This is the input of [`ParameterizedPath::parameterize`](super::ParameterizedPath::parameterize).
/// Builders are chainable:
///
/// ```
/// # use glaze_engine::path::Outline;
/// # use glaze_engine::coords::Vec2;
/// let triangle = Outline::new()
///     .move_to(Vec2::new(0.0, 0.0))
///     .line_to(Vec2::new(1.0, 0.0))
///     .line_to(Vec2::new(0.0, 1.0))
///     .close();
/// assert_eq!(triangle.commands().len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    commands: Vec<PathCommand>,
}

impl Outline {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[inline]
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    pub fn move_to(mut self, to: Vec2) -> Self {
        self.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(mut self, to: Vec2) -> Self {
        self.push(PathCommand::LineTo(to));
        self
    }

    pub fn quad_to(mut self, control: Vec2, to: Vec2) -> Self {
        self.push(PathCommand::QuadTo { control, to });
        self
    }

    pub fn cubic_to(mut self, control1: Vec2, control2: Vec2, to: Vec2) -> Self {
        self.push(PathCommand::CubicTo { control1, control2, to });
        self
    }

    pub fn close(mut self) -> Self {
        self.push(PathCommand::Close);
        self
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Vec2]) -> Self {
        let mut outline = Self::new();
        let Some((&first, rest)) = points.split_first() else {
            return outline;
        };
        outline.push(PathCommand::MoveTo(first));
        for &p in rest {
            outline.push(PathCommand::LineTo(p));
        }
        outline.close()
    }

    /// Rounded rectangle, corners approximated with one cubic each.
    ///
    /// `radius` is clamped to half of the shorter side.
    pub fn rounded_rect(rect: Rect, radius: f32) -> Self {
        let r = rect.normalized();
        let radius = radius.max(0.0).min(r.size.x * 0.5).min(r.size.y * 0.5);
        let k = radius * QUARTER_ARC_KAPPA;
        let (min, max) = (r.min(), r.max());

        Self::new()
            .move_to(Vec2::new(min.x + radius, min.y))
            .line_to(Vec2::new(max.x - radius, min.y))
            .cubic_to(
                Vec2::new(max.x - radius + k, min.y),
                Vec2::new(max.x, min.y + radius - k),
                Vec2::new(max.x, min.y + radius),
            )
            .line_to(Vec2::new(max.x, max.y - radius))
            .cubic_to(
                Vec2::new(max.x, max.y - radius + k),
                Vec2::new(max.x - radius + k, max.y),
                Vec2::new(max.x - radius, max.y),
            )
            .line_to(Vec2::new(min.x + radius, max.y))
            .cubic_to(
                Vec2::new(min.x + radius - k, max.y),
                Vec2::new(min.x, max.y - radius + k),
                Vec2::new(min.x, max.y - radius),
            )
            .line_to(Vec2::new(min.x, min.y + radius))
            .cubic_to(
                Vec2::new(min.x, min.y + radius - k),
                Vec2::new(min.x + radius - k, min.y),
                Vec2::new(min.x + radius, min.y),
            )
            .close()
    }

    /// Bounding box of every point, control points included.
    pub fn bounds(&self) -> Option<Rect> {
        let mut points = self.commands.iter().flat_map(|cmd| match *cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { control, to } => vec![control, to],
            PathCommand::CubicTo { control1, control2, to } => vec![control1, control2, to],
            PathCommand::Close => Vec::new(),
        });
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Rect::from_origin_size(min, max - min))
    }

    /// Applies `f` to every point of every command.
    pub fn map_points(&self, f: impl Fn(Vec2) -> Vec2) -> Self {
        let commands = self
            .commands
            .iter()
            .map(|cmd| match *cmd {
                PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
                PathCommand::LineTo(p) => PathCommand::LineTo(f(p)),
                PathCommand::QuadTo { control, to } => PathCommand::QuadTo {
                    control: f(control),
                    to: f(to),
                },
                PathCommand::CubicTo { control1, control2, to } => PathCommand::CubicTo {
                    control1: f(control1),
                    control2: f(control2),
                    to: f(to),
                },
                PathCommand::Close => PathCommand::Close,
            })
            .collect();
        Self { commands }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_of_nothing_is_empty() {
        assert!(Outline::polygon(&[]).is_empty());
    }

    #[test]
    fn polygon_closes() {
        let o = Outline::polygon(&[Vec2::ZERO, Vec2::X, Vec2::Y]);
        assert_eq!(o.commands().first(), Some(&PathCommand::MoveTo(Vec2::ZERO)));
        assert_eq!(o.commands().last(), Some(&PathCommand::Close));
    }

    #[test]
    fn bounds_cover_every_point() {
        let o = Outline::new()
            .move_to(Vec2::new(1.0, 2.0))
            .quad_to(Vec2::new(5.0, -1.0), Vec2::new(3.0, 4.0));
        assert_eq!(o.bounds(), Some(Rect::new(1.0, -1.0, 4.0, 5.0)));
        assert_eq!(Outline::new().close().bounds(), None);
    }

    #[test]
    fn rounded_rect_has_four_corners() {
        let o = Outline::rounded_rect(Rect::new(0.0, 0.0, 10.0, 4.0), 100.0);
        let cubics = o
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
            .count();
        assert_eq!(cubics, 4);
        // Radius clamps to 2.0, so the first edge starts at x = 2.
        assert_eq!(o.commands()[0], PathCommand::MoveTo(Vec2::new(2.0, 0.0)));
    }
}
