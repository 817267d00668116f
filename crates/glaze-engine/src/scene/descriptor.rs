use glam::{Quat, Vec2, Vec3};

use crate::coords::{EdgeInsets, Rect};
use crate::geometry::GeometrySource;
use crate::material::Material;
use crate::path::Outline;

/// How content yields when its aspect differs from the target's.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ContentMode {
    /// Shrink one axis so the content is fully contained.
    #[default]
    Fit,
    /// Grow one axis so the content fully covers the target.
    Fill,
}

/// Aspect-ratio policy. `ratio` (width / height) overrides the geometry's own aspect.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct AspectRatio {
    pub ratio: Option<f32>,
    pub mode: ContentMode,
}

/// Rotation about `axis`. A zero axis means no rotation.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rotation {
    pub angle_radians: f32,
    pub axis: Vec3,
}

impl Rotation {
    pub fn new(angle_radians: f32, axis: Vec3) -> Self {
        Self { angle_radians, axis }
    }

    pub fn quat(self) -> Quat {
        match self.axis.try_normalize() {
            Some(axis) => Quat::from_axis_angle(axis, self.angle_radians),
            None => Quat::IDENTITY,
        }
    }
}

/// Explicit frame size; a missing dimension keeps the proposed one.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FrameSize {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutOptions {
    /// Non-resizable meshes get a zero scale and do not show.
    pub resizable: bool,
    pub aspect_ratio: Option<AspectRatio>,
    pub offset: Vec2,
    pub rotation: Rotation,
    pub frame: Option<FrameSize>,
    pub insets: EdgeInsets,
    /// Extrusion depth of an outlined shape, in layout points.
    pub depth: f32,
}

impl LayoutOptions {
    /// Final layout rectangle for a proposed host rectangle.
    ///
    /// Insets first, then the explicit frame about the center, then the offset.
    pub fn resolve(&self, proposed: Rect) -> Rect {
        let mut rect = proposed.inset(self.insets);
        if let Some(frame) = self.frame {
            rect = rect.resized_about_center(frame.width, frame.height);
        }
        rect.translated(self.offset)
    }
}

/// Outline that deforms a mesh's patches into a rounded shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOutline {
    pub outline: Outline,
    /// Width of the rounded edge as a fraction of the half-extent, in `[0, 1]`.
    pub bevel: f32,
}

/// One mesh of the scene as supplied by the host on each update.
///
/// Nodes are matched by `id`; the rest of the value is applied to the node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescriptor {
    pub id: String,
    pub source: GeometrySource,
    pub materials: Vec<Material>,
    pub layout: LayoutOptions,
    pub shape: Option<ShapeOutline>,
    /// Host rectangle in layout space; `None` uses the whole viewport.
    pub bounds: Option<Rect>,
}

impl MeshDescriptor {
    pub fn new(id: impl Into<String>, source: GeometrySource) -> Self {
        Self {
            id: id.into(),
            source,
            materials: Vec::new(),
            layout: LayoutOptions::default(),
            shape: None,
            bounds: None,
        }
    }

    pub fn material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }

    pub fn materials(mut self, materials: impl IntoIterator<Item = Material>) -> Self {
        self.materials.extend(materials);
        self
    }

    pub fn resizable(mut self) -> Self {
        self.layout.resizable = true;
        self
    }

    pub fn aspect_ratio(mut self, ratio: Option<f32>, mode: ContentMode) -> Self {
        self.layout.aspect_ratio = Some(AspectRatio { ratio, mode });
        self
    }

    pub fn scaled_to_fit(self) -> Self {
        self.aspect_ratio(None, ContentMode::Fit)
    }

    pub fn scaled_to_fill(self) -> Self {
        self.aspect_ratio(None, ContentMode::Fill)
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.layout.offset = Vec2::new(x, y);
        self
    }

    pub fn rotation(mut self, angle_radians: f32, axis: Vec3) -> Self {
        self.layout.rotation = Rotation::new(angle_radians, axis);
        self
    }

    pub fn frame(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        self.layout.frame = Some(FrameSize { width, height });
        self
    }

    pub fn padding(mut self, insets: EdgeInsets) -> Self {
        self.layout.insets = insets;
        self
    }

    pub fn depth(mut self, depth: f32) -> Self {
        self.layout.depth = depth;
        self
    }

    pub fn outline(mut self, outline: Outline, bevel: f32) -> Self {
        self.shape = Some(ShapeOutline {
            outline,
            bevel: bevel.clamp(0.0, 1.0),
        });
        self
    }

    pub fn bounds(mut self, rect: Rect) -> Self {
        self.bounds = Some(rect);
        self
    }
}
