/// Per-edge padding in logical points.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    #[inline]
    pub const fn new(top: f32, leading: f32, bottom: f32, trailing: f32) -> Self {
        Self { top, leading, bottom, trailing }
    }

    /// Same padding on every edge.
    #[inline]
    pub const fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0.0)
    }

    #[inline]
    pub fn horizontal(self) -> f32 {
        self.leading + self.trailing
    }

    #[inline]
    pub fn vertical(self) -> f32 {
        self.top + self.bottom
    }
}
