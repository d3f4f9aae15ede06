use glam::{Mat4, Vec2, Vec3};
use crate::core::court::CourtSpace;

/// Screen pixels, top-left origin, Y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSpace {
    pub view_size: Vec2,
}

/// Uniform "fit" placement of a court inside a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenFit {
    /// Pixels per court unit.
    pub scale: f32,
    /// Top-left corner of the letterboxed court art, in pixels.
    pub offset: Vec2,
}

impl ScreenSpace {
    pub fn new(width: f32, height: f32) -> Self {
        Self { view_size: Vec2::new(width, height) }
    }

    /// Fit the whole court art into the view, preserving aspect ratio and centering it.
    /// A zero-sized view gives a zero scale rather than an error.
    pub fn fit(&self, court: &CourtSpace) -> ScreenFit {
        let horiz_ratio = self.view_size.x / court.width();
        let vert_ratio = self.view_size.y / court.height();
        let mut scale = horiz_ratio.min(vert_ratio);
        if !scale.is_finite() || scale < 0.0 {
            scale = 0.0;
        }
        let offset = (self.view_size - court.size() * scale) / 2.0;
        ScreenFit { scale, offset }
    }
}

/// A court anchored in the AR world: Y up, court plane horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSpace {
    /// Where the court's center sits in the world (any affine transform).
    pub anchor: Mat4,
    /// Physical size the drawable area is laid out at.
    pub court_width_meters: f32,
    pub court_height_meters: f32,
}

impl WorldSpace {
    pub fn new(anchor: Mat4, court_width_meters: f32, court_height_meters: f32) -> Self {
        Self { anchor, court_width_meters, court_height_meters }
    }
}

/// Destination coordinate space, supplied by the host each frame or render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderTarget {
    Screen(ScreenSpace),
    World(WorldSpace),
}

impl RenderTarget {
    pub fn screen(width: f32, height: f32) -> Self {
        RenderTarget::Screen(ScreenSpace::new(width, height))
    }

    pub fn world(anchor: Mat4, court_width_meters: f32, court_height_meters: f32) -> Self {
        RenderTarget::World(WorldSpace::new(anchor, court_width_meters, court_height_meters))
    }

    /// Distance between two points on the court surface.
    /// Screen targets measure in the view plane; world targets ignore height.
    pub fn planar_distance(&self, a: Vec3, b: Vec3) -> f32 {
        match self {
            RenderTarget::Screen(_) => Vec2::new(a.x, a.y).distance(Vec2::new(b.x, b.y)),
            RenderTarget::World(_) => Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z)),
        }
    }
}
