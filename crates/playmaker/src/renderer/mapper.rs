//! Normalized court coordinates <-> render-space coordinates.

use glam::{Mat4, Vec2, Vec3};
use crate::api::config::DEFAULT_WORLD_HEIGHT_OFFSET;
use crate::components::point::NormalizedPoint;
use crate::core::court::CourtSpace;
use super::target::{RenderTarget, ScreenFit, WorldSpace};

/// Bidirectional transform between a court's normalized space and one render target.
///
/// Screen targets yield points with `z = 0`. World targets yield points on the anchored
/// court plane, raised by a small height offset so tokens don't z-fight the court mesh.
/// Rebuild the mapper whenever the court or the target changes.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper {
    court: CourtSpace,
    target: RenderTarget,
    height_offset: f32,
    projection: Projection,
}

#[derive(Debug, Clone, Copy)]
enum Projection {
    Screen(ScreenFit),
    World {
        world: WorldSpace,
        inverse_anchor: Option<Mat4>,
    },
}

impl CoordinateMapper {
    pub fn new(court: CourtSpace, target: RenderTarget) -> Self {
        let projection = match target {
            RenderTarget::Screen(screen) => Projection::Screen(screen.fit(&court)),
            RenderTarget::World(world) => {
                let det = world.anchor.determinant();
                let inverse_anchor = (det.is_finite() && det.abs() > f32::EPSILON)
                    .then(|| world.anchor.inverse());
                Projection::World { world, inverse_anchor }
            }
        };
        Self {
            court,
            target,
            height_offset: DEFAULT_WORLD_HEIGHT_OFFSET,
            projection,
        }
    }

    /// Height above the court plane for world targets.
    pub fn with_height_offset(mut self, height_offset: f32) -> Self {
        self.height_offset = height_offset;
        self
    }

    pub fn court(&self) -> &CourtSpace {
        &self.court
    }

    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    pub fn to_render_space(&self, p: NormalizedPoint) -> Vec3 {
        match self.projection {
            Projection::Screen(fit) => {
                let s = self.court.to_court_units(p) * fit.scale + fit.offset;
                Vec3::new(s.x, s.y, 0.0)
            }
            Projection::World { world, .. } => {
                let uv = self.court.world_orientation().to_plane(p);
                let local = Vec3::new(
                    (uv.x - 0.5) * world.court_width_meters,
                    self.height_offset,
                    (uv.y - 0.5) * world.court_height_meters,
                );
                world.anchor.transform_point3(local)
            }
        }
    }

    /// Inverse of [`to_render_space`](Self::to_render_space).
    ///
    /// Degenerate targets don't divide by zero: a zero-scale screen maps everything to
    /// [`NormalizedPoint::ZERO`], a singular anchor is treated as the identity and a
    /// zero-sized world court collapses onto the center line.
    pub fn to_normalized(&self, p: Vec3) -> NormalizedPoint {
        match self.projection {
            Projection::Screen(fit) => {
                if fit.scale <= 0.0 {
                    return NormalizedPoint::ZERO;
                }
                let court_units = (Vec2::new(p.x, p.y) - fit.offset) / fit.scale;
                self.court.from_court_units(court_units)
            }
            Projection::World { world, inverse_anchor } => {
                let local = match inverse_anchor {
                    Some(inv) => inv.transform_point3(p),
                    None => p,
                };
                let u = plane_coordinate(local.x, world.court_width_meters);
                let v = plane_coordinate(local.z, world.court_height_meters);
                self.court.world_orientation().from_plane(Vec2::new(u, v))
            }
        }
    }

    pub fn map_points(&self, points: &[NormalizedPoint]) -> Vec<Vec3> {
        points.iter().map(|p| self.to_render_space(*p)).collect()
    }
}

fn plane_coordinate(local: f32, extent: f32) -> f32 {
    if extent.is_finite() && extent.abs() > f32::EPSILON {
        local / extent + 0.5
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use crate::core::court::{CourtKind, DrawingBoundary, WorldOrientation};
    use crate::renderer::target::ScreenSpace;

    fn assert_close(a: NormalizedPoint, b: NormalizedPoint) {
        assert!(
            (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
            "{a:?} != {b:?}"
        );
    }

    fn sample_points() -> Vec<NormalizedPoint> {
        vec![
            NormalizedPoint::new(0.0, 0.0),
            NormalizedPoint::new(1.0, 1.0),
            NormalizedPoint::new(0.37, 0.82),
            NormalizedPoint::new(0.5, 0.5),
            NormalizedPoint::new(-0.03, 1.02),
        ]
    }

    #[test]
    fn screen_forward_scales_and_centers() {
        let court = CourtSpace::new(10.0, 10.0).unwrap();
        let mapper = CoordinateMapper::new(court, RenderTarget::screen(200.0, 100.0));
        let p = mapper.to_render_space(NormalizedPoint::new(0.0, 0.5));
        assert_eq!(p, Vec3::new(50.0, 50.0, 0.0));
        let p = mapper.to_render_space(NormalizedPoint::new(1.0, 1.0));
        assert_eq!(p, Vec3::new(150.0, 100.0, 0.0));
    }

    #[test]
    fn screen_round_trip() {
        let court = CourtSpace::preset(CourtKind::FullCourt);
        for target in [RenderTarget::screen(390.0, 844.0), RenderTarget::screen(1920.0, 1080.0)] {
            let mapper = CoordinateMapper::new(court, target);
            for p in sample_points() {
                assert_close(mapper.to_normalized(mapper.to_render_space(p)), p);
            }
        }
    }

    #[test]
    fn screen_round_trip_with_boundary() {
        let court = CourtSpace::new(16.0, 9.0)
            .unwrap()
            .with_boundary(DrawingBoundary { left: 2.0, top: 0.5, right: 1.0, bottom: 0.0 })
            .unwrap();
        let mapper = CoordinateMapper::new(court, RenderTarget::screen(640.0, 480.0));
        for p in sample_points() {
            assert_close(mapper.to_normalized(mapper.to_render_space(p)), p);
        }
        // The drawable origin is inset from the letterboxed art.
        let fit = ScreenSpace::new(640.0, 480.0).fit(&court);
        let origin = mapper.to_render_space(NormalizedPoint::ZERO);
        assert!((origin.x - (fit.offset.x + 2.0 * fit.scale)).abs() < 1e-4);
    }

    #[test]
    fn zero_scale_screen_inverse_returns_zero() {
        let court = CourtSpace::new(10.0, 10.0).unwrap();
        let mapper = CoordinateMapper::new(court, RenderTarget::screen(0.0, 0.0));
        assert_eq!(mapper.to_normalized(Vec3::new(12.0, 40.0, 0.0)), NormalizedPoint::ZERO);
        assert_eq!(mapper.to_render_space(NormalizedPoint::new(0.7, 0.2)), Vec3::ZERO);
    }

    #[test]
    fn world_center_sits_on_anchor_above_plane() {
        let court = CourtSpace::preset(CourtKind::FullCourt);
        let anchor = Mat4::from_translation(Vec3::new(1.0, -0.5, -3.0));
        let mapper = CoordinateMapper::new(court, RenderTarget::world(anchor, 2.8, 1.5))
            .with_height_offset(0.05);
        let p = mapper.to_render_space(NormalizedPoint::CENTER);
        assert!((p - Vec3::new(1.0, -0.45, -3.0)).length() < 1e-5);
        let corner = mapper.to_render_space(NormalizedPoint::new(1.0, 1.0));
        assert!((corner - Vec3::new(2.4, -0.45, -2.25)).length() < 1e-5);
    }

    #[test]
    fn world_round_trip_with_rotated_scaled_anchor() {
        let anchor = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.1),
            Quat::from_rotation_y(0.7),
            Vec3::new(1.5, -0.3, 2.0),
        );
        for orientation in [WorldOrientation::Aligned, WorldOrientation::Rotated90] {
            let court = CourtSpace::new(28.0, 15.0).unwrap().with_world_orientation(orientation);
            let mapper = CoordinateMapper::new(court, RenderTarget::world(anchor, 28.0, 15.0));
            for p in sample_points() {
                assert_close(mapper.to_normalized(mapper.to_render_space(p)), p);
            }
        }
    }

    #[test]
    fn singular_anchor_does_not_divide_by_zero() {
        let court = CourtSpace::new(10.0, 10.0).unwrap();
        let mapper = CoordinateMapper::new(court, RenderTarget::world(Mat4::ZERO, 10.0, 10.0));
        let n = mapper.to_normalized(Vec3::new(2.5, 0.0, -2.5));
        assert!(n.is_finite());
        assert_close(n, NormalizedPoint::new(0.75, 0.25));

        let flat = CoordinateMapper::new(court, RenderTarget::world(Mat4::IDENTITY, 0.0, 0.0));
        assert_close(flat.to_normalized(Vec3::new(3.0, 0.0, 3.0)), NormalizedPoint::CENTER);
    }
}
