//! Arc-length math over ordered point sequences.
//!
//! Works on any point type implementing [`PathPoint`], so the same code serves
//! court units (`Vec2`) and render space (`Vec3`).

use std::ops::Sub;
use glam::{Vec2, Vec3};

/// Minimal vector operations the path math needs.
pub trait PathPoint: Copy + Sub<Output = Self> {
    fn distance(self, other: Self) -> f32;
    fn dot(self, other: Self) -> f32;
    fn lerp(self, other: Self, t: f32) -> Self;
}

macro_rules! impl_path_point {
    ($t:ty) => {
        impl PathPoint for $t {
            fn distance(self, other: Self) -> f32 {
                <$t>::distance(self, other)
            }

            fn dot(self, other: Self) -> f32 {
                <$t>::dot(self, other)
            }

            fn lerp(self, other: Self, t: f32) -> Self {
                <$t>::lerp(self, other, t)
            }
        }
    };
}

impl_path_point!(Vec2);
impl_path_point!(Vec3);

/// Sum of consecutive segment lengths. Zero for fewer than two points.
pub fn arc_length<P: PathPoint>(points: &[P]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Point at fraction `t` of the path's arc length.
///
/// `t` is clamped to `[0, 1]` (NaN reads as 0). Sampling is by distance travelled,
/// not by point index, so uniform `t` steps give uniform speed however densely the
/// path was captured. Returns `None` only for an empty path.
pub fn point_at_progress<P: PathPoint>(points: &[P], t: f32) -> Option<P> {
    let first = *points.first()?;
    let last = *points.last()?;
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= 0.0 {
        return Some(first);
    }
    if t >= 1.0 {
        return Some(last);
    }

    let total = arc_length(points);
    if total <= 0.0 {
        return Some(first);
    }

    let target = total * t;
    let mut travelled = 0.0;
    for w in points.windows(2) {
        let segment = w[0].distance(w[1]);
        if segment <= 0.0 {
            continue;
        }
        if travelled + segment >= target {
            let local_t = (target - travelled) / segment;
            return Some(w[0].lerp(w[1], local_t));
        }
        travelled += segment;
    }
    Some(last)
}

/// Distance from `p` to the segment `a..b`; zero-length segments reduce to point distance.
pub fn segment_distance<P: PathPoint>(p: P, a: P, b: P) -> f32 {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a.lerp(b, t))
}

/// Smallest distance from `p` to any segment of the polyline.
/// A single point is its own degenerate segment; `None` for an empty polyline.
pub fn polyline_distance<P: PathPoint>(p: P, points: &[P]) -> Option<f32> {
    match points {
        [] => None,
        [only] => Some(p.distance(*only)),
        _ => points
            .windows(2)
            .map(|w| segment_distance(p, w[0], w[1]))
            .reduce(f32::min),
    }
}

/// The trailing `fraction` of `points` (rounded up), keeping at least two points.
///
/// If truncation would leave a single point the route falls back to the original
/// first and last points; a single-point input is doubled so the result is always a
/// well-defined (possibly zero-length) segment.
pub fn trailing_points<T: Copy>(points: &[T], fraction: f32) -> Vec<T> {
    let n = points.len();
    match points {
        [] => Vec::new(),
        [only] => vec![*only, *only],
        [first, .., last] => {
            let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 1.0 };
            let keep = ((n as f32) * fraction).ceil() as usize;
            if keep < 2 {
                vec![*first, *last]
            } else {
                points[n - keep.min(n)..].to_vec()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_length_of_short_inputs_is_zero() {
        assert_eq!(arc_length::<Vec2>(&[]), 0.0);
        assert_eq!(arc_length(&[Vec2::new(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn arc_length_sums_segments() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0), Vec2::new(3.0, 10.0)];
        assert!((arc_length(&pts) - 11.0).abs() < 1e-6);
    }

    #[test]
    fn arc_length_is_additive_over_splits() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(4.0, 2.5),
            Vec2::new(4.5, -1.0),
            Vec2::new(7.0, 3.0),
        ];
        let total = arc_length(&pts);
        for split in 0..pts.len() {
            let head = arc_length(&pts[..=split]);
            let tail = arc_length(&pts[split..]);
            assert!((head + tail - total).abs() < 1e-5, "split at {split}");
        }
    }

    #[test]
    fn straight_segment_samples_exactly() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        assert_eq!(point_at_progress(&pts, 0.5), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(point_at_progress(&pts, 0.0), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(point_at_progress(&pts, 1.0), Some(Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn progress_is_clamped() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        assert_eq!(point_at_progress(&pts, -3.0), Some(Vec2::ZERO));
        assert_eq!(point_at_progress(&pts, 7.0), Some(Vec2::new(10.0, 0.0)));
        assert_eq!(point_at_progress(&pts, f32::NAN), Some(Vec2::ZERO));
    }

    #[test]
    fn sampling_is_by_distance_not_index() {
        // Dense capture on the first half, sparse on the second.
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(10.0, 0.0),
        ];
        let p = point_at_progress(&pts, 0.5).unwrap();
        assert!((p.x - 5.0).abs() < 1e-5);
    }

    #[test]
    fn empty_path_has_no_point() {
        assert_eq!(point_at_progress::<Vec3>(&[], 0.5), None);
    }

    #[test]
    fn identical_points_return_that_point() {
        let p = Vec3::new(2.0, 1.0, -4.0);
        let pts = [p, p, p];
        assert_eq!(arc_length(&pts), 0.0);
        for t in [0.0, 0.3, 0.9, 1.0] {
            assert_eq!(point_at_progress(&pts, t), Some(p));
        }
    }

    #[test]
    fn zero_length_segments_are_skipped() {
        let pts = [Vec2::ZERO, Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(4.0, 0.0)];
        let p = point_at_progress(&pts, 0.25).unwrap();
        assert!((p.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn segment_distance_projects_and_clamps() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        assert!((segment_distance(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-6);
        // Beyond the end: distance to the endpoint.
        assert!((segment_distance(Vec2::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-6);
        assert!((segment_distance(Vec2::new(-3.0, -4.0), a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_segment_is_point_distance() {
        let a = Vec3::new(1.0, 1.0, 1.0);
        assert!((segment_distance(Vec3::new(1.0, 4.0, 5.0), a, a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn polyline_distance_takes_minimum() {
        let pts = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let d = polyline_distance(Vec2::new(12.0, 5.0), &pts).unwrap();
        assert!((d - 2.0).abs() < 1e-6);
        assert_eq!(polyline_distance::<Vec2>(Vec2::ZERO, &[]), None);
        assert_eq!(polyline_distance(Vec2::ZERO, &[Vec2::new(0.0, 2.0)]), Some(2.0));
    }

    #[test]
    fn trailing_points_keeps_the_tail() {
        let pts: Vec<u32> = (0..10).collect();
        assert_eq!(trailing_points(&pts, 0.8), (2..10).collect::<Vec<_>>());
        assert_eq!(trailing_points(&pts, 1.0), pts);
        let five: Vec<u32> = (0..5).collect();
        assert_eq!(trailing_points(&five, 0.8), vec![1, 2, 3, 4]);
    }

    #[test]
    fn trailing_points_never_leaves_fewer_than_two() {
        assert_eq!(trailing_points(&[1, 2, 3], 0.8), vec![1, 2, 3]);
        assert_eq!(trailing_points(&[1, 2], 0.8), vec![1, 2]);
        assert_eq!(trailing_points(&[1, 2, 3, 4], 0.1), vec![1, 4]);
        assert_eq!(trailing_points(&[7], 0.8), vec![7, 7]);
        assert!(trailing_points::<u32>(&[], 0.8).is_empty());
    }
}
