//! Minimum enclosing circle.
//!
//! Welzl's randomized incremental algorithm over points in a local tangent
//! plane, in its iterative form. Expected linear time in the number of
//! points after shuffling.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::coord::Vec2;

/// Slack for containment tests, relative to the radius.
const REL_EPS: f64 = 1e-9;

/// Absolute slack for containment tests, in meters.
const ABS_EPS: f64 = 1e-6;

/// A circle in the tangent plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// True if `p` lies inside or on the circle, up to rounding.
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.center).len() <= self.radius + self.radius * REL_EPS + ABS_EPS
    }

    /// Circle with the segment `a`–`b` as its diameter.
    fn from_diameter(a: Vec2, b: Vec2) -> Self {
        let center = 0.5 * (a + b);
        Self::new(center, (a - center).len())
    }

    /// Circle through three points, `None` if they are collinear.
    fn circumcircle(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let b = b - a;
        let c = c - a;
        let d = 2.0 * (b.x * c.y - b.y * c.x);
        if d.abs() < f64::EPSILON * (b.dot(b) + c.dot(c)).max(1.0) {
            return None;
        }

        let bb = b.dot(b);
        let cc = c.dot(c);
        let u = Vec2::new((c.y * bb - b.y * cc) / d, (b.x * cc - c.x * bb) / d);
        Some(Self::new(a + u, u.len()))
    }
}

/// Smallest circle containing all `points`.
///
/// Shuffles with a fixed seed so results are reproducible.
pub fn compute_mec(points: &[Vec2]) -> Circle {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    compute_mec_with_rng(points, &mut rng)
}

/// Smallest circle containing all `points`, shuffling with `rng`.
pub fn compute_mec_with_rng<R: Rng + ?Sized>(points: &[Vec2], rng: &mut R) -> Circle {
    match points {
        [] => Circle::new(Vec2::ZERO, 0.0),
        [p] => Circle::new(*p, 0.0),
        [a, b] => Circle::from_diameter(*a, *b),
        _ => {
            let mut shuffled = points.to_vec();
            shuffled.shuffle(rng);
            welzl(&shuffled)
        }
    }
}

/// Welzl in its iterative form: each level fixes one more boundary point.
fn welzl(points: &[Vec2]) -> Circle {
    let mut circle = Circle::new(Vec2::ZERO, 0.0);
    for (i, &p) in points.iter().enumerate() {
        if i == 0 || !circle.contains(p) {
            circle = with_one(&points[..i], p);
        }
    }
    circle
}

/// Smallest circle enclosing `points` with `p` on it.
fn with_one(points: &[Vec2], p: Vec2) -> Circle {
    let mut circle = Circle::new(p, 0.0);
    for (i, &q) in points.iter().enumerate() {
        if !circle.contains(q) {
            circle = with_two(&points[..i], p, q);
        }
    }
    circle
}

/// Smallest circle enclosing `points` with `p` and `q` on it.
fn with_two(points: &[Vec2], p: Vec2, q: Vec2) -> Circle {
    let mut circle = Circle::from_diameter(p, q);
    for &r in points {
        if !circle.contains(r) {
            circle = through_three(p, q, r);
        }
    }
    circle
}

/// Circle with `a`, `b` and `c` on it.
///
/// Collinear points have no circumcircle; the longest side's diameter
/// circle spans all three then.
fn through_three(a: Vec2, b: Vec2, c: Vec2) -> Circle {
    Circle::circumcircle(a, b, c).unwrap_or_else(|| {
        let [ab, ac, bc] = [
            Circle::from_diameter(a, b),
            Circle::from_diameter(a, c),
            Circle::from_diameter(b, c),
        ];
        let longest = if ab.radius >= ac.radius { ab } else { ac };
        if bc.radius > longest.radius {
            bc
        } else {
            longest
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(compute_mec(&[]), Circle::new(Vec2::ZERO, 0.0));
        assert_eq!(compute_mec(&[v(3.0, 4.0)]), Circle::new(v(3.0, 4.0), 0.0));
    }

    #[test]
    fn test_two_points_use_diameter() {
        let c = compute_mec(&[v(0.0, 0.0), v(3000.0, 0.0)]);
        assert_eq!(c.center, v(1500.0, 0.0));
        assert_eq!(c.radius, 1500.0);
    }

    #[test]
    fn test_right_triangle() {
        let c = compute_mec(&[v(0.0, 0.0), v(1000.0, 0.0), v(0.0, 1000.0)]);
        assert!((c.center.x - 500.0).abs() < 1e-6);
        assert!((c.center.y - 500.0).abs() < 1e-6);
        assert!((c.radius - 707.106_781).abs() < 1e-3);
    }

    #[test]
    fn test_obtuse_triangle_uses_longest_side() {
        let c = compute_mec(&[v(0.0, 0.0), v(1000.0, 0.0), v(500.0, 100.0)]);
        assert!((c.center.x - 500.0).abs() < 1e-6);
        assert!(c.center.y.abs() < 1e-6);
        assert!((c.radius - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_equilateral_triangle_uses_circumcircle() {
        let h = 3f64.sqrt() / 2.0 * 1000.0;
        let c = compute_mec(&[v(0.0, 0.0), v(1000.0, 0.0), v(500.0, h)]);
        assert!((c.radius - 1000.0 / 3f64.sqrt()).abs() < 1e-6);
        assert!((c.center.x - 500.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_points() {
        let c = compute_mec(&[v(0.0, 0.0), v(100.0, 0.0), v(400.0, 0.0), v(250.0, 0.0)]);
        assert!((c.center.x - 200.0).abs() < 1e-6);
        assert!((c.radius - 200.0).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_points() {
        let p = v(10.0, -20.0);
        let c = compute_mec(&[p, p, p]);
        assert_eq!(c.radius, 0.0);
        assert!(c.contains(p));
    }

    #[test]
    fn test_two_crossing_runways() {
        // two 3 km runways crossing at the origin
        let points = [v(-1500.0, 0.0), v(1500.0, 0.0), v(0.0, -1500.0), v(0.0, 1500.0)];
        let c = compute_mec(&points);
        assert!(c.center.len() < 1e-6);
        assert!((c.radius - 1500.0).abs() < 1e-6);
    }

    /// Smallest circle among all pair and triple circles that covers every point.
    fn brute_force(points: &[Vec2]) -> f64 {
        let covers = |c: &Circle| points.iter().all(|p| c.contains(*p));
        let mut best = f64::INFINITY;
        for (i, &a) in points.iter().enumerate() {
            for (j, &b) in points.iter().enumerate().skip(i + 1) {
                let c = Circle::from_diameter(a, b);
                if covers(&c) {
                    best = best.min(c.radius);
                }
                for &d in points.iter().skip(j + 1) {
                    if let Some(c) = Circle::circumcircle(a, b, d) {
                        if covers(&c) {
                            best = best.min(c.radius);
                        }
                    }
                }
            }
        }
        best
    }

    #[test]
    fn test_covers_points_of_earlier_levels() {
        let points = [
            v(-89.0, -2398.0),
            v(-1009.0, -506.0),
            v(-2763.0, -1423.0),
            v(-327.0, -2656.0),
            v(144.0, -896.0),
        ];
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = compute_mec_with_rng(&points, &mut rng);
            for p in &points {
                assert!(c.contains(*p), "seed {seed}: {p:?} outside {c:?}");
            }
            let best = brute_force(&points);
            assert!((c.radius - best).abs() < 1e-6 * best);
        }
    }

    #[test]
    fn test_collinear_boundary_uses_longest_side() {
        let c = through_three(v(0.0, 0.0), v(300.0, 0.0), v(100.0, 0.0));
        assert_eq!(c.center, v(150.0, 0.0));
        assert_eq!(c.radius, 150.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20_000))]

        #[test]
        fn prop_mec_covers_small_integer_sets(
            raw in prop::collection::vec((-3000i32..3000, -3000i32..3000), 3..=8),
            seed in any::<u64>(),
        ) {
            let points: Vec<Vec2> = raw.iter().map(|&(x, y)| v(f64::from(x), f64::from(y))).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let c = compute_mec_with_rng(&points, &mut rng);
            for p in &points {
                prop_assert!(c.contains(*p), "{:?} outside {:?}", p, c);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_mec_covers_all_points(
            raw in prop::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 1..24),
            seed in any::<u64>(),
        ) {
            let points: Vec<Vec2> = raw.iter().map(|&(x, y)| v(x, y)).collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let c = compute_mec_with_rng(&points, &mut rng);
            for p in &points {
                prop_assert!((*p - c.center).len() <= c.radius + 1e-6 * c.radius.max(1.0));
            }
        }

        #[test]
        fn prop_mec_is_minimal(
            raw in prop::collection::vec((-5000.0f64..5000.0, -5000.0f64..5000.0), 2..9),
        ) {
            let points: Vec<Vec2> = raw.iter().map(|&(x, y)| v(x, y)).collect();
            let c = compute_mec(&points);
            let best = brute_force(&points);
            prop_assert!(c.radius <= best + 1e-6 * best.max(1.0));
        }
    }
}
