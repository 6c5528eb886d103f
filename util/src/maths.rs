//! Utility maths and geometry functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
///
/// This is a straight line through the two points `(source_range.0,
/// target_range.0)` and `(source_range.1, target_range.1)`, so values outside
/// the source range are extrapolated. The source range must not be
/// degenerate (`source_range.0 != source_range.1`).
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// Return the squared euclidian distance between two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm_sq<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float
{
    if point_0.len() != point_1.len() {
        return None;
    }

    Some(point_0
        .iter()
        .zip(point_1.iter())
        .fold(T::zero(), |sum, (a, b)| sum + (*a - *b).powi(2)))
}

/// Return the euclidian norm (distance between) of two points.
///
/// If the points do not have the same number of dimentions then `None` is
/// returned.
pub fn norm<T>(point_0: &[T], point_1: &[T]) -> Option<T>
where
    T: Float
{
    norm_sq(point_0, point_1).map(|s| s.sqrt())
}

/// Return the heading (angle to the positive X axis) of the line joining
/// `from` to `to`, in the range [-pi, pi].
///
/// Only the first two (X and Y) elements of the points are used, `None` is
/// returned if either point has fewer than two elements.
pub fn heading_to<T>(from: &[T], to: &[T]) -> Option<T>
where
    T: Float
{
    if from.len() < 2 || to.len() < 2 {
        return None;
    }

    Some((to[1] - from[1]).atan2(to[0] - from[0]))
}

pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Get the signed angular distance between two angles in the range of [0, 2pi].
///
/// This function will return the shortest signed distance between a and b accounting for wrapping
/// between 0 and 2pi.
pub fn get_ang_dist_2pi<T>(a: T, b: T) -> T
where
    T: Float
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let c = rem_euclid(a - b, tau_t);
    let d = rem_euclid(b - a, tau_t);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_ang_dist_2pi() {
        const TAU: f64 = std::f64::consts::TAU;

        assert_eq!(get_ang_dist_2pi(1f64, 2f64), 1f64);
        assert_eq!(get_ang_dist_2pi(2f64, 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU), 0f64);
        assert_eq!(get_ang_dist_2pi(TAU, 0f64), 0f64);
        assert_eq!(get_ang_dist_2pi(1f64, TAU), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU - 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(TAU - 1f64, 1f64), 2f64);
    }

    #[test]
    fn test_ang_dist_across_pi() {
        const PI: f64 = std::f64::consts::PI;

        // +179 deg and -179 deg are only 2 deg apart
        let a = 179f64.to_radians();
        let b = -179f64.to_radians();
        assert!((get_ang_dist_2pi(a, b).abs() - 2f64.to_radians()).abs() < 1e-9);

        assert!((get_ang_dist_2pi(-PI, PI)).abs() < 1e-9);
    }

    #[test]
    fn test_norms() {
        let a = [1f64, 2f64, 3f64];
        let b = [4f64, 6f64, 3f64];

        assert_eq!(norm_sq(&a, &b), Some(25f64));
        assert_eq!(norm(&a, &b), Some(5f64));
        assert_eq!(norm(&a, &b[..2]), None);
        assert_eq!(norm_sq(&b, &b), Some(0f64));
    }

    #[test]
    fn test_heading_to() {
        const PI: f64 = std::f64::consts::PI;

        assert_eq!(heading_to(&[0f64, 0f64], &[1f64, 0f64]), Some(0f64));
        assert_eq!(heading_to(&[0f64, 0f64, 5f64], &[0f64, 1f64, -2f64]), Some(PI / 2f64));
        assert_eq!(heading_to(&[1f64, 1f64], &[0f64, 1f64]), Some(PI));
        assert_eq!(heading_to(&[1f64], &[0f64, 1f64]), None);
    }

    #[test]
    fn test_lin_map_and_clamp() {
        // Ramp from 6 m/s at 20 waypoints out down to 0 at the stop line
        assert_eq!(lin_map((20f64, 0f64), (6f64, 0f64), 20f64), 6f64);
        assert_eq!(lin_map((20f64, 0f64), (6f64, 0f64), 10f64), 3f64);
        assert_eq!(lin_map((20f64, 0f64), (6f64, 0f64), 0f64), 0f64);

        assert_eq!(clamp(&7f64, &0f64, &6f64), 6f64);
        assert_eq!(clamp(&-1f64, &0f64, &6f64), 0f64);
        assert_eq!(clamp(&2.5f64, &0f64, &6f64), 2.5f64);
    }
}
