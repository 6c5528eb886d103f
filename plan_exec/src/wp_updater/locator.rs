//! Locating the vehicle on the base path

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::{get_ang_dist_2pi, heading_to, norm_sq};

use crate::{base_path::BasePath, loc::Pose};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the index of the waypoint the vehicle should track next.
///
/// This is the closest waypoint to the vehicle (ties go to the lowest index), unless that
/// waypoint is behind the vehicle, in which case the one after it is used. A waypoint is behind
/// the vehicle when the bearing to it differs from the vehicle heading by more than
/// `behind_angle_threshold_rad`.
pub fn next_waypoint(pose: &Pose, path: &BasePath, behind_angle_threshold_rad: f64) -> usize {
    let closest = closest_waypoint(pose, path);

    let position = pose.position_array();
    let wp_position = path.waypoints()[closest].position_m;

    // A waypoint directly under the vehicle has no bearing, keep it
    if wp_position[0] == position[0] && wp_position[1] == position[1] {
        return closest
    }

    let bearing = match heading_to(&position, &wp_position) {
        Some(b) => b,
        None => return closest
    };

    let diff = get_ang_dist_2pi(bearing, pose.get_heading()).abs();

    if diff > behind_angle_threshold_rad {
        (closest + 1) % path.len()
    }
    else {
        closest
    }
}

/// Index of the waypoint closest (in 3D) to the vehicle.
pub fn closest_waypoint(pose: &Pose, path: &BasePath) -> usize {
    let position = pose.position_array();

    let mut best_index = 0;
    let mut best_dist = std::f64::INFINITY;

    for (i, wp) in path.waypoints().iter().enumerate() {
        let d = norm_sq(&position, &wp.position_m).unwrap_or(std::f64::INFINITY);

        // Strictly less so the first of equal candidates is kept
        if d < best_dist {
            best_dist = d;
            best_index = i;
        }
    }

    best_index
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::base_path::Waypoint;
    use nalgebra::Vector3;
    use std::f64::consts::{FRAC_PI_4, PI};

    /// Straight path along X with 1 m spacing
    fn line(n: usize) -> BasePath {
        BasePath::new(
            (0..n).map(|i| Waypoint {
                position_m: [i as f64, 0.0, 0.0],
                attitude_q: [0.0, 0.0, 0.0, 1.0],
                velocity_ms: 10.0
            }).collect()
        ).unwrap()
    }

    #[test]
    fn test_waypoint_ahead_kept() {
        let path = line(10);
        let pose = Pose::from_parts(Vector3::new(3.8, 0.0, 0.0), 0.0);

        // Closest is 4, which is ahead
        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 4);
    }

    #[test]
    fn test_waypoint_behind_skipped() {
        let path = line(10);
        let pose = Pose::from_parts(Vector3::new(4.2, 0.0, 0.0), 0.0);

        // Closest is 4, which is behind
        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 5);

        // Driving the other way 4 is ahead
        let pose = Pose::from_parts(Vector3::new(4.2, 0.0, 0.0), PI);
        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 4);
    }

    #[test]
    fn test_behind_last_wraps() {
        let path = line(10);
        let pose = Pose::from_parts(Vector3::new(9.5, 0.0, 0.0), 0.0);

        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 0);
    }

    #[test]
    fn test_heading_wraps_across_pi() {
        let path = line(10);

        // Waypoint 4 is at a bearing of +179 deg and the vehicle heads -179 deg, only 2 deg apart
        let pose = Pose::from_parts(
            Vector3::new(4.4, -0.4 * 1f64.to_radians().tan(), 0.0),
            -179f64.to_radians()
        );

        assert_eq!(closest_waypoint(&pose, &path), 4);
        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 4);
    }

    #[test]
    fn test_ties_go_to_first() {
        let path = BasePath::new(vec![
            Waypoint { position_m: [1.0, 0.0, 0.0], attitude_q: [0.0, 0.0, 0.0, 1.0], velocity_ms: 1.0 },
            Waypoint { position_m: [-1.0, 0.0, 0.0], attitude_q: [0.0, 0.0, 0.0, 1.0], velocity_ms: 1.0 },
            Waypoint { position_m: [1.0, 0.0, 0.0], attitude_q: [0.0, 0.0, 0.0, 1.0], velocity_ms: 1.0 },
        ]).unwrap();

        let pose = Pose::from_parts(Vector3::new(0.0, 0.0, 0.0), 0.0);
        assert_eq!(closest_waypoint(&pose, &path), 0);
        assert_eq!(next_waypoint(&pose, &path, FRAC_PI_4), 0);
    }

    #[test]
    fn test_index_in_range_and_deterministic() {
        let path = line(7);

        for k in 0..50 {
            let x = -3.0 + 0.25 * k as f64;
            let pose = Pose::from_parts(Vector3::new(x, 0.3, 0.0), 0.1 * k as f64);
            let a = next_waypoint(&pose, &path, FRAC_PI_4);
            let b = next_waypoint(&pose, &path, FRAC_PI_4);

            assert!(a < path.len());
            assert_eq!(a, b);
        }
    }
}
