//! Velocity profiles
//!
//! While cruising every waypoint gets a velocity derived from the cruise speed. While stopping a
//! straight line ramp is built when the stop is first engaged, going from the velocity at the
//! vehicle's position down to zero at the stop line. The ramp is kept for the whole stop so the
//! vehicle decelerates along the same line every cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::{clamp, lin_map};

use super::CruiseProfile;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A linear deceleration down to a stop line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecelProfile {
    /// Index of the stop line in the base path
    stop_index: usize,

    /// Number of waypoints up to and including the stop line when the profile was built
    start_count: usize,

    /// Velocity at `start_count` waypoints from the stop line
    start_velocity_ms: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl DecelProfile {
    /// Build a profile from the current stop count and velocity.
    ///
    /// Returns `None` if the stop count is zero, as the ramp would have no length.
    pub fn new(stop_index: usize, stop_count: usize, start_velocity_ms: f64) -> Option<Self> {
        if stop_count == 0 {
            return None
        }

        Some(Self {
            stop_index,
            start_count: stop_count,
            start_velocity_ms: start_velocity_ms.max(0.0)
        })
    }

    pub fn stop_index(&self) -> usize {
        self.stop_index
    }

    pub fn start_velocity_ms(&self) -> f64 {
        self.start_velocity_ms
    }

    /// Velocity on the ramp for a waypoint with `remaining` waypoints up to and including the
    /// stop line.
    ///
    /// The ramp reaches `start_velocity_ms` at `start_count` and zero at zero remaining.
    pub fn velocity_at(&self, remaining: usize) -> f64 {
        let v = lin_map(
            (self.start_count as f64, 0.0),
            (self.start_velocity_ms, 0.0),
            remaining as f64
        );

        clamp(&v, &0.0, &self.start_velocity_ms)
    }

    /// Velocities for the `stop_count` waypoints from the vehicle up to and including the stop
    /// line, in path order.
    ///
    /// The tracked waypoint is sampled at `stop_count` and the stop line is always zero.
    pub fn velocities(&self, stop_count: usize) -> impl Iterator<Item = f64> + '_ {
        (0..stop_count).map(move |k| {
            if k + 1 == stop_count {
                0.0
            }
            else {
                self.velocity_at(stop_count - k)
            }
        })
    }
}

/// Target velocity of a waypoint while cruising.
pub fn cruise_velocity(profile: CruiseProfile, recorded_ms: f64, cruise_speed_ms: f64) -> f64 {
    match profile {
        CruiseProfile::Constant => cruise_speed_ms,
        CruiseProfile::Capped => recorded_ms.min(cruise_speed_ms).max(0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_count_rejected() {
        assert!(DecelProfile::new(10, 0, 6.0).is_none());
    }

    #[test]
    fn test_ramp_to_zero() {
        let p = DecelProfile::new(490, 21, 6.0).unwrap();
        let v: Vec<f64> = p.velocities(21).collect();

        assert_eq!(v.len(), 21);
        assert_eq!(*v.last().unwrap(), 0.0);
        assert_eq!(v[0], 6.0);
        assert!((v[19] - 6.0 * 2.0 / 21.0).abs() < 1e-9);

        for pair in v.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        for vel in v.iter() {
            assert!(*vel >= 0.0 && *vel <= 6.0);
        }
    }

    #[test]
    fn test_profile_reused_as_vehicle_advances() {
        let p = DecelProfile::new(490, 21, 6.0).unwrap();

        // Five waypoints later the same ramp is sampled closer to the line
        let later: Vec<f64> = p.velocities(16).collect();
        assert_eq!(later.len(), 16);
        assert!((later[0] - 6.0 * 16.0 / 21.0).abs() < 1e-9);
        assert_eq!(*later.last().unwrap(), 0.0);
    }

    #[test]
    fn test_single_waypoint_ramp() {
        let p = DecelProfile::new(10, 1, 6.0).unwrap();
        assert_eq!(p.velocities(1).collect::<Vec<_>>(), vec![0.0]);
    }

    #[test]
    fn test_evaluation_clamped() {
        let p = DecelProfile::new(10, 5, 4.0).unwrap();

        // Further out than when the ramp was built
        assert_eq!(p.velocity_at(8), 4.0);

        let neg = DecelProfile::new(10, 5, -1.0).unwrap();
        assert_eq!(neg.velocity_at(3), 0.0);
    }

    #[test]
    fn test_cruise_velocity() {
        assert_eq!(cruise_velocity(CruiseProfile::Constant, 11.0, 6.0), 6.0);
        assert_eq!(cruise_velocity(CruiseProfile::Constant, 2.0, 6.0), 6.0);
        assert_eq!(cruise_velocity(CruiseProfile::Capped, 11.0, 6.0), 6.0);
        assert_eq!(cruise_velocity(CruiseProfile::Capped, 2.0, 6.0), 2.0);
        assert_eq!(cruise_velocity(CruiseProfile::Capped, -2.0, 6.0), 0.0);
    }
}
