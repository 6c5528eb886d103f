//! Waypoint updater parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the waypoint updater
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// Maximum number of waypoints published each cycle
    pub window_size: usize,

    /// Target velocity while cruising, also the upper bound of any published velocity
    pub cruise_speed_ms: f64,

    /// Stopping only engages when the stop line is less than this many waypoints ahead
    pub stop_dist_wps: usize,

    /// If the closest waypoint's bearing differs from the vehicle heading by more than this
    /// angle the waypoint is considered behind the vehicle and the next one is used.
    #[serde(default = "default_behind_angle_threshold_rad")]
    pub behind_angle_threshold_rad: f64,

    /// How cruise velocities are derived
    #[serde(default)]
    pub cruise_profile: CruiseProfile
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The way target velocities are assigned while cruising.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum CruiseProfile {
    /// Every waypoint gets the cruise speed
    Constant,

    /// Every waypoint gets the lower of its recorded velocity and the cruise speed
    Capped
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CruiseProfile {
    fn default() -> Self {
        CruiseProfile::Constant
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            window_size: 200,
            cruise_speed_ms: 6.0,
            stop_dist_wps: 30,
            behind_angle_threshold_rad: default_behind_angle_threshold_rad(),
            cruise_profile: CruiseProfile::Constant
        }
    }
}

fn default_behind_angle_threshold_rad() -> f64 {
    std::f64::consts::FRAC_PI_4
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_params() {
        let p: Params = util::params::from_str(
            "window_size = 200\ncruise_speed_ms = 6.0\nstop_dist_wps = 30"
        ).unwrap();

        assert_eq!(p.window_size, 200);
        assert_eq!(p.cruise_profile, CruiseProfile::Constant);
        assert_eq!(p.behind_angle_threshold_rad, std::f64::consts::FRAC_PI_4);

        let p: Params = util::params::from_str(
            "window_size = 50\ncruise_speed_ms = 4.0\nstop_dist_wps = 10\n\
            cruise_profile = \"Capped\""
        ).unwrap();

        assert_eq!(p.cruise_profile, CruiseProfile::Capped);
    }
}
