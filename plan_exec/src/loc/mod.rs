//! # Localisation module
//!
//! The planner does not localise itself, it is given the vehicle pose by an external
//! localisation provider. This module holds the planner's view of that pose.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use nalgebra::{Vector3, Quaternion, UnitQuaternion};

use comms_if::eqpt::loc::PoseMsg;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose (position and attitude in the world frame) of the vehicle.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Pose {

    /// The position in the world frame
    pub position_m: Vector3<f64>,

    /// The attitude of the vehicle in the world frame.
    pub attitude_q: UnitQuaternion<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {

    /// Create a pose on the ground plane from a position and a heading (yaw) in radians.
    pub fn from_parts(position_m: Vector3<f64>, heading_rad: f64) -> Self {
        Self {
            position_m,
            attitude_q: UnitQuaternion::from_euler_angles(0.0, 0.0, heading_rad)
        }
    }

    /// Return the heading (angle to the positive X axis) of the vehicle in radians.
    ///
    /// Heading is the yaw of the attitude, in the range [-pi, pi].
    pub fn get_heading(&self) -> f64 {
        self.attitude_q.euler_angles().2
    }

    /// Position as a plain array, for use with the `util::maths` functions.
    pub fn position_array(&self) -> [f64; 3] {
        [self.position_m[0], self.position_m[1], self.position_m[2]]
    }
}

impl From<PoseMsg> for Pose {
    fn from(msg: PoseMsg) -> Self {
        let [x, y, z, w] = msg.attitude_q;

        Self {
            position_m: Vector3::from(msg.position_m),
            // Normalises the quaternion, localisation output is not always exactly unit length
            attitude_q: UnitQuaternion::from_quaternion(Quaternion::new(w, x, y, z))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_heading_from_msg() {
        // Quarter turn about Z
        let half = std::f64::consts::FRAC_PI_4;
        let msg = PoseMsg {
            position_m: [1.0, 2.0, 3.0],
            attitude_q: [0.0, 0.0, half.sin(), half.cos()]
        };

        let pose = Pose::from(msg);

        assert!((pose.get_heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
        assert_eq!(pose.position_array(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_identity_attitude() {
        let pose = Pose::from(PoseMsg {
            position_m: [0.0; 3],
            attitude_q: [0.0, 0.0, 0.0, 1.0]
        });

        assert_eq!(pose.get_heading(), 0.0);

        let pose = Pose::from_parts(Vector3::new(0.0, 0.0, 0.0), -2.0);
        assert!((pose.get_heading() + 2.0).abs() < 1e-9);
    }
}
