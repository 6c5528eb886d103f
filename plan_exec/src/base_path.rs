//! # Base path
//!
//! The base path is the fixed reference path the vehicle drives around, delivered once by the map
//! provider. It is closed: the waypoint after the last one is the first one.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::convert::TryFrom;

use comms_if::eqpt::lane::{Header, LaneMsg, WaypointMsg};
use util::maths::norm;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single waypoint of the base path.
///
/// A waypoint is identified by its index in the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Position in the world frame
    pub position_m: [f64; 3],

    /// Attitude in the world frame as a quaternion, `[x, y, z, w]`
    pub attitude_q: [f64; 4],

    /// Velocity recorded for this waypoint when the path was built
    pub velocity_ms: f64,
}

/// The reference path, guaranteed to contain at least one waypoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePath {
    waypoints: Vec<Waypoint>
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, thiserror::Error)]
pub enum BasePathError {
    #[error("The base path contains no waypoints")]
    Empty
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl BasePath {
    /// Build a path from a list of waypoints.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, BasePathError> {
        if waypoints.is_empty() {
            return Err(BasePathError::Empty)
        }

        Ok(Self { waypoints })
    }

    /// Number of waypoints in the path, always at least 1.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Along-path distance in metres walking forwards from `from` to `to`, wrapping past the end
    /// of the path if needed.
    ///
    /// Returns `None` if either index is out of range.
    pub fn distance_between(&self, from: usize, to: usize) -> Option<f64> {
        let len = self.len();

        if from >= len || to >= len {
            return None
        }

        let mut dist = 0.0;
        let mut i = from;

        while i != to {
            let next = (i + 1) % len;
            dist += norm(&self.waypoints[i].position_m, &self.waypoints[next].position_m)
                .unwrap_or(0.0);
            i = next;
        }

        Some(dist)
    }

    /// Convert back into a lane message, with the given header.
    pub fn to_msg(&self, header: Header) -> LaneMsg {
        LaneMsg {
            header,
            waypoints: self.waypoints.iter().map(|w| w.to_msg(w.velocity_ms)).collect()
        }
    }
}

impl Waypoint {
    /// Convert into the wire representation, with the given target velocity.
    pub fn to_msg(&self, velocity_ms: f64) -> WaypointMsg {
        WaypointMsg {
            position_m: self.position_m,
            attitude_q: self.attitude_q,
            velocity_ms
        }
    }
}

impl From<WaypointMsg> for Waypoint {
    fn from(msg: WaypointMsg) -> Self {
        Self {
            position_m: msg.position_m,
            attitude_q: msg.attitude_q,
            velocity_ms: msg.velocity_ms
        }
    }
}

impl TryFrom<LaneMsg> for BasePath {
    type Error = BasePathError;

    fn try_from(msg: LaneMsg) -> Result<Self, Self::Error> {
        Self::new(msg.waypoints.into_iter().map(Waypoint::from).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn line(n: usize) -> BasePath {
        BasePath::new(
            (0..n).map(|i| Waypoint {
                position_m: [i as f64, 0.0, 0.0],
                attitude_q: [0.0, 0.0, 0.0, 1.0],
                velocity_ms: 5.0
            }).collect()
        ).unwrap()
    }

    #[test]
    fn test_empty_lane_rejected() {
        let res = BasePath::try_from(LaneMsg::default());
        assert!(matches!(res, Err(BasePathError::Empty)));
    }

    #[test]
    fn test_distance_between() {
        let path = line(5);

        assert_eq!(path.distance_between(1, 1), Some(0.0));
        assert_eq!(path.distance_between(0, 3), Some(3.0));
        // 3 -> 4 is 1 m, 4 -> 0 closes the loop at 4 m, 0 -> 1 is 1 m
        assert_eq!(path.distance_between(3, 1), Some(6.0));
        assert_eq!(path.distance_between(0, 5), None);
    }

    #[test]
    fn test_lane_conversion() {
        let path = line(3);
        let msg = path.to_msg(Header::default());

        assert_eq!(msg.waypoints.len(), 3);
        assert_eq!(msg.header.frame_id, "/world");
        assert_eq!(BasePath::try_from(msg).unwrap(), path);
    }
}
