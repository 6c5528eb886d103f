//! # Lane Communications Module
//!
//! A lane is an ordered list of waypoints. It is used both for the reference path delivered by
//! the map provider and for the window of waypoints the planner publishes to the controller.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Frame in which all lanes are expressed.
pub const WORLD_FRAME_ID: &str = "/world";

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Header attached to every lane.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Header {
    /// Sequence number, the planner sets this to its cycle count
    pub seq: u64,

    /// Logical timestamp in seconds
    pub stamp_s: f64,

    /// Reference frame the waypoints are expressed in
    pub frame_id: String,
}

/// A single waypoint of a lane.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct WaypointMsg {
    /// Position in the world frame, `[x, y, z]`
    pub position_m: [f64; 3],

    /// Attitude in the world frame as a quaternion, `[x, y, z, w]`
    pub attitude_q: [f64; 4],

    /// Target longitudinal velocity at this waypoint
    pub velocity_ms: f64,
}

/// An ordered list of waypoints.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct LaneMsg {
    pub header: Header,

    pub waypoints: Vec<WaypointMsg>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for Header {
    fn default() -> Self {
        Self {
            seq: 0,
            stamp_s: 0.0,
            frame_id: WORLD_FRAME_ID.into(),
        }
    }
}
