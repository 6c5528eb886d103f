//! # Feed module
//!
//! Envelopes for the messages flowing into the planner (the input feeds) and out of it (the
//! planner output). All messages travel as JSON, for example:
//!
//! ```text
//! {"Pose": {"position_m": [1.0, 2.0, 0.0], "attitude_q": [0.0, 0.0, 0.0, 1.0]}}
//! {"TrafficWaypoint": 490}
//! {"TrafficWaypoint": -1}
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// Internal
use crate::eqpt::{lane::LaneMsg, loc::PoseMsg};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Raw traffic waypoint value meaning there is no active stop.
pub const TRAFFIC_WAYPOINT_CLEAR: i64 = -1;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A message delivered to the planner by one of its input feeds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum FeedMsg {
    /// Latest vehicle pose from localisation
    Pose(PoseMsg),

    /// The reference path, delivered once by the map provider
    BaseWaypoints(LaneMsg),

    /// Stop line index reported by perception. Any negative value means there is no active stop.
    TrafficWaypoint(i64),
}

/// A message published by the planner.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum PlanMsg {
    /// Window of waypoints with target velocities for the controller
    FinalWaypoints(LaneMsg),

    /// True while a valid stop request is reported by perception
    SignalActive(bool),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum FeedParseError {
    #[error("Message contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Message could not be serialized: {0}")]
    SerializeError(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FeedMsg {
    /// Parse a feed message from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, FeedParseError> {
        serde_json::from_str(json_str).map_err(FeedParseError::InvalidJson)
    }

    /// Serialize the message into a JSON string
    pub fn to_json(&self) -> Result<String, FeedParseError> {
        serde_json::to_string(self).map_err(FeedParseError::SerializeError)
    }

    /// Short name of the feed this message belongs to, used in logs.
    pub fn feed_name(&self) -> &'static str {
        match self {
            FeedMsg::Pose(_) => "pose",
            FeedMsg::BaseWaypoints(_) => "base_waypoints",
            FeedMsg::TrafficWaypoint(_) => "traffic_waypoint",
        }
    }
}

impl PlanMsg {
    /// Parse a planner message from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, FeedParseError> {
        serde_json::from_str(json_str).map_err(FeedParseError::InvalidJson)
    }

    /// Serialize the message into a JSON string
    pub fn to_json(&self) -> Result<String, FeedParseError> {
        serde_json::to_string(self).map_err(FeedParseError::SerializeError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_feed_msgs() {
        let msg = FeedMsg::from_json(r#"{"TrafficWaypoint": 490}"#).unwrap();
        assert_eq!(msg, FeedMsg::TrafficWaypoint(490));

        let msg = FeedMsg::from_json(r#"{"TrafficWaypoint": -1}"#).unwrap();
        assert_eq!(msg, FeedMsg::TrafficWaypoint(TRAFFIC_WAYPOINT_CLEAR));

        let msg = FeedMsg::from_json(
            r#"{"Pose": {"position_m": [1.0, 2.0, 0.0], "attitude_q": [0.0, 0.0, 0.0, 1.0]}}"#
        ).unwrap();
        match msg {
            FeedMsg::Pose(p) => {
                assert_eq!(p.position_m, [1.0, 2.0, 0.0]);
                assert_eq!(p.attitude_q[3], 1.0);
            }
            m => panic!("Expected a pose, got {:?}", m)
        }
    }

    #[test]
    fn test_invalid_feed_msgs() {
        assert!(matches!(
            FeedMsg::from_json(r#"{"Velocity": 3}"#),
            Err(FeedParseError::InvalidJson(_))
        ));
        assert!(matches!(
            FeedMsg::from_json("not json"),
            Err(FeedParseError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_parse_base_waypoints() {
        let msg = FeedMsg::from_json(r#"{"BaseWaypoints": {
            "header": {"seq": 0, "stamp_s": 0.0, "frame_id": "/world"},
            "waypoints": [
                {"position_m": [0.0, 0.0, 0.0], "attitude_q": [0.0, 0.0, 0.0, 1.0], "velocity_ms": 11.1}
            ]
        }}"#).unwrap();

        assert_eq!(msg.feed_name(), "base_waypoints");
        match msg {
            FeedMsg::BaseWaypoints(lane) => {
                assert_eq!(lane.header.frame_id, "/world");
                assert_eq!(lane.waypoints.len(), 1);
                assert_eq!(lane.waypoints[0].velocity_ms, 11.1);
            }
            m => panic!("Expected base waypoints, got {:?}", m)
        }
    }
}
