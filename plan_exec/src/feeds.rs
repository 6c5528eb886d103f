//! # Input feeds
//!
//! The planner's inputs arrive asynchronously from the rest of the vehicle. Pose and signal are
//! held as the latest value received, overwritten on every update with no queueing. The base path
//! can only be set once, later deliveries are ignored.
//!
//! The main loop takes one [`InputData`] snapshot per cycle so that the planner always works on a
//! consistent set of inputs.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{convert::TryFrom, sync::{Arc, Mutex, PoisonError}};
use conquer_once::{OnceCell, TryInitError};
use log::{info, warn};
use serde::Serialize;

use comms_if::feed::FeedMsg;
use crate::{
    base_path::{BasePath, BasePathError},
    loc::Pose,
    wp_updater::InputData
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Holder for the latest known value of each input feed.
pub struct Feeds {
    pose: Mutex<Option<Pose>>,

    signal: Mutex<SignalReport>,

    /// Result of converting the first base path delivered
    base_path: OnceCell<Result<Arc<BasePath>, BasePathError>>
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// State of the traffic signal ahead, as reported by perception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalReport {
    /// No stop requested
    Clear,

    /// Stop requested at the given base path index
    StopAt(usize)
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SignalReport {
    fn default() -> Self {
        SignalReport::Clear
    }
}

impl SignalReport {
    /// Build a report from the raw traffic waypoint value, where any negative value means there
    /// is no stop.
    pub fn from_raw(raw: i64) -> Self {
        match usize::try_from(raw) {
            Ok(i) => SignalReport::StopAt(i),
            Err(_) => SignalReport::Clear
        }
    }
}

impl Default for Feeds {
    fn default() -> Self {
        Self::new()
    }
}

impl Feeds {
    pub fn new() -> Self {
        Self {
            pose: Mutex::new(None),
            signal: Mutex::new(SignalReport::Clear),
            base_path: OnceCell::uninit()
        }
    }

    /// Apply a message received from one of the feeds.
    pub fn apply(&self, msg: FeedMsg) {
        match msg {
            FeedMsg::Pose(p) => self.set_pose(Pose::from(p)),
            FeedMsg::TrafficWaypoint(raw) => self.set_signal(SignalReport::from_raw(raw)),
            FeedMsg::BaseWaypoints(lane) => {
                let num_wps = lane.waypoints.len();
                let res = self.base_path.try_init_once(
                    || BasePath::try_from(lane).map(Arc::new)
                );

                match res {
                    Ok(()) => info!("Base path with {} waypoints received", num_wps),
                    Err(TryInitError::AlreadyInit) => warn!(
                        "Base path already loaded, ignoring new path with {} waypoints",
                        num_wps
                    ),
                    Err(TryInitError::WouldBlock) => warn!(
                        "Base path is being loaded by another thread, ignoring new path"
                    )
                }
            }
        }
    }

    /// Overwrite the latest pose.
    pub fn set_pose(&self, pose: Pose) {
        *self.pose.lock().unwrap_or_else(PoisonError::into_inner) = Some(pose);
    }

    /// Overwrite the latest signal report.
    pub fn set_signal(&self, signal: SignalReport) {
        *self.signal.lock().unwrap_or_else(PoisonError::into_inner) = signal;
    }

    /// The base path, if one has been delivered and converted successfully.
    pub fn base_path(&self) -> Option<Arc<BasePath>> {
        match self.base_path.get() {
            Some(Ok(p)) => Some(p.clone()),
            _ => None
        }
    }

    /// Take a snapshot of all feeds for this cycle.
    pub fn snapshot(&self) -> InputData {
        InputData {
            pose: *self.pose.lock().unwrap_or_else(PoisonError::into_inner),
            base_path: self.base_path.get().cloned(),
            signal: *self.signal.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::{lane::{LaneMsg, WaypointMsg}, loc::PoseMsg};

    fn lane(n: usize) -> LaneMsg {
        LaneMsg {
            waypoints: (0..n).map(|i| WaypointMsg {
                position_m: [i as f64, 0.0, 0.0],
                attitude_q: [0.0, 0.0, 0.0, 1.0],
                velocity_ms: 4.0
            }).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_signal_from_raw() {
        assert_eq!(SignalReport::from_raw(-1), SignalReport::Clear);
        assert_eq!(SignalReport::from_raw(-20), SignalReport::Clear);
        assert_eq!(SignalReport::from_raw(0), SignalReport::StopAt(0));
        assert_eq!(SignalReport::from_raw(490), SignalReport::StopAt(490));
    }

    #[test]
    fn test_empty_until_fed() {
        let feeds = Feeds::new();
        let snap = feeds.snapshot();

        assert!(snap.pose.is_none());
        assert!(snap.base_path.is_none());
        assert_eq!(snap.signal, SignalReport::Clear);
    }

    #[test]
    fn test_latest_value_wins() {
        let feeds = Feeds::new();

        feeds.apply(FeedMsg::TrafficWaypoint(40));
        feeds.apply(FeedMsg::TrafficWaypoint(41));
        feeds.apply(FeedMsg::Pose(PoseMsg {
            position_m: [1.0, 0.0, 0.0],
            attitude_q: [0.0, 0.0, 0.0, 1.0]
        }));
        feeds.apply(FeedMsg::Pose(PoseMsg {
            position_m: [2.0, 0.0, 0.0],
            attitude_q: [0.0, 0.0, 0.0, 1.0]
        }));

        let snap = feeds.snapshot();
        assert_eq!(snap.signal, SignalReport::StopAt(41));
        assert_eq!(snap.pose.map(|p| p.position_m[0]), Some(2.0));

        feeds.apply(FeedMsg::TrafficWaypoint(-1));
        assert_eq!(feeds.snapshot().signal, SignalReport::Clear);
    }

    #[test]
    fn test_base_path_loaded_once() {
        let feeds = Feeds::new();

        feeds.apply(FeedMsg::BaseWaypoints(lane(5)));
        feeds.apply(FeedMsg::BaseWaypoints(lane(9)));

        assert_eq!(feeds.base_path().map(|p| p.len()), Some(5));
    }

    #[test]
    fn test_empty_base_path_kept_as_error() {
        let feeds = Feeds::new();

        feeds.apply(FeedMsg::BaseWaypoints(lane(0)));
        feeds.apply(FeedMsg::BaseWaypoints(lane(9)));

        assert!(feeds.base_path().is_none());
        assert!(matches!(feeds.snapshot().base_path, Some(Err(BasePathError::Empty))));
    }
}
