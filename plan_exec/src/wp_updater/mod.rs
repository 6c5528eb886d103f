//! # Waypoint updater module
//!
//! The waypoint updater is the local planner of the vehicle. Each cycle it takes the latest pose,
//! the base path and the traffic signal report and publishes a window of the waypoints ahead of
//! the vehicle, each with a target velocity, for the controller to follow.
//!
//! The base path is closed, so the window wraps from the last waypoint back to the first. The
//! window starts at the waypoint the vehicle should track next, found by the [`locator`].
//!
//! The updater has two modes:
//!
//! - `Cruise`: the window holds `window_size` waypoints, each with a velocity derived from the
//!   cruise speed.
//! - `Stopping`: a stop has been requested at a waypoint less than `stop_dist_wps` waypoints
//!   ahead. The window runs from the vehicle up to and including the stop line, with a linear
//!   ramp down to zero velocity at the line. The ramp is built when the stop is engaged and kept
//!   until the stop is released.
//!
//! Stop requests for waypoints outside the base path are rejected and treated as if the signal
//! were clear.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod circ_index;
pub mod locator;
pub mod params;
pub mod profile;
pub mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use circ_index::CircIndex;
pub use params::{Params, CruiseProfile};
pub use profile::DecelProfile;
pub use state::*;
