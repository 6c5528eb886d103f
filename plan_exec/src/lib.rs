//! # Planner library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to access items defined
//! inside the planner crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Base path - the closed reference path the vehicle drives around
pub mod base_path;

/// Data store - per cycle state of the executable
pub mod data_store;

/// Feed client - recieves the input feeds from the rest of the vehicle
pub mod feed_client;

/// Input feeds - latest value holders for the planner inputs
pub mod feeds;

/// Localisation module - the vehicle pose as given by localisation
pub mod loc;

/// Executable parameters
pub mod params;

/// Plan server - publishes the planner output to the controller
pub mod plan_server;

/// Waypoint updater - the local planner itself
pub mod wp_updater;
