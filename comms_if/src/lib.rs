//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the planner software: the messages exchanged
//! with the localisation, map and perception providers, the messages published to the controller,
//! and the network abstraction they travel over.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Message definitions for the equipment feeding or consuming the planner
pub mod eqpt;

/// Input feed and planner output envelopes
pub mod feed;

/// Network module
pub mod net;
