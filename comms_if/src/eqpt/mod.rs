//! # Equipment Interface
//!
//! This module defines the structures exchanged with the equipment around the planner: the
//! localisation provider, the map provider and the controller.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod lane;
pub mod loc;
