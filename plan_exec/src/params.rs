//! # Planner Executable Parameters
//!
//! This module provide parameters for the planner executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PlanExecParams {

    /// Frequency of the main planning loop
    pub cycle_frequency_hz: f64,
}
