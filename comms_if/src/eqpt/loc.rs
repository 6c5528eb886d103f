//! # Localisation Equipment Communications Module

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A vehicle pose as published by the localisation provider.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PoseMsg {
    /// The position in the world frame, `[x, y, z]`
    pub position_m: [f64; 3],

    /// The attitude of the vehicle in the world frame as a quaternion, `[x, y, z, w]`.
    pub attitude_q: [f64; 4],
}
