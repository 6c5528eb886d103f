//! # Feed script interpreter module
//!
//! This module provides an interpreter for feed scripts, allowing the planner to be driven offline
//! by replaying timestamped input feed messages. A script is a sequence of entries of the form
//!
//! ```text
//! <time_s>: <feed message JSON>;
//! ```
//!
//! where the message JSON is the same as what would be received from the network.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::feed::{FeedMsg, FeedParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A message which is scripted to be delivered at a specific time.
struct ScriptedMsg {
    /// The time the message is supposed to be delivered at
    exec_time_s: f64,

    /// The message to deliver
    msg: FeedMsg
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending_msgs` to
/// acquire a list of feed messages that need delivering.
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    msgs: VecDeque<ScriptedMsg>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid message at {0} s: {1}")]
    InvalidMsg(f64, FeedParseError),

    #[error("Could not build the script parser: {0}")]
    RegexError(regex::Error),

    #[error("Script timestamps must not decrease, found {1} s after {0} s")]
    OutOfOrder(f64, f64)
}

pub enum PendingMsgs {
    None,
    Some(Vec<FeedMsg>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut interp = Self::from_str(&script)?;
        interp.script_path = Some(path);

        Ok(interp)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of messages
        let mut msg_queue: VecDeque<ScriptedMsg> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = match RegexBuilder::new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
        {
            Ok(r) => r,
            Err(e) => return Err(ScriptError::RegexError(e))
        };

        for cap in re.captures_iter(script) {
            let (time_str, payload) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(p)) => (t.as_str(), p.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = time_str.parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if let Some(prev) = msg_queue.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(prev.exec_time_s, exec_time_s));
                }
            }

            // Parse the message from the payload. The scripts contain JSON only.
            let msg = FeedMsg::from_json(payload)
                .map_err(|e| ScriptError::InvalidMsg(exec_time_s, e))?;

            msg_queue.push_back(ScriptedMsg {
                exec_time_s,
                msg
            });
        }

        if msg_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            msgs: msg_queue
        })
    }

    /// Return the pending messages using the current session time.
    ///
    /// # Panics
    /// - If no session has been started, see [`get_elapsed_seconds`].
    pub fn get_pending_msgs(&mut self) -> PendingMsgs {
        self.get_pending_msgs_at(get_elapsed_seconds())
    }

    /// Return all messages whose time is at or before `current_time_s`, in script order.
    pub fn get_pending_msgs_at(&mut self, current_time_s: f64) -> PendingMsgs {

        // If the queue is empty the script is over
        if self.msgs.is_empty() {
            return PendingMsgs::EndOfScript
        }

        let mut msg_vec: Vec<FeedMsg> = vec![];

        while let Some(front) = self.msgs.front() {
            if front.exec_time_s > current_time_s {
                break;
            }

            if let Some(m) = self.msgs.pop_front() {
                msg_vec.push(m.msg);
            }
        }

        if msg_vec.is_empty() {
            PendingMsgs::None
        }
        else {
            PendingMsgs::Some(msg_vec)
        }
    }

    /// Get the number of messages left in the script
    pub fn get_num_msgs(&self) -> usize {
        self.msgs.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.msgs.back() {
            Some(m) => m.exec_time_s,
            None => 0f64
        }
    }

    /// Path the script was loaded from, if it came from a file
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}
