//! Waypoint updater module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::sync::Arc;
use log::{info, trace, warn};
use serde::Serialize;

// Internal
use super::{locator, profile::cruise_velocity, CircIndex, DecelProfile, Params};
use crate::{
    base_path::{BasePath, BasePathError},
    feeds::SignalReport,
    loc::Pose
};
use comms_if::eqpt::lane::{Header, LaneMsg, WORLD_FRAME_ID};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::{self, Session}
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Waypoint updater module state
pub struct WpUpdater {
    params: Params,

    /// Executing mode
    mode: PlanMode,

    /// Deceleration ramp for the current stop, only present while stopping
    decel_profile: Option<DecelProfile>,

    /// Last stop index which was rejected, so the warning is only issued once
    rejected_signal: Option<usize>,

    /// Number of calls to `proc`, used as the output sequence number
    num_cycles: u64,

    report: StatusReport,
    arch_report: Archiver
}

/// Input data to the waypoint updater, a snapshot of the input feeds.
#[derive(Debug, Clone, Default)]
pub struct InputData {
    /// Latest vehicle pose, `None` until localisation has published one
    pub pose: Option<Pose>,

    /// The base path, `None` until the map provider has delivered it. A delivered path which
    /// could not be used is kept as the error.
    pub base_path: Option<Result<Arc<BasePath>, BasePathError>>,

    /// Latest traffic signal report
    pub signal: SignalReport
}

/// Output of one cycle, `None` when the updater is not ready.
pub type OutputData = Option<PlanOutput>;

/// What the updater publishes each cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutput {
    /// Window of waypoints ahead of the vehicle with their target velocities
    pub final_waypoints: LaneMsg,

    /// True if a valid stop request is being reported
    pub signal_active: bool
}

/// Status report for waypoint updater processing.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct StatusReport {
    /// Session time of the cycle
    pub time_s: f64,

    /// False if the pose or base path were not available
    pub ready: bool,

    pub mode: ModeTag,

    /// Stop line being stopped at
    pub stop_index: Option<usize>,

    /// Index of the waypoint the vehicle is tracking
    pub current_index: Option<usize>,

    /// Waypoints from the vehicle up to and including the stop line
    pub stop_count: Option<usize>,

    /// Along path distance from the tracked waypoint to the stop line
    pub dist_to_stop_m: Option<f64>,

    /// Number of waypoints published
    pub window_len: usize,

    /// The signal reported a stop line outside the base path
    pub signal_rejected: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Potential errors that can occur during the waypoint updater's operation.
#[derive(Debug, thiserror::Error)]
pub enum WpUpdaterError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(params::LoadError),

    #[error("Could not create the status report archive: {0}")]
    ArchiveError(ArchiveError),

    /// The map provider delivered a base path with no waypoints. The path is only ever
    /// delivered once so the updater can never become ready.
    #[error("The base path is empty")]
    EmptyBasePath
}

/// The possible modes of execution of the waypoint updater.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlanMode {
    Cruise,
    Stopping {
        stop_index: usize
    }
}

/// Mode without its data, for the archives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ModeTag {
    Cruise,
    Stopping
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for ModeTag {
    fn default() -> Self {
        ModeTag::Cruise
    }
}

impl From<PlanMode> for ModeTag {
    fn from(mode: PlanMode) -> Self {
        match mode {
            PlanMode::Cruise => ModeTag::Cruise,
            PlanMode::Stopping { .. } => ModeTag::Stopping
        }
    }
}

impl Default for WpUpdater {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl State for WpUpdater {
    type InitData = &'static str;
    type InitError = WpUpdaterError;

    type InputData = InputData;
    type OutputData = OutputData;
    type StatusReport = StatusReport;
    type ProcError = WpUpdaterError;

    /// Initialise the WpUpdater module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        self.params = params::load(init_data)
            .map_err(WpUpdaterError::ParamLoadError)?;

        self.arch_report = Archiver::from_path(session, "wp_updater/status_report.csv")
            .map_err(WpUpdaterError::ArchiveError)?;

        info!(
            "WpUpdater params: window {} wps, cruise {} m/s, stop distance {} wps, {:?} cruise",
            self.params.window_size,
            self.params.cruise_speed_ms,
            self.params.stop_dist_wps,
            self.params.cruise_profile
        );

        Ok(())
    }

    /// Perform cyclic processing of the waypoint updater.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        let seq = self.num_cycles;
        self.num_cycles += 1;

        // Clear the status report
        self.report = StatusReport {
            time_s: session::try_get_elapsed_seconds().unwrap_or(0.0),
            mode: self.mode.into(),
            stop_index: self.stop_index(),
            ..Default::default()
        };

        // Not ready until both the path and the pose are known
        let path = match input_data.base_path {
            Some(Ok(ref p)) => p.clone(),
            Some(Err(BasePathError::Empty)) => return Err(WpUpdaterError::EmptyBasePath),
            None => {
                trace!("WpUpdater waiting for the base path");
                return Ok((None, self.report))
            }
        };
        let pose = match input_data.pose {
            Some(p) => p,
            None => {
                trace!("WpUpdater waiting for the pose");
                return Ok((None, self.report))
            }
        };

        self.report.ready = true;

        let ci = CircIndex::new(path.len()).ok_or(WpUpdaterError::EmptyBasePath)?;

        let current = locator::next_waypoint(
            &pose,
            &path,
            self.params.behind_angle_threshold_rad
        );
        self.report.current_index = Some(current);

        let stop_index = self.validate_signal(input_data.signal, &ci);

        // Work out which mode this cycle runs in
        let mut stop_count = 0;
        let next_mode = match stop_index {
            Some(s) => {
                stop_count = ci.forward_dist(current, ci.advance(s));
                self.report.stop_count = Some(stop_count);
                self.report.dist_to_stop_m = path.distance_between(current, s);

                if stop_count > 0 && stop_count < self.params.stop_dist_wps {
                    PlanMode::Stopping { stop_index: s }
                }
                else {
                    PlanMode::Cruise
                }
            },
            None => PlanMode::Cruise
        };

        self.switch_mode(next_mode, &path, current, stop_count);

        // Build the window
        let waypoints = match (self.mode, self.decel_profile) {
            (PlanMode::Stopping { .. }, Some(profile)) => ci
                .window(current, stop_count)
                .zip(profile.velocities(stop_count))
                .take(self.params.window_size)
                .map(|(i, v)| path.waypoints()[i].to_msg(v))
                .collect(),
            _ => {
                let n = self.params.window_size.min(path.len());
                ci.window(current, n)
                    .map(|i| {
                        let wp = &path.waypoints()[i];
                        wp.to_msg(cruise_velocity(
                            self.params.cruise_profile,
                            wp.velocity_ms,
                            self.params.cruise_speed_ms
                        ))
                    })
                    .collect()
            }
        };

        let final_waypoints = LaneMsg {
            header: Header {
                seq,
                stamp_s: self.report.time_s,
                frame_id: WORLD_FRAME_ID.into()
            },
            waypoints
        };

        self.report.mode = self.mode.into();
        self.report.stop_index = self.stop_index();
        self.report.window_len = final_waypoints.waypoints.len();

        trace!(
            "WpUpdater: {:?} at wp {}, {} wps published",
            self.mode,
            current,
            self.report.window_len
        );

        Ok((
            Some(PlanOutput {
                final_waypoints,
                signal_active: stop_index.is_some()
            }),
            self.report
        ))
    }
}

impl Archived for WpUpdater {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)
    }
}

impl WpUpdater {
    /// Create a new updater with the given parameters and no archive.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            mode: PlanMode::Cruise,
            decel_profile: None,
            rejected_signal: None,
            num_cycles: 0,
            report: StatusReport::default(),
            arch_report: Archiver::default()
        }
    }

    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    /// The current deceleration ramp, only present while stopping.
    pub fn decel_profile(&self) -> Option<&DecelProfile> {
        self.decel_profile.as_ref()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    fn stop_index(&self) -> Option<usize> {
        match self.mode {
            PlanMode::Stopping { stop_index } => Some(stop_index),
            PlanMode::Cruise => None
        }
    }

    /// Return the stop index if the signal holds a valid stop request.
    ///
    /// A stop line outside the base path is rejected and treated as no stop.
    fn validate_signal(&mut self, signal: SignalReport, ci: &CircIndex) -> Option<usize> {
        match signal {
            SignalReport::StopAt(i) if i >= ci.len() => {
                self.report.signal_rejected = true;

                if self.rejected_signal != Some(i) {
                    warn!(
                        "Stop line at waypoint {} is outside the base path ({} waypoints), \
                        ignoring it",
                        i,
                        ci.len()
                    );
                    self.rejected_signal = Some(i);
                }

                None
            },
            SignalReport::StopAt(i) => {
                self.rejected_signal = None;
                Some(i)
            },
            SignalReport::Clear => {
                self.rejected_signal = None;
                None
            }
        }
    }

    /// Change mode, building or dropping the deceleration ramp as required.
    fn switch_mode(&mut self, next_mode: PlanMode, path: &BasePath, current: usize, stop_count: usize) {
        match next_mode {
            PlanMode::Stopping { stop_index } => {
                let rebuild = match self.decel_profile {
                    Some(ref p) => p.stop_index() != stop_index,
                    None => true
                };

                if rebuild {
                    let recorded = path.waypoints()[current].velocity_ms;
                    self.decel_profile = DecelProfile::new(
                        stop_index,
                        stop_count,
                        recorded.min(self.params.cruise_speed_ms)
                    );
                }
            },
            PlanMode::Cruise => self.decel_profile = None
        }

        if next_mode != self.mode {
            match next_mode {
                PlanMode::Stopping { stop_index } => info!(
                    "Stopping at waypoint {}, {} waypoints ahead, from {:.2} m/s",
                    stop_index,
                    stop_count,
                    self.decel_profile.map(|p| p.start_velocity_ms()).unwrap_or(0.0)
                ),
                PlanMode::Cruise => info!("Resuming cruise")
            }

            self.mode = next_mode;
        }
    }
}
