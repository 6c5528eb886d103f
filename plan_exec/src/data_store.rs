//! # Data Store

use log::info;

use crate::wp_updater::{self, WpUpdater};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time at the start of the cycle
    pub session_time_s: f64,

    // WpUpdater
    pub wp_updater: WpUpdater,
    pub wp_updater_input: wp_updater::InputData,
    pub wp_updater_output: wp_updater::OutputData,
    pub wp_updater_status_rpt: wp_updater::StatusReport,

    /// True once the base path has been saved into the session
    pub base_path_saved: bool,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,

    /// Total number of cycle overruns
    pub num_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears those items that need clearing at the start of a cycle, and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_second = (cycle_frequency_hz.round() as u64).max(1);

        self.is_1_hz_cycle = self.num_cycles % cycles_per_second == 0;

        self.wp_updater_input = wp_updater::InputData::default();
        self.wp_updater_output = None;
        self.wp_updater_status_rpt = wp_updater::StatusReport::default();

        self.session_time_s = util::session::try_get_elapsed_seconds().unwrap_or(0.0);
    }

    /// Perform actions required at the end of a cycle.
    pub fn cycle_end(&mut self, overran: bool) {
        if overran {
            self.num_consec_cycle_overruns += 1;
            self.num_cycle_overruns += 1;
        }
        else {
            self.num_consec_cycle_overruns = 0;
        }

        self.num_cycles += 1;
    }

    /// Log a one line summary of the planner state.
    pub fn log_summary(&self) {
        info!("{}", self.summary());
    }

    /// One line summary of the planner state, stamped with the cycle's session time.
    pub fn summary(&self) -> String {
        let rpt = &self.wp_updater_status_rpt;

        if rpt.ready {
            format!(
                "[{:.1} s] {:?} at wp {:?}, {} wps published{}",
                self.session_time_s,
                rpt.mode,
                rpt.current_index,
                rpt.window_len,
                match (rpt.stop_index, rpt.dist_to_stop_m) {
                    (Some(i), Some(d)) => format!(", stop line {} in {:.1} m", i, d),
                    _ => String::new()
                }
            )
        }
        else {
            format!("[{:.1} s] Waiting for pose and base path", self.session_time_s)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_1_hz_flag() {
        let mut ds = DataStore::default();
        let mut flags = vec![];

        for _ in 0..21 {
            ds.cycle_start(10.0);
            flags.push(ds.is_1_hz_cycle);
            ds.cycle_end(false);
        }

        let set: Vec<usize> = flags.iter()
            .enumerate()
            .filter(|(_, f)| **f)
            .map(|(i, _)| i)
            .collect();

        assert_eq!(set, vec![0, 10, 20]);
    }

    #[test]
    fn test_overrun_counters() {
        let mut ds = DataStore::default();

        ds.cycle_end(true);
        ds.cycle_end(true);
        assert_eq!(ds.num_consec_cycle_overruns, 2);

        ds.cycle_end(false);
        assert_eq!(ds.num_consec_cycle_overruns, 0);
        assert_eq!(ds.num_cycle_overruns, 2);
        assert_eq!(ds.num_cycles, 3);
    }

    #[test]
    fn test_summary() {
        let mut ds = DataStore::default();
        ds.session_time_s = 12.34;

        assert_eq!(ds.summary(), "[12.3 s] Waiting for pose and base path");

        ds.wp_updater_status_rpt = wp_updater::StatusReport {
            ready: true,
            mode: wp_updater::ModeTag::Stopping,
            stop_index: Some(490),
            current_index: Some(470),
            dist_to_stop_m: Some(20.04),
            window_len: 21,
            ..Default::default()
        };

        assert_eq!(
            ds.summary(),
            "[12.3 s] Stopping at wp Some(470), 21 wps published, stop line 490 in 20.0 m"
        );
    }
}
