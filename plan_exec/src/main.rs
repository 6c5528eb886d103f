//! Main planner executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Check for shutdown
//!         - Input acquisition, from the network feeds or a feed script
//!         - Waypoint updater processing
//!         - Archiving
//!         - Publish the planner output
//!
//! # Modules
//!
//! All modules (e.g. `wp_updater`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.
//!

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use comms_if::{eqpt::lane::Header, net::NetParams};
use plan_lib::{
    data_store::DataStore,
    feed_client::FeedClient,
    feeds::Feeds,
    params::PlanExecParams,
    plan_server::PlanServer
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::env;
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use util::{
    host,
    time,
    module::State,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::{ScriptInterpreter, PendingMsgs},
    archive::Archived
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "plan_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Waypoint Planner Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: PlanExecParams = util::params::load(
        "plan_exec.toml"
    ).wrap_err("Could not load exec params")?;

    let net_params: NetParams = util::params::load(
        "net.toml"
    ).wrap_err("Could not load net params")?;

    let cycle_period = match time::period_from_frequency(exec_params.cycle_frequency_hz) {
        Some(p) => Duration::from_secs_f64(p),
        None => return Err(eyre!(
            "The cycle frequency must be positive, found {} Hz",
            exec_params.cycle_frequency_hz
        ))
    };

    info!("Exec parameters loaded");

    // ---- INITIALISE FEED SOURCE ----

    // The feed source is used to determine whether we're getting the input feeds from a script
    // or from the network.
    let mut feed_source = FeedSource::None;
    let mut use_feed_client = false;

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the script path
    if args.len() == 2 {

        info!("Loading script from \"{}\"", &args[1]);

        // Load the script interpreter
        let si = ScriptInterpreter::new(
            &args[1]).wrap_err("Failed to load script")?;

        // Display some info
        info!(
            "Loaded script lasts {:.02} s and contains {} messages\n",
            si.get_duration(),
            si.get_num_msgs()
        );

        feed_source = FeedSource::Script(si);
    }
    // If no arguments then setup the feed client
    else if args.len() == 1 {

        info!("No script provided, input feeds will be received via the FeedClient\n");
        use_feed_client = true;

    }
    else {
        return Err(eyre!(
            "Expected either zero or one argument, found {}", args.len() - 1)
        );
    }

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();
    let feeds = Arc::new(Feeds::new());

    // ---- INITIALISE MODULES ----

    ds.wp_updater.init("wp_updater.toml", &session)
        .wrap_err("Failed to initialise WpUpdater")?;
    info!("WpUpdater init complete");

    info!("Module initialisation complete\n");

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    if use_feed_client {
        feed_source = FeedSource::Remote(
            FeedClient::new(&zmq_ctx, &net_params, feeds.clone())
                .wrap_err("Failed to initialise the FeedClient")?
        );
        info!("FeedClient initialised");
    }

    let mut plan_server = {
        let s = PlanServer::new(&zmq_ctx, &net_params)
            .wrap_err("Failed to initialise PlanServer")?;
        info!("PlanServer initialised");
        s
    };

    info!("Network initialisation complete");

    // ---- SHUTDOWN HANDLER ----

    let running = setup_ctrl_c_handler()
        .wrap_err("Failed to set the Ctrl-C handler")?;

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    while running.load(Ordering::SeqCst) {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(exec_params.cycle_frequency_hz);

        // ---- DATA INPUT ----

        match feed_source {
            // If no source no point in continuing so break
            FeedSource::None => return Err(eyre!("No feed source present")),

            // The client writes into the feeds from its own thread
            FeedSource::Remote(ref client) => {
                if ds.is_1_hz_cycle && !client.is_connected() {
                    warn!("FeedClient is not connected");
                }
            },

            FeedSource::Script(ref mut si) =>
                match si.get_pending_msgs() {
                    PendingMsgs::None => (),
                    PendingMsgs::Some(msgs) => {
                        for msg in msgs {
                            feeds.apply(msg);
                        }
                    }
                    // Exit if end of script reached
                    PendingMsgs::EndOfScript => {
                        info!("End of feed script reached, stopping");
                        break
                    }
                }
        };

        ds.wp_updater_input = feeds.snapshot();

        // ---- PLANNING ----

        let (output, report) = ds.wp_updater.proc(&ds.wp_updater_input)
            .wrap_err("Unrecoverable error in WpUpdater processing")?;
        ds.wp_updater_output = output;
        ds.wp_updater_status_rpt = report;

        // Keep a copy of the path the planner works on
        if !ds.base_path_saved {
            if let Some(path) = feeds.base_path() {
                session.save("base_path.json", path.to_msg(Header::default()));
                ds.base_path_saved = true;
            }
        }

        if ds.is_1_hz_cycle {
            ds.log_summary();
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.wp_updater.write() {
            warn!("Could not archive WpUpdater status: {}", e);
        }

        // ---- OUTPUT ----

        if let Some(ref output) = ds.wp_updater_output {
            match plan_server.send(output) {
                Ok(_) => (),
                Err(e) => warn!("PlanServer error: {}", e)
            };
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                ds.cycle_end(false);
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                );
                ds.cycle_end(true);
            }
        }
    }

    // ---- SHUTDOWN ----

    if !running.load(Ordering::SeqCst) {
        info!("Shutdown requested");
    }

    info!(
        "Executed {} cycles with {} overruns",
        ds.num_cycles,
        ds.num_cycle_overruns
    );

    // Stop receiving feeds before closing the session
    drop(feed_source);

    session.exit();

    info!("End of execution");

    Ok(())
}

/// Set up a Ctrl-C handler which clears the returned run flag.
fn setup_ctrl_c_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    Ok(running)
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the input feeds.
enum FeedSource {
    None,
    Remote(FeedClient),
    Script(ScriptInterpreter)
}
