//! # Feed Client
//!
//! The FeedClient subscribes to the input feeds (pose, base waypoints and traffic waypoint)
//! published by the rest of the vehicle and writes each message into the shared [`Feeds`].
//!
//! Data arrives in a publisher-subscriber model, as frequently as the publishers produce it. A
//! background thread receives the messages so the planning loop never blocks on the network.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{sync::{Arc, atomic::{AtomicBool, Ordering}}, thread::{self, JoinHandle}};
use log::{error, trace, warn};

use crate::feeds::Feeds;
use comms_if::{
    feed::FeedMsg,
    net::{MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions, zmq}
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

pub struct FeedClient {
    bg_jh: Option<JoinHandle<()>>,
    bg_run: Arc<AtomicBool>,
    connected: Arc<AtomicBool>
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FeedClientError {

    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the feeds: {0}")]
    SubscribeError(zmq::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FeedClient {
    /// Create a new instance of the FeedClient, delivering messages into `feeds`.
    ///
    /// This function will not block until the publishers connect.
    pub fn new(
        ctx: &zmq::Context,
        params: &NetParams,
        feeds: Arc<Feeds>
    ) -> Result<Self, FeedClientError> {
        // Create the socket options
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        // Connect the socket
        let socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            socket_options,
            &params.feed_endpoint
        ).map_err(FeedClientError::SocketError)?;

        socket.set_subscribe(b"").map_err(FeedClientError::SubscribeError)?;

        // Create the data shared objects
        let bg_run = Arc::new(AtomicBool::new(true));
        let connected = Arc::new(AtomicBool::new(false));

        // Create clones of these to pass to the bg thread
        let bg_run_clone = bg_run.clone();
        let connected_clone = connected.clone();

        // Start BG thread
        let bg_jh = Some(thread::spawn(move || {
            bg_thread(socket, bg_run_clone, connected_clone, feeds)
        }));

        Ok(Self {
            bg_jh,
            bg_run,
            connected
        })
    }

    /// Return if the client is connected to the feed publisher or not.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.bg_run.store(false, Ordering::Relaxed);

        if let Some(jh) = self.bg_jh.take() {
            if jh.join().is_err() {
                error!("FeedClient background thread panicked");
            }
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Background thread, updates the feeds when a publisher sends something new.
fn bg_thread(
    socket: MonitoredSocket,
    run: Arc<AtomicBool>,
    connected: Arc<AtomicBool>,
    feeds: Arc<Feeds>
) {

    // While instructed to run
    while run.load(Ordering::Relaxed) {
        connected.store(socket.connected(), Ordering::Relaxed);

        // Read string from the socket
        let msg = match socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => {
                warn!("Non UTF-8 message on the feed socket");
                continue
            },
            Err(zmq::Error::EAGAIN) => continue,
            Err(e) => {
                error!("Error receiving message from the feeds: {:?}", e);
                break
            }
        };

        // Deserialize the message
        let msg = match FeedMsg::from_json(&msg) {
            Ok(m) => m,
            Err(e) => {
                warn!("Error deserialising feed message: {}", e);
                continue
            }
        };

        trace!("Received {} message", msg.feed_name());

        feeds.apply(msg);
    }
}
