//! # Plan Server
//!
//! Publishes the planner output to the controller once per cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    feed::{FeedParseError, PlanMsg},
    net::{MonitoredSocket, MonitoredSocketError, NetParams, SocketOptions, zmq}
};

use crate::wp_updater::PlanOutput;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Planner output server
pub struct PlanServer {
    socket: MonitoredSocket
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not send the output: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the output: {0}")]
    SerializationError(FeedParseError),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PlanServer {
    /// Create a new instance of the plan server.
    ///
    /// This function will not block until a subscriber connects.
    pub fn new(ctx: &zmq::Context, params: &NetParams) -> Result<Self, PlanServerError> {
        // Create the socket options
        let socket_options = SocketOptions {
            block_on_first_connect: false,
            bind: true,
            connect_timeout: 1000,
            linger: 1,
            recv_timeout: 10,
            send_timeout: 10,
            ..Default::default()
        };

        // Bind the socket
        let socket = MonitoredSocket::new(
            ctx,
            zmq::PUB,
            socket_options,
            &params.plan_endpoint
        ).map_err(PlanServerError::SocketError)?;

        Ok(Self {
            socket
        })
    }

    /// Publish one cycle's output, the window of waypoints followed by the signal flag.
    pub fn send(&mut self, output: &PlanOutput) -> Result<(), PlanServerError> {
        for msg in plan_msgs(output).iter() {
            let msg_string = msg.to_json()
                .map_err(PlanServerError::SerializationError)?;

            self.socket.send(msg_string.as_str(), 0)
                .map_err(PlanServerError::SendError)?;
        }

        Ok(())
    }
}

/// Messages published for one cycle's output.
pub fn plan_msgs(output: &PlanOutput) -> [PlanMsg; 2] {
    [
        PlanMsg::FinalWaypoints(output.final_waypoints.clone()),
        PlanMsg::SignalActive(output.signal_active)
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::lane::LaneMsg;

    #[test]
    fn test_plan_msgs_order() {
        let output = PlanOutput {
            final_waypoints: LaneMsg::default(),
            signal_active: true
        };

        let msgs = plan_msgs(&output);

        assert_eq!(msgs[0], PlanMsg::FinalWaypoints(LaneMsg::default()));
        assert_eq!(msgs[1], PlanMsg::SignalActive(true));
    }
}
