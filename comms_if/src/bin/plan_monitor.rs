//! Simple subscriber which prints a summary of every message the planner publishes.
//!
//! Usage: `plan_monitor [endpoint]`, the endpoint defaults to `tcp://localhost:5021`.

use comms_if::{
    feed::PlanMsg,
    net::{MonitoredSocket, SocketOptions, zmq}
};

fn main() -> Result<(), Box<dyn std::error::Error>> {

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("tcp://localhost:5021"));

    // Create context
    let ctx = zmq::Context::new();

    // Create socket options
    let socket_options = SocketOptions {
        block_on_first_connect: false,
        ..Default::default()
    };

    // Create socket
    let socket = MonitoredSocket::new(
        &ctx,
        zmq::SUB,
        socket_options,
        &endpoint
    )?;

    socket.set_subscribe(b"")?;

    println!("Listening for planner output on {}", endpoint);

    // Recieve messages from the planner
    loop {
        let msg = socket.recv_string(0)?;

        let msg = match msg {
            Ok(s) => s,
            Err(_) => {
                println!("Got non UTF-8 message");
                continue
            }
        };

        match PlanMsg::from_json(&msg) {
            Ok(PlanMsg::FinalWaypoints(lane)) => {
                let first_vel = lane.waypoints.first().map(|w| w.velocity_ms);
                let last_vel = lane.waypoints.last().map(|w| w.velocity_ms);
                println!(
                    "[{:>6}] final waypoints: {} entries, v first {:?} m/s, v last {:?} m/s",
                    lane.header.seq,
                    lane.waypoints.len(),
                    first_vel,
                    last_vel
                );
            },
            Ok(PlanMsg::SignalActive(active)) => println!("         signal active: {}", active),
            Err(e) => println!("Could not parse message: {}", e)
        }
    }
}
