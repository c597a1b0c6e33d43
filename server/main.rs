/// affinity-worker
///
/// Exposes the affinity worker over HTTP: post JSON messages in, stream
/// worker events back out over SSE. Served by a synchronous tiny_http
/// server.
///
/// Run with:
///   cargo run --bin affinity-worker --release
/// Optionally pass a bind address and/or `--synthetic`:
///   cargo run --bin affinity-worker -- 127.0.0.1:9000 --synthetic
///
/// Routes:
///   POST /message   enqueue a train or score message (202 on accept)
///   GET  /events    SSE stream of worker events (log/progress/done/result/error)
///   GET  /catalog   the default product catalog
mod events;
mod routes;
mod state;

use std::sync::{Arc, Mutex};

use tiny_http::Server;

use affinity_nn::worker;
use state::BridgeState;

fn main() {
    let mut synthetic = false;
    let mut addr = "127.0.0.1:7878".to_string();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--synthetic" => synthetic = true,
            other => addr = other.to_string(),
        }
    }

    let server = Server::http(&addr).expect("Failed to bind HTTP server");

    let worker::WorkerHandle {
        requests,
        events,
        join: _,
    } = worker::spawn(synthetic);
    let shared_state = Arc::new(Mutex::new(BridgeState::new(requests, events)));

    println!("╔══════════════════════════════════════════════╗");
    println!("║          affinity-nn worker                  ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  POST /message   train | score               ║");
    println!("║  GET  /events    SSE worker events           ║");
    println!("║  GET  /catalog   default products            ║");
    println!("╚══════════════════════════════════════════════╝");
    println!("listening on http://{}{}", addr, if synthetic { "  (synthetic engine)" } else { "" });

    // Each request is dispatched on its own thread so the SSE handler
    // (which blocks for the entire run) does not stall message posts.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
