use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use affinity_nn::worker::{Event, Request};

/// The server's view of the worker: where to post inbound messages, where
/// its events arrive, and everything streamed so far.
///
/// `history` lets a late `/events` subscriber replay the run from the start.
pub struct BridgeState {
    pub requests: Sender<Request>,
    pub event_rx: Arc<Mutex<Receiver<Event>>>,
    pub history: Vec<Event>,
}

pub type SharedState = Arc<Mutex<BridgeState>>;

impl BridgeState {
    pub fn new(requests: Sender<Request>, event_rx: Receiver<Event>) -> BridgeState {
        BridgeState {
            requests,
            event_rx: Arc::new(Mutex::new(event_rx)),
            history: Vec::new(),
        }
    }
}
