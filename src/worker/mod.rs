use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

pub mod engine;
mod handlers;
pub mod message;
pub mod state;

pub use engine::Engine;
pub use message::{Event, ProductScore, Request, ScoreRequest, TrainOptions, TrainRequest};
pub use state::WorkerState;

/// Runs the worker loop on the current thread: one message at a time, in
/// arrival order, until every request sender is dropped. Results and
/// progress go out through `events` while a handler runs.
pub fn run(requests: Receiver<Request>, events: Sender<Event>, default_synthetic: bool) {
    let mut state: Option<WorkerState> = None;
    for request in requests {
        handlers::handle_request(request, &mut state, default_synthetic, &events);
    }
}

/// A spawned worker thread plus both ends of its channels. Dropping
/// `requests` shuts the worker down.
pub struct WorkerHandle {
    pub requests: Sender<Request>,
    pub events: Receiver<Event>,
    pub join: thread::JoinHandle<()>,
}

/// Spawns the worker loop on its own thread.
pub fn spawn(default_synthetic: bool) -> WorkerHandle {
    let (req_tx, req_rx) = mpsc::channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    let join = thread::spawn(move || run(req_rx, evt_tx, default_synthetic));
    WorkerHandle {
        requests: req_tx,
        events: evt_rx,
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn spawned_worker_round_trips_a_json_train_message() {
        let handle = spawn(false);

        let raw = r#"{
            "action": "train",
            "users": [
                {"age": 24, "purchases": [
                    {"name":"Mug","category":"gear","color":"red","price":9.0}
                ]},
                {"age": 48, "purchases": [
                    {"name":"Boots","category":"footwear","color":"brown","price":120.0}
                ]}
            ],
            "products": [
                {"name":"Mug","category":"gear","color":"red","price":9.0},
                {"name":"Boots","category":"footwear","color":"brown","price":120.0}
            ],
            "options": {"epochs": 5, "synthetic": true}
        }"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        handle.requests.send(req).unwrap();

        let mut saw_done = false;
        while let Ok(event) = handle.events.recv_timeout(Duration::from_secs(5)) {
            if let Event::Done { epochs, .. } = event {
                assert_eq!(epochs, 5);
                saw_done = true;
                break;
            }
        }
        assert!(saw_done, "worker never reported completion");

        drop(handle.requests);
        handle.join.join().unwrap();
    }
}
