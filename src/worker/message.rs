use serde::{Deserialize, Serialize};

use crate::catalog::{Product, User};

// ---------------------------------------------------------------------------
// Inbound messages
// ---------------------------------------------------------------------------

/// A message posted to the worker, tagged by the `action` field. Exactly two
/// actions exist: `train` and `score`. Anything else fails to parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Train(TrainRequest),
    Score(ScoreRequest),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainRequest {
    pub users: Vec<User>,
    /// Products to train against. Falls back to the shipped catalog when
    /// absent.
    #[serde(default)]
    pub products: Option<Vec<Product>>,
    #[serde(default)]
    pub options: TrainOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Force the synthetic or dense engine. When absent the worker's own
    /// default applies.
    pub synthetic: Option<bool>,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            epochs: 50,
            batch_size: 4,
            learning_rate: 0.3,
            synthetic: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub user: User,
    /// Keep only the `top` highest-scoring products; all of them when absent.
    #[serde(default)]
    pub top: Option<usize>,
}

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// A message posted back by the worker, tagged by the `type` field. Optional
/// metric fields are omitted from the JSON entirely rather than sent as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Log {
        message: String,
    },
    Progress {
        /// Fraction of the run completed, in (0, 1].
        progress: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        epoch: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        loss: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        accuracy: Option<f64>,
    },
    Done {
        epochs: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        loss: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        accuracy: Option<f64>,
        elapsed_ms: u64,
    },
    Result {
        scores: Vec<ProductScore>,
    },
    Error {
        message: String,
    },
}

impl Event {
    /// The wire tag, also used as the SSE event name.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Log { .. } => "log",
            Event::Progress { .. } => "progress",
            Event::Done { .. } => "done",
            Event::Result { .. } => "result",
            Event::Error { .. } => "error",
        }
    }
}

/// One scored catalog entry, highest affinity first in a `result` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductScore {
    pub name: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn train_request_parses_with_defaults() {
        let raw = r#"{
            "action": "train",
            "users": [
                {"age": 25, "purchases": [
                    {"name":"Mug","category":"gear","color":"red","price":9.0}
                ]}
            ]
        }"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        match req {
            Request::Train(t) => {
                assert_eq!(t.users.len(), 1);
                assert!(t.products.is_none());
                assert_eq!(t.options.epochs, 50);
                assert_eq!(t.options.batch_size, 4);
                assert!(t.options.synthetic.is_none());
            }
            _ => panic!("expected a train request"),
        }
    }

    #[test]
    fn score_request_parses() {
        let raw = r#"{
            "action": "score",
            "user": {"age": 31, "purchases": []},
            "top": 3
        }"#;
        let req: Request = serde_json::from_str(raw).unwrap();
        match req {
            Request::Score(s) => {
                assert_eq!(s.user.age, 31.0);
                assert_eq!(s.top, Some(3));
            }
            _ => panic!("expected a score request"),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let raw = r#"{"action": "predict", "user": {"age": 1, "purchases": []}}"#;
        assert!(serde_json::from_str::<Request>(raw).is_err());
    }

    #[test]
    fn progress_event_omits_absent_metrics() {
        let e = Event::Progress {
            progress: 0.5,
            epoch: Some(5),
            loss: Some(0.25),
            accuracy: None,
        };
        assert_eq!(e.kind(), "progress");
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({"type": "progress", "progress": 0.5, "epoch": 5, "loss": 0.25})
        );
    }

    #[test]
    fn done_event_wire_shape() {
        let e = Event::Done {
            epochs: 50,
            loss: None,
            accuracy: None,
            elapsed_ms: 120,
        };
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({"type": "done", "epochs": 50, "elapsed_ms": 120})
        );
    }

    #[test]
    fn result_event_wire_shape() {
        let e = Event::Result {
            scores: vec![
                ProductScore {
                    name: "Daypack".into(),
                    score: 0.75,
                },
                ProductScore {
                    name: "Camp Mug".into(),
                    score: 0.25,
                },
            ],
        };
        assert_eq!(
            serde_json::to_value(&e).unwrap(),
            json!({"type": "result", "scores": [
                {"name": "Daypack", "score": 0.75},
                {"name": "Camp Mug", "score": 0.25}
            ]})
        );
    }

    #[test]
    fn events_round_trip_through_json() {
        let events = vec![
            Event::Log {
                message: "encoded 12 rows".into(),
            },
            Event::Error {
                message: "no trained model".into(),
            },
        ];
        for e in events {
            let text = serde_json::to_string(&e).unwrap();
            let back: Event = serde_json::from_str(&text).unwrap();
            assert_eq!(e, back);
        }
    }
}
