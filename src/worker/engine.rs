use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::activation::ActivationFunction;
use crate::catalog::{Product, User};
use crate::feature::{assemble, EncodeError, EncodingContext, TrainingSet};
use crate::loss::LossType;
use crate::network::Network;
use crate::optim::Sgd;
use crate::train::{train_loop, TrainConfig};
use crate::worker::message::{Event, TrainOptions};
use crate::worker::state::WorkerState;

/// Hidden layer width of the dense engine.
const HIDDEN_SIZE: usize = 12;
/// Delay between synthetic progress ticks.
const SYNTHETIC_TICK: Duration = Duration::from_millis(15);

/// Which backend a `train` request runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Performs the full encoding, then emits fabricated progress ticks and
    /// a completion without metrics. Trains nothing.
    Synthetic,
    /// Trains the real feed-forward network and reports live metrics.
    Dense,
}

impl Engine {
    /// An explicit `synthetic` option on the request wins; otherwise the
    /// worker's default applies.
    pub fn for_request(options: &TrainOptions, default_synthetic: bool) -> Engine {
        if options.synthetic.unwrap_or(default_synthetic) {
            Engine::Synthetic
        } else {
            Engine::Dense
        }
    }

    pub(crate) fn run(
        self,
        users: &[User],
        options: &TrainOptions,
        products: Vec<Product>,
        events: &Sender<Event>,
    ) -> Result<WorkerState, EncodeError> {
        match self {
            Engine::Synthetic => run_synthetic(users, options, products, events),
            Engine::Dense => run_dense(users, options, products, events),
        }
    }
}

fn run_synthetic(
    users: &[User],
    options: &TrainOptions,
    products: Vec<Product>,
    events: &Sender<Event>,
) -> Result<WorkerState, EncodeError> {
    let t_start = Instant::now();
    let ctx = EncodingContext::build(&products, users)?;
    let set = assemble(users, &products, &ctx);
    emit(
        events,
        Event::Log {
            message: format!(
                "encoded {} training rows ({} features each)",
                set.len(),
                set.input_width()
            ),
        },
    );

    let epochs = options.epochs.max(1);
    for epoch in 1..=epochs {
        thread::sleep(SYNTHETIC_TICK);
        emit(
            events,
            Event::Progress {
                progress: epoch as f64 / epochs as f64,
                epoch: Some(epoch),
                loss: None,
                accuracy: None,
            },
        );
    }

    emit(
        events,
        Event::Done {
            epochs,
            loss: None,
            accuracy: None,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        },
    );

    Ok(WorkerState {
        context: ctx,
        network: None,
        products,
    })
}

fn run_dense(
    users: &[User],
    options: &TrainOptions,
    products: Vec<Product>,
    events: &Sender<Event>,
) -> Result<WorkerState, EncodeError> {
    let t_start = Instant::now();
    let ctx = EncodingContext::build(&products, users)?;
    let set = assemble(users, &products, &ctx);
    emit(
        events,
        Event::Log {
            message: format!(
                "encoded {} training rows ({} features each)",
                set.len(),
                set.input_width()
            ),
        },
    );

    let mut network = Network::new(vec![
        (HIDDEN_SIZE, set.input_width(), ActivationFunction::ReLU),
        (1, HIDDEN_SIZE, ActivationFunction::Sigmoid),
    ]);
    let optimizer = Sgd::new(options.learning_rate);

    let epochs = options.epochs.max(1);
    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(epochs, options.batch_size.max(1), LossType::BinaryCrossEntropy);
    config.progress_tx = Some(tx);

    // Fan per-epoch stats out to the event channel while train_loop blocks
    // this thread. Ends when the sender inside `config` is dropped.
    let forwarder = {
        let events = events.clone();
        thread::spawn(move || {
            for stats in rx {
                let _ = events.send(Event::Progress {
                    progress: stats.progress(),
                    epoch: Some(stats.epoch),
                    loss: Some(stats.train_loss),
                    accuracy: stats.train_accuracy,
                });
            }
        })
    };

    let final_loss = train_loop(
        &mut network,
        &set.inputs,
        &set.labels,
        None,
        None,
        &optimizer,
        &config,
    );
    drop(config);
    let _ = forwarder.join();

    let accuracy = binary_accuracy(&mut network, &set);
    emit(
        events,
        Event::Done {
            epochs,
            loss: Some(final_loss),
            accuracy: Some(accuracy),
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        },
    );

    Ok(WorkerState {
        context: ctx,
        network: Some(network),
        products,
    })
}

fn binary_accuracy(network: &mut Network, set: &TrainingSet) -> f64 {
    if set.is_empty() {
        return 0.0;
    }
    let correct = set
        .inputs
        .iter()
        .zip(set.labels.iter())
        .filter(|(input, label)| {
            let out = network.forward(input);
            (out[0] >= 0.5) == (label[0] >= 0.5)
        })
        .count();
    correct as f64 / set.len() as f64
}

pub(crate) fn emit(events: &Sender<Event>, event: Event) {
    // Nobody listening is not an error worth stopping a run for.
    let _ = events.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Product>, Vec<User>) {
        let products = vec![
            Product::new("A", "shoes", "red", 10.0),
            Product::new("B", "hats", "blue", 30.0),
        ];
        let users = vec![
            User::new(20.0, vec![products[0].clone()]),
            User::new(40.0, vec![products[1].clone()]),
        ];
        (products, users)
    }

    #[test]
    fn engine_selection_honors_request_then_default() {
        let mut options = TrainOptions::default();
        assert_eq!(Engine::for_request(&options, false), Engine::Dense);
        assert_eq!(Engine::for_request(&options, true), Engine::Synthetic);
        options.synthetic = Some(false);
        assert_eq!(Engine::for_request(&options, true), Engine::Dense);
        options.synthetic = Some(true);
        assert_eq!(Engine::for_request(&options, false), Engine::Synthetic);
    }

    #[test]
    fn synthetic_progress_is_monotone_and_metric_free() {
        let (products, users) = fixture();
        let options = TrainOptions {
            epochs: 4,
            ..TrainOptions::default()
        };
        let (tx, rx) = mpsc::channel();

        let state = run_synthetic(&users, &options, products, &tx).unwrap();
        drop(tx);

        assert!(state.network.is_none());
        assert_eq!(state.products.len(), 2);

        let events: Vec<Event> = rx.try_iter().collect();
        assert!(matches!(events[0], Event::Log { .. }));

        let mut last = 0.0;
        let mut ticks = 0;
        for e in &events[1..events.len() - 1] {
            match e {
                Event::Progress {
                    progress,
                    loss,
                    accuracy,
                    ..
                } => {
                    assert!(*progress > last && *progress <= 1.0);
                    assert!(loss.is_none() && accuracy.is_none());
                    last = *progress;
                    ticks += 1;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(ticks, 4);

        match events.last().unwrap() {
            Event::Done {
                epochs,
                loss,
                accuracy,
                ..
            } => {
                assert_eq!(*epochs, 4);
                assert!(loss.is_none() && accuracy.is_none());
            }
            other => panic!("expected a done event, got {other:?}"),
        }
    }

    #[test]
    fn dense_run_reports_metrics_and_keeps_the_network() {
        let (products, users) = fixture();
        let options = TrainOptions {
            epochs: 20,
            batch_size: 1,
            learning_rate: 0.5,
            synthetic: Some(false),
        };
        let (tx, rx) = mpsc::channel();

        let state = run_dense(&users, &options, products, &tx).unwrap();
        drop(tx);

        assert!(state.network.is_some());

        let events: Vec<Event> = rx.try_iter().collect();
        let progress_count = events
            .iter()
            .filter(|e| matches!(e, Event::Progress { .. }))
            .count();
        assert_eq!(progress_count, 20);

        match events.last().unwrap() {
            Event::Done {
                epochs,
                loss,
                accuracy,
                ..
            } => {
                assert_eq!(*epochs, 20);
                assert!(loss.unwrap().is_finite());
                let acc = accuracy.unwrap();
                assert!((0.0..=1.0).contains(&acc));
            }
            other => panic!("expected a done event, got {other:?}"),
        }
    }

    #[test]
    fn empty_users_surface_an_encode_error() {
        let (products, _) = fixture();
        let (tx, _rx) = mpsc::channel();
        let err = run_synthetic(&[], &TrainOptions::default(), products, &tx).unwrap_err();
        assert_eq!(err, EncodeError::EmptyUsers);
    }
}
