use std::sync::mpsc::Sender;

use crate::catalog;
use crate::feature::{encode_product, encode_user};
use crate::worker::engine::{emit, Engine};
use crate::worker::message::{Event, ProductScore, Request, ScoreRequest, TrainRequest};
use crate::worker::state::WorkerState;

/// Routes one inbound message to its handler. Handlers never panic on bad
/// input; anything that fails comes back as an `error` event.
pub(crate) fn handle_request(
    request: Request,
    state: &mut Option<WorkerState>,
    default_synthetic: bool,
    events: &Sender<Event>,
) {
    match request {
        Request::Train(req) => handle_train(req, state, default_synthetic, events),
        Request::Score(req) => handle_score(&req, state, events),
    }
}

fn handle_train(
    req: TrainRequest,
    state: &mut Option<WorkerState>,
    default_synthetic: bool,
    events: &Sender<Event>,
) {
    let TrainRequest {
        users,
        products,
        options,
    } = req;

    // An explicitly empty list is not a request for the fallback; it fails
    // context building and surfaces as an error event.
    let products = products.unwrap_or_else(catalog::load_default);

    let engine = Engine::for_request(&options, default_synthetic);
    emit(
        events,
        Event::Log {
            message: format!(
                "training on {} users x {} products ({:?} engine)",
                users.len(),
                products.len(),
                engine
            ),
        },
    );

    match engine.run(&users, &options, products, events) {
        Ok(new_state) => *state = Some(new_state),
        Err(e) => emit(
            events,
            Event::Error {
                message: e.to_string(),
            },
        ),
    }
}

fn handle_score(req: &ScoreRequest, state: &mut Option<WorkerState>, events: &Sender<Event>) {
    let st = match state.as_mut() {
        Some(st) => st,
        None => {
            emit(
                events,
                Event::Error {
                    message: "no trained model: send a train message first".into(),
                },
            );
            return;
        }
    };

    let WorkerState {
        context,
        network,
        products,
    } = st;

    let network = match network.as_mut() {
        Some(n) => n,
        None => {
            emit(
                events,
                Event::Error {
                    message: "last run used the synthetic engine: train a dense model before scoring"
                        .into(),
                },
            );
            return;
        }
    };

    let user_vec = encode_user(&req.user, context);
    let mut scores: Vec<ProductScore> = products
        .iter()
        .map(|product| {
            let mut input = Vec::with_capacity(2 * context.feature_dim);
            input.extend_from_slice(&user_vec);
            input.extend_from_slice(&encode_product(product, context));
            let score = network.forward(&input)[0];
            ProductScore {
                name: product.name.clone(),
                score,
            }
        })
        .collect();

    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    if let Some(top) = req.top {
        scores.truncate(top);
    }

    emit(events, Event::Result { scores });
}
