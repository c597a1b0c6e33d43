pub mod activation;
pub mod catalog;
pub mod feature;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;
pub mod worker;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use catalog::types::{Product, User};
pub use feature::context::EncodingContext;
pub use layers::dense::Layer;
pub use loss::loss_type::LossType;
pub use math::matrix::Matrix;
pub use network::network::Network;
pub use optim::sgd::Sgd;
pub use train::epoch_stats::EpochStats;
pub use train::loop_fn::train_loop;
pub use train::train_config::TrainConfig;
pub use train::trainer::fit_once;
pub use worker::message::{Event, Request};
