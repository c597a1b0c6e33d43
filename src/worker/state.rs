use crate::catalog::Product;
use crate::feature::EncodingContext;
use crate::network::Network;

/// What a training run leaves behind for later `score` requests.
///
/// Every `train` message replaces the whole value, so concurrent notions of
/// "current model" reduce to last-write-wins. Synthetic runs record the
/// context and product list but no network.
#[derive(Debug)]
pub struct WorkerState {
    pub context: EncodingContext,
    pub network: Option<Network>,
    pub products: Vec<Product>,
}
