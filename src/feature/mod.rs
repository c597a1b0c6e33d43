pub mod context;
pub mod dataset;
pub mod encoder;

pub use context::{EncodeError, EncodingContext, MinMax};
pub use dataset::{assemble, TrainingSet};
pub use encoder::{
    encode_product, encode_user, AGE_WEIGHT, CATEGORY_WEIGHT, COLOR_WEIGHT, PRICE_WEIGHT,
};
