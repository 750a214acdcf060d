//! Feature Engineering Engine
//!
//! Turns normalized vehicle attributes into model-ready numeric vectors.
//! Training encodes the whole dataset and freezes the resulting column list;
//! inference encodes a single row and aligns it against that frozen list.

mod aligner;
mod encoder;
mod error;
mod features;
pub mod target;

pub use aligner::{Alignment, FrozenColumns};
pub use encoder::{CategoricalEncoder, CategoricalField};
pub use error::FeatureError;
pub use features::{EncodedFrame, FeatureVector, YEAR_MODEL_COLUMN};
