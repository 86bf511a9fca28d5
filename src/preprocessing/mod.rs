pub mod encoders;
pub mod features;

pub use encoders::{CategoricalEncoderSet, CategoricalField, Vocabulary};
pub use features::{EncodedFeatureVector, FeatureColumn, RawInputRecord, RecordKey};
