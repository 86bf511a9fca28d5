pub mod config;
pub mod error;
pub mod model;
pub mod preprocessing;
pub mod server;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod observability_tests;
#[cfg(test)]
mod testing;

// Re-export common types
pub use error::{EncodingError, PredictionError};
pub use model::{Price, PricePredictor};
pub use preprocessing::{EncodedFeatureVector, RawInputRecord};
