use crate::error::{EncodingError, PredictionError};
use crate::model::cache::PredictionCache;
use crate::model::loader::Artifacts;
use crate::model::price::Price;
use crate::model::regressor::Regressor;
use crate::model::scaler::PriceScaler;
use crate::preprocessing::{CategoricalEncoderSet, EncodedFeatureVector, RawInputRecord};
use metrics::counter;

/// Turns one raw record into a price: encode, run the regressor, undo the
/// target scaling. Holds only artifacts that are read-only after startup.
pub struct PricePredictor {
    encoders: CategoricalEncoderSet,
    regressor: Box<dyn Regressor>,
    scaler: PriceScaler,
    cache: Option<PredictionCache>,
}

impl PricePredictor {
    pub fn new(artifacts: Artifacts) -> Self {
        Self {
            encoders: artifacts.encoders,
            regressor: artifacts.regressor,
            scaler: artifacts.scaler,
            cache: None,
        }
    }

    /// Keeps up to `capacity` successful results. Zero leaves caching off.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = (capacity > 0).then(|| PredictionCache::new(capacity));
        if let Some(cache) = &self.cache {
            tracing::info!(capacity = cache.capacity(), "prediction cache enabled");
        }
        self
    }

    pub fn encoders(&self) -> &CategoricalEncoderSet {
        &self.encoders
    }

    pub fn encode(&self, record: &RawInputRecord) -> Result<EncodedFeatureVector, EncodingError> {
        self.encoders.encode(record)
    }

    pub fn predict(&self, record: &RawInputRecord) -> Result<Price, PredictionError> {
        let key = self.cache.as_ref().map(|_| record.key());
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(price) = cache.get(key) {
                counter!("price_prediction_cache_hits_total").increment(1);
                return Ok(price);
            }
        }

        let features = self.encode(record)?;
        let normalized = self.regressor.predict(&features)?;
        let price = Price::new(self.scaler.inverse_transform(normalized)?);
        tracing::debug!(normalized, price = price.value(), "prediction");

        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(key, price);
        }
        Ok(price)
    }
}
