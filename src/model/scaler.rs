use crate::error::{ArtifactError, ScalingError};
use serde::Deserialize;
use std::path::Path;

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// A zero-width range is treated as a scale of one, as the fitting side does.
fn non_zero(range: f64) -> f64 {
    if range == 0.0 {
        1.0
    } else {
        range
    }
}

/// Normalization fitted on the training prices.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceScaler {
    MinMax {
        data_min: f64,
        data_max: f64,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
    },
    Standard {
        mean: f64,
        scale: f64,
    },
}

impl PriceScaler {
    pub fn min_max(data_min: f64, data_max: f64) -> Self {
        PriceScaler::MinMax {
            data_min,
            data_max,
            feature_range: default_feature_range(),
        }
    }

    /// `(multiplier, offset)` so that `scaled = price * multiplier + offset`.
    fn coefficients(&self) -> (f64, f64) {
        match *self {
            PriceScaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                let multiplier = (hi - lo) / non_zero(data_max - data_min);
                (multiplier, lo - data_min * multiplier)
            }
            PriceScaler::Standard { mean, scale } => {
                let scale = non_zero(scale);
                (1.0 / scale, -mean / scale)
            }
        }
    }

    pub fn transform(&self, price: f64) -> Result<f64, ScalingError> {
        if !price.is_finite() {
            return Err(ScalingError::NonFiniteInput(price));
        }
        let (multiplier, offset) = self.coefficients();
        let scaled = price * multiplier + offset;
        if !scaled.is_finite() {
            return Err(ScalingError::NonFiniteOutput {
                input: price,
                output: scaled,
            });
        }
        Ok(scaled)
    }

    /// Maps a model output back to the currency unit.
    pub fn inverse_transform(&self, scaled: f64) -> Result<f64, ScalingError> {
        if !scaled.is_finite() {
            return Err(ScalingError::NonFiniteInput(scaled));
        }
        let (multiplier, offset) = self.coefficients();
        let price = (scaled - offset) / multiplier;
        if !price.is_finite() {
            return Err(ScalingError::NonFiniteOutput {
                input: scaled,
                output: price,
            });
        }
        Ok(price)
    }

    fn validate(&self) -> Result<(), String> {
        match *self {
            PriceScaler::MinMax {
                data_min,
                data_max,
                feature_range: (lo, hi),
            } => {
                if ![data_min, data_max, lo, hi].iter().all(|v| v.is_finite()) {
                    return Err("min-max parameters must be finite".to_string());
                }
                if data_max < data_min {
                    return Err(format!("data_max {} is below data_min {}", data_max, data_min));
                }
                if hi <= lo {
                    return Err(format!("feature_range ({}, {}) is empty", lo, hi));
                }
            }
            PriceScaler::Standard { mean, scale } => {
                if !mean.is_finite() || !scale.is_finite() {
                    return Err("standard parameters must be finite".to_string());
                }
                if scale < 0.0 {
                    return Err(format!("scale {} is negative", scale));
                }
            }
        }
        Ok(())
    }

    pub fn from_json(content: &str, origin: &str) -> Result<Self, ArtifactError> {
        let scaler: PriceScaler =
            serde_json::from_str(content).map_err(|source| ArtifactError::Parse {
                path: origin.to_string(),
                source,
            })?;
        scaler
            .validate()
            .map_err(|e| ArtifactError::Invalid(format!("scaler {}: {}", origin, e)))?;
        Ok(scaler)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ArtifactError::NotFound(display));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: display.clone(),
            source,
        })?;
        let scaler = Self::from_json(&content, &display)?;
        tracing::info!(path = %path.display(), ?scaler, "loaded price scaler");
        Ok(scaler)
    }
}
