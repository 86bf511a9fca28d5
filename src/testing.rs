//! Fixtures shared by the unit tests: label-encoder classes as exported at
//! training time, a sample submission and in-process regressors.

use crate::error::ModelError;
use crate::model::loader::Artifacts;
use crate::model::regressor::Regressor;
use crate::model::{PricePredictor, PriceScaler};
use crate::preprocessing::{CategoricalEncoderSet, EncodedFeatureVector, RawInputRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Classes in the sorted order a label encoder assigns them.
pub const ENCODERS_JSON: &str = r#"{
    "Body_type": ["Convertibles", "Coupe", "Hatchback", "Hybrids", "MUV", "Minivans",
                  "Pickup Trucks", "SUV", "Sedan", "Wagon"],
    "Transmission": ["Automatic", "Manual"],
    "Fuel_type": ["Diesel", "Petrol"],
    "Location": ["Bangalore", "Chennai", "Delhi", "Hyderabad", "Jaipur", "Kolkata"]
}"#;

pub const SCALER_JSON: &str = r#"{"kind": "min_max", "data_min": 100000.0, "data_max": 5000000.0}"#;

pub fn sample_encoders() -> CategoricalEncoderSet {
    CategoricalEncoderSet::from_json(ENCODERS_JSON, "fixture").unwrap()
}

pub fn sample_scaler() -> PriceScaler {
    PriceScaler::from_json(SCALER_JSON, "fixture").unwrap()
}

pub fn sample_record() -> RawInputRecord {
    RawInputRecord {
        mileage: 18.5,
        engine_displacement: 1197,
        year_of_manufacture: 2018,
        transmission: "Manual".to_string(),
        fuel_type: "Petrol".to_string(),
        owner_no: 1,
        model_year: 2018,
        location: "Delhi".to_string(),
        kilometer_driven: 45000,
        body_type: "Hatchback".to_string(),
    }
}

/// Linear model over the encoded columns.
pub struct LinearRegressor {
    pub weights: [f64; EncodedFeatureVector::WIDTH],
    pub bias: f64,
}

impl LinearRegressor {
    /// Rough fit: bigger engines and newer cars cost more, kilometers less.
    pub fn sample() -> Self {
        let mut weights = [0.0; EncodedFeatureVector::WIDTH];
        weights[0] = 0.002; // Mileage
        weights[1] = 0.000_05; // Engine_displacement
        weights[5] = -0.01; // Owner_No.
        weights[6] = 0.000_02; // Model_year
        weights[8] = -0.000_000_1; // Kilometer_Driven
        Self { weights, bias: 0.15 }
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, ModelError> {
        let values = features.values();
        let dot: f64 = values.iter().zip(&self.weights).map(|(x, w)| x * w).sum();
        Ok(dot + self.bias)
    }
}

/// Returns the same normalized output for every row.
pub struct ConstantRegressor(pub f64);

impl Regressor for ConstantRegressor {
    fn predict(&self, _features: &EncodedFeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Records how often the model is invoked.
#[derive(Default)]
pub struct CountingRegressor {
    pub calls: Arc<AtomicUsize>,
}

impl Regressor for CountingRegressor {
    fn predict(&self, _features: &EncodedFeatureVector) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(0.5)
    }
}

pub fn sample_artifacts() -> Artifacts {
    Artifacts {
        encoders: sample_encoders(),
        regressor: Box::new(LinearRegressor::sample()),
        scaler: sample_scaler(),
    }
}

pub fn sample_predictor() -> PricePredictor {
    PricePredictor::new(sample_artifacts())
}
