use crate::error::ValidationError;
use crate::model::{Price, PricePredictor};
use crate::preprocessing::RawInputRecord;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2024;

/// Shared Application State
pub struct AppState {
    pub predictor: PricePredictor,
    pub currency_symbol: String,
    pub metrics: PrometheusHandle,
}

// --- DTOs (Data Transfer Objects) ---

/// Fields as submitted, before the form constraints are checked. Used for
/// both the HTML form and the JSON endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PriceForm {
    pub mileage: f64,
    pub engine_displacement: i64,
    pub year_of_manufacture: i64,
    pub transmission: String,
    pub fuel_type: String,
    pub owner_no: i64,
    pub model_year: i64,
    pub location: String,
    pub kilometer_driven: i64,
    pub body_type: String,
}

impl Default for PriceForm {
    fn default() -> Self {
        Self {
            mileage: 0.0,
            engine_displacement: 0,
            year_of_manufacture: MIN_YEAR,
            transmission: "Manual".to_string(),
            fuel_type: "Petrol".to_string(),
            owner_no: 0,
            model_year: MIN_YEAR,
            location: "Chennai".to_string(),
            kilometer_driven: 0,
            body_type: "Hatchback".to_string(),
        }
    }
}

fn non_negative(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value < 0 {
        return Err(ValidationError::BelowMinimum {
            field,
            min: 0,
            value,
        });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
        field,
        min: 0,
        max: i64::from(u32::MAX),
        value,
    })
}

fn year(field: &'static str, value: i64) -> Result<u16, ValidationError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: MIN_YEAR,
            max: MAX_YEAR,
            value,
        });
    }
    // Bounded by the range check above.
    Ok(value as u16)
}

impl PriceForm {
    /// Applies the constraints the form widgets enforce. Categorical values
    /// are left to the encoders.
    pub fn validate(self) -> Result<RawInputRecord, ValidationError> {
        if !self.mileage.is_finite() || self.mileage < 0.0 {
            return Err(ValidationError::InvalidMileage(self.mileage));
        }
        Ok(RawInputRecord {
            mileage: self.mileage,
            engine_displacement: non_negative("Engine Displacement", self.engine_displacement)?,
            year_of_manufacture: year("Year of Manufacture", self.year_of_manufacture)?,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            owner_no: non_negative("Number of Previous Owners", self.owner_no)?,
            model_year: year("Model Year", self.model_year)?,
            location: self.location,
            kilometer_driven: non_negative("Kilometers Driven", self.kilometer_driven)?,
            body_type: self.body_type,
        })
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PredictResponse {
    pub price: Price,
    pub formatted: String,
    pub inference_time_ms: f64,
}
