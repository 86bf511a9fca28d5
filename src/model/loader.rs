use crate::config::ArtifactConfig;
use crate::error::ArtifactError;
use crate::model::regressor::{OnnxRegressor, Regressor};
use crate::model::scaler::PriceScaler;
use crate::preprocessing::features::{BODY_TYPES, FUEL_TYPES, LOCATIONS, TRANSMISSIONS};
use crate::preprocessing::{CategoricalEncoderSet, CategoricalField, EncodedFeatureVector};

// Initialize the global environment for ORT (only needed once)
pub fn init_ort() -> Result<(), ArtifactError> {
    ort::init().with_name("carprice").commit()?;
    tracing::debug!("ONNX Runtime environment configured");
    Ok(())
}

/// Everything produced by training that a prediction needs.
pub struct Artifacts {
    pub encoders: CategoricalEncoderSet,
    pub regressor: Box<dyn Regressor>,
    pub scaler: PriceScaler,
}

/// Loads the three artifacts named in the config. Any failure is fatal to
/// startup.
pub fn load_artifacts(
    config: &ArtifactConfig,
    intra_threads: usize,
) -> Result<Artifacts, ArtifactError> {
    let encoders = CategoricalEncoderSet::load(&config.encoders)?;
    let scaler = PriceScaler::load(&config.scaler)?;
    let regressor = OnnxRegressor::load(&config.model, intra_threads)?;

    warm_up(&regressor)?;
    for (field, label) in missing_form_choices(&encoders) {
        tracing::warn!(%field, label, "form offers a label the encoders were not fitted on");
    }

    Ok(Artifacts {
        encoders,
        regressor: Box::new(regressor),
        scaler,
    })
}

/// Runs one all-zero row through the model so a shape mismatch surfaces at
/// startup instead of on the first submission.
pub fn warm_up(regressor: &dyn Regressor) -> Result<(), ArtifactError> {
    let zeros = EncodedFeatureVector {
        mileage: 0.0,
        engine_displacement: 0,
        year_of_manufacture: 0,
        transmission: 0,
        fuel_type: 0,
        owner_no: 0,
        model_year: 0,
        location: 0,
        kilometer_driven: 0,
        body_type: 0,
    };
    let output = regressor
        .predict(&zeros)
        .map_err(|e| ArtifactError::Invalid(format!("warm-up prediction failed: {}", e)))?;
    tracing::info!(output, "warmup forward ok");
    Ok(())
}

/// Form choices that the fitted vocabularies do not know.
pub fn missing_form_choices(
    encoders: &CategoricalEncoderSet,
) -> Vec<(CategoricalField, &'static str)> {
    let choices: [(CategoricalField, &[&'static str]); 4] = [
        (CategoricalField::Transmission, &TRANSMISSIONS),
        (CategoricalField::FuelType, &FUEL_TYPES),
        (CategoricalField::Location, &LOCATIONS),
        (CategoricalField::BodyType, &BODY_TYPES),
    ];

    choices
        .into_iter()
        .flat_map(|(field, labels)| {
            labels
                .iter()
                .filter(move |label| encoders.vocabulary(field).lookup(label).is_none())
                .map(move |label| (field, *label))
        })
        .collect()
}
