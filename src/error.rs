use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Raised while mapping a raw record onto the trained feature space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// `(field, value)`: the value is not part of the field's fitted vocabulary.
    #[error("{0} contains previously unseen label: '{1}'")]
    UnknownCategory(String, String),
}

/// Failure inside the regressor itself.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("ONNX Runtime error: {0}")]
    OrtError(#[from] ort::Error),

    #[error("Input shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("model returned no output values")]
    EmptyOutput,

    #[error("model session is unavailable: {0}")]
    SessionUnavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("cannot inverse-transform non-finite value {0}")]
    NonFiniteInput(f64),

    #[error("inverse transform of {input} produced non-finite value {output}")]
    NonFiniteOutput { input: f64, output: f64 },
}

/// Classified failure of a single price prediction.
#[derive(Error, Debug)]
pub enum PredictionError {
    #[error("{0}")]
    InvalidInput(#[from] EncodingError),

    #[error("model inference failed: {0}")]
    ModelFailure(String),

    #[error("inverse scaling failed: {0}")]
    ScalingFailure(String),
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::ModelFailure(err.to_string())
    }
}

impl From<ScalingError> for PredictionError {
    fn from(err: ScalingError) -> Self {
        PredictionError::ScalingFailure(err.to_string())
    }
}

/// A submitted field violates the constraints the form enforces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("Mileage must be a finite number of at least 0.0, got {0}")]
    InvalidMileage(f64),
}

/// Startup failures while loading the trained artifacts. Always fatal.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found at path: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("ONNX Runtime error: {0}")]
    OrtError(#[from] ort::Error),

    #[error("invalid artifact: {0}")]
    Invalid(String),
}

/// Errors returned by the JSON prediction endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    /// The request body could not be read into a submission.
    #[error("{message}")]
    MalformedBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Prediction(PredictionError::InvalidInput(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MalformedBody { status, .. } => *status,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
