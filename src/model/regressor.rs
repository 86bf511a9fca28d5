use crate::error::{ArtifactError, ModelError};
use crate::preprocessing::EncodedFeatureVector;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

/// A trained model producing one normalized price for one encoded row.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, ModelError>;
}

/// Regressor exported to ONNX: one `f32` input of shape `[N, 10]`, one
/// `f32` output holding a value per row.
pub struct OnnxRegressor {
    // `Session::run` needs exclusive access.
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxRegressor {
    /// Loads an ONNX model from disk and creates an inference session.
    pub fn load(model_path: impl AsRef<Path>, intra_threads: usize) -> Result<Self, ArtifactError> {
        let path = model_path.as_ref();
        if !path.exists() {
            return Err(ArtifactError::NotFound(path.display().to_string()));
        }

        let session = build_session(path, intra_threads.max(1))?;

        if session.inputs.len() != 1 {
            return Err(ArtifactError::Invalid(format!(
                "{} declares {} inputs, expected a single feature tensor",
                path.display(),
                session.inputs.len()
            )));
        }
        let input_name = session.inputs[0].name.clone();

        tracing::info!(path = %path.display(), input = %input_name, "loaded regressor");
        for (i, output) in session.outputs.iter().enumerate() {
            tracing::debug!(index = i, name = %output.name, "model output");
        }

        Ok(Self {
            session: Mutex::new(session),
            input_name,
        })
    }
}

fn build_session(path: &Path, intra_threads: usize) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(intra_threads)? // Parallelism within an op
        .commit_from_file(path)
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, ModelError> {
        let row = features.to_array();
        let shape = row.shape().to_vec();
        let (data, _) = row.into_raw_vec_and_offset();
        let input_value = Tensor::from_array((shape, data.into_boxed_slice()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| ModelError::SessionUnavailable(e.to_string()))?;
        let outputs = session.run(ort::inputs![self.input_name.as_str() => input_value])?;

        let (shape, values) = outputs[0].try_extract_tensor::<f32>()?;
        single_value(&shape, values)
    }
}

/// Reads the one prediction out of an output tensor. Anything other than a
/// single value means the model does not match the expected export.
fn single_value(shape: &[i64], values: &[f32]) -> Result<f64, ModelError> {
    match values {
        [] => Err(ModelError::EmptyOutput),
        [value] => Ok(f64::from(*value)),
        _ => Err(ModelError::ShapeMismatch {
            expected: vec![1, 1],
            got: shape.iter().map(|&x| x.max(0) as usize).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictionError;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_nonexistent_model() {
        match OnnxRegressor::load("nonexistent_model.onnx", 1) {
            Err(ArtifactError::NotFound(path)) => assert_eq!(path, "nonexistent_model.onnx"),
            Err(other) => panic!("Expected NotFound, got {:?}", other),
            Ok(_) => panic!("Expected NotFound, got a session"),
        }
    }

    #[test]
    fn test_load_invalid_model_file() {
        // An empty file exists but is not an ONNX graph.
        let temp_file = NamedTempFile::new().unwrap();
        let result = OnnxRegressor::load(temp_file.path(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_value_output() {
        let value = single_value(&[1, 1], &[0.25]).unwrap();
        assert!((value - 0.25).abs() < 1e-9);

        // A flat `[1]` output is also a single prediction.
        assert!(single_value(&[1], &[0.5]).is_ok());
    }

    #[test]
    fn test_empty_output() {
        assert!(matches!(
            single_value(&[1, 0], &[]),
            Err(ModelError::EmptyOutput)
        ));
    }

    #[test]
    fn test_multi_value_output() {
        match single_value(&[1, 3], &[0.1, 0.2, 0.3]) {
            Err(ModelError::ShapeMismatch { expected, got }) => {
                assert_eq!(expected, vec![1, 1]);
                assert_eq!(got, vec![1, 3]);
            }
            other => panic!("Expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_output_errors_become_model_failures() {
        let error = PredictionError::from(single_value(&[2, 1], &[0.1, 0.2]).unwrap_err());
        assert!(matches!(error, PredictionError::ModelFailure(_)));
    }
}
