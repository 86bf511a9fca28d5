#[cfg(test)]
mod end_to_end_tests {
    use crate::config::AppConfig;
    use crate::error::{ArtifactError, EncodingError, PredictionError};
    use crate::model::loader::{warm_up, Artifacts};
    use crate::model::{PricePredictor, PriceScaler};
    use crate::preprocessing::CategoricalEncoderSet;
    use crate::testing::{sample_record, LinearRegressor, ENCODERS_JSON, SCALER_JSON};
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Writes encoder and scaler files the way the training export does and
    /// returns a config pointing at them.
    fn artifact_dir() -> (TempDir, AppConfig) {
        let dir = TempDir::new().unwrap();
        let encoders = dir.path().join("encoders.json");
        let scaler = dir.path().join("scaler.json");
        std::fs::File::create(&encoders)
            .unwrap()
            .write_all(ENCODERS_JSON.as_bytes())
            .unwrap();
        std::fs::File::create(&scaler)
            .unwrap()
            .write_all(SCALER_JSON.as_bytes())
            .unwrap();

        let yaml = format!(
            "server:\n  host: 127.0.0.1\n  port: 0\nartifacts:\n  model: {}\n  encoders: {}\n  scaler: {}\ncache_capacity: 4\n",
            dir.path().join("price.onnx").display(),
            encoders.display(),
            scaler.display(),
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        (dir, config)
    }

    fn predictor_from_files(config: &AppConfig) -> PricePredictor {
        let regressor = LinearRegressor::sample();
        warm_up(&regressor).unwrap();
        PricePredictor::new(Artifacts {
            encoders: CategoricalEncoderSet::load(&config.artifacts.encoders).unwrap(),
            regressor: Box::new(regressor),
            scaler: PriceScaler::load(&config.artifacts.scaler).unwrap(),
        })
        .with_cache(config.cache_capacity)
    }

    #[test]
    fn test_full_pipeline_from_artifact_files() {
        let (_dir, config) = artifact_dir();
        let predictor = predictor_from_files(&config);

        let price = predictor.predict(&sample_record()).unwrap();
        assert!(price.value() > 0.0);

        let formatted = price.format_with("₹");
        let (integer, decimals) = formatted.trim_start_matches('₹').split_once('.').unwrap();
        assert_eq!(decimals.len(), 2);
        assert!(integer.contains(','));
        assert!(integer.split(',').skip(1).all(|group| group.len() == 3));
    }

    #[test]
    fn test_mumbai_is_rejected_end_to_end() {
        let (_dir, config) = artifact_dir();
        let predictor = predictor_from_files(&config);

        let mut record = sample_record();
        record.location = "Mumbai".to_string();
        match predictor.predict(&record) {
            Err(PredictionError::InvalidInput(error)) => assert_eq!(
                error,
                EncodingError::UnknownCategory("Location".to_string(), "Mumbai".to_string())
            ),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_model_is_fatal() {
        let (_dir, config) = artifact_dir();
        match crate::model::loader::load_artifacts(&config.artifacts, config.intra_threads) {
            Err(ArtifactError::NotFound(path)) => assert!(path.ends_with("price.onnx")),
            Err(other) => panic!("Expected NotFound, got {:?}", other),
            Ok(_) => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_shared_predictor_across_threads() {
        let (_dir, config) = artifact_dir();
        let predictor = Arc::new(predictor_from_files(&config));
        let expected = predictor.predict(&sample_record()).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let predictor = Arc::clone(&predictor);
                std::thread::spawn(move || predictor.predict(&sample_record()).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_cached_and_uncached_agree() {
        let (_dir, config) = artifact_dir();
        let cached = predictor_from_files(&config);
        let uncached = PricePredictor::new(Artifacts {
            encoders: CategoricalEncoderSet::load(&config.artifacts.encoders).unwrap(),
            regressor: Box::new(LinearRegressor::sample()),
            scaler: PriceScaler::load(&config.artifacts.scaler).unwrap(),
        });

        let record = sample_record();
        for _ in 0..3 {
            assert_eq!(
                cached.predict(&record).unwrap(),
                uncached.predict(&record).unwrap()
            );
        }
    }
}
