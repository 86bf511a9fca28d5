pub mod cache;
pub mod loader;
pub mod predictor;
pub mod price;
pub mod regressor;
pub mod scaler;

pub use predictor::PricePredictor;
pub use price::Price;
pub use regressor::{OnnxRegressor, Regressor};
pub use scaler::PriceScaler;
