use serde::Deserialize;
use std::path::Path;

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_intra_threads() -> usize {
    1
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub artifacts: ArtifactConfig,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Number of predictions kept in memory. Zero disables the cache.
    #[serde(default)]
    pub cache_capacity: usize,
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Locations of the three trained artifacts.
#[derive(Deserialize, Clone, Debug)]
pub struct ArtifactConfig {
    pub model: String,
    pub encoders: String,
    pub scaler: String,
}

impl AppConfig {
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {}", path.display(), e))?;
        Ok(Self::from_yaml(&content)?)
    }
}
