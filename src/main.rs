use carprice::{config, model, server};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Init
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
    let metrics = PrometheusBuilder::new().install_recorder()?;
    model::loader::init_ort()?;

    // 2. Load Config
    let config_path =
        std::env::var("CARPRICE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = config::AppConfig::load(&config_path)?;
    tracing::info!(path = %config_path, "loaded config");

    // 3. Load artifacts; the service cannot answer anything without them
    let artifacts = model::loader::load_artifacts(&config.artifacts, config.intra_threads)?;
    let predictor = model::PricePredictor::new(artifacts).with_cache(config.cache_capacity);

    // 4. Create Router
    let app = server::routes::create_router(server::types::AppState {
        predictor,
        currency_symbol: config.currency_symbol.clone(),
        metrics,
    });

    // 5. Bind & Serve
    let listener =
        TcpListener::bind(format!("{}:{}", config.server.host, config.server.port)).await?;
    tracing::info!(
        "Server listening on http://{}:{}",
        config.server.host,
        config.server.port
    );

    axum::serve(listener, app).await?;

    Ok(())
}
