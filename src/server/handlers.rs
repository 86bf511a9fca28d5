use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    response::Html,
    Form, Json,
};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{ApiError, PredictionError};
use crate::model::Price;
use crate::server::page::{self, Outcome};
use crate::server::types::*;

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn metrics_snapshot(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}

fn outcome_label(result: &Result<Price, ApiError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ApiError::Validation(_)) => "rejected",
        Err(ApiError::Prediction(PredictionError::InvalidInput(_))) => "invalid_input",
        Err(ApiError::Prediction(PredictionError::ModelFailure(_))) => "model_failure",
        Err(ApiError::Prediction(PredictionError::ScalingFailure(_))) => "scaling_failure",
        Err(ApiError::MalformedBody { .. }) => "malformed",
    }
}

fn record_malformed(message: &str) {
    counter!("price_predictions_total", "outcome" => "malformed").increment(1);
    tracing::warn!(error = message, "unreadable submission");
}

/// Validates one submission and runs it through the predictor.
pub(crate) fn estimate(state: &AppState, form: PriceForm) -> (Result<Price, ApiError>, Duration) {
    let start = Instant::now();
    let result = form
        .validate()
        .map_err(ApiError::from)
        .and_then(|record| state.predictor.predict(&record).map_err(ApiError::from));
    let duration = start.elapsed();

    let outcome = outcome_label(&result);
    counter!("price_predictions_total", "outcome" => outcome).increment(1);
    histogram!("price_prediction_duration_seconds").record(duration.as_secs_f64());

    match &result {
        Ok(price) => tracing::info!(price = price.value(), ?duration, "estimated price"),
        Err(ApiError::Prediction(
            e @ (PredictionError::ModelFailure(_) | PredictionError::ScalingFailure(_)),
        )) => tracing::error!(error = %e, "prediction failed"),
        Err(e) => tracing::warn!(error = %e, outcome, "submission rejected"),
    }

    (result, duration)
}

/// Runs [`estimate`] off the async workers; the model session lock blocks.
async fn estimate_blocking(
    state: Arc<AppState>,
    form: PriceForm,
) -> (Result<Price, ApiError>, Duration) {
    let start = Instant::now();
    match tokio::task::spawn_blocking(move || estimate(&state, form)).await {
        Ok(estimated) => estimated,
        Err(e) => {
            tracing::error!(error = %e, "prediction task failed");
            let failure = PredictionError::ModelFailure(format!("prediction task failed: {}", e));
            (Err(failure.into()), start.elapsed())
        }
    }
}

pub async fn form_page() -> Html<String> {
    Html(page::render(&PriceForm::default(), None))
}

/// Handles a form submission. Failures, including bodies that cannot be
/// read, are rendered on the page rather than returned as an error status.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    form: Result<Form<PriceForm>, FormRejection>,
) -> Html<String> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let message = rejection.body_text();
            record_malformed(&message);
            let outcome = Outcome::Error(message);
            return Html(page::render(&PriceForm::default(), Some(&outcome)));
        }
    };

    let currency_symbol = state.currency_symbol.clone();
    let (result, _) = estimate_blocking(state, form.clone()).await;
    let outcome = match result {
        Ok(price) => Outcome::Estimate(price.format_with(&currency_symbol)),
        Err(e) => Outcome::Error(e.to_string()),
    };
    Html(page::render(&form, Some(&outcome)))
}

pub async fn predict_json(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PriceForm>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        record_malformed(&rejection.body_text());
        ApiError::from(rejection)
    })?;

    let currency_symbol = state.currency_symbol.clone();
    let (result, duration) = estimate_blocking(state, payload).await;
    let price = result?;

    Ok(Json(PredictResponse {
        price,
        formatted: price.format_with(&currency_symbol),
        inference_time_ms: duration.as_secs_f64() * 1000.0,
    }))
}
