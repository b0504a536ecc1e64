//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use super::AppState;
use super::types::{CalculateBody, CalculateResponse, ErrorResponse};
use crate::calc::engine::compute;
use crate::calc::types::CalculationRequest;
use crate::error::CalcError;
use crate::tariff::Tariff;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(err: &CalcError) -> ApiError {
    tracing::warn!(error = %err, "rejected calculation request");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

/// Returns the default tariff.
///
/// `GET /tariff` → 200 + `Tariff` JSON
pub async fn get_tariff(State(state): State<Arc<AppState>>) -> Json<Tariff> {
    Json(state.tariff)
}

/// Computes an itemized cost breakdown.
///
/// `POST /calculate` → 200 + `CalculateResponse` JSON
/// Negative consumption or an invalid tariff → 400 + `ErrorResponse`
pub async fn post_calculate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CalculateBody>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let tariff = match body.tariff {
        Some(over) => {
            Tariff::new(over.merged_onto(state.tariff)).map_err(|e| bad_request(&e))?
        }
        None => state.tariff,
    };
    let consumption_kwh = body.input.resolve().map_err(|e| bad_request(&e))?;

    let request = CalculationRequest::new(consumption_kwh)
        .map_err(|e| bad_request(&e))?
        .with_period(body.period.unwrap_or(state.defaults.period))
        .with_vat(body.include_vat.unwrap_or(state.defaults.include_vat))
        .with_tariff(Some(tariff));

    let result = compute(&request);
    tracing::info!(
        consumption_kwh,
        total_cost = result.total_cost,
        "calculated heating cost"
    );

    Ok(Json(CalculateResponse {
        result,
        warnings: body.input.warnings(),
    }))
}
