//! HTTP request handlers for the warehouse labor API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    ManualWageRate, RateResolver, add_agency_markup, analyze_timesheet, cargo_labor_series,
    effective_wage_rate, ingest_rows, list_wage_rates, list_workers, populate_missing_wage_rates,
    preview_missing_wage_rates, record_manual_wage_rate, rename_worker, toggle_worker_active,
    wage_rate_history,
};
use crate::error::EngineError;
use crate::models::AgencyMarkup;

use super::request::{
    CargoRelationshipRequest, EffectiveRateQuery, ProvisionQuery, ProvisionRequest,
    RenameWorkerRequest, ResolveRateRequest, TimesheetRequest, WageRateListQuery,
    WorkerListQuery,
};
use super::response::{
    AnalyzeResponse, ApiError, ApiErrorResponse, ProvisionResponse, WageRateHistoryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route(
            "/wage-rates",
            get(list_wage_rates_handler).post(record_wage_rate_handler),
        )
        .route("/wage-rates/provision", post(provision_handler))
        .route("/wage-rates/:worker_id", get(wage_rate_history_handler))
        .route("/wage-rates/:worker_id/effective", get(effective_wage_rate_handler))
        .route("/rates/resolve", post(resolve_rate_handler))
        .route("/agencies/:name/markups", post(agency_markup_handler))
        .route("/workers", get(list_workers_handler))
        .route("/workers/:worker_id/toggle-active", post(toggle_worker_handler))
        .route("/workers/:worker_id/name", put(rename_worker_handler))
        .route("/cargo/relationship", post(cargo_relationship_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body or turns the rejection into a 400 response.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Unwraps a query string or turns the rejection into a 400 response.
fn parse_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
            Err(json_response(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(rejection.body_text()),
            ))
        }
    }
}

/// Handler for POST /analyze.
///
/// Validates the rows, costs them against the stored wage rates and returns
/// monthly agency summaries and weekly worker summaries, rounded to 2 dp.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimesheetRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analysis request");

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let report = {
        let store = state.store().read().await;
        analyze_timesheet(&request.rows, state.policy(), &*store).rounded()
    };

    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        entries = report.entries_processed,
        summaries = report.summaries.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Analysis completed successfully"
    );

    json_response(
        StatusCode::OK,
        AnalyzeResponse {
            summaries: report.summaries,
            weekly: report.weekly,
            entries_processed: report.entries_processed,
            skipped_rows: report.skipped_rows.into_iter().map(Into::into).collect(),
            warnings: report.warnings.into_iter().map(Into::into).collect(),
        },
    )
}

/// Handler for POST /wage-rates/provision[?dry_run=true].
///
/// Holds the store's write lock for the whole batch so that provisioning
/// runs one at a time and never interleaves with manual edits. A dry run
/// only reads the store.
async fn provision_handler(
    State(state): State<AppState>,
    query: Result<Query<ProvisionQuery>, QueryRejection>,
    payload: Result<Json<ProvisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing provisioning request");

    let query = match parse_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };
    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());
    let ingest = ingest_rows(&request.rows, state.policy());

    let summary = if query.dry_run {
        let store = state.store().read().await;
        preview_missing_wage_rates(&ingest.entries, state.policy(), &*store, today)
    } else {
        let mut store = state.store().write().await;
        populate_missing_wage_rates(&ingest.entries, state.policy(), &mut *store, today)
    };

    info!(
        correlation_id = %correlation_id,
        dry_run = query.dry_run,
        workers = summary.workers_processed,
        created = summary.wage_rates_created,
        updated = summary.wage_rates_updated,
        skipped_rows = ingest.skipped.len(),
        "Provisioning completed"
    );

    json_response(
        StatusCode::OK,
        ProvisionResponse {
            summary,
            dry_run: query.dry_run,
            skipped_rows: ingest.skipped.into_iter().map(Into::into).collect(),
            warnings: ingest.warnings.into_iter().map(Into::into).collect(),
        },
    )
}

/// Handler for GET /wage-rates?agency=&show_all=.
///
/// Lists wage rate records for active workers, newest first per worker.
async fn list_wage_rates_handler(
    State(state): State<AppState>,
    query: Result<Query<WageRateListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match parse_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let store = state.store().read().await;
    let rates = list_wage_rates(&*store, query.agency.as_deref(), query.show_all);
    json_response(StatusCode::OK, rates)
}

/// Handler for POST /wage-rates.
async fn record_wage_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManualWageRate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut store = state.store().write().await;
    match record_manual_wage_rate(&mut *store, state.policy(), request) {
        Ok(rate) => {
            info!(
                correlation_id = %correlation_id,
                worker_id = %rate.worker_id,
                "Manual wage rate recorded"
            );
            json_response(StatusCode::CREATED, rate)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /wage-rates/:worker_id.
async fn wage_rate_history_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let store = state.store().read().await;

    match wage_rate_history(&*store, &worker_id) {
        Ok(wage_rates) => json_response(
            StatusCode::OK,
            WageRateHistoryResponse {
                worker_id,
                wage_rates,
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /wage-rates/:worker_id/effective?date=YYYY-MM-DD.
async fn effective_wage_rate_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    query: Result<Query<EffectiveRateQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match parse_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let store = state.store().read().await;
    match effective_wage_rate(&*store, &worker_id, query.date) {
        Ok(rate) => json_response(StatusCode::OK, rate),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /rates/resolve.
///
/// Returns the base rate, markup and total rate the cost calculation would
/// use for the worker on the date, with where each value came from.
async fn resolve_rate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let store = state.store().read().await;
    let resolved = RateResolver::new(state.policy(), &*store).resolve(
        &request.worker_id,
        request.position.as_deref(),
        &request.agency,
        request.date,
    );

    json_response(StatusCode::OK, resolved)
}

/// Handler for POST /agencies/:name/markups.
async fn agency_markup_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<AgencyMarkup>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut store = state.store().write().await;
    match add_agency_markup(&mut *store, &name, request.markup, request.effective_date) {
        Ok(()) => json_response(StatusCode::CREATED, request),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /cargo/relationship.
async fn cargo_relationship_handler(
    State(state): State<AppState>,
    payload: Result<Json<CargoRelationshipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let ingest = ingest_rows(&request.rows, state.policy());
    let series = cargo_labor_series(
        &request.cargo,
        &ingest.entries,
        request.span,
        request.cargo_metric,
        request.labor_metric,
    );

    info!(
        correlation_id = %correlation_id,
        cargo_records = request.cargo.len(),
        periods = series.len(),
        "Cargo relationship computed"
    );

    json_response(StatusCode::OK, series)
}

/// Handler for GET /workers[?active_only=true].
async fn list_workers_handler(
    State(state): State<AppState>,
    query: Result<Query<WorkerListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match parse_query(query, correlation_id) {
        Ok(query) => query,
        Err(response) => return response,
    };

    let store = state.store().read().await;
    json_response(StatusCode::OK, list_workers(&*store, query.active_only))
}

/// Handler for POST /workers/:worker_id/toggle-active.
async fn toggle_worker_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let mut store = state.store().write().await;
    match toggle_worker_active(&mut *store, &worker_id) {
        Ok(worker) => json_response(StatusCode::OK, worker),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /workers/:worker_id/name.
async fn rename_worker_handler(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    payload: Result<Json<RenameWorkerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_body(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut store = state.store().write().await;
    match rename_worker(&mut *store, &worker_id, &request.name) {
        Ok(worker) => json_response(StatusCode::OK, worker),
        Err(err) => error_response(correlation_id, err),
    }
}
