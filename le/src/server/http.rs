//! Route handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{debug, info};

use super::AppState;
use super::error::ApiError;
use crate::domain::{GenerateParams, INTERESTS, Itinerary, ItineraryRequest, TripDuration};

/// Health endpoint path
pub const HEALTH_PATH: &str = "/health";
/// Itinerary generation endpoint path
pub const GENERATE_PATH: &str = "/api/generate-itinerary";
/// Saved itinerary list endpoint path
pub const ITINERARIES_PATH: &str = "/api/itineraries";
/// Saved itinerary detail endpoint path
pub const ITINERARY_PATH: &str = "/api/itineraries/:id";
/// Form options endpoint path
pub const OPTIONS_PATH: &str = "/api/options";

/// Duration choice as offered to the UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationOption {
    pub value: TripDuration,
    pub label: &'static str,
    pub min_items: u32,
    pub max_items: u32,
}

/// Choices for the request form
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub interests: Vec<&'static str>,
    pub durations: Vec<DurationOption>,
}

impl FormOptions {
    pub fn current() -> Self {
        Self {
            interests: INTERESTS.to_vec(),
            durations: TripDuration::ALL
                .into_iter()
                .map(|d| {
                    let (min_items, max_items) = d.item_range();
                    DurationOption {
                        value: d,
                        label: d.label(),
                        min_items,
                        max_items,
                    }
                })
                .collect(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(OPTIONS_PATH, get(options))
        .route(GENERATE_PATH, post(generate_itinerary))
        .route(ITINERARIES_PATH, get(list_itineraries).post(save_itinerary))
        .route(ITINERARY_PATH, get(get_itinerary).delete(delete_itinerary))
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn options() -> Json<FormOptions> {
    Json(FormOptions::current())
}

async fn generate_itinerary(
    State(st): State<AppState>,
    body: Result<Json<GenerateParams>, JsonRejection>,
) -> Result<Json<Itinerary>, ApiError> {
    debug!("generate_itinerary: called");
    let Json(params) = body?;
    let request = ItineraryRequest::try_from(params).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let itinerary = st.gateway.generate(&request).await?;
    Ok(Json(itinerary))
}

async fn list_itineraries(State(st): State<AppState>) -> Result<Json<Vec<Itinerary>>, ApiError> {
    debug!("list_itineraries: called");
    Ok(Json(st.state.list().await?))
}

async fn save_itinerary(
    State(st): State<AppState>,
    body: Result<Json<Itinerary>, JsonRejection>,
) -> Result<Json<Itinerary>, ApiError> {
    let Json(itinerary) = body?;
    debug!(id = %itinerary.id, "save_itinerary: called");
    if itinerary.id.trim().is_empty() {
        return Err(ApiError::BadRequest("Itinerary id must not be empty".to_string()));
    }

    st.state.save(itinerary.clone()).await?;
    Ok(Json(itinerary))
}

async fn get_itinerary(State(st): State<AppState>, Path(id): Path<String>) -> Result<Json<Itinerary>, ApiError> {
    debug!(%id, "get_itinerary: called");
    Ok(Json(st.state.get_required(&id).await?))
}

async fn delete_itinerary(State(st): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    debug!(%id, "delete_itinerary: called");
    st.state.delete(&id).await?;
    info!(%id, "Deleted saved itinerary");
    Ok(StatusCode::NO_CONTENT)
}
