//! HTTP surface: listing and review route groups plus health endpoints.
//!
//! Each request is independent and stateless. Mutating routes consult the
//! CRUD flag before touching a repository; reads are always permitted.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::db;
use crate::error::ApiError;
use crate::models::{ListingPayload, ReviewPayload};
use crate::AppState;

/// JSON responder with indented output, matching the API's wire contract.
pub struct PrettyJson<T>(pub T);

impl<T: Serialize> IntoResponse for PrettyJson<T> {
    fn into_response(self) -> Response {
        match serde_json::to_string_pretty(&self.0) {
            Ok(body) => (
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(err) => {
                log::error!("Response serialization failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/health/ready", get(health_ready))
        .nest("/api/listings", listing_routes())
        .nest("/api/reviews", review_routes())
        .with_state(state)
}

fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route(
            "/:id",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/by-listing/:listing_id", get(reviews_by_listing))
        .route(
            "/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

async fn root() -> impl IntoResponse {
    PrettyJson(json!({
        "message": "Pawspots API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "listings": "/api/listings",
            "reviews": "/api/reviews",
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Liveness: 200 as soon as the process serves requests.
async fn health() -> impl IntoResponse {
    PrettyJson(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Readiness: reports the bootstrap state and a live connectivity probe.
/// Never fails the HTTP call itself.
async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let connected = match state.db.lock() {
        Ok(mut conn) => db::ping(&mut conn).is_ok(),
        Err(_) => false,
    };
    PrettyJson(json!({
        "status": state.readiness.get(),
        "databaseConnected": connected,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn list_listings(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(PrettyJson(state.listings.list()?).into_response())
}

async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    match state.listings.get(id)? {
        Some(listing) => Ok(PrettyJson(listing).into_response()),
        None => Err(ApiError::NotFound),
    }
}

async fn create_listing(
    State(state): State<AppState>,
    Json(payload): Json<ListingPayload>,
) -> Result<Response, ApiError> {
    state.config.ensure_crud_enabled()?;
    let listing = state.listings.create(payload)?;
    let location = format!("/api/listings/{}", listing.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        PrettyJson(listing),
    )
        .into_response())
}

async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ListingPayload>,
) -> Result<Response, ApiError> {
    state.config.ensure_crud_enabled()?;
    match state.listings.update(id, payload)? {
        Some(listing) => Ok(PrettyJson(listing).into_response()),
        None => Err(ApiError::NotFound),
    }
}

async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.config.ensure_crud_enabled()?;
    if state.listings.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

async fn list_reviews(State(state): State<AppState>) -> Result<Response, ApiError> {
    Ok(PrettyJson(state.reviews.list()?).into_response())
}

async fn reviews_by_listing(
    State(state): State<AppState>,
    Path(listing_id): Path<i32>,
) -> Result<Response, ApiError> {
    Ok(PrettyJson(state.reviews.list_for_listing(listing_id)?).into_response())
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    match state.reviews.get(id)? {
        Some(review) => Ok(PrettyJson(review).into_response()),
        None => Err(ApiError::NotFound),
    }
}

async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<ReviewPayload>,
) -> Result<Response, ApiError> {
    state.config.ensure_crud_enabled()?;
    let review = state.reviews.create(payload)?;
    let location = format!("/api/reviews/{}", review.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        PrettyJson(review),
    )
        .into_response())
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ReviewPayload>,
) -> Result<Response, ApiError> {
    state.config.ensure_crud_enabled()?;
    match state.reviews.update(id, payload)? {
        Some(review) => Ok(PrettyJson(review).into_response()),
        None => Err(ApiError::NotFound),
    }
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.config.ensure_crud_enabled()?;
    if state.reviews.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
