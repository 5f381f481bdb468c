//! HTTP API for the load board
//!
//! Thin axum handlers over the catalog, search, booking and profile modules.
//! Everything is nested under `/api` by `web::run`.

use std::time::Duration;

use axum::{
    Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::booking::{self, BookingRequest};
use crate::catalog::{self, LoadSource};
use crate::config;
use crate::error::LoadBoardError;
use crate::models::{Load, LoadStatus, SearchFilters};
use crate::profile::{
    Availability, BookedLoad, HistoryEntry, SavedSearch, availability, booked, history,
    saved_searches, user, watched,
};
use crate::recommend::RecommendClient;
use crate::search;

pub fn router() -> Router {
    Router::new()
        .route("/loads", get(list_loads))
        .route("/loads/near", get(near_you))
        .route("/loads/availability-matches", get(availability_matches))
        .route("/loads/search", post(search_loads))
        .route("/loads/{id}", get(get_load))
        .route("/book", post(book_load))
        .route("/recommendations", get(recommendations))
        .route("/watched", get(watched_list))
        .route("/watched/toggle", post(toggle_watched))
        .route("/booked", get(booked_list))
        .route("/searches/saved", get(saved_list).post(save_search))
        .route("/searches/saved/{id}", delete(remove_saved))
        .route("/searches/history", get(history_list).delete(clear_history))
        .route(
            "/availability",
            get(get_availability)
                .put(set_availability)
                .delete(clear_availability),
        )
        .route("/user", get(get_user).put(set_user))
}

fn status_for(err: &LoadBoardError) -> StatusCode {
    match err {
        LoadBoardError::Validation { .. } => StatusCode::BAD_REQUEST,
        LoadBoardError::NotFound { .. } => StatusCode::NOT_FOUND,
        LoadBoardError::Api { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Deserialize)]
struct LaneQuery {
    origin_state: Option<String>,
    delivery_state: Option<String>,
    limit: Option<usize>,
}

/// All local loads, or a state-to-state lane section of the home feed.
async fn list_loads(Query(query): Query<LaneQuery>) -> Json<Vec<Load>> {
    let section_size = config::get().defaults.feed_section_size as usize;

    let loads = match (&query.origin_state, &query.delivery_state) {
        (Some(origin), Some(delivery)) => {
            catalog::lane_section(origin, delivery, query.limit.unwrap_or(section_size))
        }
        _ => {
            let mut all = catalog::all_local_loads();
            if let Some(limit) = query.limit {
                all.truncate(limit);
            }
            all
        }
    };
    Json(loads)
}

/// The "near you" window of the home feed.
async fn near_you() -> Json<Vec<Load>> {
    Json(catalog::near_you())
}

/// Loads whose pickup works for the stored availability; empty when the
/// driver has not set one.
async fn availability_matches() -> Result<Json<Vec<Load>>, StatusCode> {
    let stored = availability::get().await.map_err(|e| status_for(&e))?;

    let Some(avail) = stored else {
        return Ok(Json(Vec::new()));
    };

    let section_size = config::get().defaults.feed_section_size as usize;
    let board = catalog::all_local_loads();
    Ok(Json(search::availability_section(
        &board,
        &avail,
        section_size,
    )))
}

/// Run a filtered search over the board and record it in the history.
async fn search_loads(
    Json(filters): Json<SearchFilters>,
) -> Result<Json<Vec<Load>>, StatusCode> {
    history::record(filters.clone())
        .await
        .map_err(|e| status_for(&e))?;

    let board = catalog::all_local_loads();
    Ok(Json(search::filter_loads(&board, &filters)))
}

/// Look a load up on the local boards, falling back to the backend for
/// backend-shaped ids.
async fn get_load(Path(id): Path<String>) -> Result<Json<Load>, StatusCode> {
    if let Some(load) = catalog::find_by_id(&id) {
        return Ok(Json(load));
    }

    if catalog::identify_source(&id) == LoadSource::Backend {
        let client = RecommendClient::from_config();
        let load = client.fetch_load(&id).await.map_err(|e| status_for(&e))?;
        return Ok(Json(load));
    }

    Err(StatusCode::NOT_FOUND)
}

/// Booking stub. Mirrors the original endpoint's wire shape, including the
/// 400 body for a missing load id.
async fn book_load(Json(request): Json<BookingRequest>) -> Response {
    let delay = Duration::from_millis(config::get().booking.processing_delay_ms);

    match booking::book(&request.load_id, delay).await {
        Ok(confirmation) => {
            // The original recorded the confirmation client-side once the
            // stub returned; locally resolvable loads land in the profile.
            if let Some(load) = catalog::find_by_id(&confirmation.load_id) {
                if let Err(e) = booked::record(&load, &confirmation.booking_id).await {
                    tracing::warn!("Booking confirmed but not recorded: {e}");
                }
            }
            Json(confirmation).into_response()
        }
        Err(LoadBoardError::Validation { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": "Load ID is required" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Booking stub failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecommendationsQuery {
    limit: Option<u32>,
}

/// Recommendations for the current demo driver at the configured position.
async fn recommendations(
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<Vec<Load>>, StatusCode> {
    let cfg = &config::get().recommend;
    let user_id = user::current().await.map_err(|e| status_for(&e))?;

    let client = RecommendClient::from_config();
    let loads = client
        .recommended_loads(
            &user_id,
            cfg.current_latitude,
            cfg.current_longitude,
            query.limit.unwrap_or(cfg.default_limit),
        )
        .await
        .map_err(|e| status_for(&e))?;

    Ok(Json(loads))
}

/// The watch list.
async fn watched_list() -> Result<Json<Vec<Load>>, StatusCode> {
    let list = watched::all().await.map_err(|e| status_for(&e))?;
    Ok(Json(list))
}

/// Toggle a load on the watch list; responds with the new state.
async fn toggle_watched(Json(load): Json<Load>) -> Result<Json<Value>, StatusCode> {
    let now_watched = watched::toggle(&load).await.map_err(|e| status_for(&e))?;
    Ok(Json(json!({ "id": load.id, "watched": now_watched })))
}

#[derive(Debug, Deserialize)]
struct BookedQuery {
    status: Option<LoadStatus>,
}

/// The booked list, optionally narrowed to one lifecycle status.
async fn booked_list(
    Query(query): Query<BookedQuery>,
) -> Result<Json<Vec<BookedLoad>>, StatusCode> {
    let list = match query.status {
        Some(status) => booked::with_status(status).await,
        None => booked::all().await,
    }
    .map_err(|e| status_for(&e))?;
    Ok(Json(list))
}

/// Saved searches, newest first.
async fn saved_list() -> Result<Json<Vec<SavedSearch>>, StatusCode> {
    let list = saved_searches::all().await.map_err(|e| status_for(&e))?;
    Ok(Json(list))
}

#[derive(Debug, Deserialize)]
struct SaveSearchRequest {
    filters: SearchFilters,
    name: Option<String>,
}

/// Save a filter set. Responds with the created search, or `null` when an
/// identical search was already saved.
async fn save_search(
    Json(request): Json<SaveSearchRequest>,
) -> Result<Json<Option<SavedSearch>>, StatusCode> {
    let created = saved_searches::save(request.filters, request.name)
        .await
        .map_err(|e| status_for(&e))?;
    Ok(Json(created))
}

/// Delete a saved search by id.
async fn remove_saved(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let removed = saved_searches::remove(&id)
        .await
        .map_err(|e| status_for(&e))?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

/// The search history, newest first.
async fn history_list() -> Result<Json<Vec<HistoryEntry>>, StatusCode> {
    let list = history::all().await.map_err(|e| status_for(&e))?;
    Ok(Json(list))
}

/// Wipe the search history.
async fn clear_history() -> Result<StatusCode, StatusCode> {
    history::clear().await.map_err(|e| status_for(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// The stored availability, `null` when unset.
async fn get_availability() -> Result<Json<Option<Availability>>, StatusCode> {
    let stored = availability::get().await.map_err(|e| status_for(&e))?;
    Ok(Json(stored))
}

/// Store the driver's availability.
async fn set_availability(
    Json(payload): Json<Availability>,
) -> Result<Json<Availability>, StatusCode> {
    availability::set(payload.clone())
        .await
        .map_err(|e| status_for(&e))?;
    Ok(Json(payload))
}

/// Clear the stored availability.
async fn clear_availability() -> Result<StatusCode, StatusCode> {
    availability::clear().await.map_err(|e| status_for(&e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// The selected demo driver.
async fn get_user() -> Result<Json<Value>, StatusCode> {
    let id = user::current().await.map_err(|e| status_for(&e))?;
    Ok(Json(json!({ "userId": id })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetUserRequest {
    user_id: String,
}

/// Select a demo driver from the roster.
async fn set_user(Json(request): Json<SetUserRequest>) -> Result<Json<Value>, StatusCode> {
    user::set(&request.user_id)
        .await
        .map_err(|e| status_for(&e))?;
    Ok(Json(json!({ "userId": request.user_id })))
}
