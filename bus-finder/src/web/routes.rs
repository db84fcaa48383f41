//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use super::dto::*;
use super::state::AppState;

/// Upper bound on suggestions per request.
const MAX_SUGGESTIONS: usize = 50;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops/suggest", get(suggest_stops))
        .route("/api/stops/routes", get(routes_at_stop))
        .route("/api/search", get(search_direct))
        .route("/api/search/connections", get(search_connections))
        .route("/api/journey", get(plan_journey))
        .route("/api/routes/:id", get(get_route))
        .route("/api/service-types", get(service_types))
        .route("/api/history", get(recent_searches).delete(clear_history))
        .route("/api/history/:id", delete(delete_search))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Rank stop names against a partial query.
async fn suggest_stops(
    State(state): State<AppState>,
    Query(req): Query<SuggestRequest>,
) -> Json<SuggestResponse> {
    let limit = req
        .limit
        .unwrap_or_else(|| state.finder.suggest_limit())
        .min(MAX_SUGGESTIONS);
    let suggestions = state.finder.suggest_stops(&req.q, limit).await;
    Json(SuggestResponse { suggestions })
}

/// Routes with a stop whose name contains the query.
async fn routes_at_stop(
    State(state): State<AppState>,
    Query(req): Query<StopRoutesRequest>,
) -> Json<RoutesResponse> {
    let routes = state.finder.get_buses_at_stop(&req.name).await;
    Json(RoutesResponse::from_routes(&routes))
}

/// Direct routes between two stops.
async fn search_direct(
    State(state): State<AppState>,
    Query(req): Query<TripRequest>,
) -> Json<RoutesResponse> {
    let routes = state.finder.search_buses(&req.from, &req.to).await;
    Json(RoutesResponse::from_routes(&routes))
}

/// Direct routes, or multi-hop connecting routes when there are none.
async fn search_connections(
    State(state): State<AppState>,
    Query(req): Query<TripRequest>,
) -> Json<ConnectionsResponse> {
    let outcome = state
        .finder
        .search_buses_with_connections(&req.from, &req.to)
        .await;
    Json(ConnectionsResponse::from(&outcome))
}

/// Segment-by-segment plan between two stops.
async fn plan_journey(
    State(state): State<AppState>,
    Query(req): Query<TripRequest>,
) -> Result<Json<JourneyResult>, AppError> {
    if req.from.trim().is_empty() || req.to.trim().is_empty() {
        return Err(AppError::BadRequest {
            message: "both from and to are required".to_string(),
        });
    }

    let plan = state
        .finder
        .create_journey_plan(&req.from, &req.to)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no journey from {} to {}", req.from, req.to),
        })?;

    Ok(Json(JourneyResult::from(&plan)))
}

/// A single route by id.
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteResult>, AppError> {
    let route = state
        .finder
        .get_bus_route(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no route with id {}", id),
        })?;

    Ok(Json(RouteResult::from(&route)))
}

/// Distinct service types.
async fn service_types(State(state): State<AppState>) -> Json<ServiceTypesResponse> {
    Json(ServiceTypesResponse {
        service_types: state.finder.get_service_types().await,
    })
}

/// Recent searches, newest first.
async fn recent_searches(State(state): State<AppState>) -> Json<HistoryResponse> {
    let searches = state
        .finder
        .recent_searches()
        .await
        .iter()
        .map(HistoryResult::from)
        .collect();
    Json(HistoryResponse { searches })
}

/// Forget all searches.
async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if state.finder.clear_search_history().await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Internal {
            message: "failed to clear search history".to_string(),
        })
    }
}

/// Forget one search.
async fn delete_search(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    if state.finder.delete_search(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("no search with id {}", id),
        })
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
