//! Cost center endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{not_found, validation_error, ListQuery, SharedState};
use crate::CostCenter;

/// GET /costcenters
pub async fn list_cost_centers(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let all = state.list_cost_centers(query.search.as_deref());
    Json(query.paginate(all))
}

/// POST /costcenters
pub async fn create_cost_center(
    State(state): State<SharedState>,
    Json(cost_center): Json<CostCenter>,
) -> impl IntoResponse {
    if cost_center.name.trim().is_empty() {
        return validation_error("required", "costCenter.name", "error.required");
    }

    let mut state = state.write().await;
    let created = state.create_cost_center(cost_center).clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

/// DELETE /costcenters/:id
pub async fn delete_cost_center(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if state.remove_cost_center(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("cost center", id)
    }
}
