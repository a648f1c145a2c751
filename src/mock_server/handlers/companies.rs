//! Company endpoint handlers.

use axum::{extract::State, response::IntoResponse, Json};

use super::SharedState;

/// GET /companies
pub async fn list_companies(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(state.companies.clone())
}
