//! HTTP request handlers for the mock server.

pub mod companies;
pub mod cost_centers;
pub mod employees;

pub use companies::*;
pub use cost_centers::*;
pub use employees::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// State handed to every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Query parameters accepted by list endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub page: Option<usize>,
    pub national_id: Option<String>,
}

impl ListQuery {
    /// Apply `limit` and 1-indexed `page` to `items`.
    pub fn paginate<T: Clone>(&self, items: Vec<&T>) -> Vec<T> {
        let limit = self.limit.unwrap_or(usize::MAX);
        let page = self.page.unwrap_or(1).max(1);
        let start = (page - 1).saturating_mul(limit);

        items
            .into_iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect()
    }
}

pub(crate) fn not_found(entity: &str, id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": format!("{entity} not found"),
            "message": format!("No {entity} found with id: {id}")
        })),
    )
        .into_response()
}

pub(crate) fn validation_error(code: &str, field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "errors": [{ "code": code, "field": field, "message": message }]
        })),
    )
        .into_response()
}
