//! Mock 99 API server.
//!
//! Provides an axum-based HTTP server that simulates the 99 API.

use std::net::SocketAddr;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers::{self, SharedState};
use super::state::MockState;
use crate::transport::{HEADER_API_KEY, HEADER_COMPANY_ID};

/// A running mock 99 API, bound to a random local port.
///
/// Dropping the value leaves the server running until the runtime shuts
/// down; call [`MockServer::shutdown`] to stop it early.
pub struct MockServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
    state: SharedState,
}

impl MockServer {
    /// Serve the default scenario from [`Fixtures::default_scenario`].
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario().into()).await
    }

    /// Serve no data at all.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve `state`.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let listener = TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("bind mock server port");
        let addr = listener.local_addr().expect("mock server address");

        let app = Self::create_router(state.clone());
        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(%err, "mock server stopped");
            }
        });

        Self { addr, task, state }
    }

    /// Base URL to hand to [`crate::ClientBuilder::base_url`].
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// The data behind the server. Changes are visible to the next request.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Stop serving and wait for the task to finish.
    pub async fn shutdown(self) {
        self.task.abort();
        // A cancelled join error is the expected outcome.
        let _ = self.task.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: SharedState) -> Router {
        Router::new()
            // Company routes
            .route("/companies", get(handlers::list_companies))
            // Cost center routes
            .route(
                "/costcenters",
                get(handlers::list_cost_centers).post(handlers::create_cost_center),
            )
            .route(
                "/costcenters/:id",
                axum::routing::delete(handlers::delete_cost_center),
            )
            // Employee routes
            .route(
                "/employees",
                get(handlers::list_employees).post(handlers::create_employee),
            )
            .route(
                "/employees/:id",
                axum::routing::put(handlers::update_employee).delete(handlers::delete_employee),
            )
            .route(
                "/employees/external-id/:id",
                get(handlers::list_employees_by_external_id),
            )
            .route(
                "/employees/:id/costcenter",
                get(handlers::list_employee_cost_centers)
                    .patch(handlers::update_employee_cost_centers),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured API key and remember the company
/// id the request was scoped to.
async fn authenticate(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let (api_key, company_id) = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        (header(HEADER_API_KEY), header(HEADER_COMPANY_ID))
    };

    {
        let mut state = state.write().await;
        if let Some(required) = &state.required_api_key {
            if api_key.as_deref() != Some(required.as_str()) {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "message": "Unauthorized" })),
                )
                    .into_response();
            }
        }
        state.last_company_id = company_id;
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
