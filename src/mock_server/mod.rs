//! Mock 99 API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the 99 API
//! for integration and end-to-end testing. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use taxis99::mock_server::MockServer;
//! use taxis99::{Client, Context};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = Client::builder()
//!         .api_key("test-key")
//!         .base_url(server.url())
//!         .build()
//!         .unwrap();
//!
//!     // Server comes with default fixtures
//!     let companies = client.companies().find(&Context::new()).await.unwrap();
//!     assert!(!companies.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
