//! 99 corporate API client library.
//!
//! A Rust library for the 99 corporate REST API. A single [`Client`]
//! dispatches requests through an authenticating transport chain; resource
//! services borrowed from the client (companies, cost centers, employees,
//! users) supply the paths and payload types.
//!
//! # Quick Start
//!
//! ```no_run
//! use taxis99::{Client, Context, Filter};
//!
//! #[tokio::main]
//! async fn main() -> taxis99::Result<()> {
//!     // Create client from environment variables
//!     let client = Client::from_env()?;
//!     let ctx = Context::new();
//!
//!     // List the companies the API key can see
//!     let companies = client.companies().find(&ctx).await?;
//!     println!("Found {} companies", companies.len());
//!
//!     // Search employees; unknown filter keys are dropped
//!     let filter = Filter::new().with("search", "santos").with("limit", "10");
//!     let employees = client.employees().find(&ctx, Some(&filter)).await?;
//!     println!("Found {} employees", employees.len());
//!
//!     // Act on behalf of another company for a single call
//!     let ctx = Context::new().with_company_id("47a3083b-5d03-4e05-ad9d-9fd6fddd613e");
//!     let cost_centers = client.cost_centers().find(&ctx, None).await?;
//!     println!("Found {} cost centers", cost_centers.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`Client::request`] - resolve a path, send one request, classify the
//!   response
//! - [`AuthTransport`] - add `x-api-key` / `x-company-id` to a copy of each
//!   request, then hand it to the next [`RoundTrip`]
//! - [`Endpoint`] and [`Filter`] - build paths and allow-listed query strings
//! - [`Taxis99Error`] / [`ApiError`] - transport failures stay distinct from
//!   errors reported by the API
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `TAXIS99_API_KEY` (required) - Your 99 API key
//! - `TAXIS99_COMPANY_ID` (optional) - Company the requests are scoped to
//! - `TAXIS99_API_URL` (optional) - Base URL (defaults to `https://api.corp.99taxis.com/v2/`)

mod client;
mod context;
mod endpoint;
mod error;
mod filter;
mod models;
mod transport;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{Client, ClientBuilder};
pub use context::{CompanyId, Context};
pub use endpoint::{with_query, Endpoint, QueryValues};
pub use error::{ApiError, FieldError, Result, Taxis99Error};
pub use filter::{resolve_filter, Filter};
pub use transport::{
    AuthTransport, HttpRequest, HttpResponse, HttpTransport, RoundTrip, HEADER_API_KEY,
    HEADER_COMPANY_ID,
};

// Re-export models and services
pub use models::{
    // Company types
    Company,
    CompanyService,
    // Cost center types
    CostCenter,
    CostCenterService,
    COST_CENTER_FIELDS,
    // Employee types
    Employee,
    EmployeeService,
    Phone,
    EMPLOYEE_FIELDS,
    // User types
    User,
    UserPhone,
    UserService,
};
