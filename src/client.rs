//! 99 API client.
//!
//! Low-level dispatcher that turns a method, path and body into one HTTP
//! exchange and a typed result. Resource operations live on the services in
//! [`crate::models`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

use crate::context::Context;
use crate::error::{ApiError, Result, Taxis99Error};
use crate::models::{CompanyService, CostCenterService, EmployeeService, UserService};
use crate::transport::{AuthTransport, HttpResponse, HttpTransport, RoundTrip, DEFAULT_TIMEOUT};

const DEFAULT_API_URL: &str = "https://api.corp.99taxis.com/v2/";

/// 99 API client.
///
/// Every request goes through an [`AuthTransport`], so the API key and
/// company id configured here are sent with each call.
///
/// This struct is cheaply cloneable; clones share the transport chain and
/// its connection pool.
///
/// # Example
///
/// ```no_run
/// use taxis99::{Client, Context};
///
/// # async fn example() -> taxis99::Result<()> {
/// // Create from environment variables
/// let client = Client::from_env()?;
///
/// // Or configure manually
/// let client = Client::new("your-api-key", Some("your-company-id"))?;
///
/// let companies = client.companies().find(&Context::new()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn RoundTrip>,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client from environment variables.
    ///
    /// Uses `TAXIS99_API_KEY` for authentication, and optionally
    /// `TAXIS99_COMPANY_ID` and `TAXIS99_API_URL` (defaults to
    /// `https://api.corp.99taxis.com/v2/`).
    ///
    /// # Errors
    ///
    /// Returns an error if `TAXIS99_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TAXIS99_API_KEY").map_err(|_| {
            Taxis99Error::ConfigMissing("TAXIS99_API_KEY environment variable not set".to_string())
        })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(company_id) = env::var("TAXIS99_COMPANY_ID") {
            builder = builder.company_id(company_id);
        }
        if let Ok(base_url) = env::var("TAXIS99_API_URL") {
            builder = builder.base_url(base_url);
        }

        builder.build()
    }

    /// Create a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is not a valid header value.
    pub fn new(api_key: &str, company_id: Option<&str>) -> Result<Self> {
        let mut builder = Self::builder().api_key(api_key);
        if let Some(company_id) = company_id {
            builder = builder.company_id(company_id);
        }
        builder.build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Company operations.
    pub fn companies(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    /// Cost center operations.
    pub fn cost_centers(&self) -> CostCenterService<'_> {
        CostCenterService::new(self)
    }

    /// Employee operations.
    pub fn employees(&self) -> EmployeeService<'_> {
        EmployeeService::new(self)
    }

    /// User operations.
    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    /// Resolve `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be parsed or resolves outside of
    /// the base URL (another host, or a parent directory).
    pub fn resolve(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path)?;

        if url.origin() != self.base_url.origin() || !url.path().starts_with(self.base_url.path())
        {
            return Err(Taxis99Error::PathEscapesBase {
                path: path.to_string(),
            });
        }

        Ok(url)
    }

    /// Send one request and decode the response.
    ///
    /// `path` is resolved against the base URL. `body`, when present, is
    /// sent as JSON. The response is classified as follows:
    ///
    /// - `422` becomes a validation [`ApiError`];
    /// - any other non-success status becomes an [`ApiError`] with the
    ///   message found in the body;
    /// - an empty body is a success without output (`Ok(None)`);
    /// - a body that does not decode into `T` becomes an [`ApiError`] whose
    ///   source is the decode error.
    ///
    /// Network failures, cancellation and deadlines are returned as
    /// transport errors, never as [`ApiError`]. No retry is attempted.
    #[tracing::instrument(skip(self, ctx, path, body), fields(path = strip_query(path)))]
    pub async fn request<B, T>(
        &self,
        ctx: &Context,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.resolve(path)?;

        let mut buf = Vec::new();
        if let Some(body) = body {
            serde_json::to_writer(&mut buf, body).map_err(Taxis99Error::EncodeError)?;
        }

        let mut builder = http::Request::builder().method(method).uri(url.as_str());
        if !buf.is_empty() {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let mut request = builder.body(Bytes::from(buf))?;
        if let Some(company_id) = ctx.company_id() {
            request.extensions_mut().insert(company_id.clone());
        }

        let response = ctx.run(self.transport.round_trip(&request)).await?;

        decode_response(response)
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, ctx: &Context, path: &str) -> Result<Option<T>> {
        self.request::<(), T>(ctx, Method::GET, path, None).await
    }

    /// Make a POST request with JSON body.
    pub async fn post<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ctx, Method::POST, path, Some(body)).await
    }

    /// Make a PUT request with JSON body.
    pub async fn put<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ctx, Method::PUT, path, Some(body)).await
    }

    /// Make a PATCH request with JSON body.
    pub async fn patch<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(ctx, Method::PATCH, path, Some(body)).await
    }

    /// Make a DELETE request. Any response body is validated and discarded.
    pub async fn delete(&self, ctx: &Context, path: &str) -> Result<()> {
        self.request::<(), IgnoredAny>(ctx, Method::DELETE, path, None)
            .await
            .map(drop)
    }
}

/// Classify a response and decode its body.
fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>> {
    let status = response.status();
    let body = response.into_body();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        tracing::debug!(%status, "Validation error response");
        return Err(ApiError::validation(status.as_u16(), &body).into());
    }

    if !status.is_success() {
        tracing::debug!(%status, "Unsuccessful response");
        return Err(ApiError::from_status(status, &body).into());
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    // `null` means no payload, same as an empty body.
    serde_json::from_slice::<Option<T>>(&body)
        .map_err(|err| ApiError::decode(status.as_u16(), err).into())
}

/// The path without its query string. Queries can carry personal data
/// (`nationalId`, search terms) and stay out of spans.
fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}

/// Builder for [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    company_id: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn RoundTrip>>,
}

impl ClientBuilder {
    /// API key sent in `x-api-key`. Required.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Company id sent in `x-company-id` unless a call overrides it.
    #[must_use]
    pub fn company_id(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// API root. A trailing `/` is added when missing.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Timeout of the default HTTP transport. Ignored when a custom
    /// transport is set.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Next link in the transport chain, after authentication.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn RoundTrip>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key was set, the base URL is invalid, a
    /// credential is not a valid header value, or the HTTP client cannot be
    /// built.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .ok_or_else(|| Taxis99Error::ConfigMissing("API key not set".to_string()))?;

        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_API_URL);
        // Ensure base URL ends with /
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };

        let base = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::with_timeout(
                self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            )?),
        };
        let transport = AuthTransport::with_base(&api_key, self.company_id.as_deref(), base)?;

        Ok(Client {
            transport: Arc::new(transport),
            base_url: Arc::new(base_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Client {
        Client::builder()
            .api_key("test-key")
            .base_url(base_url)
            .build()
            .unwrap()
    }

    fn response(status: u16, body: &'static str) -> HttpResponse {
        let mut res = http::Response::new(Bytes::from_static(body.as_bytes()));
        *res.status_mut() = StatusCode::from_u16(status).unwrap();
        res
    }

    #[test]
    fn test_client_debug() {
        let client = Client::new("test-token", Some("company")).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("Client"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_default_base_url() {
        let client = Client::new("token", None).unwrap();
        assert_eq!(client.base_url().as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = client("https://api.corp.99taxis.com/v2");
        let client2 = client("https://api.corp.99taxis.com/v2/");
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_missing_api_key() {
        let err = Client::builder().build().unwrap_err();
        assert!(matches!(err, Taxis99Error::ConfigMissing(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Client::builder()
            .api_key("key")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Taxis99Error::UrlError(_)));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let c = client("https://api.corp.99taxis.com/v2/");

        assert_eq!(
            c.resolve("employees").unwrap().as_str(),
            "https://api.corp.99taxis.com/v2/employees"
        );
        assert_eq!(
            c.resolve("costcenters?limit=10&search=a").unwrap().as_str(),
            "https://api.corp.99taxis.com/v2/costcenters?limit=10&search=a"
        );
        assert_eq!(c.resolve("").unwrap().as_str(), "https://api.corp.99taxis.com/v2/");
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let c = client("https://api.corp.99taxis.com/v2/");

        for path in [
            "https://evil.example.com/v2/employees",
            "//evil.example.com/v2/employees",
            "/v1/employees",
            "../employees",
            "http://api.corp.99taxis.com/v2/employees",
        ] {
            let err = c.resolve(path).unwrap_err();
            assert!(
                matches!(err, Taxis99Error::PathEscapesBase { .. }),
                "{path} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_resolve_parse_error() {
        let c = client("https://api.corp.99taxis.com/v2/");
        let err = c.resolve("https://[invalid").unwrap_err();
        assert!(matches!(err, Taxis99Error::UrlError(_)));
    }

    #[test]
    fn test_decode_success() {
        let got: Option<Vec<u32>> = decode_response(response(200, "[1,2]")).unwrap();
        assert_eq!(got, Some(vec![1, 2]));
    }

    #[test]
    fn test_decode_empty_body() {
        let got: Option<Vec<u32>> = decode_response(response(200, "")).unwrap();
        assert_eq!(got, None);

        let got: Option<Vec<u32>> = decode_response(response(204, "\n")).unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn test_decode_null_body() {
        let got: Option<Vec<u32>> = decode_response(response(200, "null")).unwrap();
        assert_eq!(got, None);

        let got: Option<IgnoredAny> = decode_response(response(200, " null\n")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("employees"), "employees");
        assert_eq!(
            strip_query("employees?nationalId=98765432100&search=santos"),
            "employees"
        );
        assert_eq!(strip_query("employees/125/costcenter?"), "employees/125/costcenter");
    }

    #[test]
    fn test_decode_invalid_body() {
        let err = decode_response::<Vec<u32>>(response(200, "nvalidJSON")).unwrap_err();
        let api = err.as_api_error().expect("should be an API error");
        assert_eq!(api.status_code, 200);
        assert!(api.source.is_some());
    }

    #[test]
    fn test_decode_validation_error() {
        let body = r#"{"errors":[{"field":"employee.phone","message":"error.invalidPhoneNumber"}]}"#;
        let err = decode_response::<IgnoredAny>(response(422, body)).unwrap_err();
        let api = err.as_api_error().expect("should be an API error");

        assert_eq!(api.status_code, 422);
        assert_eq!(api.errors[0].field.as_deref(), Some("employee.phone"));
        assert!(api.source.is_none());
    }

    #[test]
    fn test_decode_error_status() {
        let err = decode_response::<IgnoredAny>(response(404, "")).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }
}
