//! Transport chain.
//!
//! A request travels through a chain of [`RoundTrip`] implementations before
//! it reaches the wire. [`AuthTransport`] injects the 99 credentials and
//! hands the request to the next link, which defaults to [`HttpTransport`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::HeaderValue;
use url::Url;

use crate::context::CompanyId;
use crate::error::{Result, Taxis99Error};

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "x-api-key";
/// Header scoping the request to one company.
pub const HEADER_COMPANY_ID: &str = "x-company-id";

pub(crate) const USER_AGENT: &str = concat!("taxis99/", env!("CARGO_PKG_VERSION"));
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Request passed along the transport chain. The body is fully buffered.
pub type HttpRequest = http::Request<Bytes>;
/// Response returned by the transport chain. The body is fully buffered.
pub type HttpResponse = http::Response<Bytes>;

/// One link of the transport chain.
///
/// Implementations receive the request by shared reference and must leave
/// it as they found it. A link that needs to change the request works on a
/// copy (see [`AuthTransport`]).
#[async_trait]
pub trait RoundTrip: Send + Sync {
    /// Execute a single HTTP exchange.
    async fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// Transport that puts requests on the wire with `reqwest`.
///
/// The response body is read to the end before returning, so the connection
/// goes back to the pool on every path.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(Taxis99Error::HttpError)?;

        Ok(Self { http })
    }

    /// Wrap an existing `reqwest` client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoundTrip for HttpTransport {
    async fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = Url::parse(&request.uri().to_string())?;

        let mut outgoing = reqwest::Request::new(request.method().clone(), url);
        *outgoing.headers_mut() = request.headers().clone();
        if !request.body().is_empty() {
            *outgoing.body_mut() = Some(request.body().clone().into());
        }

        let response = self.http.execute(outgoing).await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        tracing::debug!(%status, bytes = body.len(), "Received response");

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.version_mut() = version;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

/// Transport that injects the 99 authentication headers into every request.
///
/// The caller's request is never modified: the headers are set on a copy
/// that shares method, URI and body with the original but owns its header
/// map.
///
/// If the request carries a [`CompanyId`] extension, that id replaces the
/// configured one for the request. Extensions of any other type are ignored.
#[derive(Clone)]
pub struct AuthTransport {
    api_key: HeaderValue,
    company_id: Option<HeaderValue>,
    base: Arc<dyn RoundTrip>,
}

impl std::fmt::Debug for AuthTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTransport")
            .field("company_id", &self.company_id)
            .finish_non_exhaustive()
    }
}

impl AuthTransport {
    /// Create a transport that sends through a default [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn new(api_key: &str, company_id: Option<&str>) -> Result<Self> {
        Self::with_base(api_key, company_id, Arc::new(HttpTransport::new()?))
    }

    /// Create a transport that delegates to `base`.
    ///
    /// An empty `company_id` is the same as none.
    pub fn with_base(
        api_key: &str,
        company_id: Option<&str>,
        base: Arc<dyn RoundTrip>,
    ) -> Result<Self> {
        let mut api_key = header_value(HEADER_API_KEY, api_key)?;
        api_key.set_sensitive(true);

        let company_id = company_id
            .filter(|id| !id.is_empty())
            .map(|id| header_value(HEADER_COMPANY_ID, id))
            .transpose()?;

        Ok(Self {
            api_key,
            company_id,
            base,
        })
    }
}

#[async_trait]
impl RoundTrip for AuthTransport {
    async fn round_trip(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut req = clone_request(request);

        let headers = req.headers_mut();
        headers.insert(HEADER_API_KEY, self.api_key.clone());
        if let Some(company_id) = &self.company_id {
            headers.insert(HEADER_COMPANY_ID, company_id.clone());
        }

        if let Some(CompanyId(id)) = request.extensions().get::<CompanyId>() {
            if !id.is_empty() {
                match HeaderValue::from_str(id) {
                    Ok(value) => {
                        headers.insert(HEADER_COMPANY_ID, value);
                    }
                    Err(_) => {
                        tracing::warn!(company_id = %id, "Ignoring company id override that is not a valid header value");
                    }
                }
            }
        }

        self.base.round_trip(&req).await
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| Taxis99Error::InvalidHeader { name })
}

/// Copy `r` with an independently owned header map and extensions. The body
/// buffer is shared.
fn clone_request(r: &HttpRequest) -> HttpRequest {
    let mut req = http::Request::new(r.body().clone());
    *req.method_mut() = r.method().clone();
    *req.uri_mut() = r.uri().clone();
    *req.version_mut() = r.version();
    *req.headers_mut() = r.headers().clone();
    *req.extensions_mut() = r.extensions().clone();
    req
}
