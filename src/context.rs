//! Per-call context: tenant override, cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{Result, Taxis99Error};

/// Tenant (company) identifier sent in the `x-company-id` header.
///
/// Attached to a [`Context`] it overrides the company id the client was
/// configured with, for that call only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompanyId(pub String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Values scoped to a single API call.
///
/// The default context has no tenant override, cannot be cancelled and
/// relies on the client-wide timeout only.
///
/// ```
/// use std::time::Duration;
/// use taxis99::Context;
///
/// let ctx = Context::new()
///     .with_company_id("47a3083b-5d03-4e05-ad9d-9fd6fddd613e")
///     .with_timeout(Duration::from_secs(5));
/// assert!(ctx.company_id().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    company_id: Option<CompanyId>,
    cancel: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send this call on behalf of another company.
    #[must_use]
    pub fn with_company_id(mut self, id: impl Into<String>) -> Self {
        self.company_id = Some(CompanyId::new(id));
        self
    }

    /// Abort the call when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abort the call when it has not completed within `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Drive `fut` until it completes, the token is cancelled or the
    /// deadline elapses, whichever comes first. Dropping `fut` aborts the
    /// in-flight exchange.
    pub(crate) async fn run<F, T>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let cancelled = async {
            match &self.cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };

        let exchange = async {
            match self.timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result,
                    Err(_) => Err(Taxis99Error::TimedOut(limit)),
                },
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            () = cancelled => Err(Taxis99Error::Cancelled),
            result = exchange => result,
        }
    }
}
