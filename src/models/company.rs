//! Company model and service.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::context::Context;
use crate::endpoint::Endpoint;
use crate::error::Result;

pub(crate) const COMPANIES: Endpoint = Endpoint::new("companies");

/// A company the API key has access to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company id (UUID).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Company name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Company operations. Obtained from [`Client::companies`].
#[derive(Debug, Clone, Copy)]
pub struct CompanyService<'a> {
    client: &'a Client,
}

impl<'a> CompanyService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List the companies visible to the API key.
    #[tracing::instrument(skip_all)]
    pub async fn find(&self, ctx: &Context) -> Result<Vec<Company>> {
        let companies: Option<Vec<Company>> = self.client.get(ctx, &COMPANIES.path()).await?;
        Ok(companies.unwrap_or_default())
    }
}
