//! Cost center model and service.

use serde::{Deserialize, Serialize};

use super::{is_false, is_zero, Company};
use crate::client::Client;
use crate::context::Context;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::filter::{resolve_filter, Filter};

pub(crate) const COST_CENTERS: Endpoint = Endpoint::new("costcenters");
pub(crate) const COST_CENTER: Endpoint = Endpoint::new("costcenters/{}");

/// Filter keys accepted by the cost center list endpoint.
pub const COST_CENTER_FIELDS: &[&str] = &["search", "limit", "page"];

/// A cost center rides can be billed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Owning company. Returned by the API, not needed on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
}

/// Cost center operations. Obtained from [`Client::cost_centers`].
#[derive(Debug, Clone, Copy)]
pub struct CostCenterService<'a> {
    client: &'a Client,
}

impl<'a> CostCenterService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List cost centers. Only `search`, `limit` and `page` are sent from
    /// the filter.
    #[tracing::instrument(skip(self, ctx, filter))]
    pub async fn find(&self, ctx: &Context, filter: Option<&Filter>) -> Result<Vec<CostCenter>> {
        let query = resolve_filter(filter, COST_CENTER_FIELDS);
        let cost_centers: Option<Vec<CostCenter>> =
            self.client.get(ctx, &COST_CENTERS.query(&query)).await?;
        Ok(cost_centers.unwrap_or_default())
    }

    /// Create a cost center and return it as stored by the API.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn create(&self, ctx: &Context, cost_center: &CostCenter) -> Result<CostCenter> {
        let created: Option<CostCenter> = self
            .client
            .post(ctx, &COST_CENTERS.path(), cost_center)
            .await?;
        Ok(created.unwrap_or_default())
    }

    /// Delete a cost center.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn remove(&self, ctx: &Context, id: i64) -> Result<()> {
        self.client.delete(ctx, &COST_CENTER.format(&[&id])).await
    }
}
