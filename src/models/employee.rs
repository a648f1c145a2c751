//! Employee model and service.

use serde::{Deserialize, Serialize};

use super::{is_false, is_zero, Company, CostCenter};
use crate::client::Client;
use crate::context::Context;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::filter::{resolve_filter, Filter};

pub(crate) const EMPLOYEES: Endpoint = Endpoint::new("employees");
pub(crate) const EMPLOYEE: Endpoint = Endpoint::new("employees/{}");
pub(crate) const EMPLOYEE_BY_EXTERNAL_ID: Endpoint = Endpoint::new("employees/external-id/{}");
pub(crate) const EMPLOYEE_COST_CENTERS: Endpoint = Endpoint::new("employees/{}/costcenter");

/// Filter keys accepted by the employee list endpoint.
pub const EMPLOYEE_FIELDS: &[&str] = &["search", "limit", "page", "nationalId"];

/// A phone number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub number: String,

    /// ISO 3166-1 alpha-3 country code, e.g. `BRA`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

/// An employee allowed to request rides on the company account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,

    /// CPF, digits only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub national_id: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub supervisor_id: i64,

    #[serde(default, skip_serializing_if = "is_false")]
    pub enabled: bool,

    /// Id of the employee in the customer's own systems. Always sent.
    #[serde(default)]
    pub external_id: i64,

    /// Ride categories the employee may use, e.g. `regular-taxi`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

/// Body of employee create and update requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeRequest<'a> {
    employee: &'a Employee,
    send_welcome_email: bool,
}

#[derive(Debug, Serialize)]
struct CostCenterIds<'a> {
    #[serde(rename = "costCenterIDs")]
    cost_center_ids: &'a [i64],
}

/// Employee operations. Obtained from [`Client::employees`].
#[derive(Debug, Clone, Copy)]
pub struct EmployeeService<'a> {
    client: &'a Client,
}

impl<'a> EmployeeService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List employees. Only `search`, `limit`, `page` and `nationalId` are
    /// sent from the filter.
    #[tracing::instrument(skip(self, ctx, filter))]
    pub async fn find(&self, ctx: &Context, filter: Option<&Filter>) -> Result<Vec<Employee>> {
        let query = resolve_filter(filter, EMPLOYEE_FIELDS);
        let employees: Option<Vec<Employee>> =
            self.client.get(ctx, &EMPLOYEES.query(&query)).await?;
        Ok(employees.unwrap_or_default())
    }

    /// Find the employees registered with the given external id.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn find_by_external_id(
        &self,
        ctx: &Context,
        external_id: i64,
    ) -> Result<Vec<Employee>> {
        let path = EMPLOYEE_BY_EXTERNAL_ID.format(&[&external_id]);
        let employees: Option<Vec<Employee>> = self.client.get(ctx, &path).await?;
        Ok(employees.unwrap_or_default())
    }

    /// Register an employee, optionally sending the welcome email.
    #[tracing::instrument(skip(self, ctx, employee), fields(external_id = employee.external_id))]
    pub async fn create(
        &self,
        ctx: &Context,
        employee: &Employee,
        send_welcome_email: bool,
    ) -> Result<Employee> {
        let body = EmployeeRequest {
            employee,
            send_welcome_email,
        };
        let created: Option<Employee> = self.client.post(ctx, &EMPLOYEES.path(), &body).await?;
        Ok(created.unwrap_or_default())
    }

    /// Replace the employee identified by `employee.id`.
    #[tracing::instrument(skip(self, ctx, employee), fields(id = employee.id))]
    pub async fn update(&self, ctx: &Context, employee: &Employee) -> Result<Employee> {
        let body = EmployeeRequest {
            employee,
            send_welcome_email: false,
        };
        let path = EMPLOYEE.format(&[&employee.id]);
        let updated: Option<Employee> = self.client.put(ctx, &path, &body).await?;
        Ok(updated.unwrap_or_default())
    }

    /// Delete an employee.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn remove(&self, ctx: &Context, id: i64) -> Result<()> {
        self.client.delete(ctx, &EMPLOYEE.format(&[&id])).await
    }

    /// Cost centers the employee can bill rides to.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn find_cost_centers(
        &self,
        ctx: &Context,
        employee_id: i64,
    ) -> Result<Vec<CostCenter>> {
        let path = EMPLOYEE_COST_CENTERS.format(&[&employee_id]);
        let cost_centers: Option<Vec<CostCenter>> = self.client.get(ctx, &path).await?;
        Ok(cost_centers.unwrap_or_default())
    }

    /// Replace the employee's cost centers. Returns the ids now assigned.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn update_cost_centers(
        &self,
        ctx: &Context,
        employee_id: i64,
        cost_center_ids: &[i64],
    ) -> Result<Vec<i64>> {
        let path = EMPLOYEE_COST_CENTERS.format(&[&employee_id]);
        let body = CostCenterIds { cost_center_ids };
        let ids: Option<Vec<i64>> = self.client.patch(ctx, &path, &body).await?;
        Ok(ids.unwrap_or_default())
    }
}
