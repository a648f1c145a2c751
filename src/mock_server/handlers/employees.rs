//! Employee endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{not_found, validation_error, ListQuery, SharedState};
use crate::Employee;

/// Body of employee create and update requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBody {
    pub employee: Employee,
    #[serde(default)]
    pub send_welcome_email: bool,
}

/// Body of `PATCH /employees/:id/costcenter`.
#[derive(Debug, Deserialize)]
pub struct CostCenterIdsBody {
    #[serde(rename = "costCenterIDs")]
    pub cost_center_ids: Vec<i64>,
}

/// Brazilian numbers: area code plus 8 or 9 digits.
fn is_valid_phone_number(number: &str) -> bool {
    (10..=11).contains(&number.len()) && number.bytes().all(|b| b.is_ascii_digit())
}

fn validate(employee: &Employee) -> Option<axum::response::Response> {
    if employee.name.trim().is_empty() {
        return Some(validation_error("required", "employee.name", "error.required"));
    }
    match &employee.phone {
        Some(phone) if is_valid_phone_number(&phone.number) => None,
        _ => Some(validation_error(
            "invalid",
            "employee.phone",
            "error.invalidPhoneNumber",
        )),
    }
}

/// GET /employees
pub async fn list_employees(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let state = state.read().await;
    let all = state.list_employees(query.search.as_deref(), query.national_id.as_deref());
    Json(query.paginate(all))
}

/// GET /employees/external-id/:id
pub async fn list_employees_by_external_id(
    State(state): State<SharedState>,
    Path(external_id): Path<i64>,
) -> impl IntoResponse {
    let state = state.read().await;
    let employees: Vec<Employee> = state
        .employees_by_external_id(external_id)
        .into_iter()
        .cloned()
        .collect();
    Json(employees)
}

/// POST /employees
pub async fn create_employee(
    State(state): State<SharedState>,
    Json(body): Json<EmployeeBody>,
) -> impl IntoResponse {
    if let Some(rejection) = validate(&body.employee) {
        return rejection;
    }

    let mut state = state.write().await;
    let created = state.create_employee(body.employee).clone();
    (StatusCode::CREATED, Json(created)).into_response()
}

/// PUT /employees/:id
pub async fn update_employee(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<EmployeeBody>,
) -> impl IntoResponse {
    if let Some(rejection) = validate(&body.employee) {
        return rejection;
    }

    let mut state = state.write().await;
    match state.update_employee(id, body.employee) {
        Some(employee) => (StatusCode::OK, Json(employee.clone())).into_response(),
        None => not_found("employee", id),
    }
}

/// DELETE /employees/:id
pub async fn delete_employee(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if state.remove_employee(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("employee", id)
    }
}

/// GET /employees/:id/costcenter
pub async fn list_employee_cost_centers(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let state = state.read().await;
    if state.get_employee(id).is_none() {
        return not_found("employee", id);
    }

    let cost_centers: Vec<_> = state
        .employee_cost_centers(id)
        .into_iter()
        .cloned()
        .collect();
    Json(cost_centers).into_response()
}

/// PATCH /employees/:id/costcenter
pub async fn update_employee_cost_centers(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<CostCenterIdsBody>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    if state.get_employee(id).is_none() {
        return not_found("employee", id);
    }

    let assigned = state.set_employee_cost_centers(id, &body.cost_center_ids);
    Json(assigned).into_response()
}
