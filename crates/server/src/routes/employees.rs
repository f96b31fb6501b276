use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use common::types::Message;
use models::employee;
use service::employee::{EmployeePage, ListQuery};
use service::errors::{EMPLOYEE_NOT_FOUND, WORK_LOG_NOT_FOUND};

use crate::{errors::JsonApiError, state::ServerState};

/// Raw listing parameters. Values are kept as strings so malformed input
/// falls back to defaults instead of failing extraction.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number, default 1
    pub page: Option<String>,
    /// Case-sensitive substring of the name
    pub query: Option<String>,
    /// `asc` or `desc` by salary; anything else keeps insertion order
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
}

/// Path ids that are not integers cannot name a row.
fn parse_id(raw: &str, not_found: &str) -> Result<i32, JsonApiError> {
    raw.parse::<i32>().map_err(|_| JsonApiError::not_found(not_found))
}

#[utoipa::path(
    get, path = "/employee", tag = "employee",
    params(ListParams),
    responses(
        (status = 200, description = "One page of employees", body = crate::openapi::EmployeePageDoc),
        (status = 500, description = "Database failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<EmployeePage>, JsonApiError> {
    let q = ListQuery::from_raw(
        params.page.as_deref(),
        params.query.as_deref(),
        params.order_by.as_deref(),
    );
    let page = state.employees.list(&q).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get, path = "/employee/{id}", tag = "employee",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Employee not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<employee::Model>, JsonApiError> {
    let id = parse_id(&id, EMPLOYEE_NOT_FOUND)?;
    Ok(Json(state.employees.get(id).await?))
}

#[utoipa::path(
    post, path = "/employee", tag = "employee",
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<employee::Model>), JsonApiError> {
    let created = state.employees.create(&input).await?;
    info!(id = created.id, name = %created.name, "employee_create");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/employee/{id}", tag = "employee",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Work log not found", body = crate::openapi::MessageDoc),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<employee::Model>, JsonApiError> {
    let id = parse_id(&id, WORK_LOG_NOT_FOUND)?;
    Ok(Json(state.employees.update(id, &input).await?))
}

#[utoipa::path(
    delete, path = "/employee/{id}", tag = "employee",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Work log not found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, JsonApiError> {
    let id = parse_id(&id, WORK_LOG_NOT_FOUND)?;
    state.employees.delete(id).await?;
    Ok(Json(Message::new("Work log deleted")))
}
