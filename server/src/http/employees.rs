//! REST endpoints for employee records under `/api/employees`.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use platform_api::{ApiError, ApiResult};
use products_hr::{Employee, StoreError};
use serde::Deserialize;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/employees", get(list_employees).post(create_employee))
        .route(
            "/api/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

/// Body accepted by create and update. Any `id` in the payload is ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl EmployeeRequest {
    fn into_employee(self) -> Employee {
        Employee::new(self.first_name, self.last_name, self.email)
    }

    fn apply_to(self, employee: &mut Employee) {
        employee.first_name = self.first_name;
        employee.last_name = self.last_name;
        employee.email = self.email;
    }
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Employee>)> {
    let Json(request) = payload.map_err(json_rejection)?;
    let saved = state
        .employees
        .save_employee(request.into_employee())
        .await
        .map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<Vec<Employee>>> {
    let all = state
        .employees
        .get_all_employees()
        .await
        .map_err(store_error)?;
    Ok(Json(all))
}

async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(id) = id.map_err(path_rejection)?;
    let found = state
        .employees
        .get_employee_by_id(id)
        .await
        .map_err(store_error)?;
    Ok(match found {
        Some(employee) => Json(employee).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Path(id) = id.map_err(path_rejection)?;
    let Json(request) = payload.map_err(json_rejection)?;
    let Some(mut existing) = state
        .employees
        .get_employee_by_id(id)
        .await
        .map_err(store_error)?
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };
    request.apply_to(&mut existing);
    let updated = state
        .employees
        .update_employee(existing)
        .await
        .map_err(store_error)?;
    Ok(Json(updated).into_response())
}

async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id.map_err(path_rejection)?;
    state
        .employees
        .delete_employee(id)
        .await
        .map_err(store_error)?;
    Ok(StatusCode::OK)
}

/// Every handler funnels store failures through here.
fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(_) => ApiError::not_found(err.to_string()),
        StoreError::Database(_) => ApiError::internal(err),
    }
}

/// Malformed or incomplete JSON is a 400; body-level refusals such as an
/// oversized payload or a wrong content type keep axum's status.
fn json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            ApiError::bad_request(rejection.body_text())
        }
        other => ApiError::rejected(other.status(), other.body_text()),
    }
}

fn path_rejection(rejection: PathRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}
