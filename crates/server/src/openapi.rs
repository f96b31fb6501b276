use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct EmployeeDoc {
    pub id: i32,
    pub name: String,
    pub days_worked: i32,
    pub hour_cost: f64,
    pub hours_worked: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct EmployeePageDoc {
    pub employees: Vec<EmployeeDoc>,
    pub current_page: u64,
    pub total_employees: u64,
    pub total_pages: u64,
}

/// Create requires every field; update requires `hours_worked` only.
#[derive(ToSchema)]
pub struct EmployeeInputDoc {
    pub name: Option<String>,
    pub days_worked: Option<i32>,
    pub hour_cost: Option<f64>,
    pub hours_worked: Option<f64>,
}

#[derive(ToSchema)]
pub struct ValidationErrorDoc {
    pub message: String,
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub message: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::employees::list,
        crate::routes::employees::get,
        crate::routes::employees::create,
        crate::routes::employees::update,
        crate::routes::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            EmployeeDoc,
            EmployeePageDoc,
            EmployeeInputDoc,
            ValidationErrorDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "employee")
    )
)]
pub struct ApiDoc;
