use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::employee::{EmployeeService, SeaOrmEmployeeRepository};

/// Shared handler state; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub employees: EmployeeService<SeaOrmEmployeeRepository>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmEmployeeRepository::new(db));
        Self { employees: EmployeeService::new(repo) }
    }
}
