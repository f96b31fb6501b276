//! Employee work logs: storage, listing and CRUD rules.

pub mod query;
pub mod repository;
pub mod service;

pub use query::{EmployeePage, ListQuery, SalaryOrder};
pub use repository::{EmployeeRepository, SeaOrmEmployeeRepository};
pub use service::EmployeeService;
