use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, instrument};

use models::employee;

use crate::employee::query::{EmployeePage, ListQuery};
use crate::employee::repository::EmployeeRepository;
use crate::errors::{ServiceError, EMPLOYEE_NOT_FOUND, WORK_LOG_NOT_FOUND};

/// Application service encapsulating the work-log rules: listing math,
/// validation and not-found policy.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository> Clone for EmployeeService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Filter by name, optionally sort by salary, and cut one page.
    /// A page past the end yields no rows rather than an error.
    #[instrument(skip(self), fields(page = q.pagination.page, order = q.order.as_str()))]
    pub async fn list(&self, q: &ListQuery) -> Result<EmployeePage, ServiceError> {
        let total_employees = self.repo.count_by_name_substring(&q.query).await?;
        let total_pages = q.pagination.total_pages(total_employees);
        let offset = q.pagination.offset();
        let employees = if offset >= total_employees {
            Vec::new()
        } else {
            self.repo
                .find_by_name_substring(&q.query, q.order, offset, q.pagination.per_page)
                .await?
        };
        info!(count = employees.len(), total_employees, total_pages, "list employees");
        Ok(EmployeePage { employees, current_page: q.pagination.page, total_employees, total_pages })
    }

    pub async fn get(&self, id: i32) -> Result<employee::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EMPLOYEE_NOT_FOUND))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &Map<String, Value>) -> Result<employee::Model, ServiceError> {
        let new = employee::validate_create(input)?;
        let created = self.repo.insert(&new).await?;
        info!(id = created.id, "created employee");
        Ok(created)
    }

    /// The row must exist before the body is validated, so a missing id
    /// reports not-found even for an invalid body.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &Map<String, Value>) -> Result<employee::Model, ServiceError> {
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found(WORK_LOG_NOT_FOUND));
        }
        let changes = employee::validate_update(input)?;
        let updated = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found(WORK_LOG_NOT_FOUND))?;
        info!(id, "updated employee");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(WORK_LOG_NOT_FOUND));
        }
        info!(id, "deleted employee");
        Ok(())
    }
}
