use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Order, SimpleExpr},
    ConnectionTrait, DatabaseBackend, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use models::employee::{self, EmployeeChanges, NewEmployee};

use crate::employee::query::SalaryOrder;
use crate::errors::ServiceError;

/// Durable storage of employee work logs.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn insert(&self, input: &NewEmployee) -> Result<employee::Model, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<employee::Model>, ServiceError>;
    /// Number of rows whose name contains `text`.
    async fn count_by_name_substring(&self, text: &str) -> Result<u64, ServiceError>;
    /// Rows whose name contains `text`, ordered by `order` then id, windowed
    /// by `offset`/`limit`.
    async fn find_by_name_substring(
        &self,
        text: &str,
        order: SalaryOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<employee::Model>, ServiceError>;
    /// `None` when no row has this id.
    async fn update(&self, id: i32, changes: &EmployeeChanges) -> Result<Option<employee::Model>, ServiceError>;
    /// `false` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    fn matching(&self, text: &str) -> Select<employee::Entity> {
        let finder = employee::Entity::find();
        match name_contains(self.db.get_database_backend(), text) {
            Some(cond) => finder.filter(cond),
            None => finder,
        }
    }
}

/// Case-sensitive, wildcard-free substring test on `name`. `LIKE` is avoided
/// because SQLite folds ASCII case and `%`/`_` in user input would match
/// anything.
fn name_contains(backend: DatabaseBackend, text: &str) -> Option<SimpleExpr> {
    if text.is_empty() {
        return None;
    }
    let expr = match backend {
        DatabaseBackend::Postgres => Expr::cust_with_values("strpos(name, ?) > 0", [text]),
        _ => Expr::cust_with_values("instr(name, ?) > 0", [text]),
    };
    Some(expr)
}

fn salary_expr() -> SimpleExpr {
    Expr::col((employee::Entity, employee::Column::HoursWorked))
        .mul(Expr::col((employee::Entity, employee::Column::HourCost)))
}

#[async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn insert(&self, input: &NewEmployee) -> Result<employee::Model, ServiceError> {
        Ok(employee::create(&self.db, input).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<employee::Model>, ServiceError> {
        Ok(employee::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn count_by_name_substring(&self, text: &str) -> Result<u64, ServiceError> {
        Ok(self.matching(text).count(&self.db).await?)
    }

    async fn find_by_name_substring(
        &self,
        text: &str,
        order: SalaryOrder,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<employee::Model>, ServiceError> {
        let mut finder = self.matching(text);
        finder = match order {
            SalaryOrder::Asc => finder.order_by(salary_expr(), Order::Asc),
            SalaryOrder::Desc => finder.order_by(salary_expr(), Order::Desc),
            SalaryOrder::Insertion => finder,
        };
        let rows = finder
            .order_by_asc(employee::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i32, changes: &EmployeeChanges) -> Result<Option<employee::Model>, ServiceError> {
        let Some(existing) = self.find_by_id(id).await? else { return Ok(None) };
        let updated = employee::apply_changes(&self.db, existing, changes).await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(employee::hard_delete(&self.db, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, new_employee, seed};

    fn names(rows: &[employee::Model]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn substring_match_is_case_sensitive() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, &[
            new_employee("Ana", 10.0, 1.0),
            new_employee("ana", 10.0, 1.0),
            new_employee("Mariana", 10.0, 1.0),
            new_employee("Bruno", 10.0, 1.0),
        ]).await?;
        let repo = SeaOrmEmployeeRepository::new(db);

        let rows = repo.find_by_name_substring("ana", SalaryOrder::Insertion, 0, 10).await?;
        assert_eq!(names(&rows), ["ana", "Mariana"]);
        assert_eq!(repo.count_by_name_substring("ana").await?, 2);
        assert_eq!(repo.count_by_name_substring("").await?, 4);
        Ok(())
    }

    #[tokio::test]
    async fn wildcards_are_literal() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, &[new_employee("100%", 1.0, 1.0), new_employee("plain", 1.0, 1.0)]).await?;
        let repo = SeaOrmEmployeeRepository::new(db);

        assert_eq!(repo.count_by_name_substring("%").await?, 1);
        assert_eq!(repo.count_by_name_substring("_").await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn orders_by_salary_then_id() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        seed(&db, &[
            new_employee("a", 10.0, 10.0),  // 100
            new_employee("b", 1.0, 50.0),   // 50
            new_employee("c", 20.0, 10.0),  // 200
            new_employee("d", 5.0, 10.0),   // 50
        ]).await?;
        let repo = SeaOrmEmployeeRepository::new(db);

        let asc = repo.find_by_name_substring("", SalaryOrder::Asc, 0, 10).await?;
        assert_eq!(names(&asc), ["b", "d", "a", "c"]);
        let desc = repo.find_by_name_substring("", SalaryOrder::Desc, 0, 10).await?;
        assert_eq!(names(&desc), ["c", "a", "b", "d"]);
        let none = repo.find_by_name_substring("", SalaryOrder::Insertion, 1, 2).await?;
        assert_eq!(names(&none), ["b", "c"]);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_rows() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let repo = SeaOrmEmployeeRepository::new(db);
        let changes = EmployeeChanges { hours_worked: Some(1.0), ..Default::default() };

        assert!(repo.update(42, &changes).await?.is_none());
        assert!(!repo.delete(42).await?);
        assert_eq!(repo.count_by_name_substring("").await?, 0);
        Ok(())
    }
}
