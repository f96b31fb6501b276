#![cfg(test)]
use sea_orm::DatabaseConnection;
use models::employee::{self, NewEmployee};

/// Fresh, migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub fn new_employee(name: &str, hour_cost: f64, hours_worked: f64) -> NewEmployee {
    NewEmployee { name: name.to_string(), days_worked: 20, hour_cost, hours_worked }
}

/// Insert rows in order and return them as stored.
pub async fn seed(db: &DatabaseConnection, rows: &[NewEmployee]) -> Result<Vec<employee::Model>, anyhow::Error> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(employee::create(db, row).await?);
    }
    Ok(out)
}
