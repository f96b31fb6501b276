//! Create `employees` table.
//! One row per employee work log; salary is derived and never stored.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk_auto(Employees::Id))
                    .col(string_len(Employees::Name, 255).not_null())
                    .col(integer(Employees::DaysWorked).not_null())
                    .col(double(Employees::HourCost).not_null())
                    .col(double(Employees::HoursWorked).not_null())
                    .col(timestamp_with_time_zone(Employees::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employees::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    Name,
    DaysWorked,
    HourCost,
    HoursWorked,
    CreatedAt,
    UpdatedAt,
}
