use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors;
use crate::validation::{Presence, Rules, ValidationErrors};

pub const NAME_MAX_CHARS: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub days_worked: i32,
    pub hour_cost: f64,
    pub hours_worked: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Derived pay for the logged hours; never persisted.
    pub fn salary(&self) -> f64 {
        self.hours_worked * self.hour_cost
    }
}

/// Validated fields for a new work log.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub days_worked: i32,
    pub hour_cost: f64,
    pub hours_worked: f64,
}

/// Validated partial update; `None` leaves the stored value unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub days_worked: Option<i32>,
    pub hour_cost: Option<f64>,
    pub hours_worked: Option<f64>,
}

/// Create rules: every field required, `hours_worked` must be a whole number.
pub fn validate_create(input: &Map<String, Value>) -> Result<NewEmployee, errors::ModelError> {
    let mut rules = Rules::new(input);
    let name = rules.string("name", Presence::Required, NAME_MAX_CHARS);
    let days_worked = days_worked(&mut rules, Presence::Required);
    let hour_cost = rules.numeric("hour_cost", Presence::Required, 0.0);
    let hours_worked = rules.integer("hours_worked", Presence::Required, 0, i64::MAX);
    rules.finish()?;

    match (name, days_worked, hour_cost, hours_worked) {
        (Some(name), Some(days_worked), Some(hour_cost), Some(hours_worked)) => Ok(NewEmployee {
            name,
            days_worked,
            hour_cost,
            hours_worked: hours_worked as f64,
        }),
        _ => Err(errors::ModelError::Validation(ValidationErrors::default())),
    }
}

/// Update rules: fields are checked only when sent, except `hours_worked`,
/// which is always required and may be fractional.
pub fn validate_update(input: &Map<String, Value>) -> Result<EmployeeChanges, errors::ModelError> {
    let mut rules = Rules::new(input);
    let name = rules.string("name", Presence::Sometimes, NAME_MAX_CHARS);
    let days_worked = days_worked(&mut rules, Presence::Sometimes);
    let hour_cost = rules.numeric("hour_cost", Presence::Sometimes, 0.0);
    let hours_worked = rules.numeric("hours_worked", Presence::Required, 0.0);
    rules.finish()?;

    Ok(EmployeeChanges { name, days_worked, hour_cost, hours_worked })
}

fn days_worked(rules: &mut Rules<'_>, presence: Presence) -> Option<i32> {
    // 32-bit column
    rules
        .integer("days_worked", presence, 0, i64::from(i32::MAX))
        .and_then(|n| i32::try_from(n).ok())
}

pub async fn create(db: &DatabaseConnection, input: &NewEmployee) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        name: Set(input.name.clone()),
        days_worked: Set(input.days_worked),
        hour_cost: Set(input.hour_cost),
        hours_worked: Set(input.hours_worked),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Apply `changes` to an existing row and bump `updated_at`.
pub async fn apply_changes(
    db: &DatabaseConnection,
    existing: Model,
    changes: &EmployeeChanges,
) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = existing.into();
    if let Some(name) = &changes.name {
        am.name = Set(name.clone());
    }
    if let Some(d) = changes.days_worked {
        am.days_worked = Set(d);
    }
    if let Some(c) = changes.hour_cost {
        am.hour_cost = Set(c);
    }
    if let Some(h) = changes.hours_worked {
        am.hours_worked = Set(h);
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
