use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::families_errors::{FamilyError, Result};

/// A family is the tenant boundary of the app: every category belongs to
/// exactly one family.
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::families)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a family
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::families)]
#[serde(rename_all = "camelCase")]
pub struct NewFamily {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub currency: Option<String>,
}

impl NewFamily {
    /// Validates the new family data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FamilyError::InvalidData(
                "Family name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
