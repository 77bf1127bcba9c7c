use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::categories_constants::{CLASSIFICATION_EXPENSE, CLASSIFICATION_INCOME};
use super::categories_errors::{CategoryError, Result};

/// Database model for categories
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub family_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub color: String,
    pub classification: String,
    pub lucide_icon: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_subcategory(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn is_income(&self) -> bool {
        self.classification == CLASSIFICATION_INCOME
    }

    pub fn is_expense(&self) -> bool {
        self.classification == CLASSIFICATION_EXPENSE
    }
}

/// Model for creating a new category
#[derive(Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub id: Option<String>,
    pub family_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub color: String,
    pub classification: String,
    pub lucide_icon: String,
}

impl NewCategory {
    /// Validates the new category data
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Category name cannot be empty".to_string(),
            ));
        }
        if self.color.trim().is_empty() {
            return Err(CategoryError::InvalidData(
                "Category color cannot be empty".to_string(),
            ));
        }
        Classification::from_str(&self.classification)
            .map_err(CategoryError::InvalidData)?;
        Ok(())
    }
}

/// Model for updating a category
#[derive(AsChangeset, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::categories)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub color: Option<String>,
    pub lucide_icon: Option<String>,
    pub updated_at: NaiveDateTime,
}

/// Category with its children (for hierarchical display)
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithChildren {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<Category>,
}

/// Whether a category groups money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Classification {
    Income,
    #[default]
    Expense,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Income => CLASSIFICATION_INCOME,
            Classification::Expense => CLASSIFICATION_EXPENSE,
        }
    }
}

impl FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            s if s == CLASSIFICATION_INCOME => Ok(Classification::Income),
            s if s == CLASSIFICATION_EXPENSE => Ok(Classification::Expense),
            _ => Err(format!("Unknown classification: {}", s)),
        }
    }
}
