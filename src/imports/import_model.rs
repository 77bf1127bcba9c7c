use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::import_constants::ROOT_PARENT_LITERAL;
use crate::categories::{Category, Classification};

/// One row of a category import, already mapped to the import's column
/// keys by the upload step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportRow {
    /// Category name
    pub name: String,
    /// Color hex code; blank means "pick one"
    pub notes: String,
    /// Parent category name; blank or the literal "null" marks a root
    pub category: String,
    /// Classification input (income/expense)
    pub entity_type: String,
}

impl ImportRow {
    /// Parent name to resolve, or None for a root row.
    ///
    /// Only a blank cell or the exact untrimmed string "null" marks a
    /// root; "NULL" or " null " are names to look up.
    pub fn parent_name(&self) -> Option<&str> {
        if self.category.trim().is_empty() || self.category == ROOT_PARENT_LITERAL {
            None
        } else {
            Some(&self.category)
        }
    }

    /// Color from the row, untrimmed, when one was provided
    pub fn color(&self) -> Option<&str> {
        if self.notes.trim().is_empty() {
            None
        } else {
            Some(&self.notes)
        }
    }

    /// Classification for the row: the lowercased input when it names a
    /// valid classification, otherwise expense
    pub fn classification(&self) -> Classification {
        Classification::from_str(&self.entity_type.to_lowercase()).unwrap_or_default()
    }
}

/// Lifecycle of an import job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Pending,
    Importing,
    Complete,
    Failed,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Pending => "pending",
            ImportStatus::Importing => "importing",
            ImportStatus::Complete => "complete",
            ImportStatus::Failed => "failed",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ImportStatus::Complete)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ImportStatus::Failed)
    }
}

/// A category import job for one family
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImport {
    pub id: String,
    pub family_id: String,
    pub rows: Vec<ImportRow>,
    pub status: ImportStatus,
    pub error: Option<String>,
}

impl CategoryImport {
    pub fn new(family_id: &str, rows: Vec<ImportRow>) -> Self {
        CategoryImport {
            id: Uuid::new_v4().to_string(),
            family_id: family_id.to_string(),
            rows,
            status: ImportStatus::Pending,
            error: None,
        }
    }
}

/// Warning raised when a parent name does not resolve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWarning {
    pub category_name: String,
    pub parent_name: String,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parent category '{}' not found for category '{}', creating as root category",
            self.parent_name, self.category_name
        )
    }
}

/// What an import produced: one category per processed row, plus any
/// warnings raised along the way
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub categories: Vec<Category>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportOutcome {
    pub fn rows_processed(&self) -> usize {
        self.categories.len()
    }
}

/// Preview counts shown before publishing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDryRun {
    pub categories: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_with_category(category: &str) -> ImportRow {
        ImportRow {
            name: "Groceries".to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parent_name_policy() {
        assert_eq!(row_with_category("").parent_name(), None);
        assert_eq!(row_with_category("   ").parent_name(), None);
        assert_eq!(row_with_category("null").parent_name(), None);

        // Only the exact lowercase literal is a root marker.
        assert_eq!(row_with_category("NULL").parent_name(), Some("NULL"));
        assert_eq!(row_with_category(" null ").parent_name(), Some(" null "));
        assert_eq!(
            row_with_category("Food & Drink").parent_name(),
            Some("Food & Drink")
        );
    }

    #[test]
    fn test_color_presence_keeps_original_value() {
        let mut row = ImportRow::default();
        assert_eq!(row.color(), None);

        row.notes = "   ".to_string();
        assert_eq!(row.color(), None);

        row.notes = " #e99537 ".to_string();
        assert_eq!(row.color(), Some(" #e99537 "));
    }

    #[test]
    fn test_classification_coercion() {
        let mut row = ImportRow::default();
        assert_eq!(row.classification(), Classification::Expense);

        row.entity_type = "income".to_string();
        assert_eq!(row.classification(), Classification::Income);

        row.entity_type = "INCOME".to_string();
        assert_eq!(row.classification(), Classification::Income);

        row.entity_type = "Expense".to_string();
        assert_eq!(row.classification(), Classification::Expense);

        row.entity_type = "savings".to_string();
        assert_eq!(row.classification(), Classification::Expense);

        // No trimming happens before the check.
        row.entity_type = " income ".to_string();
        assert_eq!(row.classification(), Classification::Expense);
    }

    #[test]
    fn test_warning_message_names_both_categories() {
        let warning = ImportWarning {
            category_name: "Groceries".to_string(),
            parent_name: "Food".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "Parent category 'Food' not found for category 'Groceries', creating as root category"
        );
    }

    #[test]
    fn test_new_import_starts_pending() {
        let import = CategoryImport::new("fam_1", vec![ImportRow::default()]);
        assert_eq!(import.status, ImportStatus::Pending);
        assert!(import.error.is_none());
        assert_eq!(import.rows.len(), 1);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ImportStatus::Complete).unwrap(),
            "\"complete\""
        );
        assert_eq!(ImportStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_dry_run_serialization_shape() {
        let dry_run = ImportDryRun { categories: 3 };
        assert_eq!(
            serde_json::to_value(&dry_run).unwrap(),
            serde_json::json!({ "categories": 3 })
        );
    }
}
