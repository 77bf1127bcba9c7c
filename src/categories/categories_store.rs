use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use uuid::Uuid;

use super::categories_errors::{CategoryError, Result};
use super::categories_model::{Category, NewCategory};
use crate::schema::categories;

/// Narrow storage interface the category import works against.
///
/// Implementations are scoped to a single family; lookups and creations
/// never cross the tenant boundary.
pub trait CategoryStore {
    /// The family this store is scoped to.
    fn family_id(&self) -> &str;

    /// Exact, case-sensitive lookup by name within the family.
    fn find_by_name(&mut self, name: &str) -> Result<Option<Category>>;

    /// Validates and inserts a category, returning the stored row.
    fn create(&mut self, new_category: NewCategory) -> Result<Category>;
}

/// Store over a borrowed SQLite connection, scoped to one family.
///
/// The caller controls the transaction boundary: the import opens one
/// around the whole batch, so every statement issued here joins it.
pub struct SqliteCategoryStore<'a> {
    conn: &'a mut SqliteConnection,
    family_id: String,
}

impl<'a> SqliteCategoryStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection, family_id: &str) -> Self {
        SqliteCategoryStore {
            conn,
            family_id: family_id.to_string(),
        }
    }
}

impl CategoryStore for SqliteCategoryStore<'_> {
    fn family_id(&self) -> &str {
        &self.family_id
    }

    fn find_by_name(&mut self, name: &str) -> Result<Option<Category>> {
        Ok(categories::table
            .filter(categories::family_id.eq(&self.family_id))
            .filter(categories::name.eq(name))
            .first::<Category>(self.conn)
            .optional()?)
    }

    fn create(&mut self, new_category: NewCategory) -> Result<Category> {
        new_category.validate()?;
        if new_category.family_id != self.family_id {
            return Err(CategoryError::InvalidData(format!(
                "Category belongs to family {} but the store is scoped to {}",
                new_category.family_id, self.family_id
            )));
        }

        let mut category = new_category;
        if category.id.is_none() {
            category.id = Some(format!(
                "cat_{}",
                &Uuid::new_v4().to_string().replace('-', "")[..12]
            ));
        }

        diesel::insert_into(categories::table)
            .values(&category)
            .execute(self.conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    CategoryError::DuplicateName(category.name.clone())
                }
                _ => e.into(),
            })?;

        let inserted_id = category.id.unwrap_or_default();
        Ok(categories::table
            .find(&inserted_id)
            .first::<Category>(self.conn)?)
    }
}
