use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::categories::categories_model::{Category, NewCategory, UpdateCategory};
use crate::categories::categories_store::{CategoryStore, SqliteCategoryStore};
use crate::categories::categories_traits::CategoryRepositoryTrait;
use crate::categories::CategoryError;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{Error, Result};
use crate::schema::categories;

pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CategoryRepository { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    fn get_categories(&self, family_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::family_id.eq(family_id))
            .order((categories::classification.asc(), categories::name.asc()))
            .load::<Category>(&mut conn)?)
    }

    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .find(id)
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn find_by_name(&self, family_id: &str, name: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::family_id.eq(family_id))
            .filter(categories::name.eq(name))
            .first::<Category>(&mut conn)
            .optional()?)
    }

    fn get_root_categories(&self, family_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::family_id.eq(family_id))
            .filter(categories::parent_id.is_null())
            .order((categories::classification.asc(), categories::name.asc()))
            .load::<Category>(&mut conn)?)
    }

    fn get_children(&self, parent_id: &str) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(categories::table
            .filter(categories::parent_id.eq(parent_id))
            .order(categories::name.asc())
            .load::<Category>(&mut conn)?)
    }

    async fn create_category(&self, new_category: NewCategory) -> Result<Category> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let family_id = new_category.family_id.clone();
                let mut store = SqliteCategoryStore::new(conn, &family_id);
                store.create(new_category).map_err(Error::from)
            })
            .await
    }

    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Category> {
                let affected = diesel::update(categories::table.find(&id_owned))
                    .set(&update)
                    .execute(conn)?;
                if affected == 0 {
                    return Err(CategoryError::NotFound(format!(
                        "Category with id {} not found",
                        id_owned
                    ))
                    .into());
                }

                Ok(categories::table
                    .find(&id_owned)
                    .first::<Category>(conn)?)
            })
            .await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        let id_owned = id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                // Children go with the parent; the app only exposes two levels.
                let deleted = diesel::delete(
                    categories::table.filter(
                        categories::id
                            .eq(&id_owned)
                            .or(categories::parent_id.eq(&id_owned)),
                    ),
                )
                .execute(conn)?;

                Ok(deleted)
            })
            .await
    }
}
