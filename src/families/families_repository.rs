use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use crate::constants::DEFAULT_FAMILY_CURRENCY;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::Result;
use crate::families::families_model::{Family, NewFamily};
use crate::families::families_traits::FamilyRepositoryTrait;
use crate::families::FamilyError;
use crate::schema::families;

pub struct FamilyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FamilyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        FamilyRepository { pool, writer }
    }
}

#[async_trait]
impl FamilyRepositoryTrait for FamilyRepository {
    fn get_families(&self) -> Result<Vec<Family>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(families::table
            .order(families::name.asc())
            .load::<Family>(&mut conn)?)
    }

    fn get_by_id(&self, family_id: &str) -> Result<Family> {
        let mut conn = get_connection(&self.pool)?;
        let family = families::table
            .find(family_id)
            .first::<Family>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    FamilyError::NotFound(format!("Family with id {} not found", family_id))
                }
                _ => FamilyError::DatabaseError(e.to_string()),
            })?;
        Ok(family)
    }

    async fn create_family(&self, new_family: NewFamily) -> Result<Family> {
        new_family.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Family> {
                let mut family = new_family;
                if family.id.is_none() {
                    family.id = Some(Uuid::new_v4().to_string());
                }
                if family.currency.is_none() {
                    family.currency = Some(DEFAULT_FAMILY_CURRENCY.to_string());
                }

                diesel::insert_into(families::table)
                    .values(&family)
                    .execute(conn)?;

                let inserted_id = family.id.unwrap_or_default();
                Ok(families::table
                    .find(&inserted_id)
                    .first::<Family>(conn)?)
            })
            .await
    }
}
