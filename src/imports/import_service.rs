use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::category_resolver::resolve_categories;
use super::import_constants::{
    COLUMN_KEYS, CSV_TEMPLATE, MAX_IMPORT_ROWS, REQUIRED_COLUMN_KEYS,
};
use super::import_errors::ImportError;
use super::import_model::{CategoryImport, ImportDryRun, ImportOutcome, ImportStatus};
use crate::categories::SqliteCategoryStore;
use crate::db::WriteHandle;
use crate::errors::{Error, Result};
use crate::families::FamilyRepositoryTrait;

/// Runs category imports end to end: validates the job, resolves its
/// rows inside one transaction and records the final status on the job.
#[async_trait]
pub trait CategoryImportServiceTrait: Send + Sync {
    async fn publish(&self, import: &mut CategoryImport) -> Result<ImportOutcome>;
    fn dry_run(&self, import: &CategoryImport) -> ImportDryRun;
    fn required_column_keys(&self) -> &'static [&'static str];
    fn column_keys(&self) -> &'static [&'static str];
    fn csv_template(&self) -> &'static str;
    fn max_row_count(&self) -> usize;
}

pub struct CategoryImportService {
    family_repository: Arc<dyn FamilyRepositoryTrait>,
    writer: WriteHandle,
}

impl CategoryImportService {
    pub fn new(family_repository: Arc<dyn FamilyRepositoryTrait>, writer: WriteHandle) -> Self {
        Self {
            family_repository,
            writer,
        }
    }

    fn fail(import: &mut CategoryImport, error: Error) -> Error {
        error!("Category import {} failed: {}", import.id, error);
        import.status = ImportStatus::Failed;
        import.error = Some(error.to_string());
        error
    }
}

#[async_trait]
impl CategoryImportServiceTrait for CategoryImportService {
    async fn publish(&self, import: &mut CategoryImport) -> Result<ImportOutcome> {
        debug!(
            "Publishing category import {} with {} rows",
            import.id,
            import.rows.len()
        );

        if let Err(e) = self.family_repository.get_by_id(&import.family_id) {
            return Err(Self::fail(import, e));
        }

        import.status = ImportStatus::Importing;

        if import.rows.len() > MAX_IMPORT_ROWS {
            let error = ImportError::RowLimitExceeded {
                count: import.rows.len(),
                max: MAX_IMPORT_ROWS,
            };
            return Err(Self::fail(import, error.into()));
        }

        let family_id = import.family_id.clone();
        let rows = import.rows.clone();

        let result = self
            .writer
            .exec(move |conn| {
                // One transaction around the whole batch: a failing row
                // rolls back every category created before it.
                conn.immediate_transaction::<_, Error, _>(|conn| {
                    let mut store = SqliteCategoryStore::new(conn, &family_id);
                    let mut rng = StdRng::from_entropy();
                    resolve_categories(&mut store, &rows, &mut rng).map_err(Error::from)
                })
            })
            .await;

        match result {
            Ok(outcome) => {
                import.status = ImportStatus::Complete;
                info!(
                    "Category import {} complete: {} rows processed, {} warnings",
                    import.id,
                    outcome.rows_processed(),
                    outcome.warnings.len()
                );
                Ok(outcome)
            }
            Err(e) => Err(Self::fail(import, e)),
        }
    }

    /// Reports what a publish would touch without writing anything.
    fn dry_run(&self, import: &CategoryImport) -> ImportDryRun {
        ImportDryRun {
            categories: import.rows.len(),
        }
    }

    fn required_column_keys(&self) -> &'static [&'static str] {
        &REQUIRED_COLUMN_KEYS
    }

    fn column_keys(&self) -> &'static [&'static str] {
        &COLUMN_KEYS
    }

    fn csv_template(&self) -> &'static str {
        CSV_TEMPLATE
    }

    fn max_row_count(&self) -> usize {
        MAX_IMPORT_ROWS
    }
}
