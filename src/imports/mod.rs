pub mod category_resolver;
pub mod import_constants;
pub mod import_errors;
pub mod import_model;
pub mod import_service;

pub use category_resolver::resolve_categories;
pub use import_constants::{
    COLUMN_KEYS, CSV_TEMPLATE, MAX_IMPORT_ROWS, REQUIRED_COLUMN_KEYS, ROOT_PARENT_LITERAL,
};
pub use import_errors::ImportError;
pub use import_model::{
    CategoryImport, ImportDryRun, ImportOutcome, ImportRow, ImportStatus, ImportWarning,
};
pub use import_service::{CategoryImportService, CategoryImportServiceTrait};
