/// Hard cap on rows per import, enforced before any row is resolved
pub const MAX_IMPORT_ROWS: usize = 100;

/// Columns an uploaded file must provide
pub const REQUIRED_COLUMN_KEYS: [&str; 1] = ["name"];

/// All columns the category import understands
pub const COLUMN_KEYS: [&str; 4] = ["name", "notes", "category", "entity_type"];

/// Sample CSV offered for download in the import dialog
pub const CSV_TEMPLATE: &str = "name*,color,parent_category,classification
Income,#22c55e,,income
Food & Drink,#f97316,,expense
Groceries,#407706,Food & Drink,expense
";

/// Literal parent value that marks a root row, alongside a blank cell
pub const ROOT_PARENT_LITERAL: &str = "null";
