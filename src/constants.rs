/// Currency assigned to families that do not choose one
pub const DEFAULT_FAMILY_CURRENCY: &str = "GHS";

/// Filename of the SQLite database inside the app data directory
pub const DATABASE_FILENAME: &str = "sika.db";
