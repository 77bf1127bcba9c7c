pub mod db;

pub mod categories;
pub mod families;
pub mod imports;

pub mod constants;
pub mod errors;
pub mod schema;

pub use errors::{Error, Result};
