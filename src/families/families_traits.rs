use async_trait::async_trait;

use crate::errors::Result;
use crate::families::families_model::{Family, NewFamily};

/// Trait for family repository operations
#[async_trait]
pub trait FamilyRepositoryTrait: Send + Sync {
    /// Get all families
    fn get_families(&self) -> Result<Vec<Family>>;

    /// Get a family by ID
    fn get_by_id(&self, family_id: &str) -> Result<Family>;

    /// Create a new family
    async fn create_family(&self, new_family: NewFamily) -> Result<Family>;
}
