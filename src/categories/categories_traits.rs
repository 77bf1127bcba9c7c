use async_trait::async_trait;

use crate::categories::categories_model::{
    Category, CategoryWithChildren, Classification, NewCategory, UpdateCategory,
};
use crate::errors::Result;

/// Trait for category repository operations
#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Get all categories of a family
    fn get_categories(&self, family_id: &str) -> Result<Vec<Category>>;

    /// Get a category by ID
    fn get_category_by_id(&self, id: &str) -> Result<Option<Category>>;

    /// Exact-name lookup within a family
    fn find_by_name(&self, family_id: &str, name: &str) -> Result<Option<Category>>;

    /// Get all root categories of a family (those with no parent_id)
    fn get_root_categories(&self, family_id: &str) -> Result<Vec<Category>>;

    /// Get children of a parent category
    fn get_children(&self, parent_id: &str) -> Result<Vec<Category>>;

    /// Create a new category
    async fn create_category(&self, new_category: NewCategory) -> Result<Category>;

    /// Update a category
    async fn update_category(&self, id: &str, update: UpdateCategory) -> Result<Category>;

    /// Delete a category and its children
    async fn delete_category(&self, id: &str) -> Result<usize>;
}

/// Trait for category service operations
#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    /// Get a family's categories organized hierarchically
    fn get_categories_hierarchical(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>>;

    /// Get a family's categories as a flat list
    fn get_categories(&self, family_id: &str) -> Result<Vec<Category>>;

    /// Get a category by ID
    fn get_category(&self, id: &str) -> Result<Option<Category>>;

    /// Create a new category
    async fn create_category(
        &self,
        family_id: &str,
        name: String,
        parent_id: Option<String>,
        color: Option<String>,
        classification: Classification,
    ) -> Result<Category>;

    /// Update a category
    async fn update_category(
        &self,
        id: &str,
        name: Option<String>,
        color: Option<String>,
        lucide_icon: Option<String>,
    ) -> Result<Category>;

    /// Delete a category and its children
    async fn delete_category(&self, id: &str) -> Result<usize>;

    /// Get expense categories with their children
    fn get_expense_categories(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>>;

    /// Get income categories with their children
    fn get_income_categories(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>>;
}
