use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::categories::categories_constants::{DEFAULT_CATEGORY_COLOR, DEFAULT_LUCIDE_ICON};
use crate::categories::categories_model::{
    Category, CategoryWithChildren, Classification, NewCategory, UpdateCategory,
};
use crate::categories::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::Result;

pub struct CategoryService<T: CategoryRepositoryTrait> {
    category_repo: Arc<T>,
}

impl<T: CategoryRepositoryTrait> CategoryService<T> {
    pub fn new(category_repo: Arc<T>) -> Self {
        CategoryService { category_repo }
    }

    /// Helper to organize categories into hierarchical structure
    fn organize_hierarchically(&self, categories: Vec<Category>) -> Vec<CategoryWithChildren> {
        let roots: Vec<Category> = categories
            .iter()
            .filter(|c| c.parent_id.is_none())
            .cloned()
            .collect();

        roots
            .into_iter()
            .map(|root| {
                let children: Vec<Category> = categories
                    .iter()
                    .filter(|c| c.parent_id.as_ref() == Some(&root.id))
                    .cloned()
                    .collect();

                CategoryWithChildren {
                    category: root,
                    children,
                }
            })
            .collect()
    }
}

#[async_trait]
impl<T: CategoryRepositoryTrait + Send + Sync> CategoryServiceTrait for CategoryService<T> {
    fn get_categories_hierarchical(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>> {
        let all_categories = self.category_repo.get_categories(family_id)?;
        Ok(self.organize_hierarchically(all_categories))
    }

    fn get_categories(&self, family_id: &str) -> Result<Vec<Category>> {
        self.category_repo.get_categories(family_id)
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.category_repo.get_category_by_id(id)
    }

    async fn create_category(
        &self,
        family_id: &str,
        name: String,
        parent_id: Option<String>,
        color: Option<String>,
        classification: Classification,
    ) -> Result<Category> {
        let new_category = NewCategory {
            id: None,
            family_id: family_id.to_string(),
            parent_id,
            name,
            color: color.unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            classification: classification.as_str().to_string(),
            lucide_icon: DEFAULT_LUCIDE_ICON.to_string(),
        };

        self.category_repo.create_category(new_category).await
    }

    async fn update_category(
        &self,
        id: &str,
        name: Option<String>,
        color: Option<String>,
        lucide_icon: Option<String>,
    ) -> Result<Category> {
        let update = UpdateCategory {
            name,
            color,
            lucide_icon,
            updated_at: Utc::now().naive_utc(),
        };

        self.category_repo.update_category(id, update).await
    }

    async fn delete_category(&self, id: &str) -> Result<usize> {
        self.category_repo.delete_category(id).await
    }

    fn get_expense_categories(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>> {
        let categories = self.category_repo.get_categories(family_id)?;
        let expense: Vec<Category> = categories.into_iter().filter(|c| c.is_expense()).collect();
        Ok(self.organize_hierarchically(expense))
    }

    fn get_income_categories(&self, family_id: &str) -> Result<Vec<CategoryWithChildren>> {
        let categories = self.category_repo.get_categories(family_id)?;
        let income: Vec<Category> = categories.into_iter().filter(|c| c.is_income()).collect();
        Ok(self.organize_hierarchically(income))
    }
}
