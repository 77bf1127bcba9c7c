pub mod categories_constants;
pub mod categories_errors;
pub mod categories_model;
pub mod categories_repository;
pub mod categories_service;
pub mod categories_store;
pub mod categories_traits;


pub use categories_constants::{
    CATEGORY_COLORS, CLASSIFICATION_EXPENSE, CLASSIFICATION_INCOME, DEFAULT_CATEGORY_COLOR,
    DEFAULT_LUCIDE_ICON,
};
pub use categories_errors::CategoryError;
pub use categories_model::{
    Category, CategoryWithChildren, Classification, NewCategory, UpdateCategory,
};
pub use categories_repository::CategoryRepository;
pub use categories_service::CategoryService;
pub use categories_store::{CategoryStore, SqliteCategoryStore};
pub use categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
