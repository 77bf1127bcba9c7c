pub mod families_errors;
pub mod families_model;
pub mod families_repository;
pub mod families_traits;

pub use families_errors::FamilyError;
pub use families_model::{Family, NewFamily};
pub use families_repository::FamilyRepository;
pub use families_traits::FamilyRepositoryTrait;
