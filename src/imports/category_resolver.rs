use log::warn;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::import_errors::Result;
use super::import_model::{ImportOutcome, ImportRow, ImportWarning};
use crate::categories::{
    Category, CategoryStore, NewCategory, CATEGORY_COLORS, DEFAULT_CATEGORY_COLOR,
    DEFAULT_LUCIDE_ICON,
};

/// Resolves import rows into a two-level category hierarchy.
///
/// Root rows are created first so subcategory rows can link to parents
/// introduced by the same batch. Subcategory rows then run in a single
/// pass: a parent created by an earlier subcategory row is visible, one
/// that only appears later is not, and a parent name that never
/// resolves downgrades the row to a root with a warning.
///
/// The store decides persistence; callers wanting all-or-nothing
/// semantics wrap this call in a transaction.
pub fn resolve_categories(
    store: &mut dyn CategoryStore,
    rows: &[ImportRow],
    rng: &mut dyn RngCore,
) -> Result<ImportOutcome> {
    let (root_rows, subcategory_rows): (Vec<&ImportRow>, Vec<&ImportRow>) =
        rows.iter().partition(|row| row.parent_name().is_none());

    let mut outcome = ImportOutcome {
        categories: Vec::with_capacity(rows.len()),
        warnings: Vec::new(),
    };

    // First pass: root categories
    for row in root_rows {
        let category = find_or_create_category(store, row, None, rng)?;
        outcome.categories.push(category);
    }

    // Second pass: subcategories with parent lookup
    for row in subcategory_rows {
        let parent_id = match store.find_by_name(&row.category)? {
            Some(parent) => Some(parent.id),
            None => {
                let warning = ImportWarning {
                    category_name: row.name.clone(),
                    parent_name: row.category.clone(),
                };
                warn!("{}", warning);
                outcome.warnings.push(warning);
                None
            }
        };

        let category = find_or_create_category(store, row, parent_id, rng)?;
        outcome.categories.push(category);
    }

    Ok(outcome)
}

/// Name-keyed find-or-create. An existing category is returned as-is:
/// imports never overwrite attributes of categories that already exist.
fn find_or_create_category(
    store: &mut dyn CategoryStore,
    row: &ImportRow,
    parent_id: Option<String>,
    rng: &mut dyn RngCore,
) -> Result<Category> {
    if let Some(existing) = store.find_by_name(&row.name)? {
        return Ok(existing);
    }

    let color = row
        .color()
        .map(str::to_string)
        .unwrap_or_else(|| random_color(rng).to_string());

    let new_category = NewCategory {
        id: None,
        family_id: store.family_id().to_string(),
        parent_id,
        name: row.name.clone(),
        color,
        classification: row.classification().as_str().to_string(),
        lucide_icon: DEFAULT_LUCIDE_ICON.to_string(),
    };

    Ok(store.create(new_category)?)
}

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CATEGORY_COLORS
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::categories_errors::{CategoryError, Result as CategoryResult};
    use crate::imports::ImportError;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct InMemoryCategoryStore {
        family_id: String,
        categories: Vec<Category>,
        next_id: usize,
    }

    impl InMemoryCategoryStore {
        fn new() -> Self {
            Self {
                family_id: "fam_test".to_string(),
                categories: Vec::new(),
                next_id: 0,
            }
        }

        fn seed(&mut self, name: &str, color: &str, classification: &str) -> Category {
            let now = Utc::now().naive_utc();
            self.next_id += 1;
            let category = Category {
                id: format!("cat_{:012}", self.next_id),
                family_id: self.family_id.clone(),
                parent_id: None,
                name: name.to_string(),
                color: color.to_string(),
                classification: classification.to_string(),
                lucide_icon: "shapes".to_string(),
                created_at: now,
                updated_at: now,
            };
            self.categories.push(category.clone());
            category
        }

        fn get(&self, name: &str) -> Option<&Category> {
            self.categories.iter().find(|c| c.name == name)
        }
    }

    impl CategoryStore for InMemoryCategoryStore {
        fn family_id(&self) -> &str {
            &self.family_id
        }

        fn find_by_name(&mut self, name: &str) -> CategoryResult<Option<Category>> {
            Ok(self.categories.iter().find(|c| c.name == name).cloned())
        }

        fn create(&mut self, new_category: NewCategory) -> CategoryResult<Category> {
            new_category.validate()?;
            if self.categories.iter().any(|c| c.name == new_category.name) {
                return Err(CategoryError::DuplicateName(new_category.name));
            }

            let now = Utc::now().naive_utc();
            self.next_id += 1;
            let category = Category {
                id: new_category
                    .id
                    .unwrap_or_else(|| format!("cat_{:012}", self.next_id)),
                family_id: new_category.family_id,
                parent_id: new_category.parent_id,
                name: new_category.name,
                color: new_category.color,
                classification: new_category.classification,
                lucide_icon: new_category.lucide_icon,
                created_at: now,
                updated_at: now,
            };
            self.categories.push(category.clone());
            Ok(category)
        }
    }

    fn row(name: &str, notes: &str, category: &str, entity_type: &str) -> ImportRow {
        ImportRow {
            name: name.to_string(),
            notes: notes.to_string(),
            category: category.to_string(),
            entity_type: entity_type.to_string(),
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_creates_roots_and_links_subcategories() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Food & Drink", "#f97316", "", "expense"),
            row("Groceries", "#407706", "Food & Drink", "expense"),
            row("Dining Out", "#fb923c", "Food & Drink", "expense"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert_eq!(outcome.rows_processed(), 3);
        assert!(outcome.warnings.is_empty());

        let food = store.get("Food & Drink").unwrap().clone();
        assert!(food.is_root());
        assert_eq!(food.color, "#f97316");

        let groceries = store.get("Groceries").unwrap();
        assert_eq!(groceries.parent_id.as_deref(), Some(food.id.as_str()));
        assert_eq!(groceries.classification, "expense");

        let dining = store.get("Dining Out").unwrap();
        assert_eq!(dining.parent_id.as_deref(), Some(food.id.as_str()));
    }

    #[test]
    fn test_subcategory_row_may_precede_its_root_row() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Groceries", "", "Food & Drink", "expense"),
            row("Food & Drink", "", "", "expense"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert!(outcome.warnings.is_empty());
        let food_id = store.get("Food & Drink").unwrap().id.clone();
        assert_eq!(
            store.get("Groceries").unwrap().parent_id.as_deref(),
            Some(food_id.as_str())
        );
    }

    #[test]
    fn test_parent_created_by_earlier_subcategory_row_is_visible() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Transport", "", "", "expense"),
            row("Car", "", "Transport", "expense"),
            row("Fuel", "", "Car", "expense"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert!(outcome.warnings.is_empty());
        let car_id = store.get("Car").unwrap().id.clone();
        assert_eq!(
            store.get("Fuel").unwrap().parent_id.as_deref(),
            Some(car_id.as_str())
        );
    }

    #[test]
    fn test_parent_appearing_only_later_in_second_pass_is_missed() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Fuel", "", "Car", "expense"),
            row("Car", "", "Transport", "expense"),
            row("Transport", "", "", "expense"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        // Fuel ran before Car existed, so it fell back to a root.
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].category_name, "Fuel");
        assert_eq!(outcome.warnings[0].parent_name, "Car");
        assert!(store.get("Fuel").unwrap().is_root());

        let transport_id = store.get("Transport").unwrap().id.clone();
        assert_eq!(
            store.get("Car").unwrap().parent_id.as_deref(),
            Some(transport_id.as_str())
        );
    }

    #[test]
    fn test_null_literal_marks_root_without_warning() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![row("Income", "#22c55e", "null", "income")];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert!(outcome.warnings.is_empty());
        assert!(store.get("Income").unwrap().is_root());
    }

    #[test]
    fn test_null_casing_variants_are_treated_as_parent_names() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Salary", "", "NULL", "income"),
            row("Bonus", "", " null ", "income"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert_eq!(outcome.warnings.len(), 2);
        assert_eq!(outcome.warnings[0].parent_name, "NULL");
        assert_eq!(outcome.warnings[1].parent_name, " null ");
        assert!(store.get("Salary").unwrap().is_root());
        assert!(store.get("Bonus").unwrap().is_root());
    }

    #[test]
    fn test_unresolved_parent_downgrades_to_root_with_warning() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![row("Groceries", "", "Nonexistent", "expense")];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(
            outcome.warnings[0].to_string(),
            "Parent category 'Nonexistent' not found for category 'Groceries', creating as root category"
        );
        assert!(store.get("Groceries").unwrap().is_root());
        assert!(store.get("Nonexistent").is_none());
    }

    #[test]
    fn test_existing_category_is_returned_unchanged() {
        let mut store = InMemoryCategoryStore::new();
        let existing = store.seed("Existing Category", "#000000", "expense");

        let rows = vec![row("Existing Category", "#ffffff", "", "income")];
        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert_eq!(outcome.rows_processed(), 1);
        assert_eq!(outcome.categories[0], existing);
        assert_eq!(store.categories.len(), 1);

        let kept = store.get("Existing Category").unwrap();
        assert_eq!(kept.color, "#000000");
        assert_eq!(kept.classification, "expense");
    }

    #[test]
    fn test_duplicate_name_within_batch_creates_once() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Travel", "#61c9ea", "", "expense"),
            row("Travel", "#805dee", "", "income"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert_eq!(outcome.rows_processed(), 2);
        assert_eq!(store.categories.len(), 1);
        assert_eq!(outcome.categories[0], outcome.categories[1]);
        assert_eq!(store.get("Travel").unwrap().color, "#61c9ea");
    }

    #[test]
    fn test_root_row_wins_over_subcategory_row_with_same_name() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Utilities", "", "Home", "expense"),
            row("Home", "", "", "expense"),
            row("Utilities", "", "", "expense"),
        ];

        let outcome = resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        // Both Utilities rows partition apart; the root row runs first
        // and the subcategory row then matches it without relinking.
        assert_eq!(outcome.rows_processed(), 3);
        assert_eq!(store.categories.len(), 2);
        assert!(store.get("Utilities").unwrap().is_root());
    }

    #[test]
    fn test_blank_color_gets_a_palette_pick() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![row("Entertainment", "", "", "expense")];

        resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        let color = store.get("Entertainment").unwrap().color.as_str();
        assert!(CATEGORY_COLORS.contains(&color));
    }

    #[test]
    fn test_all_created_categories_carry_the_default_icon() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Health", "", "", "expense"),
            row("Dentist", "", "Health", "expense"),
        ];

        resolve_categories(&mut store, &rows, &mut rng()).unwrap();

        assert!(store
            .categories
            .iter()
            .all(|c| c.lucide_icon == DEFAULT_LUCIDE_ICON));
    }

    #[test]
    fn test_blank_name_fails_resolution() {
        let mut store = InMemoryCategoryStore::new();
        let rows = vec![
            row("Valid", "", "", "expense"),
            row("   ", "", "", "expense"),
        ];

        let result = resolve_categories(&mut store, &rows, &mut rng());

        assert!(matches!(
            result,
            Err(ImportError::Category(CategoryError::InvalidData(_)))
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const NAMES: [&str; 6] = ["Auto", "Bills", "Food", "Gifts", "Health", "Travel"];

        fn row_strategy() -> impl Strategy<Value = ImportRow> {
            (
                0..NAMES.len(),
                proptest::option::of(0..NAMES.len()),
                any::<bool>(),
            )
                .prop_map(|(name_idx, parent_idx, income)| ImportRow {
                    name: NAMES[name_idx].to_string(),
                    notes: String::new(),
                    category: parent_idx.map(|i| NAMES[i].to_string()).unwrap_or_default(),
                    entity_type: if income {
                        "income".to_string()
                    } else {
                        String::new()
                    },
                })
        }

        proptest! {
            #[test]
            fn names_stay_unique_and_parents_exist(
                rows in proptest::collection::vec(row_strategy(), 0..24)
            ) {
                let mut store = InMemoryCategoryStore::new();
                let mut rng = StdRng::seed_from_u64(7);
                resolve_categories(&mut store, &rows, &mut rng).unwrap();

                let mut names: Vec<&str> =
                    store.categories.iter().map(|c| c.name.as_str()).collect();
                let total = names.len();
                names.sort_unstable();
                names.dedup();
                prop_assert_eq!(total, names.len());

                for category in &store.categories {
                    if let Some(parent_id) = &category.parent_id {
                        prop_assert!(store.categories.iter().any(|c| &c.id == parent_id));
                    }
                }
            }

            #[test]
            fn resolving_the_same_rows_again_changes_nothing(
                rows in proptest::collection::vec(row_strategy(), 0..24)
            ) {
                let mut store = InMemoryCategoryStore::new();
                let mut rng = StdRng::seed_from_u64(7);
                resolve_categories(&mut store, &rows, &mut rng).unwrap();
                let snapshot = store.categories.clone();

                resolve_categories(&mut store, &rows, &mut rng).unwrap();
                prop_assert_eq!(&snapshot, &store.categories);
            }
        }
    }
}
