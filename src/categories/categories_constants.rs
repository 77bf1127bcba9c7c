/// Palette offered by the category editor; imported categories without an
/// explicit color get a random pick from this list
pub const CATEGORY_COLORS: [&str; 10] = [
    "#e99537", "#4da568", "#6471eb", "#db5a54", "#df4e92", "#c44fe9", "#eb5429", "#61c9ea",
    "#805dee", "#6ad28a",
];

/// Fallback color, matches the column default in the database
pub const DEFAULT_CATEGORY_COLOR: &str = "#6172F3";

/// Icon slug assigned to every imported category
pub const DEFAULT_LUCIDE_ICON: &str = "shapes";

pub const CLASSIFICATION_INCOME: &str = "income";
pub const CLASSIFICATION_EXPENSE: &str = "expense";
