//! Keyword-based auto-categorization of expense labels.

use crate::domain::Category;

/// Keyword table consulted in priority order, most specific first.
/// Several keywords overlap across billing-like categories; the scan
/// order resolves ties, and `Others` (no keywords) is the fallback.
const CLASSIFICATION_RULES: &[(Category, &[&str])] = &[
    (Category::EMIs, &["emi", "loan", "installment"]),
    (Category::Rent, &["rent"]),
    (
        Category::Bills,
        &["bill", "electricity", "water", "gas", "wifi", "broadband", "postpaid"],
    ),
    (
        Category::Utilities,
        &["utility", "utilities", "mobile recharge", "phone"],
    ),
    (Category::Fuel, &["fuel", "petrol", "diesel", "gasoline"]),
    (
        Category::Health,
        &["hospital", "doctor", "medicine", "pharmacy", "health"],
    ),
    (
        Category::Grocery,
        &["grocery", "vegetable", "veg", "fruits", "supermarket", "dmart", "open mart"],
    ),
    (
        Category::Food,
        &[
            "food",
            "restaurant",
            "hotel",
            "dining",
            "swiggy",
            "zomato",
            "dinner",
            "lunch",
            "breakfast",
        ],
    ),
    (
        Category::Transportation,
        &["uber", "ola", "cab", "bus", "train", "flight", "rapido", "porter"],
    ),
    (
        Category::Entertainment,
        &["movie", "netflix", "prime", "spotify", "entertainment", "youtube", "aha"],
    ),
    (
        Category::Shopping,
        &[
            "shopping",
            "amazon",
            "flipkart",
            "clothes",
            "dress",
            "shoe",
            "myntra",
            "ajio",
            "meesho",
        ],
    ),
];

/// Maps a free-text label to a category by substring containment.
///
/// Matching is case-insensitive and deliberately not word-bounded;
/// existing data was classified with exactly these semantics, so a
/// keyword hiding inside an unrelated word still counts.
pub fn classify(label: &str) -> Category {
    let lowered = label.to_lowercase();
    for (category, keywords) in CLASSIFICATION_RULES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *category;
        }
    }
    Category::Others
}

/// Keywords registered for a category. `Others` has none.
pub fn keywords(category: Category) -> &'static [&'static str] {
    CLASSIFICATION_RULES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}
