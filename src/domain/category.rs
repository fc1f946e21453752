//! The closed set of expense categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorises an expense for totals and reporting.
///
/// The set is closed: persisted documents only ever carry these variant
/// names, and [`Others`](Category::Others) is the catch-all for labels
/// no keyword claims.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub enum Category {
    Grocery,
    Fuel,
    Bills,
    Shopping,
    Food,
    Transportation,
    Entertainment,
    Health,
    Utilities,
    Rent,
    EMIs,
    Others,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 12] = [
        Category::Grocery,
        Category::Fuel,
        Category::Bills,
        Category::Shopping,
        Category::Food,
        Category::Transportation,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Rent,
        Category::EMIs,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grocery => "Grocery",
            Category::Fuel => "Fuel",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Food => "Food",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Utilities => "Utilities",
            Category::Rent => "Rent",
            Category::EMIs => "EMIs",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
