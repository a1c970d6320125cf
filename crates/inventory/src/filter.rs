//! Read-only projections over the medicine list.
//!
//! Everything here is recomputed from the current records on each call; nothing
//! is cached and the collection order is preserved.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use remedystock_core::DomainError;

use crate::medicine::{Category, Medicine};

/// Category selector value: one category or "All".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector options in display order: "All" then every category.
    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        core::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl core::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(c) => core::fmt::Display::fmt(c, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Search box + category selector.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl ViewFilter {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Category admits the record AND the search term is a case-insensitive
    /// substring of its name, company, or potency. An empty term matches all.
    pub fn matches(&self, medicine: &Medicine) -> bool {
        if !self.category.admits(medicine.category) {
            return false;
        }
        let term = self.search.to_lowercase();
        [&medicine.name, &medicine.company, &medicine.potency]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    pub fn apply<'a>(&self, medicines: &'a [Medicine]) -> Vec<&'a Medicine> {
        medicines.iter().filter(|m| self.matches(m)).collect()
    }
}

/// Records at or below their own low-stock threshold.
pub fn low_stock(medicines: &[Medicine]) -> Vec<&Medicine> {
    medicines.iter().filter(|m| m.is_low_stock()).collect()
}

/// Header counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub records: usize,
    pub total_units: u64,
    pub low_stock: usize,
}

pub fn summarize(medicines: &[Medicine]) -> InventorySummary {
    InventorySummary {
        records: medicines.len(),
        total_units: medicines.iter().map(|m| u64::from(m.stock)).sum(),
        low_stock: medicines.iter().filter(|m| m.is_low_stock()).count(),
    }
}
