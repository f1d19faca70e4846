//! Completed provider × category summary grid.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of minor-unit digits carried by GBP amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// The three summed measures of a (provider, category) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measures {
    pub items: i64,
    pub quantity_x_items: Decimal,
    pub estimated_cost: Decimal,
}

impl Measures {
    /// All three measures set to exactly zero.
    pub const fn zero() -> Self {
        Self {
            items: 0,
            quantity_x_items: Decimal::ZERO,
            estimated_cost: Decimal::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.items == 0 && self.quantity_x_items.is_zero() && self.estimated_cost.is_zero()
    }

    /// Adds two sets of measures, returning `None` if any sum overflows.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            items: self.items.checked_add(rhs.items)?,
            quantity_x_items: self.quantity_x_items.checked_add(rhs.quantity_x_items)?,
            estimated_cost: self.estimated_cost.checked_add(rhs.estimated_cost)?,
        })
    }
}

/// Rounds a currency amount to pence and pins the scale so that `0` renders as `0.00`.
pub fn to_currency(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);
    rounded
}

/// One row of the output grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub provider_code: String,
    pub category: String,
    pub items: i64,
    pub quantity_x_items: Decimal,
    pub estimated_cost: Decimal,
}

impl SummaryRow {
    /// Builds a row, normalising quantity and pinning cost to two decimals.
    pub fn new(provider_code: impl Into<String>, category: impl Into<String>, measures: Measures) -> Self {
        Self {
            provider_code: provider_code.into(),
            category: category.into(),
            items: measures.items,
            quantity_x_items: measures.quantity_x_items.normalize(),
            estimated_cost: to_currency(measures.estimated_cost),
        }
    }

    pub fn measures(&self) -> Measures {
        Measures {
            items: self.items,
            quantity_x_items: self.quantity_x_items,
            estimated_cost: self.estimated_cost,
        }
    }
}

/// Dense provider × category grid.
///
/// Rows are ordered provider-major, category-minor, following `providers`
/// and `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryGrid {
    pub providers: Vec<String>,
    pub categories: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryGrid {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SummaryRow> {
        self.rows.iter()
    }

    /// Looks up the row for an exact (provider, category) pair.
    pub fn get(&self, provider_code: &str, category: &str) -> Option<&SummaryRow> {
        let provider_idx = self.providers.iter().position(|p| p == provider_code)?;
        let category_idx = self.categories.iter().position(|c| c == category)?;
        self.rows
            .get(provider_idx * self.categories.len() + category_idx)
            .filter(|row| row.provider_code == provider_code && row.category == category)
    }

    /// Sums the measures of every row belonging to `category`.
    ///
    /// Returns `None` if a sum overflows.
    pub fn category_totals(&self, category: &str) -> Option<Measures> {
        self.rows
            .iter()
            .filter(|row| row.category == category)
            .try_fold(Measures::zero(), |acc, row| acc.checked_add(row.measures()))
    }

    /// Sums the measures of the whole grid, or `None` if a sum overflows.
    pub fn totals(&self) -> Option<Measures> {
        self.rows
            .iter()
            .try_fold(Measures::zero(), |acc, row| acc.checked_add(row.measures()))
    }
}

impl<'a> IntoIterator for &'a SummaryGrid {
    type Item = &'a SummaryRow;
    type IntoIter = std::slice::Iter<'a, SummaryRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
