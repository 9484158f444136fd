use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{Overflow, checked_sum};

/// The closed set of monthly spending categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingCategory {
    Housing,
    Food,
    Transportation,
    Entertainment,
    Healthcare,
    Other,
}

impl SpendingCategory {
    /// Canonical order used for form fields and chart series.
    pub const ALL: [SpendingCategory; 6] = [
        SpendingCategory::Housing,
        SpendingCategory::Food,
        SpendingCategory::Transportation,
        SpendingCategory::Entertainment,
        SpendingCategory::Healthcare,
        SpendingCategory::Other,
    ];

    /// Machine name, as used by form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Food => "food",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Healthcare => "healthcare",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Housing => "Housing",
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Slice color in the spending breakdown chart.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Housing => "#10B981",
            Self::Food => "#3B82F6",
            Self::Transportation => "#F59E0B",
            Self::Entertainment => "#EC4899",
            Self::Healthcare => "#14B8A6",
            Self::Other => "#6B7280",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Monthly amount per spending category.
///
/// Every category is always present, so there is no way to add or drop one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spending {
    pub housing: Decimal,
    pub food: Decimal,
    pub transportation: Decimal,
    pub entertainment: Decimal,
    pub healthcare: Decimal,
    pub other: Decimal,
}

impl Spending {
    pub fn get(
        &self,
        category: SpendingCategory,
    ) -> Decimal {
        match category {
            SpendingCategory::Housing => self.housing,
            SpendingCategory::Food => self.food,
            SpendingCategory::Transportation => self.transportation,
            SpendingCategory::Entertainment => self.entertainment,
            SpendingCategory::Healthcare => self.healthcare,
            SpendingCategory::Other => self.other,
        }
    }

    pub fn set(
        &mut self,
        category: SpendingCategory,
        amount: Decimal,
    ) {
        let slot = match category {
            SpendingCategory::Housing => &mut self.housing,
            SpendingCategory::Food => &mut self.food,
            SpendingCategory::Transportation => &mut self.transportation,
            SpendingCategory::Entertainment => &mut self.entertainment,
            SpendingCategory::Healthcare => &mut self.healthcare,
            SpendingCategory::Other => &mut self.other,
        };
        *slot = amount;
    }

    /// Categories with their amounts, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (SpendingCategory, Decimal)> + '_ {
        SpendingCategory::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum of all categories.
    pub fn total(&self) -> Result<Decimal, Overflow> {
        checked_sum(self.iter().map(|(_, amount)| amount))
    }
}
