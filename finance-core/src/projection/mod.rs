//! Projection of a [`FinancialModel`] into the two chart datasets.
//!
//! Projection is a pure function of the model: no state, no side effects.
//! Each series stores labels and values as pairs so the two can never drift
//! out of order.

mod sink;

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{FinancialModel, SpendingCategory};

pub use sink::{RenderError, RenderSink};

/// How a chart is drawn by a rendering sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartStyle {
    Donut,
    HorizontalBar,
}

/// The two charts on the analytics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    /// Monthly spending per category.
    SpendingBreakdown,
    /// Income, expenses, savings and debt side by side.
    FinancialOverview,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::SpendingBreakdown, ChartKind::FinancialOverview];

    pub fn title(&self) -> &'static str {
        match self {
            Self::SpendingBreakdown => "Spending Breakdown",
            Self::FinancialOverview => "Financial Overview",
        }
    }

    pub fn style(&self) -> ChartStyle {
        match self {
            Self::SpendingBreakdown => ChartStyle::Donut,
            Self::FinancialOverview => ChartStyle::HorizontalBar,
        }
    }

    /// Identifier of the render target this chart draws into.
    pub fn target_id(&self) -> &'static str {
        match self {
            Self::SpendingBreakdown => "spending-chart",
            Self::FinancialOverview => "overview-chart",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: &'static str,
    pub value: Decimal,
    pub color: &'static str,
}

/// One chart's dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    kind: ChartKind,
    points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.points.iter().map(|p| p.label).collect()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Both chart datasets for one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub spending: ChartSeries,
    pub overview: ChartSeries,
}

impl Projection {
    pub fn series(
        &self,
        kind: ChartKind,
    ) -> &ChartSeries {
        match kind {
            ChartKind::SpendingBreakdown => &self.spending,
            ChartKind::FinancialOverview => &self.overview,
        }
    }
}

/// Maps `model` to the spending breakdown and the financial overview.
///
/// # Examples
///
/// ```
/// use finance_core::{FinancialModel, project};
///
/// let projection = project(&FinancialModel::default());
/// assert_eq!(projection.spending.labels()[0], "Housing");
/// assert_eq!(projection.overview.labels(), ["Income", "Expenses", "Savings", "Debt"]);
/// ```
pub fn project(model: &FinancialModel) -> Projection {
    let spending = SpendingCategory::ALL
        .into_iter()
        .map(|category| SeriesPoint {
            label: category.label(),
            value: model.spending().get(category),
            color: category.color(),
        })
        .collect();

    let overview = vec![
        SeriesPoint {
            label: "Income",
            value: model.income(),
            color: "#10B981",
        },
        SeriesPoint {
            label: "Expenses",
            value: model.expenses(),
            color: "#3B82F6",
        },
        SeriesPoint {
            label: "Savings",
            value: model.savings(),
            color: "#8B5CF6",
        },
        SeriesPoint {
            label: "Debt",
            value: model.debt(),
            color: "#EF4444",
        },
    ];

    Projection {
        spending: ChartSeries {
            kind: ChartKind::SpendingBreakdown,
            points: spending,
        },
        overview: ChartSeries {
            kind: ChartKind::FinancialOverview,
            points: overview,
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FinancialInput, Spending};

    #[test]
    fn spending_series_uses_canonical_order() {
        let projection = project(&FinancialModel::default());

        assert_eq!(
            projection.spending.labels(),
            vec!["Housing", "Food", "Transportation", "Entertainment", "Healthcare", "Other"]
        );
        assert_eq!(
            projection.spending.values(),
            vec![dec!(1200), dec!(600), dec!(400), dec!(300), dec!(200), dec!(200)]
        );
    }

    #[test]
    fn labels_stay_paired_with_values() {
        let model = FinancialModel::from_input(FinancialInput {
            income: dec!(3000),
            spending: Spending {
                food: dec!(1),
                healthcare: dec!(2),
                ..Spending::default()
            },
            debt: dec!(0),
        })
        .unwrap();
        let projection = project(&model);

        let food = &projection.spending.points()[1];
        let healthcare = &projection.spending.points()[4];
        assert_eq!((food.label, food.value), ("Food", dec!(1)));
        assert_eq!((healthcare.label, healthcare.value), ("Healthcare", dec!(2)));
    }

    #[test]
    fn overview_series_derives_savings() {
        let projection = project(&FinancialModel::default());

        assert_eq!(
            projection.overview.values(),
            vec![dec!(5000), dec!(2900), dec!(2100), dec!(500)]
        );
    }

    #[test]
    fn overview_savings_may_be_negative() {
        let model = FinancialModel::from_input(FinancialInput {
            income: dec!(100),
            spending: Spending {
                other: dec!(250),
                ..Spending::default()
            },
            debt: dec!(0),
        })
        .unwrap();

        assert_eq!(project(&model).overview.values()[2], dec!(-150));
    }

    #[test]
    fn projecting_twice_is_identical() {
        let model = FinancialModel::default();

        assert_eq!(project(&model), project(&model));
    }

    #[test]
    fn series_lookup_by_kind() {
        let projection = project(&FinancialModel::default());

        for kind in ChartKind::ALL {
            assert_eq!(projection.series(kind).kind(), kind);
        }
        assert_eq!(projection.spending.len(), 6);
        assert_eq!(projection.overview.len(), 4);
    }
}
