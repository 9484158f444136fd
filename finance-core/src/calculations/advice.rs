//! Rule-of-thumb advice derived from a [`FinancialModel`].
//!
//! These back the "Generate Summary" and "Get Insights" actions on the
//! analytics page.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::calculations::common::{exact_percent_of, max, percent_of};
use crate::models::{FinancialModel, Ratio};

/// Savings rate at or above which the budget is considered excellent.
pub const EXCELLENT_SAVINGS_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Savings rate at or above which the budget is considered good.
pub const GOOD_SAVINGS_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Share of income above which housing is flagged.
pub const HOUSING_SHARE_LIMIT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetTier {
    Excellent,
    Good,
    NeedsAttention,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAdvice {
    pub tier: BudgetTier,
    /// Amount left over each month, never below zero.
    pub monthly_savings: Decimal,
    pub message: &'static str,
}

/// Grades the savings rate of `model`.
///
/// # Examples
///
/// ```
/// use finance_core::FinancialModel;
/// use finance_core::calculations::advice::{BudgetTier, budget_advice};
///
/// let advice = budget_advice(&FinancialModel::default());
/// assert_eq!(advice.tier, BudgetTier::Excellent);
/// ```
pub fn budget_advice(model: &FinancialModel) -> BudgetAdvice {
    let monthly_savings = max(model.savings(), Decimal::ZERO);

    // Graded on the unrounded rate: 19.96% is not yet 20%.
    let rate = exact_percent_of(model.savings(), model.income()).unwrap_or(None);

    let (tier, message) = match rate {
        Some(rate) if rate >= EXCELLENT_SAVINGS_RATE => (
            BudgetTier::Excellent,
            "Excellent! You're saving above the recommended 20%.",
        ),
        Some(rate) if rate >= GOOD_SAVINGS_RATE => (
            BudgetTier::Good,
            "Good job! Try to increase savings to 20% if possible.",
        ),
        Some(_) => (
            BudgetTier::NeedsAttention,
            "Consider reducing expenses to save at least 10% of income.",
        ),
        None => (
            BudgetTier::NeedsAttention,
            "Add your monthly income to see how much of it you are saving.",
        ),
    };

    BudgetAdvice {
        tier,
        monthly_savings,
        message,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HousingInsight {
    /// Housing as a percentage of income.
    pub share: Ratio,
    pub over_limit: bool,
}

impl HousingInsight {
    pub fn message(&self) -> String {
        match self.share {
            Ratio::Percent(share) if self.over_limit => format!(
                "Your housing costs are {}% of income. Consider keeping it under \
                 {HOUSING_SHARE_LIMIT}% for better financial health.",
                whole(share)
            ),
            Ratio::Percent(share) => format!(
                "Your housing costs are {}% of income, within the recommended \
                 {HOUSING_SHARE_LIMIT}%.",
                whole(share)
            ),
            Ratio::Undefined => {
                "Housing share is unavailable until income is entered.".to_string()
            }
        }
    }
}

fn whole(share: Decimal) -> Decimal {
    share.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Compares housing spending against the 30% guideline.
///
/// A share too large to represent is reported as undefined.
pub fn housing_insight(model: &FinancialModel) -> HousingInsight {
    let housing = model.spending().housing;
    let share = percent_of(housing, model.income()).unwrap_or(Ratio::Undefined);
    let over_limit = exact_percent_of(housing, model.income())
        .unwrap_or(None)
        .is_some_and(|share| share > HOUSING_SHARE_LIMIT);

    HousingInsight { share, over_limit }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{FinancialInput, Spending};

    fn model(
        income: Decimal,
        housing: Decimal,
        other: Decimal,
    ) -> FinancialModel {
        FinancialModel::from_input(FinancialInput {
            income,
            spending: Spending {
                housing,
                other,
                ..Spending::default()
            },
            debt: Decimal::ZERO,
        })
        .unwrap()
    }

    #[test]
    fn budget_advice_excellent_at_twenty_percent() {
        let advice = budget_advice(&model(dec!(1000), dec!(500), dec!(300)));

        assert_eq!(advice.tier, BudgetTier::Excellent);
        assert_eq!(advice.monthly_savings, dec!(200));
    }

    #[test]
    fn budget_advice_good_between_ten_and_twenty() {
        let advice = budget_advice(&model(dec!(1000), dec!(500), dec!(350)));

        assert_eq!(advice.tier, BudgetTier::Good);
    }

    #[test]
    fn budget_advice_just_below_twenty_percent_is_good() {
        // 19.96% would display as 20.0%.
        let advice = budget_advice(&model(dec!(10000), dec!(8004), dec!(0)));

        assert_eq!(advice.tier, BudgetTier::Good);
    }

    #[test]
    fn budget_advice_just_below_ten_percent_needs_attention() {
        let advice = budget_advice(&model(dec!(10000), dec!(9004), dec!(0)));

        assert_eq!(advice.tier, BudgetTier::NeedsAttention);
    }

    #[test]
    fn budget_advice_flags_low_savings() {
        let advice = budget_advice(&model(dec!(1000), dec!(800), dec!(150)));

        assert_eq!(advice.tier, BudgetTier::NeedsAttention);
    }

    #[test]
    fn budget_advice_clamps_negative_savings() {
        let advice = budget_advice(&model(dec!(1000), dec!(1500), dec!(0)));

        assert_eq!(advice.monthly_savings, Decimal::ZERO);
        assert_eq!(advice.tier, BudgetTier::NeedsAttention);
    }

    #[test]
    fn budget_advice_without_income() {
        let advice = budget_advice(&model(dec!(0), dec!(100), dec!(0)));

        assert_eq!(advice.tier, BudgetTier::NeedsAttention);
        assert!(advice.message.contains("income"));
    }

    #[test]
    fn housing_insight_flags_share_above_limit() {
        let insight = housing_insight(&model(dec!(3500), dec!(1200), dec!(0)));

        assert_eq!(insight.share, Ratio::Percent(dec!(34.3)));
        assert!(insight.over_limit);
        assert!(insight.message().contains("34%"));
    }

    #[test]
    fn housing_insight_accepts_share_at_limit() {
        let insight = housing_insight(&model(dec!(4000), dec!(1200), dec!(0)));

        assert_eq!(insight.share, Ratio::Percent(dec!(30.0)));
        assert!(!insight.over_limit);
    }

    #[test]
    fn housing_insight_flags_share_just_above_limit() {
        // 30.04% displays as 30.0% but is over the limit.
        let insight = housing_insight(&model(dec!(10000), dec!(3004), dec!(0)));

        assert_eq!(insight.share, Ratio::Percent(dec!(30.0)));
        assert!(insight.over_limit);
    }

    #[test]
    fn housing_insight_undefined_without_income() {
        let insight = housing_insight(&model(dec!(0), dec!(1200), dec!(0)));

        assert!(insight.share.is_undefined());
        assert!(!insight.over_limit);
    }
}
