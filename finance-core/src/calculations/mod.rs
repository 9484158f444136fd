//! Financial calculations.
//!
//! `common` holds the arithmetic shared by the model and the advice helpers;
//! `advice` turns a model into rule-of-thumb guidance.

pub mod advice;
pub mod common;

pub use advice::{BudgetAdvice, BudgetTier, HousingInsight, budget_advice, housing_insight};
pub use common::{AmountError, Overflow};
