//! The user's monthly financial picture and the metrics derived from it.
//!
//! A [`FinancialModel`] is never edited in place. Each form submission builds
//! a complete new model with [`FinancialModel::update`]; if any field is
//! rejected no model is produced, so readers only ever see a fully derived
//! snapshot.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::{AmountError, Overflow, parse_amount, percent_of};
use crate::models::{Spending, SpendingCategory};

/// A percentage derived from income.
///
/// `Undefined` is the sentinel used when income is zero and the ratio has no
/// meaning. It is displayed as `N/A` and never converted to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ratio {
    /// Percentage rounded to one decimal place.
    Percent(Decimal),
    Undefined,
}

impl Ratio {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Percent(v) => Some(*v),
            Self::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }
}

impl fmt::Display for Ratio {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Percent(v) => write!(f, "{v:.1}"),
            Self::Undefined => f.write_str("N/A"),
        }
    }
}

/// One of the eight numeric fields on the financial data form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialField {
    Income,
    Spending(SpendingCategory),
    Debt,
}

impl FinancialField {
    /// Form order: income, the six categories, then debt.
    pub const ALL: [FinancialField; 8] = [
        FinancialField::Income,
        FinancialField::Spending(SpendingCategory::Housing),
        FinancialField::Spending(SpendingCategory::Food),
        FinancialField::Spending(SpendingCategory::Transportation),
        FinancialField::Spending(SpendingCategory::Entertainment),
        FinancialField::Spending(SpendingCategory::Healthcare),
        FinancialField::Spending(SpendingCategory::Other),
        FinancialField::Debt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Spending(category) => category.as_str(),
            Self::Debt => "debt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Monthly Income",
            Self::Spending(category) => category.label(),
            Self::Debt => "Total Debt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for FinancialField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rejected form field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct FieldError {
    pub field: FinancialField,
    pub reason: AmountError,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FinancialModelError {
    /// One or more fields were missing, non-numeric or negative.
    #[error("invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<FieldError>),

    #[error("amounts are too large to combine")]
    Overflow(#[from] Overflow),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The raw text of the eight form fields, exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFinancialInput {
    pub income: String,
    pub housing: String,
    pub food: String,
    pub transportation: String,
    pub entertainment: String,
    pub healthcare: String,
    pub other: String,
    pub debt: String,
}

impl RawFinancialInput {
    pub fn get(
        &self,
        field: FinancialField,
    ) -> &str {
        match field {
            FinancialField::Income => &self.income,
            FinancialField::Spending(SpendingCategory::Housing) => &self.housing,
            FinancialField::Spending(SpendingCategory::Food) => &self.food,
            FinancialField::Spending(SpendingCategory::Transportation) => &self.transportation,
            FinancialField::Spending(SpendingCategory::Entertainment) => &self.entertainment,
            FinancialField::Spending(SpendingCategory::Healthcare) => &self.healthcare,
            FinancialField::Spending(SpendingCategory::Other) => &self.other,
            FinancialField::Debt => &self.debt,
        }
    }

    pub fn set(
        &mut self,
        field: FinancialField,
        value: impl Into<String>,
    ) {
        let slot = match field {
            FinancialField::Income => &mut self.income,
            FinancialField::Spending(SpendingCategory::Housing) => &mut self.housing,
            FinancialField::Spending(SpendingCategory::Food) => &mut self.food,
            FinancialField::Spending(SpendingCategory::Transportation) => &mut self.transportation,
            FinancialField::Spending(SpendingCategory::Entertainment) => &mut self.entertainment,
            FinancialField::Spending(SpendingCategory::Healthcare) => &mut self.healthcare,
            FinancialField::Spending(SpendingCategory::Other) => &mut self.other,
            FinancialField::Debt => &mut self.debt,
        };
        *slot = value.into();
    }
}

/// Prefills the form with the values a model was built from.
impl From<&FinancialModel> for RawFinancialInput {
    fn from(model: &FinancialModel) -> Self {
        let mut raw = RawFinancialInput::default();
        raw.set(FinancialField::Income, model.income.to_string());
        for (category, amount) in model.spending.iter() {
            raw.set(FinancialField::Spending(category), amount.to_string());
        }
        raw.set(FinancialField::Debt, model.debt.to_string());
        raw
    }
}

/// Parsed, user-entered values. Everything else in a model is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialInput {
    pub income: Decimal,
    pub spending: Spending,
    pub debt: Decimal,
}

impl FinancialInput {
    /// Parses every field, reporting all rejected fields at once.
    pub fn parse(raw: &RawFinancialInput) -> Result<Self, FinancialModelError> {
        let mut input = FinancialInput::default();
        let mut errors = Vec::new();

        for field in FinancialField::ALL {
            match parse_amount(raw.get(field)) {
                Ok(amount) => input.set(field, amount),
                Err(reason) => errors.push(FieldError { field, reason }),
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            Err(FinancialModelError::InvalidInput(errors))
        }
    }

    pub fn get(
        &self,
        field: FinancialField,
    ) -> Decimal {
        match field {
            FinancialField::Income => self.income,
            FinancialField::Spending(category) => self.spending.get(category),
            FinancialField::Debt => self.debt,
        }
    }

    pub fn set(
        &mut self,
        field: FinancialField,
        amount: Decimal,
    ) {
        match field {
            FinancialField::Income => self.income = amount,
            FinancialField::Spending(category) => self.spending.set(category, amount),
            FinancialField::Debt => self.debt = amount,
        }
    }

    fn check_non_negative(&self) -> Result<(), FinancialModelError> {
        let errors: Vec<_> = FinancialField::ALL
            .into_iter()
            .filter(|&field| self.get(field) < Decimal::ZERO)
            .map(|field| FieldError {
                field,
                reason: AmountError::Negative(self.get(field).to_string()),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(FinancialModelError::InvalidInput(errors))
        }
    }
}

/// A complete, internally consistent snapshot of the user's finances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialModel {
    income: Decimal,
    spending: Spending,
    expenses: Decimal,
    savings: Decimal,
    debt: Decimal,
    savings_rate: Ratio,
    debt_ratio: Ratio,
}

impl FinancialModel {
    /// Parses raw form text and derives a new model from it.
    ///
    /// # Errors
    ///
    /// * [`FinancialModelError::InvalidInput`] when any field is missing,
    ///   non-numeric or negative. Every offending field is listed.
    /// * [`FinancialModelError::Overflow`] when the amounts cannot be summed.
    pub fn update(raw: &RawFinancialInput) -> Result<Self, FinancialModelError> {
        let input = FinancialInput::parse(raw)?;
        Self::from_input(input)
    }

    /// Derives totals and ratios from already-parsed values.
    pub fn from_input(input: FinancialInput) -> Result<Self, FinancialModelError> {
        input.check_non_negative()?;

        let expenses = input.spending.total()?;
        let savings = input.income.checked_sub(expenses).ok_or(Overflow)?;
        let savings_rate = percent_of(savings, input.income)?;
        let debt_ratio = percent_of(input.debt, input.income)?;

        debug!(
            income = %input.income,
            %expenses,
            %savings_rate,
            %debt_ratio,
            "derived financial model"
        );

        Ok(Self {
            income: input.income,
            spending: input.spending,
            expenses,
            savings,
            debt: input.debt,
            savings_rate,
            debt_ratio,
        })
    }

    pub fn income(&self) -> Decimal {
        self.income
    }

    pub fn spending(&self) -> &Spending {
        &self.spending
    }

    /// Sum of all spending categories.
    pub fn expenses(&self) -> Decimal {
        self.expenses
    }

    /// Income minus expenses. Negative when overspending.
    pub fn savings(&self) -> Decimal {
        self.savings
    }

    pub fn debt(&self) -> Decimal {
        self.debt
    }

    pub fn savings_rate(&self) -> Ratio {
        self.savings_rate
    }

    pub fn debt_ratio(&self) -> Ratio {
        self.debt_ratio
    }

    pub fn input(&self) -> FinancialInput {
        FinancialInput {
            income: self.income,
            spending: self.spending,
            debt: self.debt,
        }
    }
}

/// The sample household the assistant starts with.
impl Default for FinancialModel {
    fn default() -> Self {
        Self {
            income: Decimal::new(5000, 0),
            spending: Spending {
                housing: Decimal::new(1200, 0),
                food: Decimal::new(600, 0),
                transportation: Decimal::new(400, 0),
                entertainment: Decimal::new(300, 0),
                healthcare: Decimal::new(200, 0),
                other: Decimal::new(200, 0),
            },
            expenses: Decimal::new(2900, 0),
            savings: Decimal::new(2100, 0),
            debt: Decimal::new(500, 0),
            savings_rate: Ratio::Percent(Decimal::new(420, 1)),
            debt_ratio: Ratio::Percent(Decimal::new(100, 1)),
        }
    }
}

impl fmt::Display for FinancialModel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Income:       {}", self.income)?;
        writeln!(f, "Expenses:     {}", self.expenses)?;
        writeln!(f, "Savings:      {}", self.savings)?;
        writeln!(f, "Debt:         {}", self.debt)?;
        writeln!(f, "Savings rate: {}", self.savings_rate)?;
        write!(f, "Debt ratio:   {}", self.debt_ratio)
    }
}
