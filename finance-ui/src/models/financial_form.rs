use std::fmt;

use finance_core::{FinancialField, FinancialModel, FinancialModelError, RawFinancialInput};

use crate::error::AppError;

/// Values typed into the analytics data form, not yet validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FinancialFormModel {
    raw: RawFinancialInput,
}

impl FinancialFormModel {
    /// A form showing the values `model` was built from.
    pub fn prefilled(model: &FinancialModel) -> Self {
        Self {
            raw: RawFinancialInput::from(model),
        }
    }

    pub fn raw(&self) -> &RawFinancialInput {
        &self.raw
    }

    pub fn get(
        &self,
        field: FinancialField,
    ) -> &str {
        self.raw.get(field)
    }

    /// Sets a field by its form name (`income`, `housing`, ..., `debt`).
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<FinancialField, AppError> {
        let field = FinancialField::parse(name)
            .ok_or_else(|| AppError::UnknownField(name.trim().to_string()))?;
        self.raw.set(field, value);
        Ok(field)
    }

    /// Builds the model this form describes.
    ///
    /// Rules:
    /// - every field is required
    /// - every field must be a non-negative number
    pub fn validate_for_submit(&self) -> Result<FinancialModel, FinancialModelError> {
        FinancialModel::update(&self.raw)
    }
}

impl fmt::Display for FinancialFormModel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, field) in FinancialField::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let name = format!("[{}]", field.name());
            write!(f, "{:<16} {name:<15} {}", field.label(), self.get(field))?;
        }
        Ok(())
    }
}
