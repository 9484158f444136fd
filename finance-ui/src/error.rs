//! Errors surfaced to the user by the assistant's front end.
//!
//! None of these are fatal: each one is reported and the session carries on.

use finance_core::{FinancialModelError, ResearchError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("unknown page '{0}'; expected one of: home, chat, analytics, research, faq")]
    UnknownPage(String),

    #[error("unknown user type '{0}'; expected student or professional")]
    UnknownUserType(String),

    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("there is no quick prompt #{}", .0 + 1)]
    UnknownQuickPrompt(usize),

    #[error("there is no FAQ item #{}", .0 + 1)]
    UnknownFaqItem(usize),

    #[error(transparent)]
    InvalidFinancialData(#[from] FinancialModelError),

    #[error(transparent)]
    Research(#[from] ResearchError),
}
