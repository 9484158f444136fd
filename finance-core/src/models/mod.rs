mod chat_message;
mod financial_model;
mod page;
mod spending;
mod user_type;

pub use chat_message::{ChatMessage, Role};
pub use financial_model::{
    FieldError, FinancialField, FinancialInput, FinancialModel, FinancialModelError,
    RawFinancialInput, Ratio,
};
pub use page::Page;
pub use spending::{Spending, SpendingCategory};
pub use user_type::UserType;
