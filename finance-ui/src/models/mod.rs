pub mod financial_form;

pub use financial_form::FinancialFormModel;
