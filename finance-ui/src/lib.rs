pub mod app;
pub mod charts;
pub mod chat_session;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod faq;
pub mod logging;
pub mod models;
pub mod router;
pub mod scheduler;
pub mod state;
pub mod utils;

pub use app::{AppEvent, FinanceApp};
pub use error::AppError;
