//! Application state for the finance assistant.
//!
//! One `AppState` exists per session. It is owned by the application and
//! lent to each component that needs it; nothing in the crate reaches it
//! through a global.

use finance_core::{ChatMessage, FinancialModel, Page, ResearchStore, UserType};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    current_page: Page,
    /// Audience for chat replies. Never affects calculations.
    pub user_type: UserType,
    messages: Vec<ChatMessage>,
    financial_data: FinancialModel,
    pub research: ResearchStore,
}

impl AppState {
    /// Creates the start-of-session state: home page, empty chat, sample
    /// financial data, no research topics.
    pub fn new(user_type: UserType) -> Self {
        Self {
            user_type,
            ..Default::default()
        }
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub(crate) fn set_current_page(
        &mut self,
        page: Page,
    ) {
        self.current_page = page;
    }

    /// Chat log, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub(crate) fn push_message(
        &mut self,
        message: ChatMessage,
    ) {
        debug!(
            role = message.role().as_str(),
            index = self.messages.len(),
            "appending chat message"
        );
        self.messages.push(message);
    }

    pub(crate) fn clear_messages(&mut self) {
        self.messages.clear();
    }

    /// The welcome placeholder is shown exactly when the log is empty.
    pub fn welcome_visible(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn financial_data(&self) -> &FinancialModel {
        &self.financial_data
    }

    /// Swaps in a complete new model and returns the previous one.
    pub(crate) fn replace_financial_data(
        &mut self,
        model: FinancialModel,
    ) -> FinancialModel {
        info!(
            income = %model.income(),
            expenses = %model.expenses(),
            "financial data replaced"
        );
        std::mem::replace(&mut self.financial_data, model)
    }
}
