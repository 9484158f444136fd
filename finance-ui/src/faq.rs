//! Help page: frequently asked questions shown as an accordion.

use tracing::debug;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqItem {
    pub question: &'static str,
    pub answer: &'static str,
}

pub static FAQ_ITEMS: [FaqItem; 6] = [
    FaqItem {
        question: "How do I get started?",
        answer: "Open the chat page and ask a question, or pick one of the quick prompts. \
                 Enter your monthly numbers on the analytics page to see your own figures.",
    },
    FaqItem {
        question: "Is my financial data stored anywhere?",
        answer: "No. Everything lives in memory for the current session and is gone when you quit.",
    },
    FaqItem {
        question: "What is the difference between student and professional mode?",
        answer: "The mode only changes how the assistant phrases its replies. \
                 Calculations are identical in both modes.",
    },
    FaqItem {
        question: "How is my savings rate calculated?",
        answer: "Savings are income minus total spending. The savings rate is savings as a \
                 percentage of income, shown as N/A when income is zero.",
    },
    FaqItem {
        question: "Why did my numbers not update?",
        answer: "Every field must hold a non-negative number. If any field is rejected the \
                 previous figures are kept unchanged.",
    },
    FaqItem {
        question: "Can I export my financial data?",
        answer: "Not yet. Data is session-based; copy the summary from the analytics page if \
                 you want to keep it.",
    },
];

/// Accordion state: at most one item is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    open: Option<usize>,
}

impl FaqAccordion {
    /// Opens item `index`, closing every other item. Toggling the open item
    /// closes it. Returns the item now open, if any.
    pub fn toggle(
        &mut self,
        index: usize,
    ) -> Result<Option<usize>, AppError> {
        if index >= FAQ_ITEMS.len() {
            return Err(AppError::UnknownFaqItem(index));
        }

        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        debug!(index, open = ?self.open, "faq toggled");
        Ok(self.open)
    }

    pub fn open_item(&self) -> Option<&'static FaqItem> {
        self.open.and_then(|i| FAQ_ITEMS.get(i))
    }

    pub fn is_open(
        &self,
        index: usize,
    ) -> bool {
        self.open == Some(index)
    }
}
