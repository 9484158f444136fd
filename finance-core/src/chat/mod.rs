//! Chat content: the reply lookup and the fixed prompts offered to the user.

pub mod responder;

pub use responder::{
    DEFAULT_RULES, FALLBACK_TEMPLATE, KeywordResponder, ResponseLookup, ResponseRule, Topic,
    generate_response,
};

/// Prompt cards shown beside the chat input.
pub const QUICK_PROMPTS: [&str; 6] = [
    "Help me create a monthly budget",
    "What are the best investment options for beginners?",
    "How can I reduce my monthly expenses?",
    "Explain tax deductions I might be missing",
    "Should I pay off debt or invest first?",
    "How much should I save for an emergency fund?",
];

/// Shown in place of the log while it is empty.
pub const WELCOME_TEXT: &str = "Welcome to FinanceAI. I'm your personal finance assistant. Ask \
    me anything about budgeting, investing, saving, or managing your finances!";
