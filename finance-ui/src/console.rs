//! Plain-text views printed by the terminal front end.

use std::fmt::Write;

use finance_core::calculations::{BudgetAdvice, HousingInsight};
use finance_core::chat::{QUICK_PROMPTS, WELCOME_TEXT};
use finance_core::research::TAG_FILTERS;
use finance_core::{ChatMessage, FinancialModel, Page, ResearchStore, ResearchTopic, Role};

use crate::faq::{FAQ_ITEMS, FaqAccordion};
use crate::state::AppState;
use crate::utils::{format_amount, format_ratio};

pub fn message_line(message: &ChatMessage) -> String {
    let speaker = match message.role() {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    format!("{speaker}: {}", message.content())
}

/// Header, mode label and page body shown after navigating.
pub fn page_view(
    state: &AppState,
    faq: &FaqAccordion,
) -> String {
    let page = state.current_page();
    let mut out = format!("== {} ==  [{}]\n", page.title(), state.user_type.mode_label());

    match page {
        Page::Home => {
            out.push_str("Use /nav chat, /nav analytics or /nav research to get started.\n")
        }
        Page::Chat => {
            if state.welcome_visible() {
                let _ = writeln!(out, "{WELCOME_TEXT}");
                out.push_str(&quick_prompts());
            } else {
                for message in state.messages() {
                    let _ = writeln!(out, "{}", message_line(message));
                }
            }
        }
        Page::Analytics => out.push_str(&metric_summary(state.financial_data())),
        Page::Research => out.push_str(&research_list(&state.research)),
        Page::Faq => out.push_str(&faq_list(faq)),
    }
    out
}

pub fn quick_prompts() -> String {
    let mut out = String::from("Quick prompts:\n");
    for (i, prompt) in QUICK_PROMPTS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {prompt}", i + 1);
    }
    out
}

pub fn metric_summary(model: &FinancialModel) -> String {
    format!(
        "Monthly income:   ${}\n\
         Monthly expenses: ${}\n\
         Savings rate:     {}\n\
         Debt ratio:       {}\n",
        format_amount(model.income()),
        format_amount(model.expenses()),
        format_ratio(model.savings_rate()),
        format_ratio(model.debt_ratio()),
    )
}

pub fn advice_view(advice: &BudgetAdvice) -> String {
    format!(
        "{}\nMonthly savings: ${}\n",
        advice.message,
        format_amount(advice.monthly_savings)
    )
}

pub fn insight_view(insight: &HousingInsight) -> String {
    let marker = if insight.over_limit { "!" } else { "-" };
    format!("{marker} {}\n", insight.message())
}

/// Topic count, tag filters, then every topic newest first.
pub fn research_list(store: &ResearchStore) -> String {
    let mut out = format!("Total topics: {}\n", store.len());
    let _ = writeln!(out, "Filter tags: {}", TAG_FILTERS.join(", "));
    if store.is_empty() {
        out.push_str("No topics saved yet. Add one with /research add, or /research samples.\n");
        return out;
    }
    for topic in store.newest_first() {
        let _ = writeln!(out, "\n{topic}");
    }
    out
}

/// Matches from a search or tag filter, in the order given.
pub fn topic_matches(
    label: &str,
    topics: &[&ResearchTopic],
) -> String {
    let mut out = format!("{} topic(s) for '{label}'\n", topics.len());
    for topic in topics {
        let _ = writeln!(out, "\n{topic}");
    }
    out
}

pub fn faq_list(faq: &FaqAccordion) -> String {
    let mut out = String::new();
    for (i, item) in FAQ_ITEMS.iter().enumerate() {
        let marker = if faq.is_open(i) { "v" } else { ">" };
        let _ = writeln!(out, "{marker} {}. {}", i + 1, item.question);
        if faq.is_open(i) {
            let _ = writeln!(out, "    {}", item.answer);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use finance_core::UserType;
    use finance_core::calculations::{budget_advice, housing_insight};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn summary_uses_separators_and_one_decimal() {
        assert_eq!(
            metric_summary(&FinancialModel::default()),
            "Monthly income:   $5,000\n\
             Monthly expenses: $2,900\n\
             Savings rate:     42.0%\n\
             Debt ratio:       10.0%\n"
        );
    }

    #[test]
    fn chat_page_shows_welcome_while_empty() {
        let mut state = AppState::new(UserType::Professional);
        state.set_current_page(Page::Chat);

        let view = page_view(&state, &FaqAccordion::default());

        assert!(view.starts_with("== AI Assistant ==  [Professional Mode]"));
        assert!(view.contains(WELCOME_TEXT));
        assert!(view.contains("1. Help me create a monthly budget"));
    }

    #[test]
    fn chat_page_lists_messages() {
        let mut state = AppState::default();
        state.set_current_page(Page::Chat);
        state.push_message(ChatMessage::user("hi"));

        let view = page_view(&state, &FaqAccordion::default());

        assert!(!view.contains(WELCOME_TEXT));
        assert!(view.contains("You: hi"));
    }

    #[test]
    fn faq_list_expands_open_item_only() {
        let mut faq = FaqAccordion::default();
        faq.toggle(1).unwrap();

        let text = faq_list(&faq);

        assert!(text.contains(&format!("v 2. {}", FAQ_ITEMS[1].question)));
        assert!(text.contains(FAQ_ITEMS[1].answer));
        assert!(!text.contains(FAQ_ITEMS[0].answer));
    }

    #[test]
    fn research_page_counts_topics_newest_first() {
        let mut state = AppState::default();
        state.set_current_page(Page::Research);
        assert!(page_view(&state, &FaqAccordion::default()).contains("Total topics: 0"));

        state.research.add_samples(chrono::Utc::now());
        let view = page_view(&state, &FaqAccordion::default());

        assert!(view.starts_with("== Research Hub =="));
        assert!(view.contains("Total topics: 2"));
        let newest = view.find("#2 Investment Basics for Beginners").unwrap();
        let oldest = view.find("#1 Emergency Fund Strategies").unwrap();
        assert!(newest < oldest);
        assert!(view.contains("Tags: Emergency Fund, Savings, Financial Security"));
    }

    #[test]
    fn advice_and_insight_render() {
        let model = FinancialModel::default();

        assert!(advice_view(&budget_advice(&model)).ends_with("Monthly savings: $2,100\n"));
        assert!(insight_view(&housing_insight(&model)).starts_with("- "));
    }
}
