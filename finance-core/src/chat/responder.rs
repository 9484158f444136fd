//! Canned assistant replies selected by keyword.
//!
//! Rules are evaluated in order and the first rule with a keyword contained
//! in the message wins. Matching is case-insensitive. If nothing matches, the
//! fallback template is used. Templates may contain `{user_type}`, which is
//! replaced with the user type's name.

use crate::models::UserType;

/// Placeholder replaced with [`UserType::as_str`] in templates.
pub const USER_TYPE_PLACEHOLDER: &str = "{user_type}";

/// Anything that can answer a chat message.
pub trait ResponseLookup: Send + Sync {
    fn respond(
        &self,
        text: &str,
        user_type: UserType,
    ) -> String;
}

/// What a message was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Budget,
    Invest,
    Expenses,
    Tax,
    Debt,
    Emergency,
    General,
}

/// Keyword predicate paired with the template it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    pub topic: Topic,
    /// Lowercase keywords; any one of them selects this rule.
    pub keywords: &'static [&'static str],
    pub template: &'static str,
}

impl ResponseRule {
    fn matches(
        &self,
        lowered: &str,
    ) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub const DEFAULT_RULES: [ResponseRule; 6] = [
    ResponseRule {
        topic: Topic::Budget,
        keywords: &["budget"],
        template: "As a {user_type}, I recommend the 50/30/20 budgeting rule: 50% for needs, \
                   30% for wants, and 20% for savings and debt repayment. Based on your profile, \
                   let's build a budget plan that fits your financial goals.",
    },
    ResponseRule {
        topic: Topic::Invest,
        keywords: &["invest"],
        template: "For {user_type}s, I suggest starting with low-cost index funds and ETFs. \
                   Consider a Roth IRA or 401(k) if one is available to you. Start with small, \
                   consistent contributions and increase them as you grow more comfortable.",
    },
    ResponseRule {
        topic: Topic::Expenses,
        keywords: &["expense", "reduce"],
        template: "Let's look at your spending patterns. Common areas to cut back are dining \
                   out, subscription services, and impulse purchases. Track your expenses for a \
                   month and flag anything that is not essential.",
    },
    ResponseRule {
        topic: Topic::Tax,
        keywords: &["tax"],
        template: "Deductions people often miss: student loan interest, retirement \
                   contributions, education expenses, and home office costs where they apply. \
                   A tax professional can confirm what fits your situation.",
    },
    ResponseRule {
        topic: Topic::Debt,
        keywords: &["debt"],
        template: "The debt avalanche method pays off the highest-interest debt first. If your \
                   debt is low-interest and you have no emergency fund yet, consider building \
                   3-6 months of expenses first. Balance is key!",
    },
    ResponseRule {
        topic: Topic::Emergency,
        keywords: &["emergency"],
        template: "Aim for 3-6 months of living expenses in your emergency fund. For \
                   {user_type}s, start with $1,000 and build from there. Keep it in a \
                   high-yield savings account so it stays easy to reach.",
    },
];

pub const FALLBACK_TEMPLATE: &str = "I'm here to help with all your financial questions! I can \
    guide you on budgeting, investing, saving, debt management, and more. Ask me anything \
    specific about your financial situation.";

/// Ordered, first-match-wins keyword table.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<ResponseRule>,
    fallback: &'static str,
}

impl KeywordResponder {
    pub fn new(
        rules: Vec<ResponseRule>,
        fallback: &'static str,
    ) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    /// Topic of the first rule matching `text`, or [`Topic::General`].
    pub fn classify(
        &self,
        text: &str,
    ) -> Topic {
        self.matching_rule(text)
            .map_or(Topic::General, |rule| rule.topic)
    }

    /// Template selected for `text`, before interpolation.
    pub fn template_for(
        &self,
        text: &str,
    ) -> &'static str {
        self.matching_rule(text)
            .map_or(self.fallback, |rule| rule.template)
    }

    fn matching_rule(
        &self,
        text: &str,
    ) -> Option<&ResponseRule> {
        let lowered = text.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.to_vec(), FALLBACK_TEMPLATE)
    }
}

impl ResponseLookup for KeywordResponder {
    fn respond(
        &self,
        text: &str,
        user_type: UserType,
    ) -> String {
        interpolate(self.template_for(text), user_type)
    }
}

fn interpolate(
    template: &str,
    user_type: UserType,
) -> String {
    template.replace(USER_TYPE_PLACEHOLDER, user_type.as_str())
}

/// Answers `text` with the default rule table.
pub fn generate_response(
    text: &str,
    user_type: UserType,
) -> String {
    KeywordResponder::default().respond(text, user_type)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn classify_matches_each_keyword() {
        let responder = KeywordResponder::default();
        let cases = [
            ("Help me create a monthly budget", Topic::Budget),
            ("Where should I invest?", Topic::Invest),
            ("my expenses are high", Topic::Expenses),
            ("how do I reduce spending", Topic::Expenses),
            ("tax deductions?", Topic::Tax),
            ("I have credit card debt", Topic::Debt),
            ("emergency fund size", Topic::Emergency),
            ("hello there", Topic::General),
        ];

        for (text, topic) in cases {
            assert_eq!(responder.classify(text), topic, "classifying {text:?}");
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(KeywordResponder::default().classify("BUDGET"), Topic::Budget);
    }

    #[test]
    fn first_matching_rule_wins() {
        // Mentions debt, invest and budget; budget is listed first.
        let text = "Should I pay off debt or invest, given my budget?";

        assert_eq!(KeywordResponder::default().classify(text), Topic::Budget);
        assert_eq!(
            KeywordResponder::default().classify("Should I pay off debt or invest first?"),
            Topic::Invest
        );
    }

    #[test]
    fn keywords_match_inside_words() {
        // Substring matching: "taxi" contains "tax".
        assert_eq!(KeywordResponder::default().classify("taxi fares"), Topic::Tax);
    }

    #[test]
    fn respond_interpolates_user_type() {
        let reply = generate_response("What's a good budget rule?", UserType::Student);

        assert!(reply.starts_with("As a student, I recommend the 50/30/20"));
        assert!(!reply.contains(USER_TYPE_PLACEHOLDER));
    }

    #[test]
    fn respond_is_deterministic() {
        let a = generate_response("emergency savings", UserType::Professional);
        let b = generate_response("emergency savings", UserType::Professional);

        assert_eq!(a, b);
        assert!(a.contains("For professionals"));
    }

    #[test]
    fn fallback_when_nothing_matches() {
        assert_eq!(generate_response("hi", UserType::Student), FALLBACK_TEMPLATE);
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let responder = KeywordResponder::new(
            vec![ResponseRule {
                topic: Topic::Tax,
                keywords: &["irs"],
                template: "ask the {user_type} desk",
            }],
            "no idea",
        );

        assert_eq!(
            responder.respond("IRS letter", UserType::Professional),
            "ask the professional desk"
        );
        assert_eq!(responder.respond("budget", UserType::Student), "no idea");
    }
}
