use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level sections of the assistant. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Chat,
    Analytics,
    Research,
    Faq,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Chat,
        Page::Analytics,
        Page::Research,
        Page::Faq,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Chat => "chat",
            Self::Analytics => "analytics",
            Self::Research => "research",
            Self::Faq => "faq",
        }
    }

    /// Case-insensitive lookup by page identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Chat => "AI Assistant",
            Self::Analytics => "Financial Analytics",
            Self::Research => "Research Hub",
            Self::Faq => "Help & FAQ",
        }
    }

    /// Whether this page hosts the two charts.
    pub fn shows_charts(&self) -> bool {
        matches!(self, Self::Analytics)
    }
}

impl fmt::Display for Page {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
