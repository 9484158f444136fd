use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned topic identifier. Never reused after a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TopicId(pub u32);

impl fmt::Display for TopicId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchTopic {
    pub id: TopicId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchTopic {
    /// Case-insensitive substring match on title or content.
    pub fn mentions(
        &self,
        keyword: &str,
    ) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword)
            || self.content.to_lowercase().contains(&keyword)
    }

    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for ResearchTopic {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, self.title)?;
        writeln!(f, "{}", self.content)?;
        if !self.tags.is_empty() {
            writeln!(f, "Tags: {}", self.tags.join(", "))?;
        }
        write!(f, "Updated {}", self.updated_at.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// For adding topics (no id or timestamps).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResearchTopic {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewResearchTopic {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tags,
        }
    }
}

/// Partial edit. `None` and blank text leave a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Splits comma-separated tag input, trimming each tag and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    fn topic() -> ResearchTopic {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        ResearchTopic {
            id: TopicId(4),
            title: "Roth IRA".to_string(),
            content: "Contributions grow tax free.".to_string(),
            tags: vec!["Tax".to_string(), "Investment".to_string()],
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            parse_tags(" savings, ,emergency ,strategy,"),
            vec!["savings", "emergency", "strategy"]
        );
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn keyword_and_tag_matching_ignore_case() {
        let topic = topic();

        assert!(topic.mentions("roth"));
        assert!(topic.mentions("TAX FREE"));
        assert!(!topic.mentions("bonds"));
        assert!(topic.has_tag("investment"));
        assert!(!topic.has_tag("Debt"));
    }

    #[test]
    fn display_lists_tags_and_update_time() {
        assert_eq!(
            topic().to_string(),
            "#4 Roth IRA\nContributions grow tax free.\nTags: Tax, Investment\n\
             Updated 2024-03-01 09:30:00"
        );
    }
}
