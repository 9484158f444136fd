use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use super::topic::{NewResearchTopic, ResearchTopic, TopicId, TopicUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResearchError {
    #[error("a research topic needs a title")]
    MissingTitle,

    #[error("a research topic needs content")]
    MissingContent,

    #[error("there is no research topic #{0}")]
    NotFound(TopicId),
}

/// Tag choices offered by the research page filter.
pub const TAG_FILTERS: [&str; 5] = ["Savings", "Investment", "Tax", "Debt", "Budget"];

/// Topics added by `add_samples` on an empty store.
pub const SAMPLE_TOPICS: [(&str, &str, &[&str]); 2] = [
    (
        "Emergency Fund Strategies",
        "Building and maintaining an emergency fund for financial security. \
         Experts recommend 3-6 months of living expenses saved.",
        &["Emergency Fund", "Savings", "Financial Security"],
    ),
    (
        "Investment Basics for Beginners",
        "Understanding fundamental investment concepts: stocks, bonds, mutual funds, \
         and ETFs. Diversification is key to managing risk.",
        &["Investing", "Stocks", "Bonds", "Beginner"],
    ),
];

/// In-memory research notes for the session, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResearchStore {
    topics: Vec<ResearchTopic>,
    last_id: u32,
}

impl ResearchStore {
    /// Adds a topic stamped with `now`. Title and content are trimmed and
    /// must not be blank.
    pub fn add(
        &mut self,
        topic: NewResearchTopic,
        now: DateTime<Utc>,
    ) -> Result<&ResearchTopic, ResearchError> {
        let title = topic.title.trim();
        let content = topic.content.trim();
        if title.is_empty() {
            return Err(ResearchError::MissingTitle);
        }
        if content.is_empty() {
            return Err(ResearchError::MissingContent);
        }

        self.last_id += 1;
        let id = TopicId(self.last_id);
        info!(%id, title, "research topic added");

        self.topics.push(ResearchTopic {
            id,
            title: title.to_string(),
            content: content.to_string(),
            tags: topic.tags,
            created_at: now,
            updated_at: now,
        });
        let index = self.topics.len() - 1;
        Ok(&self.topics[index])
    }

    pub fn get(
        &self,
        id: TopicId,
    ) -> Option<&ResearchTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Oldest first.
    pub fn topics(&self) -> &[ResearchTopic] {
        &self.topics
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &ResearchTopic> {
        self.topics.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topics whose title or content contains `keyword`, ignoring case.
    pub fn search(
        &self,
        keyword: &str,
    ) -> Vec<&ResearchTopic> {
        let keyword = keyword.trim();
        self.topics.iter().filter(|t| t.mentions(keyword)).collect()
    }

    pub fn with_tag(
        &self,
        tag: &str,
    ) -> Vec<&ResearchTopic> {
        self.topics.iter().filter(|t| t.has_tag(tag)).collect()
    }

    /// Applies the non-blank parts of `update` and bumps `updated_at`.
    pub fn update(
        &mut self,
        id: TopicId,
        update: TopicUpdate,
        now: DateTime<Utc>,
    ) -> Result<&ResearchTopic, ResearchError> {
        let topic = self
            .topics
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ResearchError::NotFound(id))?;

        if let Some(title) = non_blank(update.title.as_deref()) {
            topic.title = title.to_string();
        }
        if let Some(content) = non_blank(update.content.as_deref()) {
            topic.content = content.to_string();
        }
        if let Some(tags) = update.tags {
            topic.tags = tags;
        }
        topic.updated_at = now;

        debug!(%id, "research topic updated");
        Ok(topic)
    }

    pub fn delete(
        &mut self,
        id: TopicId,
    ) -> Result<ResearchTopic, ResearchError> {
        let index = self
            .topics
            .iter()
            .position(|t| t.id == id)
            .ok_or(ResearchError::NotFound(id))?;

        info!(%id, "research topic deleted");
        Ok(self.topics.remove(index))
    }

    /// Seeds the sample topics when the store is empty. Returns how many
    /// were added.
    pub fn add_samples(
        &mut self,
        now: DateTime<Utc>,
    ) -> usize {
        if !self.is_empty() {
            return 0;
        }
        for (title, content, tags) in SAMPLE_TOPICS {
            let tags = tags.iter().map(|t| t.to_string()).collect();
            // Sample text is never blank.
            let _ = self.add(NewResearchTopic::new(title, content, tags), now);
        }
        self.len()
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::research::parse_tags;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, minute, 0).unwrap()
    }

    fn store() -> ResearchStore {
        let mut store = ResearchStore::default();
        let debt = NewResearchTopic::new(
            "Debt snowball",
            "Pay the smallest balance first.",
            parse_tags("Debt, Budget"),
        );
        let savings = NewResearchTopic::new(
            "  High-yield savings ",
            " Compare APY across banks. ",
            parse_tags("savings"),
        );
        store.add(debt, at(0)).unwrap();
        store.add(savings, at(1)).unwrap();
        store
    }

    #[test]
    fn add_trims_and_stamps_topic() {
        let store = store();
        let topic = store.get(TopicId(2)).unwrap();

        assert_eq!(topic.title, "High-yield savings");
        assert_eq!(topic.content, "Compare APY across banks.");
        assert_eq!(topic.tags, vec!["savings"]);
        assert_eq!(topic.created_at, at(1));
        assert_eq!(topic.updated_at, at(1));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn add_requires_title_and_content() {
        let mut store = ResearchStore::default();

        assert_eq!(
            store.add(NewResearchTopic::new("  ", "notes", Vec::new()), at(0)),
            Err(ResearchError::MissingTitle)
        );
        assert_eq!(
            store.add(NewResearchTopic::new("Title", "\n", Vec::new()), at(0)),
            Err(ResearchError::MissingContent)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn newest_topic_is_listed_first() {
        let store = store();
        let titles: Vec<_> = store.newest_first().map(|t| t.title.as_str()).collect();

        assert_eq!(titles, vec!["High-yield savings", "Debt snowball"]);
    }

    #[test]
    fn search_matches_title_or_content_ignoring_case() {
        let store = store();

        let by_title: Vec<_> = store.search("SNOWBALL").iter().map(|t| t.id).collect();
        let by_content: Vec<_> = store.search("apy").iter().map(|t| t.id).collect();

        assert_eq!(by_title, vec![TopicId(1)]);
        assert_eq!(by_content, vec![TopicId(2)]);
        assert!(store.search("crypto").is_empty());
    }

    #[test]
    fn tag_filter_ignores_case() {
        let store = store();

        let saving: Vec<_> = store.with_tag("Savings").iter().map(|t| t.id).collect();
        assert_eq!(saving, vec![TopicId(2)]);
        assert_eq!(store.with_tag("budget").len(), 1);
        assert!(store.with_tag("Tax").is_empty());
    }

    #[test]
    fn update_changes_given_fields_and_bumps_time() {
        let mut store = store();
        let later = at(1) + Duration::minutes(30);

        let topic = store
            .update(
                TopicId(1),
                TopicUpdate {
                    title: Some("Debt avalanche".to_string()),
                    content: Some("   ".to_string()),
                    tags: None,
                },
                later,
            )
            .unwrap();

        assert_eq!(topic.title, "Debt avalanche");
        assert_eq!(topic.content, "Pay the smallest balance first.");
        assert_eq!(topic.tags, vec!["Debt", "Budget"]);
        assert_eq!(topic.created_at, at(0));
        assert_eq!(topic.updated_at, later);
    }

    #[test]
    fn update_and_delete_report_missing_topic() {
        let mut store = store();

        assert_eq!(
            store.update(TopicId(9), TopicUpdate::default(), at(5)),
            Err(ResearchError::NotFound(TopicId(9)))
        );
        assert_eq!(store.delete(TopicId(9)), Err(ResearchError::NotFound(TopicId(9))));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = store();

        let removed = store.delete(TopicId(1)).unwrap();
        let added = store
            .add(NewResearchTopic::new("Index funds", "Low fees.", Vec::new()), at(2))
            .unwrap()
            .id;

        assert_eq!(removed.title, "Debt snowball");
        assert_eq!(added, TopicId(3));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn samples_only_seed_an_empty_store() {
        let mut empty = ResearchStore::default();
        assert_eq!(empty.add_samples(at(0)), 2);
        assert_eq!(empty.with_tag("savings")[0].title, "Emergency Fund Strategies");

        let mut seeded = store();
        assert_eq!(seeded.add_samples(at(0)), 0);
        assert_eq!(seeded.len(), 2);
    }
}
