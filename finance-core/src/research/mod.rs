//! Research hub: the user's saved notes on financial topics, tagged and
//! searchable, kept for the session.

mod store;
mod topic;

pub use store::{ResearchError, ResearchStore, SAMPLE_TOPICS, TAG_FILTERS};
pub use topic::{NewResearchTopic, ResearchTopic, TopicId, TopicUpdate, parse_tags};
