pub mod calculations;
pub mod chat;
pub mod models;
pub mod projection;
pub mod research;

pub use chat::{KeywordResponder, ResponseLookup};
pub use models::*;
pub use projection::{ChartKind, ChartSeries, Projection, RenderError, RenderSink, project};
pub use research::{NewResearchTopic, ResearchError, ResearchStore, ResearchTopic, TopicId};
