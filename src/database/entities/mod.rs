pub mod relevance;

pub use relevance::Entity as RelevanceEntity;
