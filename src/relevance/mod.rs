pub mod error;
pub mod manager;
pub mod repository;
pub mod types;

pub use error::{RelevanceError, Result};
pub use manager::RelevanceManager;
pub use repository::{NewRelevance, RelevanceFilter, RelevanceRepository, StagedWrite, UnitOfWork};
pub use types::*;
