pub mod database;
pub mod history;

pub use database::{Database, SharedDatabase};
pub use history::{CleanSummary, HistoryStore, RecentFile};
