pub mod runbook;
pub mod suggestion;

pub use runbook::{RunbookCatalog, RunbookRecord};
pub use suggestion::{Suggestion, SuggestionSource, MAX_CONFIDENCE};
