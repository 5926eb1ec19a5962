mod filter;
mod loader;
mod progress_store;

pub use filter::filter_questions_by_difficulty;
pub use loader::{LoadError, load_questions_from_json};
pub use progress_store::{PersistError, ProgressStore};
