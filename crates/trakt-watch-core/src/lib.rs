pub mod companion;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod history;
pub mod picker;
pub mod prompter;
pub mod reconcile;
pub mod response;
pub mod search;
pub mod session;
pub mod url_resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use companion::{companion_action, letterboxd_url, CompanionAction};
pub use dispatch::{mark_watched, rate, remove_from_history, resolve_input, WatchOptions, WatchOutcome};
pub use error::ResolveError;
pub use history::{recent_history, unwatch, UnwatchOptions, UnwatchOutcome};
pub use picker::{pick, Pick, Picker, PickerState};
pub use prompter::Prompter;
pub use reconcile::{latest_per_show, next_unwatched, NextUp, ProgressState};
pub use response::{summarize_response, ResponseSummary};
pub use search::{resolve_by_search, SearchKind};
pub use session::Session;
pub use url_resolver::resolve;
