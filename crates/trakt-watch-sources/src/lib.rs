pub mod error;
pub mod traits;
pub mod trakt;

pub use error::SourceError;
pub use traits::TraktApi;
pub use trakt::{parse_history, TraktClient};
