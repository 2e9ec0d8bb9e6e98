pub mod api;
pub mod auth;
pub mod client;
pub mod history;

pub use client::TraktClient;
pub use history::parse_history;
