pub mod clean;
pub mod client;
pub mod config;
pub mod error;
pub mod mapper;
pub mod types;

pub use client::{DEFAULT_LIMIT, FirecrawlClient};
pub use config::FirecrawlConfig;
pub use error::SearchError;
pub use types::{CleanedResult, RawResult};
