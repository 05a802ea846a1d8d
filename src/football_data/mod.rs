pub mod cached;
pub mod client;
pub mod error;
pub mod models;
pub mod provider;
pub mod response_cache;

pub use cached::{spawn_sweeper, CacheTtls, CachedFootballData, ResponseCache};
pub use client::FootballDataClient;
pub use error::UpstreamError;
pub use provider::FootballDataSource;
