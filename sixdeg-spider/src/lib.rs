pub mod client;
pub mod config;
pub mod crawler;
pub mod error;
pub mod filter;
pub mod parse;
pub mod proxy;
pub mod record;

pub use client::{FetchClient, FetchOutcome};
pub use config::{RetryPolicy, Seeds, SpiderConfig};
pub use crawler::ProfileCrawler;
pub use error::SpiderError;
pub use filter::TermFilter;
pub use proxy::ProxyHarvester;
pub use record::{ExperienceEntry, ProfileRecord, ProxyRecord, SuggestionStub};
