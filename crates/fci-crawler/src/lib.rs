mod config;
mod fetcher;

pub use config::CrawlerConfig;
pub use fetcher::{FetchError, Fetcher, HttpFetcher, Page};
