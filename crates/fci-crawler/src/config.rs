use std::cmp;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlerConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// The maximum number of pages downloaded at the same time
    #[serde(default = "default_concurrent_downloads")]
    pub concurrent_downloads: usize,

    /// Per request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            concurrent_downloads: default_concurrent_downloads(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CrawlerConfig {
    /// Number of in-flight downloads, never zero.
    pub fn download_slots(&self) -> usize {
        cmp::max(1, self.concurrent_downloads)
    }
}

fn default_user_agent() -> String {
    String::from("FCIbot")
}

fn default_concurrent_downloads() -> usize {
    8
}

fn default_timeout_secs() -> Option<u64> {
    Some(30)
}
