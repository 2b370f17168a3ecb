use std::io::prelude::*;
use std::time::Duration;

use async_trait::async_trait;
use flate2::read::GzDecoder;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::config::CrawlerConfig;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Couldn't build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Couldn't download {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Got HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Couldn't decode body of {url}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// A downloaded HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub body: String,
}

/// Returns the raw content of a page given its URL.
///
/// Retries and timeouts are the concern of implementors, callers treat any
/// error as fatal.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: CrawlerConfig,
}

impl HttpFetcher {
    pub fn new(config: CrawlerConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::ClientBuilder::new().gzip(true).deflate(true);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        log::debug!("Downloading {url}");

        let request_err = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(request_err)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = match resp.headers().get(CONTENT_TYPE) {
            Some(c) if c == "application/x-gzip" || c == "application/gzip" => {
                let compressed = resp.bytes().await.map_err(request_err)?;
                let mut gz = GzDecoder::new(&compressed[..]);
                let mut body = String::new();
                gz.read_to_string(&mut body)
                    .map_err(|source| FetchError::Decode {
                        url: url.to_string(),
                        source,
                    })?;
                body
            }
            _ => resp.text().await.map_err(request_err)?,
        };

        Ok(Page {
            url: url.to_string(),
            body,
        })
    }
}
