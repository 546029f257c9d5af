use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::debug;

/// Source of raw HTML documents.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain blocking GET. Non-2xx responses are errors; nothing is retried.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("breed_scraper/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .with_context(|| format!("Failed to fetch {}", url))
    }
}
