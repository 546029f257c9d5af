use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Runtime settings: defaults, then an optional `breeds.toml`, then
/// `BREEDS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Comparison page; the id list is appended as a JSON array.
    pub selector_url: String,
    /// Page listing every breed with its comparison id.
    pub compare_url: String,
    /// Listing page template, `{page}` is replaced by the page number.
    pub listing_url: String,
    /// Only links containing this prefix are breed pages.
    pub breed_url_prefix: String,
    pub listing_pages: u32,
    pub chunk_size: usize,
    /// Breeds whose comparison column is known to be empty.
    pub excluded_ids: Vec<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selector_url: "https://www.akc.org/dog-breed-selector/?breeds=".into(),
            compare_url: "https://www.akc.org/compare-breeds/".into(),
            listing_url: "https://www.akc.org/dog-breeds/page/{page}/".into(),
            breed_url_prefix: "https://www.akc.org/dog-breeds/".into(),
            listing_pages: 24,
            chunk_size: 10,
            // Spinone Italiano
            excluded_ids: vec![25794],
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::with_name("breeds").required(false))
            .add_source(
                Environment::with_prefix("BREEDS")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("excluded_ids"),
            )
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        anyhow::ensure!(settings.chunk_size > 0, "chunk_size must be at least 1");
        Ok(settings)
    }

    pub fn listing_page_url(&self, page: u32) -> String {
        self.listing_url.replace("{page}", &page.to_string())
    }
}
