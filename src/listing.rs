use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::info;

use crate::fetch::Fetch;
use crate::parser::document::Document;
use crate::settings::Settings;

/// Line-delimited URLs to leave out. A missing file means nothing is skipped.
pub fn load_skip_list(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Breed page links on one listing page.
pub fn breed_links(doc: &Document, prefix: &str, skip: &HashSet<String>) -> BTreeSet<String> {
    doc.elements()
        .into_iter()
        .filter(|el| el.tag.eq_ignore_ascii_case("a"))
        .filter_map(|el| el.attr("href"))
        .filter(|href| href.contains(prefix) && !skip.contains(*href))
        .map(str::to_string)
        .collect()
}

/// Crawl listing pages `1..=pages` and union their breed links.
pub fn crawl(
    fetcher: &dyn Fetch,
    settings: &Settings,
    pages: u32,
    skip: &HashSet<String>,
    pb: &ProgressBar,
) -> Result<BTreeSet<String>> {
    let mut urls = BTreeSet::new();
    for page in 1..=pages {
        let html = fetcher.fetch(&settings.listing_page_url(page))?;
        let found = breed_links(&Document::parse(&html), &settings.breed_url_prefix, skip);
        info!("Listing page {}: {} links", page, found.len());
        urls.extend(found);
        pb.inc(1);
    }
    Ok(urls)
}

/// One URL per line, no trailing newline.
pub fn write_urls(path: &Path, urls: &BTreeSet<String>) -> Result<()> {
    let body = urls.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
    fs::write(path, body).with_context(|| format!("Failed to write {:?}", path))
}

/// Breed page URLs written by `write_urls`, in file order.
pub fn read_urls(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}. Run 'urls' first.", path))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
