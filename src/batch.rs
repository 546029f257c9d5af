use std::collections::HashSet;

use anyhow::Result;
use indicatif::ProgressBar;
use tracing::{debug, error, info, warn};

use crate::breed_map::{BreedId, BreedMap};
use crate::fetch::Fetch;
use crate::parser::page::{self, BreedPageRecord};
use crate::parser::record::{self, BreedRecord};
use crate::parser::{Document, FieldExtractor, FieldSelectors, PageSelectors, RatingTable};

/// Counters reported after a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    pub chunks: usize,
    pub built: usize,
    pub excluded: usize,
    pub unnamed: usize,
    pub failed: usize,
}

/// Fetches comparison pages chunk by chunk and builds one record per
/// candidate column.
pub struct BatchRunner<'a> {
    fetcher: &'a dyn Fetch,
    names: &'a BreedMap,
    extractor: FieldExtractor<'a>,
    selector_url: &'a str,
    chunk_size: usize,
    excluded: HashSet<BreedId>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        fetcher: &'a dyn Fetch,
        names: &'a BreedMap,
        selectors: &'a FieldSelectors,
        ratings: &'a RatingTable,
        selector_url: &'a str,
        chunk_size: usize,
        excluded: impl IntoIterator<Item = BreedId>,
    ) -> Self {
        Self {
            fetcher,
            names,
            extractor: FieldExtractor::new(selectors, ratings),
            selector_url,
            chunk_size: chunk_size.max(1),
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Build records for every id, preserving chunk and column order.
    /// A fetch failure aborts the whole run.
    pub fn run(&self, ids: &[BreedId], pb: &ProgressBar) -> Result<(Vec<BreedRecord>, BatchStats)> {
        let mut records = Vec::with_capacity(ids.len());
        let mut stats = BatchStats::default();

        for chunk in chunk_slots(ids, self.chunk_size) {
            let url = self.chunk_url(&chunk);
            let html = self.fetcher.fetch(&url)?;
            let doc = Document::parse(&html);
            stats.chunks += 1;

            for (index, slot) in chunk.iter().enumerate() {
                let Some(id) = *slot else { continue };
                pb.inc(1);

                if self.excluded.contains(&id) {
                    debug!("Skipping excluded breed {}", id);
                    stats.excluded += 1;
                    continue;
                }
                let Some(name) = self.names.name(id) else {
                    warn!("No name for breed {}, skipping", id);
                    stats.unnamed += 1;
                    continue;
                };

                match record::build(&self.extractor, &doc, index, name) {
                    Ok(rec) => {
                        records.push(rec);
                        stats.built += 1;
                    }
                    Err(e) => {
                        error!(breed = name, id, "Dropping record: {}", e);
                        stats.failed += 1;
                    }
                }
            }
        }

        info!(
            "Built {} records from {} chunks ({} excluded, {} unnamed, {} failed)",
            stats.built, stats.chunks, stats.excluded, stats.unnamed, stats.failed
        );
        Ok((records, stats))
    }

    /// `<selector_url>[id, id, null]`
    pub fn chunk_url(&self, chunk: &[Option<BreedId>]) -> String {
        let ids = chunk
            .iter()
            .map(|slot| slot.map(|id| id.to_string()).unwrap_or_else(|| "null".into()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}[{}]", self.selector_url, ids)
    }
}

/// Fetch each breed page in order and build one record per page. A page
/// without a readable name is dropped; a fetch failure aborts the run.
pub fn run_pages(
    fetcher: &dyn Fetch,
    selectors: &PageSelectors,
    urls: &[String],
    pb: &ProgressBar,
) -> Result<(Vec<BreedPageRecord>, BatchStats)> {
    let mut records = Vec::with_capacity(urls.len());
    let mut stats = BatchStats::default();

    for url in urls {
        let html = fetcher.fetch(url)?;
        stats.chunks += 1;
        pb.inc(1);

        match page::build_page(selectors, &Document::parse(&html)) {
            Ok(rec) => {
                records.push(rec);
                stats.built += 1;
            }
            Err(e) => {
                error!(url = url.as_str(), "Dropping page: {}", e);
                stats.failed += 1;
            }
        }
    }

    info!("Built {} records from {} breed pages ({} failed)", stats.built, stats.chunks, stats.failed);
    Ok((records, stats))
}

/// Split into fixed-size chunks, padding the last one with empty slots.
pub fn chunk_slots(ids: &[BreedId], size: usize) -> Vec<Vec<Option<BreedId>>> {
    ids.chunks(size.max(1))
        .map(|c| {
            let mut slots: Vec<Option<BreedId>> = c.iter().copied().map(Some).collect();
            slots.resize(size.max(1), None);
            slots
        })
        .collect()
}
