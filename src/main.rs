mod batch;
mod breed_map;
mod fetch;
mod listing;
mod output;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use breed_map::{BreedId, BreedMap};
use fetch::{Fetch, HttpFetcher};
use output::Format;
use parser::{Document, FieldSelectors, PageSelectors, RatingTable};
use settings::Settings;

#[derive(Parser)]
#[command(name = "breed_scraper", about = "AKC dog breed dataset builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the breed listing pages and write every breed page URL
    Urls {
        #[arg(short, long, default_value = "dog_breed_urls.txt")]
        out: PathBuf,
        /// Line-delimited URLs to leave out
        #[arg(long, default_value = "urls_to_skip.txt")]
        skip: PathBuf,
        /// Number of listing pages (default: from settings)
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Scrape each breed page listed in the URL file written by `urls`
    Pages {
        #[arg(short, long, default_value = "dog_breed_urls.txt")]
        urls: PathBuf,
        #[arg(short, long, default_value = "dog_dataset.csv")]
        out: PathBuf,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
    /// Read the compare page breed picker and write the id → name map
    Ids {
        #[arg(short, long, default_value = "breed_id_map.json")]
        out: PathBuf,
    },
    /// Scrape comparison pages into the breed dataset
    Build {
        /// Id → name map written by `ids`
        #[arg(short, long, default_value = "breed_id_map.json")]
        map: PathBuf,
        #[arg(short, long, default_value = "breed_dataset.csv")]
        out: PathBuf,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
        /// Only these ids, comma separated (default: every id in the map)
        #[arg(long, value_delimiter = ',')]
        ids: Option<Vec<BreedId>>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Settings loaded");

    let result = match cli.command {
        Commands::Urls { out, skip, pages } => {
            let fetcher = HttpFetcher::new()?;
            let skip = listing::load_skip_list(&skip)?;
            let pages = pages.unwrap_or(settings.listing_pages);
            println!("Crawling {} listing pages ({} URLs skipped)...", pages, skip.len());

            let pb = progress_bar(pages as u64);
            let urls = listing::crawl(&fetcher, &settings, pages, &skip, &pb)?;
            pb.finish_and_clear();

            listing::write_urls(&out, &urls)?;
            println!("Wrote {} breed URLs to {:?}", urls.len(), out);
            Ok(())
        }
        Commands::Pages { urls, out, format } => {
            let urls = listing::read_urls(&urls)?;
            if urls.is_empty() {
                println!("No breed URLs to scrape.");
                return Ok(());
            }

            let fetcher = HttpFetcher::new()?;
            println!("Scraping {} breed pages...", urls.len());
            let pb = progress_bar(urls.len() as u64);
            let (records, stats) = batch::run_pages(&fetcher, &PageSelectors::akc(), &urls, &pb)?;
            pb.finish_and_clear();

            output::save(&out, &records, format)?;
            println!("Wrote {} records to {:?} ({} failed).", records.len(), out, stats.failed);
            Ok(())
        }
        Commands::Ids { out } => {
            let fetcher = HttpFetcher::new()?;
            let html = fetcher.fetch(&settings.compare_url)?;
            let map = breed_map::scrape_breed_map(&Document::parse(&html))
                .context("Failed to read the breed picker")?;
            map.save(&out)?;
            println!("Wrote {} breeds to {:?}", map.len(), out);
            Ok(())
        }
        Commands::Build { map, out, format, ids } => {
            let names = BreedMap::load(&map)?;
            if names.is_empty() {
                println!("Breed map {:?} is empty. Run 'ids' first.", map);
                return Ok(());
            }
            let ids = ids.unwrap_or_else(|| names.ids());
            if ids.is_empty() {
                println!("No breed ids to scrape.");
                return Ok(());
            }

            let fetcher = HttpFetcher::new()?;
            let selectors = FieldSelectors::akc();
            let ratings = RatingTable::default();
            let runner = batch::BatchRunner::new(
                &fetcher,
                &names,
                &selectors,
                &ratings,
                &settings.selector_url,
                settings.chunk_size,
                settings.excluded_ids.iter().copied(),
            );

            println!("Scraping {} breeds in chunks of {}...", ids.len(), settings.chunk_size);
            let pb = progress_bar(ids.len() as u64);
            let (records, stats) = runner.run(&ids, &pb)?;
            pb.finish_and_clear();

            output::save(&out, &records, format)?;
            println!(
                "Wrote {} records to {:?} ({} excluded, {} unnamed, {} failed).",
                records.len(),
                out,
                stats.excluded,
                stats.unnamed,
                stats.failed
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_read_naturally() {
        assert_eq!(format_duration(std::time::Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }

    #[test]
    fn build_args_parse() {
        let cli = Cli::try_parse_from(["breed_scraper", "build", "--ids", "1,2,3", "-f", "tsv"]).unwrap();
        match cli.command {
            Commands::Build { ids, format, out, .. } => {
                assert_eq!(ids, Some(vec![1, 2, 3]));
                assert_eq!(format, Format::Tsv);
                assert_eq!(out, PathBuf::from("breed_dataset.csv"));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn pages_args_default_to_url_file() {
        let cli = Cli::try_parse_from(["breed_scraper", "pages"]).unwrap();
        match cli.command {
            Commands::Pages { urls, out, format } => {
                assert_eq!(urls, PathBuf::from("dog_breed_urls.txt"));
                assert_eq!(out, PathBuf::from("dog_dataset.csv"));
                assert_eq!(format, Format::Csv);
            }
            _ => panic!("expected pages"),
        }
    }
}
