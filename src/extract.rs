use crate::config::{
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, PROGRESS_INTERVAL, REDIRECT_MAX_DEPTH,
};
use crate::dictionary::SynonymDictionary;
use crate::error::{RecordSkip, Result};
use crate::models::PageRecord;
use crate::parser::WikiReader;
use crate::redirect;
use crate::stats::ExtractionStats;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Stop after this many pages
    pub limit: Option<u64>,
    /// Extract and count, but leave the output path alone
    pub dry_run: bool,
    /// Rewrite `A -> B -> C` as `A -> C` before writing
    pub resolve_chains: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            limit: None,
            dry_run: false,
            resolve_chains: false,
        }
    }
}

/// Reads the dump, builds the dictionary and writes it atomically.
///
/// Nothing is written if the dump cannot be read to the end.
pub fn run_extraction(config: &PipelineConfig) -> Result<ExtractionStats> {
    let reader = WikiReader::open(&config.input)?;
    let (mut dictionary, mut stats) = build_dictionary(reader, config.limit)?;

    if config.resolve_chains {
        let (rewritten, dropped) = dictionary.resolve_chains(REDIRECT_MAX_DEPTH);
        stats.record_chains(rewritten, dropped);
        info!(rewritten, dropped, "Redirect chains resolved");
    }

    info!(
        pages = stats.pages_read,
        redirects = stats.redirects_seen,
        pairs = stats.pairs_accepted,
        duplicates = stats.duplicates,
        skipped = stats.skipped(),
        "Extraction pass finished"
    );

    if config.dry_run {
        info!("Dry run, not writing {:?}", config.output);
    } else {
        dictionary.write_atomic(&config.output)?;
    }

    Ok(stats)
}

/// Folds a page stream into a fresh dictionary. A page-level error aborts;
/// a bad redirect is logged and counted.
pub fn build_dictionary<I>(pages: I, limit: Option<u64>) -> Result<(SynonymDictionary, ExtractionStats)>
where
    I: IntoIterator<Item = Result<PageRecord>>,
{
    let mut dictionary = SynonymDictionary::new();
    let mut stats = ExtractionStats::new();
    let pb = ProgressBar::new_spinner();
    let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

    for page in pages.into_iter().take(limit) {
        let page = page?;
        stats.inc_pages();

        match redirect::extract(&page) {
            Ok(Some(pair)) => {
                let inserted = dictionary.insert(pair);
                stats.record_pair(inserted);
            }
            Ok(None) => {}
            Err(skip) => {
                match &skip {
                    RecordSkip::Malformed(_) => {
                        warn!(title = %page.title, reason = %skip, "Skipping redirect")
                    }
                    _ => debug!(title = %page.title, reason = %skip, "Skipping redirect"),
                }
                stats.record_skip(&skip);
            }
        }

        if stats.pages_read % PROGRESS_INTERVAL == 0 {
            pb.set_message(format!(
                "{} pages, {} synonyms",
                stats.pages_read,
                dictionary.len()
            ));
            pb.tick();
        }
    }

    pb.finish_and_clear();
    Ok((dictionary, stats))
}
