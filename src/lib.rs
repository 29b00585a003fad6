//! wikisyn: synonym dictionary extraction from Wikipedia redirects
//!
//! Every article-to-article redirect in a Wikipedia XML dump names the same
//! thing twice: the redirect title is a synonym of its target. This crate
//! streams a dump once and writes those pairs as a sorted `source<TAB>target`
//! text file.
//!
//! The pipeline is a single straight pass:
//!
//! 1. **Read** -- [`parser::WikiReader`] streams `<page>` elements (plain XML or
//!    `.bz2`) as typed [`models::PageRecord`]s
//! 2. **Extract** -- [`redirect::extract`] recognizes `#REDIRECT`/`#転送`
//!    directives, strips link markup and filters non-article namespaces and
//!    self-redirects
//! 3. **Write** -- [`dictionary::SynonymDictionary`] keeps the first target per
//!    source and writes the file through a temp file and rename
//!
//! # Key Modules
//!
//! - [`parser`] -- Streaming XML parser with BZ2 decompression
//! - [`redirect`] -- Redirect directive parsing and title normalization
//! - [`dictionary`] -- First-write-wins synonym map with atomic serialization
//! - [`extract`] -- Pipeline orchestration and progress reporting
//! - [`models`] -- Core data types (PageRecord, RedirectPair)
//! - [`stats`] -- Per-run counters
//! - [`error`] -- Fatal and per-record error types
//! - [`config`] -- Defaults, keyword and namespace tables
//!
//! # Example Usage
//!
//! ```bash
//! wikisyn -v -i jawiki-latest-pages-articles.xml.bz2 -o wikipedia_synonym.txt
//! ```

pub mod config;
pub mod dictionary;
pub mod error;
pub mod extract;
pub mod models;
pub mod parser;
pub mod redirect;
pub mod stats;
