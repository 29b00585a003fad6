use crate::config::{FIELD_DELIMITER, WRITE_BUFFER_SIZE};
use crate::error::{Result, SynonymError};
use crate::models::RedirectPair;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Redirect source title -> canonical title, owned by a single pipeline run.
///
/// The first mapping seen for a source wins; later ones are reported as
/// duplicates and dropped. Serialization is sorted by source title so the same
/// dump always produces the same bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SynonymDictionary {
    entries: FxHashMap<String, String>,
}

impl SynonymDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the source title was already mapped.
    pub fn insert(&mut self, pair: RedirectPair) -> bool {
        let (source, target) = pair.into_parts();
        match self.entries.entry(source) {
            Entry::Occupied(existing) => {
                debug!(
                    source = %existing.key(),
                    kept = %existing.get(),
                    dropped = %target,
                    "Duplicate source title"
                );
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(target);
                true
            }
        }
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Points every source at the end of its redirect chain.
    ///
    /// Entries whose chain loops, or needs more than `max_depth` extra hops,
    /// are dropped. Returns `(rewritten, dropped)`.
    pub fn resolve_chains(&mut self, max_depth: u32) -> (u64, u64) {
        let mut resolved =
            FxHashMap::with_capacity_and_hasher(self.entries.len(), Default::default());
        let mut rewritten = 0;
        let mut dropped = 0;

        for (source, target) in &self.entries {
            match self.final_target(source, target, max_depth) {
                Some(end) => {
                    if end != target.as_str() {
                        debug!(from = %source, via = %target, to = end, "Following redirect");
                        rewritten += 1;
                    }
                    resolved.insert(source.clone(), end.to_string());
                }
                None => {
                    debug!(source = %source, "Redirect chain loops or is too deep");
                    dropped += 1;
                }
            }
        }

        self.entries = resolved;
        (rewritten, dropped)
    }

    fn final_target<'a>(&'a self, source: &str, target: &'a str, max_depth: u32) -> Option<&'a str> {
        let mut current = target;
        let mut depth = 0;

        while let Some(next) = self.entries.get(current).map(String::as_str) {
            depth += 1;
            if depth > max_depth || next == source {
                return None;
            }
            current = next;
        }
        Some(current)
    }

    /// Entries ordered by source title.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (source, target) in self.sorted() {
            writeln!(writer, "{}{}{}", source, FIELD_DELIMITER, target)?;
        }
        Ok(())
    }

    /// Writes to a sibling temp file and renames it into place, so `path` is
    /// either the previous file or the complete new one.
    pub fn write_atomic(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_error = |source| SynonymError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let tmp_path = tmp_path(path);
        if let Err(source) = self.write_and_rename(&tmp_path, path) {
            if tmp_path.exists() {
                let _ = fs::remove_file(&tmp_path);
            }
            return Err(write_error(source));
        }

        info!(entries = self.len(), path = ?path, "Synonym dictionary written");
        Ok(())
    }

    fn write_and_rename(&self, tmp_path: &Path, path: &Path) -> io::Result<()> {
        let file = File::create(tmp_path)?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
        self.write_to(&mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        fs::rename(tmp_path, path)
    }

    /// Reads a dictionary file written by [`SynonymDictionary::write_atomic`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let read_error = |source| SynonymError::Input {
            path: path.to_path_buf(),
            source,
        };

        let reader = BufReader::new(File::open(path).map_err(read_error)?);
        let mut dictionary = Self::new();
        let mut position = 0u64;

        for line in reader.lines() {
            let line = line.map_err(read_error)?;
            let line_start = position;
            position += line.len() as u64 + 1;

            if line.is_empty() {
                continue;
            }

            let pair = line
                .split_once(FIELD_DELIMITER)
                .filter(|(_, target)| !target.contains(FIELD_DELIMITER))
                .and_then(|(source, target)| RedirectPair::new(source, target))
                .ok_or_else(|| SynonymError::Parse {
                    position: line_start,
                    message: format!("invalid dictionary line: {:?}", line),
                })?;
            dictionary.insert(pair);
        }

        Ok(dictionary)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
