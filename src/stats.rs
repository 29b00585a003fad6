use crate::error::RecordSkip;

/// Counters collected during one pipeline run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractionStats {
    pub pages_read: u64,
    pub redirects_seen: u64,
    pub pairs_accepted: u64,
    pub duplicates: u64,
    pub malformed: u64,
    pub empty_titles: u64,
    pub namespace_filtered: u64,
    pub self_redirects: u64,
    pub chains_rewritten: u64,
    pub chains_dropped: u64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_pages(&mut self) {
        self.pages_read += 1;
    }

    /// Counts a redirect that made it into the dictionary, or a duplicate if
    /// its source title was already taken.
    pub fn record_pair(&mut self, inserted: bool) {
        self.redirects_seen += 1;
        if inserted {
            self.pairs_accepted += 1;
        } else {
            self.duplicates += 1;
        }
    }

    pub fn record_skip(&mut self, skip: &RecordSkip) {
        self.redirects_seen += 1;
        match skip {
            RecordSkip::Malformed(_) => self.malformed += 1,
            RecordSkip::EmptyTitle => self.empty_titles += 1,
            RecordSkip::Namespace(_) => self.namespace_filtered += 1,
            RecordSkip::SelfRedirect => self.self_redirects += 1,
        }
    }

    pub fn record_chains(&mut self, rewritten: u64, dropped: u64) {
        self.chains_rewritten += rewritten;
        self.chains_dropped += dropped;
    }

    pub fn skipped(&self) -> u64 {
        self.malformed + self.empty_titles + self.namespace_filtered + self.self_redirects
    }
}
