/// One `<page>` element from the dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    pub id: Option<u64>,
    pub ns: Option<i32>,
    pub title: String,
    pub text: Option<String>,
    /// Target from `<redirect title="..."/>`, present in modern dumps
    pub redirect_title: Option<String>,
}

impl PageRecord {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// A `source -> target` redirect. Both titles are non-empty and differ.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RedirectPair {
    source: String,
    target: String,
}

impl RedirectPair {
    /// Returns `None` if either title is empty or the page points at itself.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Option<Self> {
        let source = source.into();
        let target = target.into();
        if source.is_empty() || target.is_empty() || source == target {
            return None;
        }
        Some(Self { source, target })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn into_parts(self) -> (String, String) {
        (self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_accepts_distinct_titles() {
        let pair = RedirectPair::new("Foo", "Bar").unwrap();
        assert_eq!(pair.source(), "Foo");
        assert_eq!(pair.target(), "Bar");
    }

    #[test]
    fn pair_rejects_self_redirect() {
        assert!(RedirectPair::new("Foo", "Foo").is_none());
    }

    #[test]
    fn pair_rejects_empty_titles() {
        assert!(RedirectPair::new("", "Bar").is_none());
        assert!(RedirectPair::new("Foo", "").is_none());
    }
}
