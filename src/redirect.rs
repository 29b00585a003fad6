use crate::config::{
    EXCLUDED_NAMESPACES, INTERWIKI_PREFIXES, REDIRECT_KEYWORDS, TALK_NAMESPACE_SUFFIXES,
};
use crate::error::RecordSkip;
use crate::models::{PageRecord, RedirectPair};
use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    let keywords = REDIRECT_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^[\s\x{{FEFF}}]*#\s*(?:{})\b", keywords)).unwrap()
});

static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*:?\s*\[\[([^\[\]\n]*)\]\]").unwrap());

/// Classifies a page and pulls out its redirect, if any.
///
/// `Ok(None)` means the page is an ordinary article. `Err` means the page is a
/// redirect that must not enter the dictionary.
pub fn extract(page: &PageRecord) -> Result<Option<RedirectPair>, RecordSkip> {
    let raw_target = match page.text.as_deref().and_then(directive_target) {
        Some(found) => found?,
        None => match page.redirect_title.as_deref() {
            Some(hint) => hint,
            None => return Ok(None),
        },
    };

    let source = clean_title(&page.title);
    if source.is_empty() {
        return Err(RecordSkip::EmptyTitle);
    }
    if let Some(ns) = page.ns.filter(|&ns| ns != 0) {
        return Err(RecordSkip::Namespace(ns.to_string()));
    }
    if let Some(prefix) = excluded_namespace(&source) {
        return Err(RecordSkip::Namespace(prefix.to_string()));
    }

    let target = normalize_target(raw_target);
    if target.is_empty() {
        return Err(RecordSkip::Malformed(format!("empty link target in {:?}", raw_target)));
    }
    if let Some(prefix) = excluded_namespace(&target).or_else(|| interwiki_prefix(&target)) {
        return Err(RecordSkip::Namespace(prefix.to_string()));
    }
    if capitalize_first(&source) == target {
        return Err(RecordSkip::SelfRedirect);
    }

    RedirectPair::new(source, target)
        .map(Some)
        .ok_or(RecordSkip::SelfRedirect)
}

/// `None` when the text carries no redirect keyword; otherwise the raw link body
/// or the reason it could not be read.
fn directive_target(text: &str) -> Option<Result<&str, RecordSkip>> {
    let keyword = DIRECTIVE_REGEX.find(text)?;
    let rest = &text[keyword.end()..];

    match LINK_REGEX.captures(rest) {
        Some(caps) => caps.get(1).map(|m| Ok(m.as_str())),
        None => Some(Err(RecordSkip::Malformed(first_line(text).to_string()))),
    }
}

/// Strips the pipe label, the anchor fragment and a leading colon, then
/// applies MediaWiki title normalization.
pub fn normalize_target(link: &str) -> String {
    let link = link.split('|').next().unwrap_or_default();
    let link = link.split('#').next().unwrap_or_default();
    let link = link.trim();
    let link = link.strip_prefix(':').unwrap_or(link);
    capitalize_first(&clean_title(link))
}

/// Underscores become spaces and whitespace runs collapse to one space.
pub fn clean_title(title: &str) -> String {
    title
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns the namespace prefix if the title lives outside the article space.
pub fn excluded_namespace(title: &str) -> Option<&str> {
    let (prefix, _) = title.split_once(':')?;
    let prefix = prefix.trim();
    let lowered = prefix.to_lowercase();

    let excluded = EXCLUDED_NAMESPACES.contains(&lowered.as_str())
        || TALK_NAMESPACE_SUFFIXES.iter().any(|s| lowered.ends_with(s));
    excluded.then_some(prefix)
}

/// Returns the prefix if the link points at another wiki or language edition.
pub fn interwiki_prefix(title: &str) -> Option<&str> {
    let (prefix, _) = title.split_once(':')?;
    let prefix = prefix.trim();
    INTERWIKI_PREFIXES
        .contains(&prefix.to_lowercase().as_str())
        .then_some(prefix)
}

fn first_line(text: &str) -> &str {
    text.trim_start().lines().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(title: &str, text: &str) -> Result<Option<RedirectPair>, RecordSkip> {
        extract(&PageRecord::new(title, text))
    }

    #[test]
    fn simple_redirect() {
        let p = pair("Foo", "#REDIRECT [[Bar]]").unwrap().unwrap();
        assert_eq!(p.source(), "Foo");
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn category_target_is_filtered() {
        assert_eq!(
            pair("Foo", "#REDIRECT [[Category:Bar]]"),
            Err(RecordSkip::Namespace("Category".to_string()))
        );
    }

    #[test]
    fn self_redirect_is_dropped() {
        assert_eq!(pair("Foo", "#REDIRECT [[Foo]]"), Err(RecordSkip::SelfRedirect));
    }

    #[test]
    fn self_redirect_after_normalization() {
        assert_eq!(
            pair("Foo bar", "#REDIRECT [[foo_bar#History]]"),
            Err(RecordSkip::SelfRedirect)
        );
    }

    #[test]
    fn plain_article_yields_nothing() {
        assert_eq!(pair("Baz", "Some normal article text."), Ok(None));
    }

    #[test]
    fn page_without_text_yields_nothing() {
        let page = PageRecord {
            title: "Baz".to_string(),
            ..PageRecord::default()
        };
        assert_eq!(extract(&page), Ok(None));
    }

    #[test]
    fn keyword_is_case_insensitive() {
        for text in ["#redirect [[Bar]]", "#Redirect [[Bar]]", "#REDIRECT[[Bar]]"] {
            let p = pair("Foo", text).unwrap().unwrap();
            assert_eq!(p.target(), "Bar", "text: {}", text);
        }
    }

    #[test]
    fn japanese_keywords() {
        let p = pair("東京都庁", "#転送 [[東京都庁舎]]").unwrap().unwrap();
        assert_eq!(p.target(), "東京都庁舎");
        let p = pair("日本国", "#リダイレクト [[日本]]").unwrap().unwrap();
        assert_eq!(p.target(), "日本");
    }

    #[test]
    fn leading_whitespace_and_trailing_templates() {
        let p = pair("Foo", "  \n#REDIRECT [[Bar]]\n{{R from alternative name}}")
            .unwrap()
            .unwrap();
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn leading_bom_is_ignored() {
        let p = pair("Foo", "\u{feff}#REDIRECT [[Bar]]").unwrap().unwrap();
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn interwiki_targets_are_filtered() {
        assert_eq!(
            pair("Foo", "#REDIRECT [[en:Foo]]"),
            Err(RecordSkip::Namespace("En".to_string()))
        );
        assert_eq!(
            pair("Foo", "#転送 [[wikt:犬]]"),
            Err(RecordSkip::Namespace("Wikt".to_string()))
        );
        assert_eq!(interwiki_prefix("Star Wars: A New Hope"), None);
        assert_eq!(interwiki_prefix("Bar"), None);
    }

    #[test]
    fn strips_anchor_and_label() {
        let p = pair("Foo", "#REDIRECT [[Bar#Early life|label]]").unwrap().unwrap();
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn strips_leading_colon() {
        let p = pair("Foo", "#REDIRECT [[:Bar]]").unwrap().unwrap();
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn normalizes_underscores_and_case() {
        let p = pair("Foo", "#REDIRECT [[ bar_baz  qux ]]").unwrap().unwrap();
        assert_eq!(p.target(), "Bar baz qux");
    }

    #[test]
    fn trims_source_title() {
        let p = pair("  Foo  ", "#REDIRECT [[Bar]]").unwrap().unwrap();
        assert_eq!(p.source(), "Foo");
    }

    #[test]
    fn colon_inside_article_title_is_kept() {
        let p = pair("Episode IV", "#REDIRECT [[Star Wars: A New Hope]]")
            .unwrap()
            .unwrap();
        assert_eq!(p.target(), "Star Wars: A New Hope");
    }

    #[test]
    fn missing_closing_brackets_is_malformed() {
        assert!(matches!(
            pair("Foo", "#REDIRECT [[Bar"),
            Err(RecordSkip::Malformed(_))
        ));
    }

    #[test]
    fn missing_link_is_malformed() {
        assert!(matches!(
            pair("Foo", "#REDIRECT Bar"),
            Err(RecordSkip::Malformed(_))
        ));
    }

    #[test]
    fn anchor_only_link_is_malformed() {
        assert!(matches!(
            pair("Foo", "#REDIRECT [[#Section]]"),
            Err(RecordSkip::Malformed(_))
        ));
    }

    #[test]
    fn japanese_namespaces_are_filtered() {
        assert_eq!(
            pair("Foo", "#転送 [[カテゴリ:日本]]"),
            Err(RecordSkip::Namespace("カテゴリ".to_string()))
        );
        assert_eq!(
            pair("Foo", "#転送 [[ファイル:Example.jpg]]"),
            Err(RecordSkip::Namespace("ファイル".to_string()))
        );
        assert_eq!(
            pair("Foo", "#転送 [[利用者‐ノート:Example]]"),
            Err(RecordSkip::Namespace("利用者‐ノート".to_string()))
        );
        assert_eq!(
            pair("Foo", "#REDIRECT [[メディア:X.ogg]]"),
            Err(RecordSkip::Namespace("メディア".to_string()))
        );
    }

    #[test]
    fn namespace_prefix_is_case_insensitive() {
        assert_eq!(
            pair("Foo", "#REDIRECT [[file:Bar.png]]"),
            Err(RecordSkip::Namespace("File".to_string()))
        );
        assert_eq!(
            pair("Foo", "#REDIRECT [[:Category:Bar]]"),
            Err(RecordSkip::Namespace("Category".to_string()))
        );
    }

    #[test]
    fn non_article_source_page_is_filtered() {
        let page = PageRecord {
            ns: Some(10),
            ..PageRecord::new("Template:Foo", "#REDIRECT [[Template:Bar]]")
        };
        assert_eq!(extract(&page), Err(RecordSkip::Namespace("10".to_string())));

        assert_eq!(
            pair("Help:Foo", "#REDIRECT [[Bar]]"),
            Err(RecordSkip::Namespace("Help".to_string()))
        );
    }

    #[test]
    fn redirect_hint_used_without_directive() {
        let page = PageRecord {
            redirect_title: Some("Bar".to_string()),
            ..PageRecord::new("Foo", "")
        };
        let p = extract(&page).unwrap().unwrap();
        assert_eq!(p.target(), "Bar");
    }

    #[test]
    fn directive_wins_over_hint() {
        let page = PageRecord {
            redirect_title: Some("Hint".to_string()),
            ..PageRecord::new("Foo", "#REDIRECT [[Bar]]")
        };
        assert_eq!(extract(&page).unwrap().unwrap().target(), "Bar");
    }

    #[test]
    fn empty_title_is_skipped() {
        assert_eq!(pair("   ", "#REDIRECT [[Bar]]"), Err(RecordSkip::EmptyTitle));
    }

    #[test]
    fn hash_inside_article_is_not_a_directive() {
        assert_eq!(pair("Foo", "Text mentioning #REDIRECT [[Bar]] later"), Ok(None));
        assert_eq!(pair("Foo", "#REDIRECTION of rivers"), Ok(None));
    }

    #[test]
    fn excluded_namespace_lookup() {
        assert_eq!(excluded_namespace("Category:X"), Some("Category"));
        assert_eq!(excluded_namespace("User talk:X"), Some("User talk"));
        assert_eq!(excluded_namespace("Wikipedia‐ノート:X"), Some("Wikipedia‐ノート"));
        assert_eq!(excluded_namespace("Rust: a language"), None);
        assert_eq!(excluded_namespace("Plain"), None);
    }
}
