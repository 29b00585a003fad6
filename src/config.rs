/// Dump read when no input path is given
pub const DEFAULT_INPUT_PATH: &str = "jawiki-latest-pages-articles.xml.bz2";

/// Dictionary file written when no output path is given
pub const DEFAULT_OUTPUT_PATH: &str = "wikipedia_synonym.txt";

/// Maximum extra hops followed when resolving redirect chains
pub const REDIRECT_MAX_DEPTH: u32 = 5;

/// Progress update interval (tick every N pages)
pub const PROGRESS_INTERVAL: u64 = 1000;

/// Buffer size for reading the dump
pub const READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Buffer size for writing the dictionary
pub const WRITE_BUFFER_SIZE: usize = 256 * 1024;

/// Separator between source and target on each dictionary line
pub const FIELD_DELIMITER: char = '\t';

/// Redirect magic words, matched case-insensitively after a leading `#`.
/// jawiki accepts its localized aliases alongside the English keyword.
pub const REDIRECT_KEYWORDS: &[&str] = &["REDIRECT", "転送", "リダイレクト"];

/// Namespace prefixes that never name an article. Compared case-insensitively.
pub const EXCLUDED_NAMESPACES: &[&str] = &[
    "category",
    "カテゴリ",
    "file",
    "ファイル",
    "image",
    "画像",
    "media",
    "メディア",
    "template",
    "help",
    "portal",
    "wikipedia",
    "wp",
    "project",
    "プロジェクト",
    "user",
    "利用者",
    "mediawiki",
    "module",
    "モジュール",
    "special",
    "特別",
    "talk",
    "ノート",
    "draft",
    "timedtext",
    "gadget",
    "gadget definition",
];

/// Interwiki and interlanguage prefixes. A link through one of these leaves
/// the local wiki.
pub const INTERWIKI_PREFIXES: &[&str] = &[
    "en", "de", "fr", "es", "it", "ru", "zh", "ko", "pt", "nl", "pl", "sv", "uk", "ar", "fa",
    "vi", "id", "th", "tr", "he", "fi", "no", "da", "cs", "hu", "ro", "ca", "ms", "simple",
    "wikt", "wiktionary", "commons", "meta", "metawikimedia", "wikisource",
    "wikibooks", "wikiquote", "wikinews", "wikiversity", "wikivoyage", "voy", "species",
    "wikidata", "mw", "mediawikiwiki", "phab",
];

/// Suffixes marking talk namespaces such as `利用者‐ノート` or `User talk`.
pub const TALK_NAMESPACE_SUFFIXES: &[&str] = &["‐ノート", "-ノート", " talk"];
