use std::{fmt, path::PathBuf};

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::Deserialize;
use tabled::Tabled;

use crate::utils;

/// Kind of resource catalog being merged into the calendar.
///
/// Each kind owns its marker token, heading prefix and backup tag so that
/// books and videos can live side by side in the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ResourceKind {
    Books,
    Videos,
}

impl ResourceKind {
    pub fn marker_token(&self) -> &'static str {
        match self {
            ResourceKind::Books => "BOOKS_BASE",
            ResourceKind::Videos => "VIDEOS_BASE",
        }
    }

    pub fn heading_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Books => "Lecturas base",
            ResourceKind::Videos => "Videos base",
        }
    }

    /// Plural noun used in the "nothing found" placeholder.
    pub fn noun(&self) -> &'static str {
        match self {
            ResourceKind::Books => "libros",
            ResourceKind::Videos => "videos",
        }
    }

    pub fn backup_tag(&self) -> &'static str {
        match self {
            ResourceKind::Books => "books",
            ResourceKind::Videos => "videos",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.backup_tag())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    #[serde(deserialize_with = "utils::de_scalar")]
    pub id: String,
    #[serde(deserialize_with = "utils::de_scalar")]
    pub title: String,
    #[serde(default, deserialize_with = "utils::de_opt_scalar")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "utils::de_opt_scalar")]
    pub local_path: Option<String>,
    #[serde(default, deserialize_with = "utils::de_opt_scalar")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "utils::de_opt_scalar")]
    pub year: Option<String>,
    #[serde(default, alias = "lang", deserialize_with = "utils::de_opt_scalar")]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "utils::de_tags")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "utils::de_tags")]
    pub weeks: Vec<String>,
    #[serde(default, deserialize_with = "utils::de_tags")]
    pub blocks: Vec<String>,
    #[serde(default, deserialize_with = "utils::de_opt_scalar")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "utils::de_timestamps")]
    pub timestamps: IndexMap<String, String>,
}

impl CatalogEntry {
    /// Builds a bare entry with only the required fields, mostly useful for tests
    /// and fixtures.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            local_path: None,
            author: None,
            year: None,
            language: None,
            topics: Vec::new(),
            weeks: Vec::new(),
            blocks: Vec::new(),
            difficulty: None,
            timestamps: IndexMap::new(),
        }
    }
}

/// Named groups of catalog entries, in file order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "utils::de_null_default")]
    pub collections: IndexMap<String, Vec<CatalogEntry>>,
}

impl Catalog {
    /// Iterates every entry across all groups in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.collections.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.collections.values().map(|c| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single week or block tag. Week and block selection are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Week(String),
    Block(String),
}

impl SelectionKey {
    /// Parses a raw tag, detecting week (`S<n>`) or block (`B<n>[A|B]`) form.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let tag = utils::normalize_tag(raw);
        if tag.starts_with('S') {
            utils::parse_week(&tag).map(SelectionKey::Week)
        } else if tag.starts_with('B') {
            utils::parse_block(&tag).map(SelectionKey::Block)
        } else {
            Err(format!(
                "invalid tag '{}' (expected S1..S24 or B1..B5[A|B])",
                raw.trim()
            ))
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            SelectionKey::Week(tag) | SelectionKey::Block(tag) => tag,
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Selection criterion: an optional week/block key combined with a topic filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub key: Option<SelectionKey>,
    pub topics: Vec<String>,
}

impl Selection {
    /// Selects a week, canonicalizing the tag (`s07` becomes `S7`). A tag that
    /// does not parse is kept uppercased and simply matches nothing.
    pub fn week(tag: &str) -> Self {
        let tag = utils::parse_week(tag).unwrap_or_else(|_| utils::normalize_tag(tag));
        Self::from(SelectionKey::Week(tag))
    }

    /// Selects a block, canonicalizing the tag like [`Selection::week`].
    pub fn block(tag: &str) -> Self {
        let tag = utils::parse_block(tag).unwrap_or_else(|_| utils::normalize_tag(tag));
        Self::from(SelectionKey::Block(tag))
    }

    pub fn topics<I, S>(topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::default().with_topics(topics)
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Heading label: the key tag when a week or block is selected.
    pub fn label(&self) -> Option<&str> {
        self.key.as_ref().map(|k| k.tag())
    }
}

impl From<SelectionKey> for Selection {
    fn from(key: SelectionKey) -> Self {
        Self {
            key: Some(key),
            topics: Vec::new(),
        }
    }
}

/// Which keys a batch run should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRequest {
    Single(String),
    Weeks(Vec<String>),
    Blocks(Vec<String>),
    Range(String, String),
    All,
}

/// A rendered markdown section. Always ends with a single blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    text: String,
    items: usize,
}

impl RenderedBlock {
    pub(crate) fn new(text: String, items: usize) -> Self {
        Self { text, items }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn item_count(&self) -> usize {
        self.items
    }

    /// True when the block only carries the "nothing found" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.items == 0
    }
}

impl fmt::Display for RenderedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Which upsert tier produced the new document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTier {
    Replaced,
    Inserted,
    Appended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionOutcome {
    Replaced,
    Inserted,
    Appended,
    Unchanged,
}

impl fmt::Display for InjectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InjectionOutcome::Replaced => "replaced",
            InjectionOutcome::Inserted => "inserted under heading",
            InjectionOutcome::Appended => "appended",
            InjectionOutcome::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

/// Result of injecting one key into the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionReport {
    pub key: SelectionKey,
    pub matches: usize,
    pub outcome: InjectionOutcome,
    pub backup: Option<PathBuf>,
}

#[derive(Tabled)]
pub struct InjectionTableRow {
    pub key: String,
    pub matches: usize,
    pub outcome: String,
    pub backup: String,
}

impl From<&InjectionReport> for InjectionTableRow {
    fn from(report: &InjectionReport) -> Self {
        Self {
            key: report.key.to_string(),
            matches: report.matches,
            outcome: report.outcome.to_string(),
            backup: report
                .backup
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// A problem found while validating a raw catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct CatalogIssue {
    pub collection: String,
    pub id: String,
    pub problem: String,
}
