use std::{
    collections::HashSet,
    fmt,
    io::Error,
    path::{Path, PathBuf},
};

use serde_yaml::{Mapping, Value};
use url::Url;

use crate::{
    types::{Catalog, CatalogIssue},
    utils,
};

pub const REQUIRED_FIELDS: [&str; 3] = ["id", "title", "url"];
pub const DIFFICULTIES: [&str; 4] = ["beginner", "intermediate", "advanced", "mixed"];

#[derive(Debug)]
pub enum CatalogError {
    NotFound(PathBuf),
    IoError(Error),
    SerdeError(serde_yaml::Error),
}

impl From<Error> for CatalogError {
    fn from(err: Error) -> Self {
        CatalogError::IoError(err)
    }
}

impl From<serde_yaml::Error> for CatalogError {
    fn from(err: serde_yaml::Error) -> Self {
        CatalogError::SerdeError(err)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NotFound(path) => write!(f, "catalog {} does not exist", path.display()),
            CatalogError::IoError(e) => write!(f, "cannot read catalog: {}", e),
            CatalogError::SerdeError(e) => write!(f, "cannot parse catalog: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Loads a resource catalog (`collections: {group: [entry, ...]}`) from YAML.
pub struct CatalogManager {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: Catalog::default(),
        }
    }

    pub fn load(&self) -> Result<Self, CatalogError> {
        let content = self.read()?;
        Ok(Self {
            path: self.path.clone(),
            catalog: Self::parse(&content)?,
        })
    }

    /// Loads the file as an untyped YAML tree, for validation.
    pub fn load_raw(&self) -> Result<Value, CatalogError> {
        let content = self.read()?;
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn parse(content: &str) -> Result<Catalog, CatalogError> {
        if content.trim().is_empty() {
            return Ok(Catalog::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, CatalogError> {
        if !self.path.is_file() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Checks a raw catalog tree and returns every problem found.
///
/// Rules: the root holds a `collections` mapping of sequences; every entry has
/// `id`, `title` and `url`; ids are unique across the catalog; urls are
/// absolute http(s) with a host; each entry names at least one week or block;
/// week/block tags are well formed; `difficulty`, when set, is one of
/// [`DIFFICULTIES`]; and the catalog is not empty.
pub fn check_catalog(raw: &Value) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let Some(collections) = raw.get("collections").and_then(Value::as_mapping) else {
        issues.push(issue("-", "-", "root must contain a 'collections' mapping"));
        return issues;
    };

    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut had_items = false;

    for (name, items) in collections {
        let collection = scalar(name).unwrap_or_else(|| "?".to_string());
        let Some(items) = items.as_sequence() else {
            issues.push(issue(&collection, "-", "collection must be a list"));
            continue;
        };

        for item in items {
            had_items = true;
            let Some(entry) = item.as_mapping() else {
                issues.push(issue(&collection, "-", "entry must be a mapping"));
                continue;
            };
            check_entry(&collection, entry, &mut seen_ids, &mut issues);
        }
    }

    if !had_items {
        issues.push(issue("-", "-", "catalog has no entries"));
    }

    issues
}

fn check_entry(
    collection: &str,
    entry: &Mapping,
    seen_ids: &mut HashSet<String>,
    issues: &mut Vec<CatalogIssue>,
) {
    let id = entry.get("id").and_then(scalar);
    let label = id.clone().unwrap_or_else(|| "-".to_string());

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| entry.get(*field).and_then(scalar).is_none())
        .collect();
    if !missing.is_empty() {
        issues.push(issue(
            collection,
            &label,
            &format!("missing field(s): {}", missing.join(", ")),
        ));
    }

    if let Some(id) = &id {
        if !seen_ids.insert(id.clone()) {
            issues.push(issue(collection, &label, "duplicate id"));
        }
    }

    if let Some(url) = entry.get("url").and_then(scalar) {
        if !is_absolute_http(&url) {
            issues.push(issue(collection, &label, &format!("invalid url: {}", url)));
        }
    }

    let weeks = tags(entry.get("weeks"));
    let blocks = tags(entry.get("blocks"));
    if weeks.is_empty() && blocks.is_empty() {
        issues.push(issue(collection, &label, "define 'weeks' and/or 'blocks'"));
    }
    for week in weeks.iter().filter(|w| !utils::is_week_tag(w)) {
        issues.push(issue(collection, &label, &format!("invalid week tag: {}", week)));
    }
    for block in blocks.iter().filter(|b| !utils::is_block_tag(b)) {
        issues.push(issue(collection, &label, &format!("invalid block tag: {}", block)));
    }

    if let Some(difficulty) = entry.get("difficulty").filter(|d| !d.is_null()) {
        let valid = difficulty
            .as_str()
            .map_or(false, |d| DIFFICULTIES.contains(&d));
        if !valid {
            issues.push(issue(
                collection,
                &label,
                &format!(
                    "invalid difficulty: {}",
                    scalar(difficulty).unwrap_or_else(|| "?".to_string())
                ),
            ));
        }
    }
}

fn is_absolute_http(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}

fn tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar).collect(),
        Some(other) => scalar(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn issue(collection: &str, id: &str, problem: &str) -> CatalogIssue {
    CatalogIssue {
        collection: collection.to_string(),
        id: id.to_string(),
        problem: problem.to_string(),
    }
}
