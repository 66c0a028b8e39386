#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use calinject::management::CatalogManager;
use calinject::types::{Catalog, CatalogEntry};

pub const BOOKS_YAML: &str = r#"
collections:
  python:
    - id: py-core
      title: Core Python
      url: https://example.com/core
      author: Ada Lovelace
      year: 2020
      lang: es
      topics: [python, basics]
      weeks: [S1, S2]
    - id: py-adv
      title: Advanced Python
      url: https://example.com/adv
      topics: [python, async]
      weeks: [S2]
      blocks: [B2]
  web:
    - id: fastapi
      title: FastAPI in Action
      local_path: docs/fastapi.pdf
      topics: [FastAPI, CRUD]
      blocks: [B5A]
"#;

pub const VIDEOS_YAML: &str = r#"
collections:
  talks:
    - id: async-talk
      title: Async Deep Dive
      url: https://example.com/async
      topics: [python, async]
      weeks: [S2]
      timestamps:
        intro: "00:00"
        event loop: "12:30"
    - id: crud-talk
      title: CRUD APIs
      url: https://example.com/crud
      topics: [crud]
      weeks: [S5]
"#;

pub fn catalog(yaml: &str) -> Catalog {
    CatalogManager::parse(yaml).expect("fixture catalog parses")
}

// Helper function to create a test entry
pub fn entry(id: &str, title: &str, weeks: &[&str]) -> CatalogEntry {
    let mut entry = CatalogEntry::new(id, title);
    entry.weeks = weeks.iter().map(|w| w.to_string()).collect();
    entry
}

pub fn catalog_of(groups: Vec<(&str, Vec<CatalogEntry>)>) -> Catalog {
    let mut catalog = Catalog::default();
    for (name, entries) in groups {
        catalog.collections.insert(name.to_string(), entries);
    }
    catalog
}

pub fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// Files in `dir` whose name contains `needle`, sorted.
pub fn files_containing(dir: &Path, needle: &str) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)
        .expect("read dir")
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().contains(needle))
                .unwrap_or(false)
        })
        .collect();
    out.sort();
    out
}
