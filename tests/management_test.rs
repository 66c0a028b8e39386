mod common;

use std::fs;

use calinject::management::{
    BackupGuard, CatalogError, CatalogManager, DOCUMENT_STUB, DocumentError, DocumentManager,
    check_catalog,
};
use calinject::types::ResourceKind;
use tempfile::TempDir;

use common::{BOOKS_YAML, files_containing, write};

#[test]
fn test_backup_path_naming() {
    let guard = BackupGuard::with_stamp(ResourceKind::Books, "20240309-070502");
    let path = guard.backup_path(std::path::Path::new("/tmp/plan/Calendario.md"));
    assert_eq!(
        path,
        std::path::PathBuf::from("/tmp/plan/Calendario.md.books.bak-20240309-070502")
    );

    let guard = BackupGuard::with_stamp(ResourceKind::Videos, "20240309-070502");
    let path = guard.backup_path(std::path::Path::new("Calendario.md"));
    assert_eq!(path.to_string_lossy(), "Calendario.md.videos.bak-20240309-070502");
}

#[test]
fn test_commit_unchanged_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let doc = write(dir.path(), "Calendario.md", "same\n");
    let guard = BackupGuard::with_stamp(ResourceKind::Books, "20240101-000000");

    let backup = guard.commit(&doc, "same\n", "same\n").unwrap();
    assert!(backup.is_none());
    assert!(files_containing(dir.path(), ".bak-").is_empty());
}

#[test]
fn test_commit_backs_up_previous_content() {
    let dir = TempDir::new().unwrap();
    let doc = write(dir.path(), "Calendario.md", "old\n");
    let guard = BackupGuard::with_stamp(ResourceKind::Books, "20240101-000000");

    let backup = guard.commit(&doc, "old\n", "new\n").unwrap().unwrap();
    assert_eq!(fs::read_to_string(&backup).unwrap(), "old\n");
    assert_eq!(fs::read_to_string(&doc).unwrap(), "new\n");

    // No temp files left behind
    assert!(files_containing(dir.path(), "calinject-tmp").is_empty());
}

#[test]
fn test_commit_never_overwrites_existing_backup() {
    let dir = TempDir::new().unwrap();
    let doc = write(dir.path(), "Calendario.md", "v1\n");
    let guard = BackupGuard::with_stamp(ResourceKind::Books, "20240101-000000");

    let first = guard.commit(&doc, "v1\n", "v2\n").unwrap().unwrap();
    let second = guard.commit(&doc, "v2\n", "v3\n").unwrap().unwrap();
    let third = guard.commit(&doc, "v3\n", "v4\n").unwrap().unwrap();

    assert_eq!(
        first.file_name().unwrap().to_string_lossy(),
        "Calendario.md.books.bak-20240101-000000"
    );
    assert_eq!(
        second.file_name().unwrap().to_string_lossy(),
        "Calendario.md.books.bak-20240101-000000-1"
    );
    assert_eq!(
        third.file_name().unwrap().to_string_lossy(),
        "Calendario.md.books.bak-20240101-000000-2"
    );
    assert_eq!(fs::read_to_string(&first).unwrap(), "v1\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "v2\n");
    assert_eq!(fs::read_to_string(&third).unwrap(), "v3\n");
    assert_eq!(fs::read_to_string(&doc).unwrap(), "v4\n");
}

#[test]
fn test_commit_backup_failure_leaves_document_untouched() {
    let dir = TempDir::new().unwrap();
    let doc = write(dir.path(), "Calendario.md", "keep\n");
    let guard = BackupGuard::with_stamp(ResourceKind::Books, "x/does-not-exist/y");

    let result = guard.commit(&doc, "keep\n", "lost\n");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&doc).unwrap(), "keep\n");
}

#[test]
fn test_document_missing_and_stub_creation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("Calendario.md");
    let manager = DocumentManager::new(&path);

    assert_eq!(manager.path(), path.as_path());
    assert!(!manager.exists());
    assert!(matches!(manager.load(), Err(DocumentError::Missing(_))));
    assert!(matches!(
        manager.ensure_exists(false),
        Err(DocumentError::Missing(_))
    ));

    assert!(manager.ensure_exists(true).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), DOCUMENT_STUB);
    assert_eq!(DOCUMENT_STUB, "# Calendario del Programa\n\n");

    // Already there: nothing to do
    assert!(!manager.ensure_exists(true).unwrap());
    assert!(files_containing(&path.parent().unwrap(), ".bak-").is_empty());
}

#[test]
fn test_document_persist_updates_content() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "Calendario.md", "before\n");
    let guard = BackupGuard::with_stamp(ResourceKind::Videos, "20240101-000000");

    let mut document = DocumentManager::new(&path).load().unwrap();
    assert_eq!(document.content(), "before\n");

    let backup = document.persist("after\n".to_string(), &guard).unwrap();
    assert!(backup.is_some());
    assert_eq!(document.content(), "after\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), "after\n");

    let backup = document.persist("after\n".to_string(), &guard).unwrap();
    assert!(backup.is_none());
    assert_eq!(files_containing(dir.path(), ".videos.bak-").len(), 1);
}

#[test]
fn test_catalog_load() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "books.yml", BOOKS_YAML);

    let manager = CatalogManager::new(&path).load().unwrap();
    assert_eq!(manager.path(), path.as_path());
    let catalog = manager.catalog();
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.collections.keys().collect::<Vec<_>>(),
        vec!["python", "web"]
    );

    let core = catalog.entries().next().unwrap();
    assert_eq!(core.id, "py-core");
    assert_eq!(core.year.as_deref(), Some("2020"));
    assert_eq!(core.language.as_deref(), Some("es"));
}

#[test]
fn test_catalog_load_errors() {
    let dir = TempDir::new().unwrap();

    let missing = CatalogManager::new(dir.path().join("nope.yml")).load();
    assert!(matches!(missing, Err(CatalogError::NotFound(_))));

    let path = write(dir.path(), "broken.yml", "collections: [unclosed\n");
    let broken = CatalogManager::new(&path).load();
    assert!(matches!(broken, Err(CatalogError::SerdeError(_))));

    let path = write(dir.path(), "empty.yml", "   \n");
    let empty = CatalogManager::new(&path).load().unwrap();
    assert!(empty.catalog().is_empty());

    let path = write(dir.path(), "null.yml", "collections:\n");
    let null = CatalogManager::new(&path).load().unwrap();
    assert!(null.catalog().is_empty());
}

fn problems(yaml: &str) -> Vec<String> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    check_catalog(&raw).into_iter().map(|i| i.problem).collect()
}

#[test]
fn test_check_catalog_accepts_valid_catalog() {
    let yaml = r#"
collections:
  core:
    - id: a
      title: A
      url: https://example.com/a
      weeks: [S1]
      difficulty: beginner
    - id: b
      title: B
      url: http://example.com/b
      blocks: [B5A]
"#;
    assert!(problems(yaml).is_empty());
}

#[test]
fn test_check_catalog_reports_problems() {
    let yaml = r#"
collections:
  core:
    - id: a
      title: A
      url: https://example.com/a
      weeks: [S1]
    - id: a
      title: Duplicate
      url: ftp://example.com/a
      weeks: [S30]
      blocks: [B9]
      difficulty: expert
    - title: No Id
      weeks: [S2]
    - id: c
      title: No Tags
      url: https://example.com/c
"#;
    let found = problems(yaml);

    assert!(found.iter().any(|p| p == "duplicate id"));
    assert!(found.iter().any(|p| p.starts_with("invalid url")));
    assert!(found.iter().any(|p| p.starts_with("invalid week tag")));
    assert!(found.iter().any(|p| p.starts_with("invalid block tag")));
    assert!(found.iter().any(|p| p.starts_with("invalid difficulty")));
    assert!(found.iter().any(|p| p == "missing field(s): id, url"));
    assert!(found.iter().any(|p| p == "define 'weeks' and/or 'blocks'"));
}

#[test]
fn test_check_catalog_structure() {
    assert_eq!(
        problems("items: []"),
        vec!["root must contain a 'collections' mapping"]
    );
    assert_eq!(problems("collections: {}"), vec!["catalog has no entries"]);
    assert!(
        problems("collections:\n  core: 3\n")
            .iter()
            .any(|p| p == "collection must be a list")
    );
    assert!(
        problems("collections:\n  core: [plain]\n")
            .iter()
            .any(|p| p == "entry must be a mapping")
    );
}
