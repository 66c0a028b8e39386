mod common;

use calinject::calendar::{render, select};
use calinject::types::{CatalogEntry, ResourceKind, Selection};

use common::{BOOKS_YAML, VIDEOS_YAML, catalog};

#[test]
fn test_render_book_with_full_byline() {
    let mut book = CatalogEntry::new("fluent", "Fluent Python");
    book.url = Some("https://example.com/fluent".to_string());
    book.author = Some("Luciano Ramalho".to_string());
    book.year = Some("2022".to_string());
    book.language = Some("en".to_string());
    book.topics = vec!["python".to_string(), "idioms".to_string()];

    let block = render(ResourceKind::Books, Some("S3"), &[&book]);
    assert_eq!(
        block.as_str(),
        "### Lecturas base — S3\n\n- [Fluent Python](https://example.com/fluent) — Luciano Ramalho (2022, en) — temas: python, idioms\n\n"
    );
    assert_eq!(block.item_count(), 1);
    assert!(!block.is_placeholder());
}

#[test]
fn test_render_empty_selection_placeholder() {
    let block = render(ResourceKind::Books, Some("S3"), &[]);
    assert_eq!(
        block.as_str(),
        "### Lecturas base — S3\n\n_(No se encontraron libros para S3)_\n\n"
    );
    assert!(block.is_placeholder());

    let block = render(ResourceKind::Videos, None, &[]);
    assert_eq!(
        block.as_str(),
        "### Videos base\n\n_(No se encontraron videos para los filtros dados)_\n\n"
    );
}

#[test]
fn test_render_books_from_catalog() {
    let catalog = catalog(BOOKS_YAML);
    let entries = select(&catalog, &Selection::default());
    let block = render(ResourceKind::Books, None, &entries);

    let expected = [
        "### Lecturas base",
        "",
        "- [Advanced Python](https://example.com/adv) — temas: python, async",
        "- [Core Python](https://example.com/core) — Ada Lovelace (2020, es) — temas: python, basics",
        "- [FastAPI in Action](`docs/fastapi.pdf`) — temas: FastAPI, CRUD",
        "",
        "",
    ]
    .join("\n");
    assert_eq!(block.as_str(), expected);
    assert_eq!(block.item_count(), 3);
}

#[test]
fn test_render_partial_byline_and_fallbacks() {
    let mut only_meta = CatalogEntry::new("a", "Only Meta");
    only_meta.year = Some("1999".to_string());

    let mut only_author = CatalogEntry::new("b", "Only Author");
    only_author.author = Some("Grace Hopper".to_string());

    let untitled = CatalogEntry::new("c", "  ");

    let block = render(
        ResourceKind::Books,
        Some("B1"),
        &[&only_meta, &only_author, &untitled],
    );
    let lines: Vec<&str> = block.as_str().lines().collect();
    assert_eq!(lines[0], "### Lecturas base — B1");
    assert_eq!(lines[2], "- [Only Meta](#) — (1999) — temas: ");
    assert_eq!(lines[3], "- [Only Author](#) — Grace Hopper — temas: ");
    assert_eq!(lines[4], "- [Sin título](#) — temas: ");
}

#[test]
fn test_render_videos_with_timestamps() {
    let catalog = catalog(VIDEOS_YAML);
    let entries = select(&catalog, &Selection::week("S2"));
    let block = render(ResourceKind::Videos, Some("S2"), &entries);

    assert_eq!(
        block.as_str(),
        "### Videos base — S2\n\n- [Async Deep Dive](https://example.com/async) — temas: python, async · intro: 00:00, event loop: 12:30\n\n"
    );

    let entries = select(&catalog, &Selection::week("S5"));
    let block = render(ResourceKind::Videos, Some("S5"), &entries);
    assert!(block.as_str().contains("- [CRUD APIs](https://example.com/crud) — temas: crud\n"));
    assert!(!block.as_str().contains(" · "));
}

#[test]
fn test_render_is_deterministic() {
    let catalog = catalog(BOOKS_YAML);
    let entries = select(&catalog, &Selection::week("S2"));
    let first = render(ResourceKind::Books, Some("S2"), &entries);
    let second = render(ResourceKind::Books, Some("S2"), &entries);
    assert_eq!(first, second);
    assert!(first.as_str().ends_with("\n\n"));
    assert!(!first.as_str().ends_with("\n\n\n"));
}
