use std::collections::HashSet;

use crate::{
    types::{Catalog, CatalogEntry, Selection, SelectionKey},
    utils,
};

/// Returns the catalog entries matching `selection`, sorted by title
/// (case-insensitive). Ties keep catalog order. An entry listed in several
/// groups is returned once per group.
pub fn select<'a>(catalog: &'a Catalog, selection: &Selection) -> Vec<&'a CatalogEntry> {
    let wanted_topics: HashSet<String> = selection
        .topics
        .iter()
        .map(|t| utils::normalize_topic(t))
        .filter(|t| !t.is_empty())
        .collect();

    let mut out: Vec<&CatalogEntry> = catalog
        .entries()
        .filter(|entry| {
            selection
                .key
                .as_ref()
                .map_or(true, |key| matches_key(entry, key))
        })
        .filter(|entry| matches_topics(entry, &wanted_topics))
        .collect();

    out.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    out
}

pub fn matches_key(entry: &CatalogEntry, key: &SelectionKey) -> bool {
    let (tags, wanted) = match key {
        SelectionKey::Week(tag) => (&entry.weeks, tag),
        SelectionKey::Block(tag) => (&entry.blocks, tag),
    };
    let wanted = utils::normalize_tag(wanted);
    tags.iter().any(|t| utils::normalize_tag(t) == wanted)
}

/// Subset-or-overlap: any shared topic is enough. An empty filter matches all.
pub fn matches_topics(entry: &CatalogEntry, wanted: &HashSet<String>) -> bool {
    if wanted.is_empty() {
        return true;
    }

    let has: HashSet<String> = entry
        .topics
        .iter()
        .map(|t| utils::normalize_topic(t))
        .collect();

    wanted.is_subset(&has) || !wanted.is_disjoint(&has)
}
