use crate::{
    calendar::markers::{self, MarkerPair},
    types::{InjectionTier, RenderedBlock, ResourceKind},
};

/// New document text produced by [`upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    pub text: String,
    pub changed: bool,
    pub tier: InjectionTier,
}

/// Inserts or updates the marker-wrapped `block` for (`kind`, `key`).
///
/// Tiers are tried in order and the first applicable one wins:
///
/// 1. an existing marker pair is replaced in place,
/// 2. otherwise the block goes right after the first `### {key}` heading,
/// 3. otherwise a `## {key}` section is appended at the end of the document.
///
/// Only tier 1 can report `changed == false`.
pub fn upsert(document: &str, kind: ResourceKind, key: &str, block: &RenderedBlock) -> Upserted {
    let markers = MarkerPair::new(kind, key);
    let span = markers.wrap(block);

    if let Some(range) = markers.find_span(document) {
        let mut text = String::with_capacity(document.len() + span.len());
        text.push_str(&document[..range.start]);
        text.push_str(&span);
        text.push_str(&document[range.end..]);
        let changed = text != document;
        return Upserted {
            text,
            changed,
            tier: InjectionTier::Replaced,
        };
    }

    if let Some(pos) = markers::find_heading_offset(document, key) {
        let mut text = String::with_capacity(document.len() + span.len() + 2);
        text.push_str(&document[..pos]);
        text.push_str("\n\n");
        text.push_str(&span);
        text.push_str(&document[pos..]);
        return Upserted {
            text,
            changed: true,
            tier: InjectionTier::Inserted,
        };
    }

    let mut text = document.trim_end().to_string();
    text.push_str(&format!("\n\n## {}\n\n", key));
    text.push_str(&span);
    Upserted {
        text,
        changed: true,
        tier: InjectionTier::Appended,
    }
}
