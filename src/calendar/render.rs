use crate::types::{CatalogEntry, RenderedBlock, ResourceKind};

const UNTITLED: &str = "Sin título";

/// Renders the markdown section for `entries`, in the order given.
///
/// The heading is `### <prefix> — <label>` (or `### <prefix>` without a
/// label), followed by a blank line and one bullet per entry. An empty list
/// renders a single italic placeholder instead of bullets. The text always
/// ends with exactly one blank line.
pub fn render(kind: ResourceKind, label: Option<&str>, entries: &[&CatalogEntry]) -> RenderedBlock {
    let heading = match label {
        Some(label) => format!("### {} — {}", kind.heading_prefix(), label),
        None => format!("### {}", kind.heading_prefix()),
    };
    let mut lines = vec![heading, String::new()];

    if entries.is_empty() {
        let scope = label.unwrap_or("los filtros dados");
        lines.push(format!("_(No se encontraron {} para {})_", kind.noun(), scope));
        return RenderedBlock::new(finish(lines), 0);
    }

    lines.extend(entries.iter().map(|entry| match kind {
        ResourceKind::Books => book_line(entry),
        ResourceKind::Videos => video_line(entry),
    }));

    RenderedBlock::new(finish(lines), entries.len())
}

fn finish(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push_str("\n\n");
    text
}

fn title(entry: &CatalogEntry) -> &str {
    if entry.title.trim().is_empty() {
        UNTITLED
    } else {
        &entry.title
    }
}

/// url, then the local path as inline code, then a placeholder anchor.
fn link(entry: &CatalogEntry) -> String {
    match (&entry.url, &entry.local_path) {
        (Some(url), _) => url.clone(),
        (None, Some(path)) => format!("`{}`", path),
        (None, None) => "#".to_string(),
    }
}

fn book_line(entry: &CatalogEntry) -> String {
    let meta: Vec<&str> = [entry.year.as_deref(), entry.language.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    let meta = (!meta.is_empty()).then(|| format!("({})", meta.join(", ")));

    let byline = match (entry.author.as_deref(), meta) {
        (Some(author), Some(meta)) => Some(format!("{} {}", author, meta)),
        (Some(author), None) => Some(author.to_string()),
        (None, Some(meta)) => Some(meta),
        (None, None) => None,
    };

    let mut line = format!("- [{}]({})", title(entry), link(entry));
    if let Some(byline) = byline {
        line.push_str(" — ");
        line.push_str(&byline);
    }
    line.push_str(" — temas: ");
    line.push_str(&entry.topics.join(", "));
    line
}

fn video_line(entry: &CatalogEntry) -> String {
    let mut line = format!(
        "- [{}]({}) — temas: {}",
        title(entry),
        link(entry),
        entry.topics.join(", ")
    );

    if !entry.timestamps.is_empty() {
        let marks: Vec<String> = entry
            .timestamps
            .iter()
            .map(|(label, offset)| format!("{}: {}", label, offset))
            .collect();
        line.push_str(" · ");
        line.push_str(&marks.join(", "));
    }
    line
}
