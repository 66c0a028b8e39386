use std::path::Path;

use crate::{
    calendar,
    cli::CliError,
    management::CatalogManager,
    types::{RenderedBlock, ResourceKind, Selection},
};

/// Prints the block `inject` would write for `selection`, without touching
/// any document.
///
/// With `strict`, an empty result still prints the placeholder block but is
/// reported as [`CliError::EmptySelection`].
pub fn suggest(
    kind: ResourceKind,
    selection: &Selection,
    index: &Path,
    strict: bool,
) -> Result<(), CliError> {
    let block = suggestion(kind, selection, index)?;
    println!("{}", block);

    if strict && block.is_placeholder() {
        let scope = selection
            .label()
            .map(str::to_string)
            .unwrap_or_else(|| selection.topics.join(", "));
        return Err(CliError::EmptySelection(vec![scope]));
    }
    Ok(())
}

pub fn suggestion(
    kind: ResourceKind,
    selection: &Selection,
    index: &Path,
) -> Result<RenderedBlock, CliError> {
    let catalog = CatalogManager::new(index).load()?.into_catalog();
    let entries = calendar::select(&catalog, selection);
    Ok(calendar::render(kind, selection.label(), &entries))
}
