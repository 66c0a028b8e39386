use std::path::Path;

use tabled::Table;

use crate::{
    cli::CliError,
    info,
    management::{CatalogManager, check_catalog},
    success,
    types::{CatalogIssue, ResourceKind},
    warning,
};

/// Validates the catalog at `index` and prints every problem as a table.
///
/// Returns the number of entries checked when the catalog is clean.
pub fn validate(kind: ResourceKind, index: &Path) -> Result<usize, CliError> {
    let manager = CatalogManager::new(index);
    let raw = manager.load_raw()?;

    let issues: Vec<CatalogIssue> = check_catalog(&raw);
    if !issues.is_empty() {
        warning!(
            "{count} problem(s) in {kind} catalog {path}:",
            count = issues.len(),
            kind = kind,
            path = index.display()
        );
        let count = issues.len();
        println!("{}", Table::new(issues));
        return Err(CliError::CatalogRejected(count));
    }

    let catalog = manager.load()?.into_catalog();
    info!(
        "{groups} collection(s) in {path}",
        groups = catalog.collections.len(),
        path = manager.path().display()
    );
    success!("{kind} catalog is valid ({count} entries).", kind = kind, count = catalog.len());
    Ok(catalog.len())
}
