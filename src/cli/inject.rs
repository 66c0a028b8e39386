use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    calendar,
    cli::CliError,
    config::PipelineConfig,
    info,
    management::{BackupGuard, CatalogManager, DocumentManager},
    success,
    types::{
        Catalog, InjectionOutcome, InjectionReport, InjectionTableRow, InjectionTier, KeyRequest,
        Selection, SelectionKey,
    },
    utils,
};

/// Injects the rendered section for every requested key into the calendar.
///
/// Keys are processed strictly in order; each one re-reads the calendar so it
/// sees the previous key's output. The first failure stops the batch. Keys
/// already written stay written, each with its own backup.
///
/// With `config.strict`, keys that matched nothing are still injected (as a
/// placeholder block) but the run ends with [`CliError::EmptySelection`].
pub fn inject(request: &KeyRequest, config: &PipelineConfig) -> Result<Vec<InjectionReport>, CliError> {
    let keys = expand_keys(request)?;
    let catalog = CatalogManager::new(&config.index).load()?.into_catalog();

    let document = DocumentManager::new(&config.calendar);
    if document.ensure_exists(config.create_if_missing)? {
        info!("Created {}", document.path().display());
    }

    let pb = ProgressBar::new(keys.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:24.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let mut reports: Vec<InjectionReport> = Vec::with_capacity(keys.len());
    for key in &keys {
        pb.set_message(format!("Injecting {kind} for {key}...", kind = config.kind, key = key));
        match inject_key(&catalog, key, config) {
            Ok(report) => reports.push(report),
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let rows: Vec<InjectionTableRow> = reports.iter().map(InjectionTableRow::from).collect();
    println!("{}", Table::new(rows));
    success!(
        "Injected {count} key(s) of {kind} into {calendar}",
        count = reports.len(),
        kind = config.kind,
        calendar = config.calendar.display()
    );

    if config.strict {
        let empty: Vec<String> = reports
            .iter()
            .filter(|r| r.matches == 0)
            .map(|r| r.key.to_string())
            .collect();
        if !empty.is_empty() {
            return Err(CliError::EmptySelection(empty));
        }
    }

    Ok(reports)
}

/// One read-transform-backup-write cycle for a single key.
pub fn inject_key(
    catalog: &Catalog,
    key: &SelectionKey,
    config: &PipelineConfig,
) -> Result<InjectionReport, CliError> {
    let mut document = DocumentManager::new(&config.calendar).load()?;

    let entries = calendar::select(catalog, &Selection::from(key.clone()));
    let block = calendar::render(config.kind, Some(key.tag()), &entries);
    let upserted = calendar::upsert(document.content(), config.kind, key.tag(), &block);

    let outcome = match (upserted.changed, upserted.tier) {
        (false, _) => InjectionOutcome::Unchanged,
        (true, InjectionTier::Replaced) => InjectionOutcome::Replaced,
        (true, InjectionTier::Inserted) => InjectionOutcome::Inserted,
        (true, InjectionTier::Appended) => InjectionOutcome::Appended,
    };

    let backup = if upserted.changed {
        document.persist(upserted.text, &BackupGuard::new(config.kind))?
    } else {
        None
    };

    Ok(InjectionReport {
        key: key.clone(),
        matches: block.item_count(),
        outcome,
        backup,
    })
}

/// Turns a key request into canonical selection keys, in request order.
pub fn expand_keys(request: &KeyRequest) -> Result<Vec<SelectionKey>, CliError> {
    let keys = match request {
        KeyRequest::Single(raw) => vec![SelectionKey::parse(raw).map_err(CliError::InvalidTag)?],
        KeyRequest::Weeks(raw) => raw
            .iter()
            .map(|w| utils::parse_week(w).map(SelectionKey::Week))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CliError::InvalidTag)?,
        KeyRequest::Blocks(raw) => raw
            .iter()
            .map(|b| utils::parse_block(b).map(SelectionKey::Block))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CliError::InvalidTag)?,
        KeyRequest::Range(from, to) => utils::weeks_from_range(from, to)
            .map_err(CliError::InvalidTag)?
            .into_iter()
            .map(SelectionKey::Week)
            .collect(),
        KeyRequest::All => utils::all_weeks().into_iter().map(SelectionKey::Week).collect(),
    };

    if keys.is_empty() {
        return Err(CliError::InvalidTag("no keys requested".to_string()));
    }
    Ok(keys)
}
