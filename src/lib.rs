//! Curriculum Calendar Injector Library
//!
//! This library merges curated resource catalogs (books, videos) into a living
//! markdown calendar. It selects catalog entries for a week, block or topic
//! filter, renders them into a stable markdown block and upserts that block into
//! a hand-edited document without duplicating or corrupting surrounding content.
//!
//! # Modules
//!
//! - `calendar` - Pure core: entry selection, section rendering and the
//!   three-tier document injector
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Catalog loading, document persistence and backups
//! - `types` - Data structures and type definitions
//! - `utils` - Tag parsing, week ranges and serde helpers
//!
//! # Example
//!
//! ```
//! use calinject::{calendar, types::{ResourceKind, Selection}};
//!
//! let catalog = calinject::types::Catalog::default();
//! let selection = Selection::week("S2");
//! let entries = calendar::select(&catalog, &selection);
//! let block = calendar::render(ResourceKind::Books, selection.label(), &entries);
//! let upserted = calendar::upsert("# Calendario\n", ResourceKind::Books, "S2", &block);
//! assert!(upserted.changed);
//! ```

pub mod calendar;
pub mod cli;
pub mod config;
pub mod management;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Loaded {} entries", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Injected {} weeks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Without an explicit code the process terminates with exit code 1. The
/// `code = N;` form lets the caller pick the exit status, which is how the
/// CLI reports its distinct failure classes.
///
/// # Behavior
///
/// This macro never returns. Use it only for fatal errors where recovery is
/// not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!(code = 5; "Document {} does not exist", path.display());
/// ```
#[macro_export]
macro_rules! error {
  (code = $code:expr; $($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit($code);
  });
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues that users should notice but that don't
/// require program termination.
///
/// # Example
///
/// ```
/// warning!("No .env file found, using defaults");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
