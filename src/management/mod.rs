mod backup;
mod catalog;
mod document;

pub use backup::BackupGuard;
pub use backup::GuardError;
pub use catalog::CatalogError;
pub use catalog::CatalogManager;
pub use catalog::DIFFICULTIES;
pub use catalog::check_catalog;
pub use document::DOCUMENT_STUB;
pub use document::DocumentError;
pub use document::DocumentManager;
