mod handlers;
pub mod service;
pub mod types;

pub use handlers::{export_backup, import_backup};
pub use service::BackupService;
pub use types::{BackupDocument, ImportResponse};
