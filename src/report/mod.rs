pub mod formatter;
mod handlers;
pub mod service;
pub mod types;

pub use formatter::{csv_report, detail_report, simple_report, EMPTY_DAY_MESSAGE};
pub use handlers::get_report;
pub use service::ReportService;
pub use types::{ReportKind, ReportQuery};
