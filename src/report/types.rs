use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString};

/// Report flavors selectable in the path, e.g. /reports/simple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ReportKind {
    Simple,
    Detail,
    Csv,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}
