use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One news article, after ingestion has parsed the compact publish date
/// and split the packed code columns into native lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsRecord {
    pub news_id: String,
    pub publish_date: NaiveDate,
    pub bond_codes: Vec<String>,
    pub issuer_codes: Vec<String>,
}

/// One row of the bond reference table. A row with no default date still
/// contributes to the bond -> issuer mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BondProfileRow {
    pub bond_code: String,
    pub issuer_code: String,
    pub default_date: Option<NaiveDate>,
}

/// Two-state default-risk signal for one (record, window) pair.
///
/// The numeric convention is kept as -1/+1 rather than a boolean because
/// downstream aggregation reduces groups of these values with an
/// "any -1 present" containment check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Default = -1,   // a qualifying default event falls inside the window
    NonDefault = 1, // no default risk within the scope of the window
}

impl Label {
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// Per-window labels for one news record, in configured window order.
#[derive(Debug, Clone)]
pub struct RecordLabels {
    pub news_id: String,
    pub labels: Vec<Label>,
}

/// Result of labeling one batch of news records.
///
/// Records that resolved to zero entities appear in `unlabeled` and get no
/// label row; the caller decides how to surface the gap (the CSV writer
/// leaves their window columns null).
#[derive(Debug, Clone, Default)]
pub struct LabeledBatch {
    pub rows: Vec<RecordLabels>,
    pub unlabeled: Vec<String>,
}
