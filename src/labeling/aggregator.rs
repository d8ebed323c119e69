use crate::types::{Label, RecordLabels};
use std::collections::HashMap;

/// The any-wins rule: a group of per-entity labels reduces to -1 if any
/// member is -1, else +1.
pub fn contains_negative<I>(labels: I) -> Label
where
    I: IntoIterator<Item = Label>,
{
    if labels.into_iter().any(|label| label == Label::Default) {
        Label::Default
    } else {
        Label::NonDefault
    }
}

/// One expanded row: the full window-judgment vector for a single
/// (entity, default date) resolution of a news record.
#[derive(Debug, Clone)]
pub struct JudgmentRow {
    pub news_id: String,
    pub labels: Vec<Label>,
}

/// Collapse expanded rows back to one label vector per news record,
/// window by window, preserving first-seen record order.
pub fn aggregate(rows: &[JudgmentRow]) -> Vec<RecordLabels> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<RecordLabels> = Vec::new();

    for row in rows {
        match index.get(row.news_id.as_str()) {
            Some(&slot) => {
                for (acc, label) in out[slot].labels.iter_mut().zip(&row.labels) {
                    *acc = contains_negative([*acc, *label]);
                }
            }
            None => {
                out.push(RecordLabels {
                    news_id: row.news_id.clone(),
                    labels: row.labels.clone(),
                });
                index.insert(row.news_id.as_str(), out.len() - 1);
            }
        }
    }

    out
}
