use crate::types::BondProfileRow;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Per-entity default history, built once per run from the reference
/// table and read-only afterwards.
///
/// The bond view keeps only the earliest default date per bond. The
/// issuer view keeps every distinct date, because an issuer's bonds may
/// default independently and each event matters for window judgment.
#[derive(Debug, Clone, Default)]
pub struct DefaultHistoryIndex {
    earliest_by_bond: HashMap<String, NaiveDate>,
    all_by_issuer: HashMap<String, Vec<NaiveDate>>,
}

impl DefaultHistoryIndex {
    pub fn from_profile(rows: &[BondProfileRow]) -> Self {
        let mut earliest_by_bond: HashMap<String, NaiveDate> = HashMap::new();
        let mut by_issuer: HashMap<String, BTreeSet<NaiveDate>> = HashMap::new();

        for row in rows {
            let date = match row.default_date {
                Some(date) => date,
                None => continue,
            };

            earliest_by_bond
                .entry(row.bond_code.clone())
                .and_modify(|earliest| {
                    if date < *earliest {
                        *earliest = date;
                    }
                })
                .or_insert(date);

            by_issuer
                .entry(row.issuer_code.clone())
                .or_default()
                .insert(date);
        }

        Self {
            earliest_by_bond,
            all_by_issuer: by_issuer
                .into_iter()
                .map(|(issuer, dates)| (issuer, dates.into_iter().collect()))
                .collect(),
        }
    }

    /// Earliest recorded default for a bond, or None for a clean record.
    pub fn earliest_for_bond(&self, bond_code: &str) -> Option<NaiveDate> {
        self.earliest_by_bond.get(bond_code).copied()
    }

    /// All distinct default dates for an issuer, ascending. Unknown
    /// issuers yield an empty slice: no recorded default.
    pub fn dates_for_issuer(&self, issuer_code: &str) -> &[NaiveDate] {
        self.all_by_issuer
            .get(issuer_code)
            .map(|dates| dates.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bond: &str, issuer: &str, date: Option<(i32, u32, u32)>) -> BondProfileRow {
        BondProfileRow {
            bond_code: bond.to_string(),
            issuer_code: issuer.to_string(),
            default_date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
        }
    }

    #[test]
    fn bond_view_keeps_earliest_date() {
        let index = DefaultHistoryIndex::from_profile(&[
            row("B1", "I1", Some((2021, 9, 10))),
            row("B1", "I1", Some((2020, 3, 1))),
            row("B1", "I1", Some((2022, 1, 5))),
        ]);

        assert_eq!(
            index.earliest_for_bond("B1"),
            Some(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap())
        );
    }

    #[test]
    fn issuer_view_keeps_all_distinct_dates_sorted() {
        let index = DefaultHistoryIndex::from_profile(&[
            row("B1", "I1", Some((2021, 9, 10))),
            row("B2", "I1", Some((2020, 3, 1))),
            row("B3", "I1", Some((2021, 9, 10))),
        ]);

        assert_eq!(
            index.dates_for_issuer("I1"),
            &[
                NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 9, 10).unwrap(),
            ]
        );
    }

    #[test]
    fn clean_entities_have_no_history() {
        let index = DefaultHistoryIndex::from_profile(&[row("B1", "I1", None)]);

        assert_eq!(index.earliest_for_bond("B1"), None);
        assert!(index.dates_for_issuer("I1").is_empty());
        assert_eq!(index.earliest_for_bond("B404"), None);
        assert!(index.dates_for_issuer("I404").is_empty());
    }
}
