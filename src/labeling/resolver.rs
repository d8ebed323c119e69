use crate::types::{BondProfileRow, NewsRecord};
use std::collections::{BTreeSet, HashMap};

/// Many-to-one mapping from bond code to issuer code.
pub type BondIssuerMap = HashMap<String, String>;

/// Build the bond -> issuer mapping from reference rows. The first
/// occurrence wins when a bond code repeats.
pub fn bond_issuer_map(rows: &[BondProfileRow]) -> BondIssuerMap {
    let mut map = BondIssuerMap::new();
    for row in rows {
        map.entry(row.bond_code.clone())
            .or_insert_with(|| row.issuer_code.clone());
    }
    map
}

/// A news record with its issuer set augmented from the referenced bonds.
#[derive(Debug, Clone)]
pub struct ResolvedRecord {
    pub record: NewsRecord,
    /// True iff the augmented issuer set has exactly one member. Backward
    /// default attribution is only trusted for such records.
    pub single_entity: bool,
}

pub struct EntityResolver {
    bond_to_issuer: BondIssuerMap,
}

impl EntityResolver {
    pub fn new(bond_to_issuer: BondIssuerMap) -> Self {
        Self { bond_to_issuer }
    }

    pub fn from_profile(rows: &[BondProfileRow]) -> Self {
        Self::new(bond_issuer_map(rows))
    }

    /// Union the record's issuer codes with the issuers implied by its
    /// bond codes. A bond code with no mapping entry passes through as
    /// its own issuer; resolution is always total.
    pub fn resolve(&self, record: &NewsRecord) -> ResolvedRecord {
        let mut issuers: BTreeSet<String> = record.issuer_codes.iter().cloned().collect();

        for bond in &record.bond_codes {
            match self.bond_to_issuer.get(bond) {
                Some(issuer) => issuers.insert(issuer.clone()),
                None => issuers.insert(bond.clone()),
            };
        }

        let single_entity = issuers.len() == 1;

        ResolvedRecord {
            record: NewsRecord {
                news_id: record.news_id.clone(),
                publish_date: record.publish_date,
                bond_codes: record.bond_codes.clone(),
                issuer_codes: issuers.into_iter().collect(),
            },
            single_entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(bonds: &[&str], issuers: &[&str]) -> NewsRecord {
        NewsRecord {
            news_id: "n1".to_string(),
            publish_date: NaiveDate::from_ymd_opt(2021, 6, 15).unwrap(),
            bond_codes: bonds.iter().map(|s| s.to_string()).collect(),
            issuer_codes: issuers.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn resolver() -> EntityResolver {
        let mut map = BondIssuerMap::new();
        map.insert("B1".to_string(), "I1".to_string());
        map.insert("B2".to_string(), "I2".to_string());
        EntityResolver::new(map)
    }

    #[test]
    fn bonds_extend_issuer_set() {
        let resolved = resolver().resolve(&record(&["B1"], &["I9"]));
        assert_eq!(resolved.record.issuer_codes, vec!["I1", "I9"]);
        assert!(!resolved.single_entity);
    }

    #[test]
    fn unmapped_bond_falls_back_to_itself() {
        let resolved = resolver().resolve(&record(&["B404"], &[]));
        assert_eq!(resolved.record.issuer_codes, vec!["B404"]);
        assert!(resolved.single_entity);
    }

    #[test]
    fn duplicate_issuers_collapse() {
        // B1 maps to I1, which the record already references directly.
        let resolved = resolver().resolve(&record(&["B1"], &["I1"]));
        assert_eq!(resolved.record.issuer_codes, vec!["I1"]);
        assert!(resolved.single_entity);
    }

    #[test]
    fn empty_record_stays_empty() {
        let resolved = resolver().resolve(&record(&[], &[]));
        assert!(resolved.record.issuer_codes.is_empty());
        assert!(!resolved.single_entity);
    }

    #[test]
    fn first_mapping_wins_for_duplicate_bond_rows() {
        let rows = vec![
            BondProfileRow {
                bond_code: "B1".to_string(),
                issuer_code: "I1".to_string(),
                default_date: None,
            },
            BondProfileRow {
                bond_code: "B1".to_string(),
                issuer_code: "I2".to_string(),
                default_date: None,
            },
        ];
        let map = bond_issuer_map(&rows);
        assert_eq!(map["B1"], "I1");
    }
}
