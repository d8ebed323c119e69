use crate::data::connectors::{DataValidator, NewsColumn, ProfileColumn};
use crate::error::{BondLabelError, Result};
use crate::types::{BondProfileRow, NewsRecord};
use chrono::NaiveDate;
use polars::prelude::*;

/// Delimiter used for the packed code-list cells in batch CSVs.
pub const CODE_DELIMITER: char = ';';

/// A record dropped at ingestion, with the reason it cannot be labeled.
#[derive(Debug, Clone)]
pub struct RejectedRecord {
    pub news_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    pub records: Vec<NewsRecord>,
    pub rejected: Vec<RejectedRecord>,
}

/// Parse a compact `YYYYMMDD` date.
pub fn parse_compact_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y%m%d")
        .map_err(|e| BondLabelError::DataLoading(format!("Invalid compact date '{}': {}", raw, e)))
}

/// Split a packed code cell into a native list. Empty cells and stray
/// delimiters yield an empty list, not an error.
pub fn split_codes(cell: Option<&str>) -> Vec<String> {
    match cell {
        Some(raw) => raw
            .split(CODE_DELIMITER)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// Read a column as strings regardless of whether the CSV reader inferred
/// text or numbers. Compact dates and numeric ids both show up as integers.
pub(crate) fn utf8_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?;
    let values = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect(),
        DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32
        | DataType::Float64 | DataType::Float32 => {
            let casted = series.cast(&DataType::Int64)?;
            casted
                .i64()?
                .into_iter()
                .map(|v| v.map(|x| x.to_string()))
                .collect()
        }
        dt => {
            return Err(BondLabelError::DataLoading(format!(
                "Column '{}' must be text or numeric, found {:?}",
                name, dt
            )))
        }
    };
    Ok(values)
}

/// Parse one news batch frame into typed records.
///
/// A missing or malformed publish date is fatal for that record: it is
/// moved to `rejected` and excluded from labeling. A missing news id is
/// fatal for the batch, since the row could not even be reported.
pub fn parse_news_frame(df: &DataFrame) -> Result<ParsedBatch> {
    let columns = DataValidator::validate_news(df)?;

    let ids = utf8_values(df, &columns[&NewsColumn::NewsId])?;
    let dates = utf8_values(df, &columns[&NewsColumn::PublishDate])?;
    let bonds = utf8_values(df, &columns[&NewsColumn::BondCodes])?;
    let issuers = utf8_values(df, &columns[&NewsColumn::IssuerCodes])?;

    let mut batch = ParsedBatch::default();

    for i in 0..df.height() {
        let news_id = match ids[i].as_deref() {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                return Err(BondLabelError::DataLoading(format!(
                    "Row {} has no news id",
                    i
                )))
            }
        };

        let publish_date = match dates[i].as_deref() {
            Some(raw) => match parse_compact_date(raw) {
                Ok(date) => date,
                Err(e) => {
                    batch.rejected.push(RejectedRecord {
                        news_id,
                        reason: e.to_string(),
                    });
                    continue;
                }
            },
            None => {
                batch.rejected.push(RejectedRecord {
                    news_id,
                    reason: "missing publish date".to_string(),
                });
                continue;
            }
        };

        batch.records.push(NewsRecord {
            news_id,
            publish_date,
            bond_codes: split_codes(bonds[i].as_deref()),
            issuer_codes: split_codes(issuers[i].as_deref()),
        });
    }

    Ok(batch)
}

/// Parse the bond reference table. Rows missing either code are skipped
/// with a warning; a malformed default date is a hard error because the
/// reference table is the ground truth for every batch.
pub fn parse_profile_frame(df: &DataFrame) -> Result<Vec<BondProfileRow>> {
    let columns = DataValidator::validate_profile(df)?;

    let bonds = utf8_values(df, &columns[&ProfileColumn::BondCode])?;
    let issuers = utf8_values(df, &columns[&ProfileColumn::IssuerCode])?;
    let dates = utf8_values(df, &columns[&ProfileColumn::DefaultDate])?;

    let mut rows = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let (bond_code, issuer_code) = match (bonds[i].as_deref(), issuers[i].as_deref()) {
            (Some(b), Some(iss)) if !b.trim().is_empty() && !iss.trim().is_empty() => {
                (b.trim().to_string(), iss.trim().to_string())
            }
            _ => {
                log::warn!("Skipping profile row {} with missing bond or issuer code", i);
                continue;
            }
        };

        let default_date = match dates[i].as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_compact_date(raw)?),
            _ => None,
        };

        rows.push(BondProfileRow {
            bond_code,
            issuer_code,
            default_date,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn parses_compact_dates() {
        let date = parse_compact_date("20210615").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 6, 15).unwrap());
        assert!(parse_compact_date("2021-06-15").is_err());
        assert!(parse_compact_date("20211340").is_err());
    }

    #[test]
    fn splits_packed_code_cells() {
        assert_eq!(split_codes(Some("B1;B2")), vec!["B1", "B2"]);
        assert_eq!(split_codes(Some(" B1 ; ;B2;")), vec!["B1", "B2"]);
        assert!(split_codes(Some("")).is_empty());
        assert!(split_codes(None).is_empty());
    }

    #[test]
    fn parses_news_frame_and_rejects_bad_dates() {
        let df = df! {
            "news_id" => &["n1", "n2", "n3"],
            "publish_date" => &[Some("20210615"), Some("junk"), None],
            "bond_codes" => &[Some("B1;B2"), Some("B3"), None],
            "issuer_codes" => &[Some("I9"), None, Some("I1")],
        }
        .unwrap();

        let batch = parse_news_frame(&df).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.rejected.len(), 2);

        let record = &batch.records[0];
        assert_eq!(record.news_id, "n1");
        assert_eq!(record.bond_codes, vec!["B1", "B2"]);
        assert_eq!(record.issuer_codes, vec!["I9"]);

        let rejected_ids: Vec<&str> =
            batch.rejected.iter().map(|r| r.news_id.as_str()).collect();
        assert_eq!(rejected_ids, vec!["n2", "n3"]);
    }

    #[test]
    fn parses_integer_typed_date_column() {
        let df = df! {
            "news_id" => &["n1"],
            "publish_date" => &[20210615i64],
            "bond_codes" => &["B1"],
            "issuer_codes" => &[""],
        }
        .unwrap();

        let batch = parse_news_frame(&df).unwrap();
        assert_eq!(
            batch.records[0].publish_date,
            NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()
        );
    }

    #[test]
    fn parses_profile_with_nullable_dates() {
        let df = df! {
            "bond_code" => &[Some("B1"), Some("B2"), None],
            "issuer_code" => &[Some("I1"), Some("I1"), Some("I2")],
            "default_date" => &[Some("20200101"), None, Some("20200202")],
        }
        .unwrap();

        let rows = parse_profile_frame(&df).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].default_date,
            Some(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
        );
        assert_eq!(rows[1].default_date, None);
    }

    #[test]
    fn profile_rejects_malformed_date() {
        let df = df! {
            "bond_code" => &["B1"],
            "issuer_code" => &["I1"],
            "default_date" => &["not-a-date"],
        }
        .unwrap();

        assert!(parse_profile_frame(&df).is_err());
    }
}
