use super::types::{NewsColumn, ProfileColumn};
use crate::error::{BondLabelError, Result};
use polars::prelude::*;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Validate that a news batch has the required columns, resolving
    /// aliases to the actual header names.
    pub fn validate_news(df: &DataFrame) -> Result<HashMap<NewsColumn, String>> {
        let mut column_map = HashMap::new();

        for required in NewsColumn::all() {
            match Self::find_column(df, required.aliases()) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(BondLabelError::DataLoading(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        Ok(column_map)
    }

    /// Validate the bond reference table's columns.
    pub fn validate_profile(df: &DataFrame) -> Result<HashMap<ProfileColumn, String>> {
        let mut column_map = HashMap::new();

        for required in ProfileColumn::all() {
            match Self::find_column(df, required.aliases()) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(BondLabelError::DataLoading(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        Ok(column_map)
    }

    fn find_column<'a>(df: &'a DataFrame, aliases: &[&'static str]) -> Option<&'a str> {
        let columns = df.get_column_names();
        for alias in aliases {
            if columns.iter().any(|col| col.as_str() == *alias) {
                return Some(alias);
            }
        }
        None
    }

    /// Report null counts per column without failing.
    pub fn check_nulls(df: &DataFrame) -> Result<Vec<(String, usize)>> {
        let mut null_report = Vec::new();

        for col_name in df.get_column_names() {
            let series = df.column(col_name)?;
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((col_name.to_string(), null_count));
            }
        }

        Ok(null_report)
    }
}
