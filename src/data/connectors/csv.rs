use crate::error::{BondLabelError, Result};
use polars::prelude::*;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load a CSV file into a DataFrame.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| BondLabelError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Write a DataFrame to a CSV file.
    pub fn write<P: AsRef<Path>>(df: &mut DataFrame, path: P) -> Result<()> {
        let mut file = std::fs::File::create(path.as_ref())
            .map_err(|e| BondLabelError::DataLoading(format!("Failed to create output: {}", e)))?;

        CsvWriter::new(&mut file)
            .finish(df)
            .map_err(|e| BondLabelError::DataLoading(format!("Failed to write CSV: {}", e)))?;

        Ok(())
    }
}
