use super::traits::ConfigSection;
use crate::error::BondLabelError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem layout for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding one news CSV per publish date.
    pub news_input_dir: PathBuf,
    /// Reference table with bond, issuer and default-date columns.
    pub bond_profile_path: PathBuf,
    /// Directory the labeled batches are written into.
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            news_input_dir: PathBuf::from("data/bond_related_news"),
            bond_profile_path: PathBuf::from("data/bond_profile.csv"),
            output_dir: PathBuf::from("data/default_labels"),
        }
    }
}

impl ConfigSection for PipelineConfig {
    fn section_name() -> &'static str {
        "pipeline"
    }

    fn validate(&self) -> Result<(), BondLabelError> {
        if self.news_input_dir.as_os_str().is_empty()
            || self.bond_profile_path.as_os_str().is_empty()
            || self.output_dir.as_os_str().is_empty()
        {
            return Err(BondLabelError::Configuration(
                "pipeline paths must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
