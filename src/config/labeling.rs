use super::traits::ConfigSection;
use crate::error::BondLabelError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    Days,
    Weeks,
    Months,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowDirection {
    /// Window starts at the publish date and extends `magnitude` units
    /// into the future.
    Forward,
    /// Window covers all history at or before the publish date; the
    /// stated duration is not used for the judgment.
    Backward,
}

/// One named labeling window. The name becomes the output column name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSpec {
    pub name: String,
    pub magnitude: u32,
    pub unit: WindowUnit,
    pub direction: WindowDirection,
}

impl WindowSpec {
    pub fn forward(name: &str, magnitude: u32, unit: WindowUnit) -> Self {
        Self {
            name: name.to_string(),
            magnitude,
            unit,
            direction: WindowDirection::Forward,
        }
    }

    pub fn backward(name: &str) -> Self {
        Self {
            name: name.to_string(),
            magnitude: 0,
            unit: WindowUnit::Months,
            direction: WindowDirection::Backward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    pub windows: Vec<WindowSpec>,
}

impl LabelingConfig {
    pub fn window_names(&self) -> Vec<String> {
        self.windows.iter().map(|w| w.name.clone()).collect()
    }
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            windows: vec![
                WindowSpec::forward("12_months", 12, WindowUnit::Months),
                WindowSpec::forward("3_months", 3, WindowUnit::Months),
                WindowSpec::forward("1_months", 1, WindowUnit::Months),
                WindowSpec::backward("last_12month"),
            ],
        }
    }
}

impl ConfigSection for LabelingConfig {
    fn section_name() -> &'static str {
        "labeling"
    }

    fn validate(&self) -> Result<(), BondLabelError> {
        if self.windows.is_empty() {
            return Err(BondLabelError::Configuration(
                "at least one labeling window is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for window in &self.windows {
            if window.name.is_empty() {
                return Err(BondLabelError::Configuration(
                    "window name must not be empty".to_string(),
                ));
            }
            if !seen.insert(window.name.as_str()) {
                return Err(BondLabelError::Configuration(format!(
                    "duplicate window name: {}",
                    window.name
                )));
            }
            if window.direction == WindowDirection::Forward && window.magnitude == 0 {
                return Err(BondLabelError::Configuration(format!(
                    "forward window '{}' must have a non-zero duration",
                    window.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LabelingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.window_names(),
            vec!["12_months", "3_months", "1_months", "last_12month"]
        );
    }

    #[test]
    fn rejects_duplicate_window_names() {
        let config = LabelingConfig {
            windows: vec![
                WindowSpec::forward("3_months", 3, WindowUnit::Months),
                WindowSpec::forward("3_months", 3, WindowUnit::Months),
            ],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_duration_forward_window() {
        let config = LabelingConfig {
            windows: vec![WindowSpec::forward("0_days", 0, WindowUnit::Days)],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_window_list() {
        let config = LabelingConfig { windows: vec![] };
        assert!(config.validate().is_err());
    }
}
