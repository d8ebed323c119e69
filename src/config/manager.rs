use super::{labeling::LabelingConfig, pipeline::PipelineConfig, traits::ConfigSection};
use crate::error::BondLabelError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub labeling: LabelingConfig,
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), BondLabelError> {
        self.labeling.validate()?;
        self.pipeline.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON config file, picked by extension.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BondLabelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BondLabelError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)
                .map_err(|e| BondLabelError::Configuration(format!("Failed to parse config: {}", e)))?,
            _ => toml::from_str(&contents)
                .map_err(|e| BondLabelError::Configuration(format!("Failed to parse config: {}", e)))?,
        };

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BondLabelError> {
        let config = self.config.read().unwrap();
        let toml_str = toml::to_string_pretty(&*config)
            .map_err(|e| BondLabelError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| BondLabelError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), BondLabelError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap();
        f(&mut config);
        config.validate()?;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_app_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: AppConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(
            decoded.labeling.window_names(),
            config.labeling.window_names()
        );
    }

    #[test]
    fn update_rejects_invalid_config() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.labeling.windows.clear());
        assert!(result.is_err());
    }
}
