//! Chart configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aspects::{AspectDefinition, DEFAULT_ASPECTS};
use crate::ephemeris::HouseSystem;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub house_system: HouseSystem,
    /// Evaluated in order; the first matching row classifies a pair.
    pub aspects: Vec<AspectDefinition>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            house_system: HouseSystem::default(),
            aspects: DEFAULT_ASPECTS.to_vec(),
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let config: ChartConfig =
            serde_json::from_str(json).map_err(|e| ChartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ChartError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn with_house_system(mut self, house_system: HouseSystem) -> Self {
        self.house_system = house_system;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.aspects.is_empty() {
            return Err(ChartError::Config("aspect table is empty".to_string()));
        }
        for definition in &self.aspects {
            if !(0.0..=180.0).contains(&definition.angle) {
                return Err(ChartError::Config(format!(
                    "{} angle {} is outside [0, 180]",
                    definition.kind, definition.angle
                )));
            }
            if !definition.orb.is_finite() || definition.orb < 0.0 {
                return Err(ChartError::Config(format!(
                    "{} orb {} must be a non-negative number",
                    definition.kind, definition.orb
                )));
            }
        }
        Ok(())
    }
}
