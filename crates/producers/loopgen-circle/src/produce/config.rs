use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use loopgen_core::params::{NetworkSettings, ScenarioSettings};
use loopgen_core::placement::{StartPosition, VehicleType};
use loopgen_output::logger::LogSettings;
use loopgen_output::result::OutputSettings;
use loopgen_runner::tool::ToolSettings;

use crate::produce::error::GenerationError;

#[derive(Deserialize, Debug, Clone)]
pub struct PathSettings {
    pub base: String,
    pub net_path: String,
    pub cfg_path: String,
}

impl PathSettings {
    pub(crate) fn resolve(&self, config_dir: &Path) -> ArtifactPaths {
        ArtifactPaths {
            base: self.base.clone(),
            net_path: config_dir.join(&self.net_path),
            cfg_path: config_dir.join(&self.cfg_path),
        }
    }
}

/// Where the artifacts of one run go: network descriptions in `net_path`,
/// everything the simulator loads in `cfg_path`.
#[derive(Debug, Clone)]
pub(crate) struct ArtifactPaths {
    pub(crate) base: String,
    pub(crate) net_path: PathBuf,
    pub(crate) cfg_path: PathBuf,
}

impl ArtifactPaths {
    pub(crate) fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.net_path)?;
        fs::create_dir_all(&self.cfg_path)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct VehicleTypeSettings {
    pub id: String,
    pub count: usize,
    #[serde(default)]
    pub attributes: toml::Table,
}

impl VehicleTypeSettings {
    pub(crate) fn to_vehicle_type(&self) -> VehicleType {
        let attributes: IndexMap<String, String> = self
            .attributes
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();
        VehicleType::builder()
            .id(self.id.clone())
            .count(self.count)
            .attributes(attributes)
            .build()
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlacementSettings {
    Explicit { positions: Vec<StartPosition> },
    Even {
        #[serde(default)]
        bunching: f64,
    },
}

#[derive(Deserialize, Debug, Clone)]
pub struct VehicleSettings {
    pub num_vehicles: usize,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub types: Vec<VehicleTypeSettings>,
    pub placement: PlacementSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub log_settings: LogSettings,
    pub path_settings: PathSettings,
    pub network_settings: NetworkSettings,
    #[serde(default)]
    pub scenario_settings: ScenarioSettings,
    #[serde(default)]
    pub tool_settings: ToolSettings,
    #[serde(default)]
    pub output_settings: OutputSettings,
    pub vehicle_settings: VehicleSettings,
}

pub(crate) fn parse_config(input_toml: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(input_toml)
}

pub(crate) fn read_config(file_path: &Path) -> Result<Config, GenerationError> {
    let input_toml = fs::read_to_string(file_path).map_err(|e| GenerationError::ConfigFile {
        path: file_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&input_toml).map_err(|e| GenerationError::ConfigFile {
        path: file_path.to_path_buf(),
        reason: e.to_string(),
    })
}
