use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::preset::SquarePreset;
use crate::solver::SolverParams;

pub const DEFAULT_PATH: &str = "fluids.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub run: RunConfig,
    pub preset: SquarePreset,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub size: usize,
    pub diffusion: f64,
    pub viscosity: f64,
    pub time_rate: f64,
    pub diffuse_iter: usize,
    pub project_iter: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub steps: usize,
    pub steps_per_frame: usize,
    pub report_every: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let params = SolverParams::default();
        Self {
            size: 32,
            diffusion: params.diffusion,
            viscosity: params.viscosity,
            time_rate: params.time_rate,
            diffuse_iter: params.diffuse_iter,
            project_iter: params.project_iter,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 300,
            steps_per_frame: 1,
            report_every: 30,
        }
    }
}

impl Config {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            viscosity: self.physics.viscosity,
            diffusion: self.physics.diffusion,
            time_rate: self.physics.time_rate,
            diffuse_iter: self.physics.diffuse_iter,
            project_iter: self.physics.project_iter,
        }
    }
}

pub fn parse(contents: &str, path: &str) -> Result<Config, ConfigError> {
    serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    parse(&contents, &display)
}

/// Read `fluids.yaml` from the working directory, falling back to defaults.
pub fn load() -> Config {
    let path = Path::new(DEFAULT_PATH);
    if !path.exists() {
        return Config::default();
    }
    match load_from(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("{e}; using defaults");
            Config::default()
        }
    }
}
