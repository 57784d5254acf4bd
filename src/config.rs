//! Run configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::google::GoogleConfig;
use crate::solver::SolveOptions;

/// Default depot every route starts and ends at.
pub const DEFAULT_DEPOT: &str =
    "17-19 Dai Hei Street, Tai Po Industrial Estate, Tai Po, New Territories, HK";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub depot_address: String,
    pub balance: SolveOptions,
    pub google: GoogleConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            depot_address: DEFAULT_DEPOT.to_string(),
            balance: SolveOptions::default(),
            google: GoogleConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|err| Error::data(format!("cannot read {}: {err}", path.display())))?;
        Self::from_json_str(&json)
    }
}
