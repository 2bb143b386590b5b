//! JSON configuration for the `shuffle_image` tool.
//!
//! ```json
//! {
//!   "input": "digit.png",
//!   "log_panes": 2,
//!   "maps": { "seed": 7, "outer": { "mode": "random" }, "inner": { "mode": "off" } },
//!   "output": { "shuffled_image": "out/shuffled.png", "report_json": "out/report.json" }
//! }
//! ```
use crate::error::ShuffleError;
use crate::geometry::Geometry;
use crate::image::io::ColorMode;
use crate::map::{generate_map, MapSeeds, ShuffleMap};
use crate::normalize::PadMode;
use crate::shuffle::ShufflePlan;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ShuffleToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub color: ColorMode,
    #[serde(default)]
    pub pad: PadMode,
    pub log_panes: u32,
    #[serde(default)]
    pub maps: MapConfig,
    pub output: ShuffleOutputConfig,
}

/// How one phase obtains its map.
#[derive(Debug, Default, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Phase disabled.
    #[default]
    Off,
    /// Generated from `seed`, or from the master seed when omitted.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Supplied verbatim; must match the phase granularity.
    Explicit { map: ShuffleMap },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Master seed used by random phases without their own seed.
    pub seed: Option<u64>,
    pub outer: PhaseConfig,
    pub inner: PhaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct ShuffleOutputConfig {
    pub shuffled_image: PathBuf,
    #[serde(default)]
    pub restored_image: Option<PathBuf>,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

impl MapConfig {
    /// Resolve both phases into a plan for `geometry`.
    pub fn build_plan(&self, geometry: Geometry) -> Result<ShufflePlan, ShuffleError> {
        let seeds = MapSeeds::from_master(self.seed.unwrap_or(0));
        let outer = resolve(&self.outer, geometry.outer_granularity(), seeds.outer)?;
        let inner = resolve(&self.inner, geometry.inner_granularity(), seeds.inner)?;
        ShufflePlan::new(geometry, outer, inner)
    }
}

fn resolve(
    phase: &PhaseConfig,
    granularity: u32,
    fallback_seed: u64,
) -> Result<Option<ShuffleMap>, ShuffleError> {
    match phase {
        PhaseConfig::Off => Ok(None),
        PhaseConfig::Random { seed } => {
            generate_map(granularity, seed.unwrap_or(fallback_seed)).map(Some)
        }
        PhaseConfig::Explicit { map } => Ok(Some(map.clone())),
    }
}

pub fn load_config(path: &Path) -> Result<ShuffleToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
