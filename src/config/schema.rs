use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::{ScoringConfig, Weather};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding drivers.json, teams.json and tracks.json.
    /// Uses the built-in tables when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Track code or name used when `predict` is run without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_track: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_car_chance: Option<f64>,

    /// Pad results with unmatched drivers up to this many entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_results: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}
