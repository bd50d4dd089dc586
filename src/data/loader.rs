use super::types::{Driver, Team, Track};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const BUILTIN_DRIVERS: &str = include_str!("../../data/drivers.json");
const BUILTIN_TEAMS: &str = include_str!("../../data/teams.json");
const BUILTIN_TRACKS: &str = include_str!("../../data/tracks.json");

/// Read-only reference tables shared by every prediction.
///
/// Built once at startup and passed by reference into resolution and
/// scoring. Nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub drivers: Vec<Driver>,
    pub teams: Vec<Team>,
    pub tracks: Vec<Track>,
}

impl ReferenceData {
    pub fn new(drivers: Vec<Driver>, teams: Vec<Team>, tracks: Vec<Track>) -> Self {
        Self {
            drivers,
            teams,
            tracks,
        }
    }

    /// Parse the tables bundled into the binary from `data/`.
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            drivers: serde_json::from_str(BUILTIN_DRIVERS)
                .context("Failed to parse built-in drivers table")?,
            teams: serde_json::from_str(BUILTIN_TEAMS)
                .context("Failed to parse built-in teams table")?,
            tracks: serde_json::from_str(BUILTIN_TRACKS)
                .context("Failed to parse built-in tracks table")?,
        })
    }

    /// Load `drivers.json`, `teams.json` and `tracks.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            drivers: load_table(&dir.join("drivers.json"))?,
            teams: load_table(&dir.join("teams.json"))?,
            tracks: load_table(&dir.join("tracks.json"))?,
        })
    }
}

/// Load reference data from `dir` when given, otherwise the built-in tables.
pub fn load_reference_data(dir: Option<&Path>) -> Result<ReferenceData> {
    let data = match dir {
        Some(dir) => {
            tracing::debug!("Loading reference data from {}", dir.display());
            ReferenceData::load(dir)?
        }
        None => ReferenceData::builtin()?,
    };
    tracing::debug!(
        "Loaded {} drivers, {} teams, {} tracks",
        data.drivers.len(),
        data.teams.len(),
        data.tracks.len()
    );
    Ok(data)
}

fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open data file at {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse data file at {}", path.display()))
}
