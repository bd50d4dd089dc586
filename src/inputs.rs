//! Optional per-race inputs: qualifying order and recent results, from a
//! YAML file and/or `NAME=VALUE` command-line flags.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::scoring::{fold_name, RaceConditions};

/// Race inputs file.
///
/// Example YAML:
/// ```yaml
/// qualifying:
///   Max Verstappen: 1
///   Lando Norris: 2
/// recent_results:
///   Max Verstappen: [P1, P2, DNF]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RaceInputs {
    #[serde(default)]
    pub qualifying: HashMap<String, i32>,
    #[serde(default)]
    pub recent_results: HashMap<String, Vec<String>>,
}

impl RaceInputs {
    /// Overlay `other` on top of `self`; entries in `other` win, including
    /// over keys that differ only in case or surrounding whitespace.
    pub fn merge(&mut self, other: RaceInputs) {
        overlay(&mut self.qualifying, other.qualifying);
        overlay(&mut self.recent_results, other.recent_results);
    }

    /// Copy the inputs into `conditions`, replacing any entry for the same
    /// driver. Fails if two keys name the same driver.
    pub fn apply_to(self, conditions: &mut RaceConditions) -> Result<()> {
        check_unique("qualifying", &self.qualifying)?;
        check_unique("recent_results", &self.recent_results)?;
        overlay(&mut conditions.qualifying, self.qualifying);
        overlay(&mut conditions.recent_results, self.recent_results);
        Ok(())
    }
}

fn overlay<V>(base: &mut HashMap<String, V>, other: HashMap<String, V>) {
    for (name, value) in other {
        let key = fold_name(&name);
        base.retain(|existing, _| fold_name(existing) != key);
        base.insert(name, value);
    }
}

fn check_unique<V>(section: &str, map: &HashMap<String, V>) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for name in map.keys() {
        if let Some(previous) = seen.insert(fold_name(name), name.as_str()) {
            let (first, second) = if previous < name.as_str() {
                (previous, name.as_str())
            } else {
                (name.as_str(), previous)
            };
            bail!(
                "Duplicate driver in {}: '{}' and '{}' name the same driver",
                section,
                first,
                second
            );
        }
    }
    Ok(())
}

pub fn load_race_inputs(path: &Path) -> Result<RaceInputs> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read race inputs at {}", path.display()))?;
    let inputs: RaceInputs = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse race inputs: invalid YAML in {}", path.display()))?;
    Ok(inputs)
}

/// Parse `NAME=POS`, e.g. "Max Verstappen=1".
pub fn parse_qualifying_arg(s: &str) -> Result<(String, i32)> {
    let (name, position) = split_name_value(s)?;
    let position = position
        .parse()
        .with_context(|| format!("Invalid qualifying position in '{}'", s))?;
    Ok((name, position))
}

/// Parse `NAME=RESULT,RESULT,...`, e.g. "Lando Norris=P3,DNF,P10".
///
/// Individual results are not validated here; unrecognized ones are ignored
/// when scoring.
pub fn parse_recent_arg(s: &str) -> Result<(String, Vec<String>)> {
    let (name, results) = split_name_value(s)?;
    let results = results
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    Ok((name, results))
}

/// Build race inputs from repeated `--quali` and `--recent` flags.
pub fn inputs_from_args(qualifying: &[String], recent: &[String]) -> Result<RaceInputs> {
    let mut inputs = RaceInputs::default();
    for arg in qualifying {
        let (name, position) = parse_qualifying_arg(arg)?;
        inputs.qualifying.insert(name, position);
    }
    for arg in recent {
        let (name, results) = parse_recent_arg(arg)?;
        inputs.recent_results.insert(name, results);
    }
    Ok(inputs)
}

fn split_name_value(s: &str) -> Result<(String, &str)> {
    let Some((name, value)) = s.rsplit_once('=') else {
        bail!("Expected NAME=VALUE, got '{}'", s);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing driver name in '{}'", s);
    }
    Ok((name.to_string(), value.trim()))
}
