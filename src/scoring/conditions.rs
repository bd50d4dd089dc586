use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_SAFETY_CAR_CHANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Dry,
    Wet,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Dry => write!(f, "dry"),
            Weather::Wet => write!(f, "wet"),
        }
    }
}

/// Situational inputs for a single prediction.
///
/// `qualifying` and `recent_results` are keyed by driver name and may cover
/// any subset of the grid. Names are matched ignoring case and surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceConditions {
    pub weather: Weather,
    /// Probability of a safety car, 0.0-1.0
    pub safety_car_chance: f64,
    pub qualifying: HashMap<String, i32>,
    pub recent_results: HashMap<String, Vec<String>>,
}

impl Default for RaceConditions {
    fn default() -> Self {
        Self {
            weather: Weather::Dry,
            safety_car_chance: DEFAULT_SAFETY_CAR_CHANCE,
            qualifying: HashMap::new(),
            recent_results: HashMap::new(),
        }
    }
}

impl RaceConditions {
    pub fn new(weather: Weather, safety_car_chance: f64) -> Self {
        Self {
            weather,
            safety_car_chance,
            ..Self::default()
        }
    }

    pub fn qualifying_position(&self, driver_name: &str) -> Option<i32> {
        lookup(&self.qualifying, driver_name).copied()
    }

    pub fn recent_results_for(&self, driver_name: &str) -> &[String] {
        lookup(&self.recent_results, driver_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Key used to compare driver names: trimmed and Unicode-lowercased.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn lookup<'a, V>(map: &'a HashMap<String, V>, driver_name: &str) -> Option<&'a V> {
    map.get(driver_name).or_else(|| {
        let wanted = fold_name(driver_name);
        // Several keys may fold together when the map is filled by hand;
        // the lexically smallest one wins.
        map.iter()
            .filter(|(name, _)| fold_name(name) == wanted)
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, v)| v)
    })
}
