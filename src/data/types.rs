use serde::{Deserialize, Serialize};

fn default_rating() -> u8 {
    80
}

/// A driver record from `drivers.json`.
///
/// Ratings are on a 0-100 scale. Missing ratings fall back to 80 so that a
/// sparse record still produces a sensible baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub name: String,
    /// Free-text team name, e.g. "Red Bull Racing-Honda RBPT". Resolved
    /// against the team table at prediction time.
    pub team: String,
    #[serde(default = "default_rating", alias = "ovr")]
    pub overall: u8,
    #[serde(default = "default_rating")]
    pub pace: u8,
    #[serde(default = "default_rating")]
    pub racecraft: u8,
    #[serde(default = "default_rating")]
    pub awareness: u8,
    #[serde(default = "default_rating")]
    pub experience: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_gp: Option<String>,
}

impl Driver {
    /// Volatility coefficient: low-awareness drivers swing further on luck.
    pub fn instability(&self) -> f64 {
        (100.0 - f64::from(self.awareness)) / 100.0
    }

    pub fn has_strength(&self, tag: &str) -> bool {
        contains_tag(&self.strengths, tag)
    }

    pub fn has_weakness(&self, tag: &str) -> bool {
        contains_tag(&self.weaknesses, tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

impl Team {
    pub fn has_strength(&self, tag: &str) -> bool {
        contains_tag(&self.strengths, tag)
    }

    pub fn has_weakness(&self, tag: &str) -> bool {
        contains_tag(&self.weaknesses, tag)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Track {
    /// Short unique code, e.g. "ITA"
    pub code: String,
    /// Display name, e.g. "Italy (Monza)"
    pub name: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub crash_risk: f64,
    pub country: String,
    #[serde(default)]
    pub is_street: bool,
}

impl Track {
    pub fn has_trait(&self, tag: &str) -> bool {
        contains_tag(&self.traits, tag)
    }
}

/// Normalize a tag for comparison: trimmed, lowercase, hyphens as spaces.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('-', " ")
}

/// Check whether `tags` contains `tag`, ignoring case and hyphen/space spelling.
pub fn contains_tag(tags: &[String], tag: &str) -> bool {
    let wanted = normalize_tag(tag);
    tags.iter().any(|t| normalize_tag(t) == wanted)
}
