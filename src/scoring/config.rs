use serde::{Deserialize, Serialize};

pub const DEFAULT_TEAM_TRAIT_WEIGHT: f64 = 1.0;
pub const DEFAULT_DRIVER_STRENGTH_BONUS: f64 = 4.5;
pub const DEFAULT_DRIVER_WEAKNESS_PENALTY: f64 = 5.5;
pub const DEFAULT_WET_WEATHER_BONUS: f64 = 3.0;
pub const DEFAULT_SAFETY_CAR_THRESHOLD: f64 = 0.3;
pub const DEFAULT_QUALIFYING_WEIGHT: f64 = 0.35;
pub const DEFAULT_RECENT_TOP5_BONUS: f64 = 1.0;
pub const DEFAULT_RECENT_DNF_PENALTY: f64 = 1.5;
pub const DEFAULT_HOME_RACE_BONUS: f64 = 0.75;

/// Scoring weights.
///
/// Every field is optional; a missing field uses the built-in weight. The
/// shape of the formula (which adjustments exist and when they fire) is
/// fixed, only the flat weights are tunable.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   driver_strength_bonus: 5
///   qualifying_weight: 0.4
///   home_race_bonus: 0
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Points per track trait that is a team strength (subtracted for weaknesses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_trait_weight: Option<f64>,

    /// Points per track trait that is a driver strength
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_strength_bonus: Option<f64>,

    /// Points lost per track trait that is a driver weakness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_weakness_penalty: Option<f64>,

    /// Flat wet-race swing for drivers tagged "wet weather"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wet_weather_bonus: Option<f64>,

    /// Safety-car probability above which the safety-car adjustment fires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_car_threshold: Option<f64>,

    /// Points per grid slot ahead of P21
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifying_weight: Option<f64>,

    /// Points per recent top-5 finish
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_top5_bonus: Option<f64>,

    /// Points lost per recent DNF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_dnf_penalty: Option<f64>,

    /// Bonus when the driver's home race matches the track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_race_bonus: Option<f64>,
}

impl ScoringConfig {
    /// Config with every weight spelled out, used by the init wizard.
    pub fn with_defaults() -> Self {
        Self {
            team_trait_weight: Some(DEFAULT_TEAM_TRAIT_WEIGHT),
            driver_strength_bonus: Some(DEFAULT_DRIVER_STRENGTH_BONUS),
            driver_weakness_penalty: Some(DEFAULT_DRIVER_WEAKNESS_PENALTY),
            wet_weather_bonus: Some(DEFAULT_WET_WEATHER_BONUS),
            safety_car_threshold: Some(DEFAULT_SAFETY_CAR_THRESHOLD),
            qualifying_weight: Some(DEFAULT_QUALIFYING_WEIGHT),
            recent_top5_bonus: Some(DEFAULT_RECENT_TOP5_BONUS),
            recent_dnf_penalty: Some(DEFAULT_RECENT_DNF_PENALTY),
            home_race_bonus: Some(DEFAULT_HOME_RACE_BONUS),
        }
    }

    pub fn team_trait_weight(&self) -> f64 {
        self.team_trait_weight.unwrap_or(DEFAULT_TEAM_TRAIT_WEIGHT)
    }

    pub fn driver_strength_bonus(&self) -> f64 {
        self.driver_strength_bonus
            .unwrap_or(DEFAULT_DRIVER_STRENGTH_BONUS)
    }

    pub fn driver_weakness_penalty(&self) -> f64 {
        self.driver_weakness_penalty
            .unwrap_or(DEFAULT_DRIVER_WEAKNESS_PENALTY)
    }

    pub fn wet_weather_bonus(&self) -> f64 {
        self.wet_weather_bonus.unwrap_or(DEFAULT_WET_WEATHER_BONUS)
    }

    pub fn safety_car_threshold(&self) -> f64 {
        self.safety_car_threshold
            .unwrap_or(DEFAULT_SAFETY_CAR_THRESHOLD)
    }

    pub fn qualifying_weight(&self) -> f64 {
        self.qualifying_weight.unwrap_or(DEFAULT_QUALIFYING_WEIGHT)
    }

    pub fn recent_top5_bonus(&self) -> f64 {
        self.recent_top5_bonus.unwrap_or(DEFAULT_RECENT_TOP5_BONUS)
    }

    pub fn recent_dnf_penalty(&self) -> f64 {
        self.recent_dnf_penalty.unwrap_or(DEFAULT_RECENT_DNF_PENALTY)
    }

    pub fn home_race_bonus(&self) -> f64 {
        self.home_race_bonus.unwrap_or(DEFAULT_HOME_RACE_BONUS)
    }
}
