use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let weights = [
        ("team_trait_weight", config.team_trait_weight),
        ("driver_strength_bonus", config.driver_strength_bonus),
        ("driver_weakness_penalty", config.driver_weakness_penalty),
        ("wet_weather_bonus", config.wet_weather_bonus),
        ("qualifying_weight", config.qualifying_weight),
        ("recent_top5_bonus", config.recent_top5_bonus),
        ("recent_dnf_penalty", config.recent_dnf_penalty),
        ("home_race_bonus", config.home_race_bonus),
    ];
    for (name, value) in weights {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                errors.push(format!(
                    "scoring.{}: must be a non-negative number, got {}",
                    name, v
                ));
            }
        }
    }

    if let Some(threshold) = config.safety_car_threshold {
        if !(0.0..=1.0).contains(&threshold) {
            errors.push(format!(
                "scoring.safety_car_threshold: must be between 0 and 1, got {}",
                threshold
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a safety-car probability supplied by the caller.
pub fn validate_probability(prob: f64) -> Result<(), String> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(format!(
            "Safety car chance must be between 0 and 1, got {}",
            prob
        ));
    }
    Ok(())
}
