use super::conditions::{RaceConditions, Weather};
use super::config::ScoringConfig;
use super::luck::LuckSource;
use super::tier::tier_for;
use crate::data::{Driver, Team, Track};

const WET_WEATHER_TAG: &str = "wet weather";
const CRASH_PRONE_TAG: &str = "crash prone";

#[derive(Debug, Clone)]
pub struct FactorContribution {
    pub label: String,       // e.g. "Driver traits", "Weather", "Qualifying"
    pub description: String, // e.g. "strength: High speed (+4.5)", "P1 -> +7.00"
    pub before: f64,         // Score before this factor
    pub after: f64,          // Score after this factor
}

#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub base_score: f64,
    pub factors: Vec<FactorContribution>,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Weighted blend of the driver's ratings, scaled down to sit alongside the
/// trait adjustments.
pub fn base_driver_score(driver: &Driver) -> f64 {
    (f64::from(driver.overall) * 0.2
        + f64::from(driver.pace) * 0.4
        + f64::from(driver.racecraft) * 0.25
        + f64::from(driver.awareness) * 0.1
        + f64::from(driver.experience) * 0.05)
        / 10.0
}

/// Score one driver at one track. Only the score, see [`calculate_score`]
/// for the per-factor breakdown.
pub fn score_driver(
    driver: &Driver,
    team: &Team,
    track: &Track,
    conditions: &RaceConditions,
    config: &ScoringConfig,
    luck: &mut dyn LuckSource,
) -> f64 {
    calculate_score(driver, team, track, conditions, config, luck).score
}

/// Score one driver at one track.
///
/// Deterministic except for the luck terms drawn from `luck`, which only
/// fire in the wet, on crash-prone tracks, and when the safety-car chance
/// is above the threshold. The result is not rounded.
pub fn calculate_score(
    driver: &Driver,
    team: &Team,
    track: &Track,
    conditions: &RaceConditions,
    config: &ScoringConfig,
    luck: &mut dyn LuckSource,
) -> ScoreResult {
    let base_score = base_driver_score(driver);
    let mut score = base_score;
    let mut factors = Vec::new();
    let instability = driver.instability();

    // Team trait alignment (strength and weakness checks are independent)
    let team_weight = config.team_trait_weight();
    let mut matched = Vec::new();
    let before = score;
    for t in &track.traits {
        if team.has_strength(t) {
            score += team_weight;
            matched.push(format!("strength: {}", t));
        }
        if team.has_weakness(t) {
            score -= team_weight;
            matched.push(format!("weakness: {}", t));
        }
    }
    if !matched.is_empty() {
        factors.push(FactorContribution {
            label: "Team traits".to_string(),
            description: matched.join(", "),
            before,
            after: score,
        });
    }

    // Team tier
    let tier = tier_for(&team.name);
    let luck_factor = tier.luck_factor();
    let before = score;
    score += tier.bonus();
    factors.push(FactorContribution {
        label: "Team tier".to_string(),
        description: format!("{} ({:+}), luck factor {}", tier, tier.bonus(), luck_factor),
        before,
        after: score,
    });

    // Driver trait alignment, weighted above the team
    let strength_bonus = config.driver_strength_bonus();
    let weakness_penalty = config.driver_weakness_penalty();
    let mut matched = Vec::new();
    let before = score;
    for t in &track.traits {
        if driver.has_strength(t) {
            score += strength_bonus;
            matched.push(format!("strength: {} (+{})", t, strength_bonus));
        }
        if driver.has_weakness(t) {
            score -= weakness_penalty;
            matched.push(format!("weakness: {} (-{})", t, weakness_penalty));
        }
    }
    if !matched.is_empty() {
        factors.push(FactorContribution {
            label: "Driver traits".to_string(),
            description: matched.join(", "),
            before,
            after: score,
        });
    }

    if conditions.weather == Weather::Wet {
        let before = score;
        let wet_bonus = config.wet_weather_bonus();
        if driver.has_strength(WET_WEATHER_TAG) {
            score += wet_bonus;
        }
        if driver.has_weakness(WET_WEATHER_TAG) {
            score -= wet_bonus;
        }
        let wet_luck = luck.uniform(-1.5, 1.5) * 8.0 * instability * luck_factor;
        score += wet_luck;
        factors.push(FactorContribution {
            label: "Weather".to_string(),
            description: format!("wet, luck {:+.2}", wet_luck),
            before,
            after: score,
        });
    }

    if track.has_trait(CRASH_PRONE_TAG) {
        let before = score;
        let crash_luck = luck.uniform(-1.0, 1.0) * 6.0 * instability * luck_factor;
        let crash_penalty = 5.0 * instability;
        score += crash_luck;
        score -= crash_penalty;
        factors.push(FactorContribution {
            label: "Crash risk".to_string(),
            description: format!("penalty -{:.2}, luck {:+.2}", crash_penalty, crash_luck),
            before,
            after: score,
        });
    }

    let safety_car_chance = conditions.safety_car_chance;
    if safety_car_chance > config.safety_car_threshold() {
        let before = score;
        let awareness_bonus = (f64::from(driver.awareness) - 80.0) * 0.1;
        let sc_luck = luck.uniform(-2.0, 2.0) * 10.0 * instability * safety_car_chance;
        score += awareness_bonus + sc_luck;
        factors.push(FactorContribution {
            label: "Safety car".to_string(),
            description: format!(
                "{:.0}% chance, awareness {:+.2}, luck {:+.2}",
                safety_car_chance * 100.0,
                awareness_bonus,
                sc_luck
            ),
            before,
            after: score,
        });
    }

    // Qualifying: lower grid slot is better, out-of-range positions ignored
    if let Some(position) = conditions.qualifying_position(&driver.name) {
        if (1..=20).contains(&position) {
            let before = score;
            let delta = f64::from(21 - position) * config.qualifying_weight();
            score += delta;
            factors.push(FactorContribution {
                label: "Qualifying".to_string(),
                description: format!("P{} -> {:+.2}", position, delta),
                before,
                after: score,
            });
        }
    }

    let results = conditions.recent_results_for(&driver.name);
    if !results.is_empty() {
        let (top5, dnfs) = count_recent_form(results);
        if top5 > 0 || dnfs > 0 {
            let before = score;
            score += top5 as f64 * config.recent_top5_bonus();
            score -= dnfs as f64 * config.recent_dnf_penalty();
            factors.push(FactorContribution {
                label: "Recent form".to_string(),
                description: format!("{} top-5, {} DNF", top5, dnfs),
                before,
                after: score,
            });
        }
    }

    if is_home_race(driver, track) {
        let before = score;
        score += config.home_race_bonus();
        factors.push(FactorContribution {
            label: "Home race".to_string(),
            description: track.name.clone(),
            before,
            after: score,
        });
    }

    ScoreResult {
        score,
        breakdown: ScoreBreakdown {
            base_score,
            factors,
        },
    }
}

/// Count top-5 finishes ("P1".."P5") and non-finishes in a result list.
/// Strings that don't parse as a position are ignored.
fn count_recent_form(results: &[String]) -> (usize, usize) {
    let mut top5 = 0;
    let mut dnfs = 0;
    for result in results {
        let r = result.trim().to_uppercase();
        if let Some(position) = r.strip_prefix('P') {
            if let Ok(position) = position.trim().parse::<i64>() {
                if position <= 5 {
                    top5 += 1;
                }
            }
        }
        if r.contains("DNF") {
            dnfs += 1;
        }
    }
    (top5, dnfs)
}

fn is_home_race(driver: &Driver, track: &Track) -> bool {
    match driver.home_gp.as_deref().map(str::trim) {
        Some(home) if !home.is_empty() => track
            .name
            .to_lowercase()
            .contains(&home.to_lowercase()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{NoLuck, SeededLuck};

    /// Always draws the top of the range.
    struct MaxLuck;

    impl LuckSource for MaxLuck {
        fn uniform(&mut self, _low: f64, high: f64) -> f64 {
            high
        }
    }

    fn sample_driver() -> Driver {
        Driver {
            name: "Test Driver".to_string(),
            team: "Test Team".to_string(),
            overall: 80,
            pace: 80,
            racecraft: 80,
            awareness: 80,
            experience: 80,
            strengths: vec![],
            weaknesses: vec![],
            home_gp: None,
        }
    }

    fn sample_team(name: &str) -> Team {
        Team {
            name: name.to_string(),
            strengths: vec![],
            weaknesses: vec![],
        }
    }

    fn sample_track(traits: &[&str]) -> Track {
        Track {
            code: "TST".to_string(),
            name: "Italy (Monza)".to_string(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
            crash_risk: 0.2,
            country: "Italy".to_string(),
            is_street: false,
        }
    }

    fn score_with(
        driver: &Driver,
        team: &Team,
        track: &Track,
        conditions: &RaceConditions,
    ) -> f64 {
        score_driver(
            driver,
            team,
            track,
            conditions,
            &ScoringConfig::default(),
            &mut NoLuck,
        )
    }

    fn dry_no_safety_car() -> RaceConditions {
        RaceConditions::new(Weather::Dry, 0.0)
    }

    #[test]
    fn test_base_driver_score() {
        // (16 + 32 + 20 + 8 + 4) / 10
        assert!((base_driver_score(&sample_driver()) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_base_and_mid_tier_only() {
        let score = score_with(
            &sample_driver(),
            &sample_team("Red Bull"),
            &sample_track(&[]),
            &dry_no_safety_car(),
        );
        assert!((score - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_bonus_applied() {
        let driver = sample_driver();
        let track = sample_track(&[]);
        let conditions = dry_no_safety_car();
        let top = score_with(&driver, &sample_team("McLaren"), &track, &conditions);
        let low = score_with(&driver, &sample_team("Haas"), &track, &conditions);
        assert!((top - low - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_team_strength_and_weakness_both_fire() {
        let mut team = sample_team("Red Bull");
        team.strengths = vec!["High speed".to_string()];
        team.weaknesses = vec!["high-speed".to_string(), "Braking".to_string()];
        let score = score_with(
            &sample_driver(),
            &team,
            &sample_track(&["High speed", "Braking"]),
            &dry_no_safety_car(),
        );
        // +1 -1 -1
        assert!((score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_driver_traits_outweigh_team() {
        let mut driver = sample_driver();
        driver.strengths = vec!["High speed".to_string()];
        driver.weaknesses = vec!["Street circuit".to_string()];
        let score = score_with(
            &driver,
            &sample_team("Red Bull"),
            &sample_track(&["High speed", "Street circuit"]),
            &dry_no_safety_car(),
        );
        // 8 + 4.5 - 5.5
        assert!((score - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_dry_without_triggers_is_reproducible() {
        let driver = sample_driver();
        let team = sample_team("Ferrari");
        let track = sample_track(&["High speed"]);
        let conditions = RaceConditions::new(Weather::Dry, 0.3);
        let config = ScoringConfig::default();

        let first = score_driver(
            &driver,
            &team,
            &track,
            &conditions,
            &config,
            &mut SeededLuck::from_seed(1),
        );
        for seed in 2..20 {
            let again = score_driver(
                &driver,
                &team,
                &track,
                &conditions,
                &config,
                &mut SeededLuck::from_seed(seed),
            );
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_wet_weather_strength_with_no_luck() {
        let mut driver = sample_driver();
        driver.strengths = vec!["Wet weather".to_string()];
        let team = sample_team("Red Bull");
        let track = sample_track(&[]);
        let dry = score_with(&driver, &team, &track, &dry_no_safety_car());
        let wet = score_with(&driver, &team, &track, &RaceConditions::new(Weather::Wet, 0.0));
        assert!((wet - dry - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_wet_luck_scaled_by_instability_and_tier() {
        let driver = sample_driver(); // instability 0.2
        let team = sample_team("Red Bull"); // luck factor 0.93
        let track = sample_track(&[]);
        let conditions = RaceConditions::new(Weather::Wet, 0.0);
        let result = calculate_score(
            &driver,
            &team,
            &track,
            &conditions,
            &ScoringConfig::default(),
            &mut MaxLuck,
        );
        let expected = 8.0 + 1.5 * 8.0 * 0.2 * 0.93;
        assert!((result.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_crash_prone_penalty_always_negative() {
        let mut driver = sample_driver();
        driver.awareness = 70; // instability 0.3
        let base = base_driver_score(&driver);
        let score = score_with(
            &driver,
            &sample_team("Red Bull"),
            &sample_track(&["Crash prone"]),
            &dry_no_safety_car(),
        );
        assert!((score - (base - 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_safety_car_awareness_bonus() {
        let mut driver = sample_driver();
        driver.awareness = 95;
        let base = base_driver_score(&driver);
        let team = sample_team("Red Bull");
        let track = sample_track(&[]);

        let at_threshold = score_with(&driver, &team, &track, &RaceConditions::new(Weather::Dry, 0.3));
        assert!((at_threshold - base).abs() < 1e-9);

        let above = score_with(&driver, &team, &track, &RaceConditions::new(Weather::Dry, 0.5));
        assert!((above - (base + 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_safety_car_luck_ignores_team_luck_factor() {
        let driver = sample_driver(); // instability 0.2
        let team = sample_team("Haas"); // luck factor 0.9, bonus -1
        let result = calculate_score(
            &driver,
            &team,
            &sample_track(&[]),
            &RaceConditions::new(Weather::Dry, 0.5),
            &ScoringConfig::default(),
            &mut MaxLuck,
        );
        let expected = 8.0 - 1.0 + 2.0 * 10.0 * 0.2 * 0.5;
        assert!((result.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_pole_position_adds_seven() {
        let driver = sample_driver();
        let team = sample_team("Ferrari");
        let track = sample_track(&[]);
        let without = score_with(&driver, &team, &track, &dry_no_safety_car());

        let mut conditions = dry_no_safety_car();
        conditions.qualifying.insert("Test Driver".to_string(), 1);
        let with = score_with(&driver, &team, &track, &conditions);

        assert!((with - without - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_qualifying_out_of_range_ignored() {
        let driver = sample_driver();
        let team = sample_team("Ferrari");
        let track = sample_track(&[]);
        let without = score_with(&driver, &team, &track, &dry_no_safety_car());

        for position in [0, 21, -3] {
            let mut conditions = dry_no_safety_car();
            conditions.qualifying.insert("Test Driver".to_string(), position);
            assert_eq!(score_with(&driver, &team, &track, &conditions), without);
        }
    }

    #[test]
    fn test_recent_form_net_minus_half() {
        let driver = sample_driver();
        let team = sample_team("Ferrari");
        let track = sample_track(&[]);
        let without = score_with(&driver, &team, &track, &dry_no_safety_car());

        let mut conditions = dry_no_safety_car();
        conditions.recent_results.insert(
            "Test Driver".to_string(),
            vec!["P3".to_string(), "DNF".to_string(), "P10".to_string()],
        );
        let with = score_with(&driver, &team, &track, &conditions);

        assert!((with - without + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_recent_form_malformed_ignored() {
        let results = vec![
            "Pxx".to_string(),
            "win".to_string(),
            " p5 ".to_string(),
            "dnf (engine)".to_string(),
        ];
        assert_eq!(count_recent_form(&results), (1, 1));
    }

    #[test]
    fn test_home_race_bonus() {
        let mut driver = sample_driver();
        let team = sample_team("Ferrari");
        let track = sample_track(&[]);
        let without = score_with(&driver, &team, &track, &dry_no_safety_car());

        driver.home_gp = Some("ITALY".to_string());
        let with = score_with(&driver, &team, &track, &dry_no_safety_car());
        assert!((with - without - 0.75).abs() < 1e-9);

        driver.home_gp = Some(String::new());
        assert_eq!(score_with(&driver, &team, &track, &dry_no_safety_car()), without);
    }

    #[test]
    fn test_custom_weights() {
        let mut driver = sample_driver();
        driver.strengths = vec!["High speed".to_string()];
        let config = ScoringConfig {
            driver_strength_bonus: Some(6.0),
            ..ScoringConfig::default()
        };
        let score = score_driver(
            &driver,
            &sample_team("Red Bull"),
            &sample_track(&["High speed"]),
            &dry_no_safety_car(),
            &config,
            &mut NoLuck,
        );
        assert!((score - 14.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_records_fired_factors() {
        let mut driver = sample_driver();
        driver.strengths = vec!["High speed".to_string()];
        let mut conditions = RaceConditions::new(Weather::Wet, 0.5);
        conditions.qualifying.insert("Test Driver".to_string(), 2);

        let result = calculate_score(
            &driver,
            &sample_team("McLaren"),
            &sample_track(&["High speed", "Crash prone"]),
            &conditions,
            &ScoringConfig::default(),
            &mut NoLuck,
        );

        let labels: Vec<&str> = result
            .breakdown
            .factors
            .iter()
            .map(|f| f.label.as_str())
            .collect();
        assert_eq!(
            labels,
            [
                "Team tier",
                "Driver traits",
                "Weather",
                "Crash risk",
                "Safety car",
                "Qualifying"
            ]
        );
        let last = result.breakdown.factors.last().unwrap();
        assert_eq!(last.after, result.score);
        assert!((result.breakdown.base_score - 8.0).abs() < 1e-9);
    }
}
