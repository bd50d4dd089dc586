use crate::data::{ReferenceData, Track};
use crate::error::PredictError;
use crate::resolve::{resolve_team, resolve_track};
use crate::scoring::{calculate_score, LuckSource, RaceConditions, ScoreBreakdown, ScoringConfig};

/// Results are padded with unmatched drivers up to this many entries.
pub const MIN_RESULTS: usize = 10;

/// Championship points for P1..P10.
pub const POINTS_TABLE: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

#[derive(Debug, Clone)]
pub struct RankedEntry {
    pub driver: String,
    /// Team name as written on the driver record, not the canonical name
    pub team: String,
    /// Rounded to 2 decimal places
    pub score: f64,
    /// `None` for floor-scored entries
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub track: Track,
    /// Sorted by score descending
    pub entries: Vec<RankedEntry>,
    /// "Name (team)" for every driver whose team could not be matched
    pub skipped: Vec<String>,
}

/// Championship points for a 1-based finishing position.
pub fn points_for(position: usize) -> u32 {
    position
        .checked_sub(1)
        .and_then(|i| POINTS_TABLE.get(i))
        .copied()
        .unwrap_or(0)
}

pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

/// Predict a finishing order at `track_id` using the default minimum result size.
pub fn predict_for_track(
    data: &ReferenceData,
    track_id: &str,
    conditions: &RaceConditions,
    scoring: &ScoringConfig,
    luck: &mut dyn LuckSource,
) -> Result<Prediction, PredictError> {
    predict_with_min_results(data, track_id, conditions, scoring, luck, MIN_RESULTS)
}

/// Resolve the track, score every driver whose team resolves, pad with
/// floor-scored drivers up to `min_results`, then sort by score descending.
///
/// The sort is stable, so equal scores keep driver-table order.
pub fn predict_with_min_results(
    data: &ReferenceData,
    track_id: &str,
    conditions: &RaceConditions,
    scoring: &ScoringConfig,
    luck: &mut dyn LuckSource,
    min_results: usize,
) -> Result<Prediction, PredictError> {
    let track = resolve_track(track_id, &data.tracks)
        .ok_or_else(|| PredictError::TrackNotFound(track_id.to_string()))?;

    tracing::debug!("Predicting {} ({})", track.name, track.code);

    let mut entries = Vec::with_capacity(data.drivers.len());
    let mut skipped = Vec::new();
    let mut unmatched = Vec::new();

    for driver in &data.drivers {
        match resolve_team(&driver.team, &data.teams) {
            Some(team) => {
                let result = calculate_score(driver, team, track, conditions, scoring, luck);
                entries.push(RankedEntry {
                    driver: driver.name.clone(),
                    team: driver.team.clone(),
                    score: round_score(result.score),
                    breakdown: Some(result.breakdown),
                });
            }
            None => {
                skipped.push(format!("{} ({})", driver.name, driver.team));
                unmatched.push(driver);
            }
        }
    }

    for d in &skipped {
        tracing::debug!("Skipped driver due to team matching issues: {}", d);
    }

    tracing::debug!(
        "Drivers in results: {:?}",
        entries.iter().map(|e| e.driver.as_str()).collect::<Vec<_>>()
    );
    tracing::debug!(
        "Unmatched drivers: {:?}",
        unmatched.iter().map(|d| d.name.as_str()).collect::<Vec<_>>()
    );

    let mut unmatched = unmatched.into_iter();
    while entries.len() < min_results {
        let Some(driver) = unmatched.next() else {
            break;
        };
        entries.push(RankedEntry {
            driver: driver.name.clone(),
            team: driver.team.clone(),
            score: 0.0,
            breakdown: None,
        });
    }

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!("Number of drivers in results: {}", entries.len());

    Ok(Prediction {
        track: track.clone(),
        entries,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Driver, Team};
    use crate::scoring::{NoLuck, SeededLuck, Weather};

    fn driver(name: &str, team: &str, pace: u8) -> Driver {
        Driver {
            name: name.to_string(),
            team: team.to_string(),
            overall: 80,
            pace,
            racecraft: 80,
            awareness: 80,
            experience: 80,
            strengths: vec![],
            weaknesses: vec![],
            home_gp: None,
        }
    }

    fn team(name: &str) -> Team {
        Team {
            name: name.to_string(),
            strengths: vec![],
            weaknesses: vec![],
        }
    }

    fn track(code: &str, name: &str, traits: &[&str]) -> Track {
        Track {
            code: code.to_string(),
            name: name.to_string(),
            traits: traits.iter().map(|t| t.to_string()).collect(),
            crash_risk: 0.2,
            country: "Italy".to_string(),
            is_street: false,
        }
    }

    fn sample_data() -> ReferenceData {
        ReferenceData::new(
            vec![
                driver("Slow", "Red Bull", 60),
                driver("Orphan One", "Visa Cash App", 99),
                driver("Fast", "Red Bull Racing-Honda RBPT", 99),
                driver("Orphan Two", "Unknown GP", 99),
                driver("Middle", "red bull", 80),
            ],
            vec![team("Red Bull")],
            vec![
                track("ITA", "Italy (Monza)", &["High speed"]),
                track("MON", "Monaco (Monte Carlo)", &["Crash prone"]),
            ],
        )
    }

    fn dry() -> RaceConditions {
        RaceConditions::new(Weather::Dry, 0.0)
    }

    #[test]
    fn test_track_not_found() {
        let err = predict_for_track(
            &sample_data(),
            "NOPE",
            &dry(),
            &ScoringConfig::default(),
            &mut NoLuck,
        )
        .unwrap_err();
        assert_eq!(err, PredictError::TrackNotFound("NOPE".to_string()));
    }

    #[test]
    fn test_resolves_track_by_name() {
        let prediction = predict_for_track(
            &sample_data(),
            "monza",
            &dry(),
            &ScoringConfig::default(),
            &mut NoLuck,
        )
        .unwrap();
        assert_eq!(prediction.track.code, "ITA");
    }

    #[test]
    fn test_sorted_descending_with_padding() {
        let prediction = predict_for_track(
            &sample_data(),
            "ITA",
            &dry(),
            &ScoringConfig::default(),
            &mut NoLuck,
        )
        .unwrap();

        let names: Vec<&str> = prediction
            .entries
            .iter()
            .map(|e| e.driver.as_str())
            .collect();
        // Matched drivers by score, then floor-scored orphans in table order
        assert_eq!(names, ["Fast", "Middle", "Slow", "Orphan One", "Orphan Two"]);

        for pair in prediction.entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(
            prediction.skipped,
            ["Orphan One (Visa Cash App)", "Orphan Two (Unknown GP)"]
        );
        let orphan = &prediction.entries[3];
        assert_eq!(orphan.score, 0.0);
        assert!(orphan.breakdown.is_none());
        // Team is reported as written on the driver record
        assert_eq!(prediction.entries[0].team, "Red Bull Racing-Honda RBPT");
    }

    #[test]
    fn test_padding_stops_at_min_results() {
        let prediction = predict_with_min_results(
            &sample_data(),
            "ITA",
            &dry(),
            &ScoringConfig::default(),
            &mut NoLuck,
            4,
        )
        .unwrap();
        let names: Vec<&str> = prediction
            .entries
            .iter()
            .map(|e| e.driver.as_str())
            .collect();
        assert_eq!(names, ["Fast", "Middle", "Slow", "Orphan One"]);
        // Both are still reported as skipped
        assert_eq!(prediction.skipped.len(), 2);
    }

    #[test]
    fn test_default_padding_fills_ten_in_table_order() {
        let mut drivers = vec![
            driver("Matched A", "Red Bull", 90),
            driver("Matched B", "Red Bull", 70),
        ];
        drivers.extend((0..12).map(|i| driver(&format!("D{}", i), "Nowhere GP", 99)));
        let data = ReferenceData::new(
            drivers,
            vec![team("Red Bull")],
            vec![track("ITA", "Italy (Monza)", &[])],
        );

        let prediction =
            predict_for_track(&data, "ITA", &dry(), &ScoringConfig::default(), &mut NoLuck)
                .unwrap();

        assert_eq!(prediction.entries.len(), MIN_RESULTS);
        let names: Vec<&str> = prediction
            .entries
            .iter()
            .map(|e| e.driver.as_str())
            .collect();
        assert_eq!(
            names,
            ["Matched A", "Matched B", "D0", "D1", "D2", "D3", "D4", "D5", "D6", "D7"]
        );
        assert!(prediction.entries[2..].iter().all(|e| e.score == 0.0));
        assert_eq!(prediction.skipped.len(), 12);
    }

    #[test]
    fn test_no_padding_when_enough_matched() {
        let prediction = predict_with_min_results(
            &sample_data(),
            "ITA",
            &dry(),
            &ScoringConfig::default(),
            &mut NoLuck,
            3,
        )
        .unwrap();
        assert_eq!(prediction.entries.len(), 3);
        assert!(prediction.entries.iter().all(|e| e.breakdown.is_some()));
    }

    #[test]
    fn test_ties_keep_table_order() {
        let data = ReferenceData::new(
            vec![
                driver("First", "Red Bull", 80),
                driver("Second", "Red Bull", 80),
                driver("Third", "Red Bull", 80),
            ],
            vec![team("Red Bull")],
            vec![track("ITA", "Italy (Monza)", &[])],
        );
        let prediction =
            predict_for_track(&data, "ITA", &dry(), &ScoringConfig::default(), &mut NoLuck)
                .unwrap();
        let names: Vec<&str> = prediction
            .entries
            .iter()
            .map(|e| e.driver.as_str())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn test_builtin_grid_every_driver_once() {
        let data = ReferenceData::builtin().unwrap();
        let conditions = RaceConditions::new(Weather::Wet, 0.6);
        let prediction = predict_for_track(
            &data,
            "SAP",
            &conditions,
            &ScoringConfig::default(),
            &mut SeededLuck::from_seed(2025),
        )
        .unwrap();

        assert_eq!(prediction.entries.len(), data.drivers.len());
        assert!(prediction.skipped.is_empty());
        for d in &data.drivers {
            let count = prediction
                .entries
                .iter()
                .filter(|e| e.driver == d.name)
                .count();
            assert_eq!(count, 1, "{} should appear once", d.name);
        }
        for pair in prediction.entries.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_scores_rounded_to_two_places() {
        let data = ReferenceData::builtin().unwrap();
        let prediction = predict_for_track(
            &data,
            "ITA",
            &RaceConditions::default(),
            &ScoringConfig::default(),
            &mut NoLuck,
        )
        .unwrap();
        for entry in &prediction.entries {
            assert_eq!(entry.score, round_score(entry.score));
        }
    }

    #[test]
    fn test_points_for() {
        assert_eq!(points_for(1), 25);
        assert_eq!(points_for(10), 1);
        assert_eq!(points_for(11), 0);
        assert_eq!(points_for(0), 0);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(12.3456), 12.35);
        assert_eq!(round_score(-1.004), -1.0);
    }
}
