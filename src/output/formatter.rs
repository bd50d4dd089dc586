use std::io::IsTerminal;
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::data::Track;
use crate::ranking::{points_for, Prediction, RankedEntry};
use crate::scoring::{ScoreBreakdown, Weather};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals ("12.35", "0.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a prediction as a table: Pos, Driver, Team, Score, Points.
/// The team column is truncated to the terminal width when stdout is a TTY.
pub fn format_prediction_table(prediction: &Prediction, use_colors: bool) -> String {
    if prediction.entries.is_empty() {
        return "No drivers to rank.".to_string();
    }

    let driver_width = prediction
        .entries
        .iter()
        .map(|e| e.driver.chars().count())
        .max()
        .unwrap_or(0)
        .max("Driver".len());
    let score_width = 8;
    let points_width = 6;
    // "Pos" column: 4 chars, two spaces between each other column
    let fixed_width = 4 + driver_width + 2 + 2 + score_width + 2 + points_width;

    let team_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => Some(width - fixed_width),
        Some(_) => Some(10),
        None => None,
    };
    let natural_team_width = prediction
        .entries
        .iter()
        .map(|e| e.team.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());
    let team_col = team_width
        .map(|w| w.min(natural_team_width))
        .unwrap_or(natural_team_width);

    let mut lines = Vec::with_capacity(prediction.entries.len() + 3);

    let title = format!("{} ({})", prediction.track.name, prediction.track.code);
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    let header = format!(
        "{:<4}{:<dw$}  {:<tw$}  {:>sw$}  {:>pw$}",
        "Pos",
        "Driver",
        "Team",
        "Score",
        "Points",
        dw = driver_width,
        tw = team_col,
        sw = score_width,
        pw = points_width
    );
    lines.push(if use_colors {
        header.dimmed().to_string()
    } else {
        header
    });

    for (idx, entry) in prediction.entries.iter().enumerate() {
        let position = idx + 1;
        let pos_str = format!("{:<4}", format!("{}.", position));
        let driver_str = format!("{:<width$}", entry.driver, width = driver_width);
        let team_str = format!(
            "{:<width$}",
            truncate(&entry.team, team_col),
            width = team_col
        );
        let score_str = format!("{:>width$}", format_score(entry.score), width = score_width);
        let points_str = format!("{:>width$}", points_for(position), width = points_width);

        if use_colors {
            lines.push(format!(
                "{}{}  {}  {}  {}",
                pos_str.dimmed(),
                driver_str.bold(),
                team_str.cyan(),
                score_str,
                points_str.yellow()
            ));
        } else {
            lines.push(format!(
                "{}{}  {}  {}  {}",
                pos_str, driver_str, team_str, score_str, points_str
            ));
        }
    }

    lines.join("\n")
}

/// Format a prediction as tab-separated values for scripting
/// Columns: pos, driver, team, score, points (no headers, no colors)
pub fn format_tsv(prediction: &Prediction) -> String {
    prediction
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                idx + 1,
                entry.driver,
                entry.team,
                format_score(entry.score),
                points_for(idx + 1)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the per-factor breakdown of one entry (for --explain)
pub fn format_breakdown(entry: &RankedEntry, use_colors: bool) -> String {
    let heading = if use_colors {
        format!("{} ({})", entry.driver.bold(), entry.team.cyan())
    } else {
        format!("{} ({})", entry.driver, entry.team)
    };

    let Some(ScoreBreakdown { base_score, factors }) = &entry.breakdown else {
        return format!("{}\n  No team match: floor score 0", heading);
    };

    let mut lines = vec![heading, format!("  Base ability: {:.2}", base_score)];
    for factor in factors {
        lines.push(format!(
            "  {}: {} ({:.2} -> {:.2})",
            factor.label, factor.description, factor.before, factor.after
        ));
    }
    lines.push(format!("  Score: {}", format_score(entry.score)));
    lines.join("\n")
}

/// Format the list of drivers skipped for team-matching problems
pub fn format_skipped(skipped: &[String]) -> String {
    let mut lines = vec!["Skipped drivers due to team matching issues:".to_string()];
    lines.extend(skipped.iter().map(|d| format!("  - {}", d)));
    lines.join("\n")
}

/// Format the track table for `tracks`
pub fn format_track_list(tracks: &[Track], use_colors: bool) -> String {
    if tracks.is_empty() {
        return "No tracks found.".to_string();
    }

    let name_width = tracks
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);

    tracks
        .iter()
        .map(|t| {
            let code = format!("{:<4}", t.code);
            let name = format!("{:<width$}", t.name, width = name_width);
            let traits = t.traits.join(", ");
            if use_colors {
                format!("{} {}  {}  {}", code.bold(), name, t.country.cyan(), traits.dimmed())
            } else {
                format!("{} {}  {}  {}", code, name, t.country, traits)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    pub position: usize,
    pub driver: &'a str,
    pub team: &'a str,
    pub score: f64,
    pub points: u32,
}

/// JSON shape of a prediction run
#[derive(Debug, Serialize)]
pub struct PredictionReport<'a> {
    pub track_code: &'a str,
    pub track_name: &'a str,
    pub weather: Weather,
    pub safety_car_chance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub generated_at: DateTime<Utc>,
    pub predictions: Vec<ReportEntry<'a>>,
    pub skipped: &'a [String],
}

impl<'a> PredictionReport<'a> {
    pub fn new(
        prediction: &'a Prediction,
        weather: Weather,
        safety_car_chance: f64,
        seed: Option<u64>,
    ) -> Self {
        Self {
            track_code: &prediction.track.code,
            track_name: &prediction.track.name,
            weather,
            safety_car_chance,
            seed,
            generated_at: Utc::now(),
            predictions: prediction
                .entries
                .iter()
                .enumerate()
                .map(|(idx, e)| ReportEntry {
                    position: idx + 1,
                    driver: &e.driver,
                    team: &e.team,
                    score: e.score,
                    points: points_for(idx + 1),
                })
                .collect(),
            skipped: &prediction.skipped,
        }
    }
}

/// Format a report as pretty-printed JSON
pub fn format_json(report: &PredictionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
