//! Matching free-text team names and track identifiers against the
//! reference tables.

use crate::data::{Team, Track};

/// Find the canonical team for a free-text team name.
///
/// Three passes, first match wins:
/// 1. exact match, ignoring case and surrounding whitespace
/// 2. substring match in either direction
/// 3. keyword match on whitespace/hyphen separated tokens
///
/// The later passes are looser fallbacks, so the pass order matters more
/// than the table order.
pub fn resolve_team<'a>(name: &str, teams: &'a [Team]) -> Option<&'a Team> {
    let wanted = name.trim().to_lowercase();

    if let Some(team) = teams
        .iter()
        .find(|t| t.name.trim().to_lowercase() == wanted)
    {
        return Some(team);
    }

    if let Some(team) = teams.iter().find(|t| {
        let canonical = t.name.trim().to_lowercase();
        wanted.contains(&canonical) || canonical.contains(&wanted)
    }) {
        return Some(team);
    }

    let keywords = tokenize(&wanted);
    teams.iter().find(|t| {
        let team_words = tokenize(&t.name.to_lowercase());
        keywords.iter().any(|word| team_words.contains(word))
    })
}

/// Find a track by code (case-insensitive), falling back to a
/// case-insensitive substring of its display name.
pub fn resolve_track<'a>(code_or_name: &str, tracks: &'a [Track]) -> Option<&'a Track> {
    let wanted = code_or_name.trim().to_lowercase();

    tracks
        .iter()
        .find(|t| t.code.to_lowercase() == wanted)
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.name.to_lowercase().contains(&wanted))
        })
}

fn tokenize(s: &str) -> Vec<String> {
    s.replace('-', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
