use super::loader::ReferenceData;
use std::collections::HashSet;

/// Validate reference tables after loading.
/// Returns all validation errors at once (not just the first).
pub fn validate_reference_data(data: &ReferenceData) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut seen_drivers = HashSet::new();
    for (i, driver) in data.drivers.iter().enumerate() {
        let name = driver.name.trim();
        if name.is_empty() {
            errors.push(format!("drivers[{}].name: must not be empty", i));
        } else if !seen_drivers.insert(name.to_lowercase()) {
            errors.push(format!("drivers[{}].name: duplicate driver '{}'", i, name));
        }

        let ratings = [
            ("overall", driver.overall),
            ("pace", driver.pace),
            ("racecraft", driver.racecraft),
            ("awareness", driver.awareness),
            ("experience", driver.experience),
        ];
        for (field, value) in ratings {
            if value > 100 {
                errors.push(format!(
                    "drivers[{}].{}: {} is outside 0-100",
                    i, field, value
                ));
            }
        }
    }

    for (i, team) in data.teams.iter().enumerate() {
        if team.name.trim().is_empty() {
            errors.push(format!("teams[{}].name: must not be empty", i));
        }
    }

    let mut seen_codes = HashSet::new();
    for (i, track) in data.tracks.iter().enumerate() {
        let code = track.code.trim();
        if code.is_empty() {
            errors.push(format!("tracks[{}].code: must not be empty", i));
        } else if !seen_codes.insert(code.to_lowercase()) {
            errors.push(format!("tracks[{}].code: duplicate code '{}'", i, code));
        }
        if !(0.0..=1.0).contains(&track.crash_risk) {
            errors.push(format!(
                "tracks[{}].crash_risk: {} is outside 0-1",
                i, track.crash_risk
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
