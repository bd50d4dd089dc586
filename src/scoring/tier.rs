use std::fmt;

/// Canonical team names, best to worst.
const BEST_TO_WORST: [&str; 10] = [
    "McLaren",
    "Ferrari",
    "Mercedes",
    "Red Bull",
    "Williams",
    "Sauber",
    "Racing Bulls",
    "Aston Martin",
    "Haas",
    "Alpine",
];

/// Coarse team competitiveness bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Top,
    UpperMid,
    Mid,
    Low,
}

impl Tier {
    /// Flat score bonus for the tier.
    pub fn bonus(self) -> f64 {
        match self {
            Tier::Top => 2.0,
            Tier::UpperMid => 1.0,
            Tier::Mid => 0.0,
            Tier::Low => -1.0,
        }
    }

    /// Multiplier on the weather and crash luck terms. Stronger teams are
    /// less exposed to chaos.
    pub fn luck_factor(self) -> f64 {
        match self {
            Tier::Top => 1.0,
            Tier::UpperMid => 0.97,
            Tier::Mid => 0.93,
            Tier::Low => 0.9,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::Top => "top",
            Tier::UpperMid => "upper-mid",
            Tier::Mid => "mid",
            Tier::Low => "low",
        };
        write!(f, "{}", label)
    }
}

/// Classify a canonical team name. Unknown names fall into `Low`.
pub fn tier_for(team_name: &str) -> Tier {
    let name = team_name.trim().to_lowercase();
    let position = BEST_TO_WORST
        .iter()
        .position(|t| t.to_lowercase() == name);

    match position {
        Some(0) => Tier::Top,
        Some(1..=2) => Tier::UpperMid,
        Some(3..=6) => Tier::Mid,
        _ => Tier::Low,
    }
}
