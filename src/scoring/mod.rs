pub mod conditions;
pub mod config;
pub mod engine;
pub mod luck;
pub mod tier;
pub mod validation;

pub use conditions::{fold_name, RaceConditions, Weather, DEFAULT_SAFETY_CAR_CHANCE};
pub use config::*;
pub use engine::{
    base_driver_score, calculate_score, score_driver, FactorContribution, ScoreBreakdown,
    ScoreResult,
};
pub use luck::{LuckSource, NoLuck, SeededLuck};
pub use tier::{tier_for, Tier};
pub use validation::{validate_probability, validate_scoring};
