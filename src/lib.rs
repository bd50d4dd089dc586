//! F1 race predictor.
//!
//! Ranks drivers for a track by a heuristic score built from driver, team
//! and track attributes plus optional race conditions.
//!
//! # Example
//!
//! ```no_run
//! use f1_predictor::data::ReferenceData;
//! use f1_predictor::ranking::predict_for_track;
//! use f1_predictor::scoring::{RaceConditions, ScoringConfig, SeededLuck};
//!
//! let data = ReferenceData::builtin()?;
//! let prediction = predict_for_track(
//!     &data,
//!     "Monza",
//!     &RaceConditions::default(),
//!     &ScoringConfig::default(),
//!     &mut SeededLuck::from_seed(1),
//! )?;
//! for (i, entry) in prediction.entries.iter().enumerate() {
//!     println!("{}. {} {:.2}", i + 1, entry.driver, entry.score);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod inputs;
pub mod output;
pub mod ranking;
pub mod resolve;
pub mod scoring;

pub use error::PredictError;
pub use ranking::{predict_for_track, Prediction, RankedEntry};
pub use resolve::{resolve_team, resolve_track};
pub use scoring::score_driver;
