pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_reference_data, ReferenceData};
pub use types::{contains_tag, normalize_tag, Driver, Team, Track};
pub use validation::validate_reference_data;
