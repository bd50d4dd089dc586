pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_prediction_table, format_score, format_skipped,
    format_track_list, format_tsv, should_use_colors, PredictionReport,
};
