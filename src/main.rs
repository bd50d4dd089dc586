use clap::{Parser, Subcommand, ValueEnum};
use f1_predictor::config::Config;
use f1_predictor::data::ReferenceData;
use f1_predictor::scoring::{LuckSource, RaceConditions, SeededLuck, Weather};
use f1_predictor::PredictError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_TRACK_NOT_FOUND: i32 = 2;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

const FALLBACK_TRACK: &str = "ITA";

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Predict the finishing order at a track (default if no subcommand)
    Predict {
        /// Track code or part of its name (e.g. ITA, monza)
        track: Option<String>,

        /// Race weather
        #[arg(short, long, value_enum)]
        weather: Option<Weather>,

        /// Safety car probability, 0-1
        #[arg(short = 's', long = "safety-car")]
        safety_car: Option<f64>,

        /// Qualifying position as NAME=POS (repeatable)
        #[arg(short, long = "quali", value_name = "NAME=POS")]
        qualifying: Vec<String>,

        /// Recent results as NAME=P3,DNF,... (repeatable)
        #[arg(short, long, value_name = "NAME=RESULTS")]
        recent: Vec<String>,

        /// YAML file with qualifying and recent_results maps
        #[arg(short, long)]
        inputs: Option<PathBuf>,

        /// Seed for the luck terms, for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show how each driver's score was built
        #[arg(short, long)]
        explain: bool,
    },
    /// List known tracks
    Tracks,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "f1-predictor")]
#[command(about = "Predict an F1 finishing order from driver, team and track data", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/f1-predictor/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory with drivers.json, teams.json and tracks.json
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("f1_predictor={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load and validate config and reference data, exiting on failure.
/// Reference data is loaded once here and only read afterwards.
fn load_context(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> (Config, ReferenceData) {
    let config = match f1_predictor::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = f1_predictor::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let data_dir = data_dir.or_else(|| config.data_dir.clone());
    let data = match f1_predictor::data::load_reference_data(data_dir.as_deref()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Data error: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    if let Err(errors) = f1_predictor::data::validate_reference_data(&data) {
        eprintln!("Reference data errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_DATA);
    }

    (config, data)
}

fn print_skipped(skipped: &[String]) {
    if !skipped.is_empty() {
        eprintln!();
        eprintln!("{}", f1_predictor::output::format_skipped(skipped));
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Predict {
        track: None,
        weather: None,
        safety_car: None,
        qualifying: Vec::new(),
        recent: Vec::new(),
        inputs: None,
        seed: None,
        format: OutputFormat::Table,
        explain: false,
    });

    let config_path = cli.config.map(PathBuf::from);
    let use_colors = f1_predictor::output::should_use_colors();

    match command {
        Commands::Init => {
            // No config loading here: the config may not exist yet
            if let Err(e) = f1_predictor::config::run_init_wizard(config_path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        Commands::Tracks => {
            let (_, data) = load_context(config_path, cli.data_dir);
            println!(
                "{}",
                f1_predictor::output::format_track_list(&data.tracks, use_colors)
            );
        }
        Commands::Predict {
            track,
            weather,
            safety_car,
            qualifying,
            recent,
            inputs,
            seed,
            format,
            explain,
        } => {
            let (config, data) = load_context(config_path, cli.data_dir);
            let track_id = track
                .or_else(|| config.default_track.clone())
                .unwrap_or_else(|| FALLBACK_TRACK.to_string());
            let weather = weather.or(config.weather).unwrap_or_default();
            let safety_car_chance = safety_car
                .or(config.safety_car_chance)
                .unwrap_or(f1_predictor::scoring::DEFAULT_SAFETY_CAR_CHANCE);

            if let Err(e) = f1_predictor::scoring::validate_probability(safety_car_chance) {
                eprintln!("{}", e);
                std::process::exit(EXIT_CONFIG);
            }

            // File inputs first, command-line flags override them
            let mut race_inputs = match inputs {
                Some(path) => match f1_predictor::inputs::load_race_inputs(&path) {
                    Ok(i) => i,
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
                None => f1_predictor::inputs::RaceInputs::default(),
            };
            match f1_predictor::inputs::inputs_from_args(&qualifying, &recent) {
                Ok(flags) => race_inputs.merge(flags),
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }

            let mut conditions = RaceConditions::new(weather, safety_car_chance);
            if let Err(e) = race_inputs.apply_to(&mut conditions) {
                eprintln!("Input error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }

            let scoring = config.scoring.clone().unwrap_or_default();
            let min_results = config
                .min_results
                .unwrap_or(f1_predictor::ranking::MIN_RESULTS);

            let mut luck: Box<dyn LuckSource> = match seed {
                Some(seed) => Box::new(SeededLuck::from_seed(seed)),
                None => Box::new(SeededLuck::from_entropy()),
            };

            let prediction = match f1_predictor::ranking::predict_with_min_results(
                &data,
                &track_id,
                &conditions,
                &scoring,
                luck.as_mut(),
                min_results,
            ) {
                Ok(p) => p,
                Err(e @ PredictError::TrackNotFound(_)) => {
                    eprintln!("{}", e);
                    eprintln!("Run `f1-predictor tracks` to list known tracks.");
                    std::process::exit(EXIT_TRACK_NOT_FOUND);
                }
            };

            match format {
                OutputFormat::Table => {
                    println!(
                        "{}",
                        f1_predictor::output::format_prediction_table(&prediction, use_colors)
                    );
                    print_skipped(&prediction.skipped);
                }
                OutputFormat::Tsv => {
                    println!("{}", f1_predictor::output::format_tsv(&prediction));
                    print_skipped(&prediction.skipped);
                }
                OutputFormat::Json => {
                    let report = f1_predictor::output::PredictionReport::new(
                        &prediction,
                        weather,
                        safety_car_chance,
                        seed,
                    );
                    match f1_predictor::output::format_json(&report) {
                        Ok(json) => println!("{}", json),
                        Err(e) => {
                            eprintln!("Failed to serialize prediction: {}", e);
                            std::process::exit(EXIT_DATA);
                        }
                    }
                }
            }

            if explain {
                eprintln!();
                for entry in &prediction.entries {
                    eprintln!(
                        "{}",
                        f1_predictor::output::format_breakdown(entry, use_colors)
                    );
                    eprintln!();
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
