use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config};
use crate::data::load_reference_data;
use crate::resolve::resolve_track;
use crate::scoring::{validate_probability, ScoringConfig, Weather, DEFAULT_SAFETY_CAR_CHANCE};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt for a non-negative weight until one parses.
fn prompt_weight(message: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            _ => println!("  Invalid: must be a non-negative number. Try again."),
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("F1 Predictor Configuration Wizard");
    println!("=================================");
    println!();

    // 1. Reference data
    println!("Driver, team and track tables are built in. Point at a directory with");
    println!("drivers.json, teams.json and tracks.json to use your own.");
    let data_dir = loop {
        let input = prompt_with_default("Data directory", "built-in")?;
        if input == "built-in" || input.is_empty() {
            break None;
        }
        let dir = PathBuf::from(&input);
        match load_reference_data(Some(dir.as_path())) {
            Ok(_) => break Some(dir),
            Err(e) => println!("  Invalid: {:#}. Try again.", e),
        }
    };
    let data = load_reference_data(data_dir.as_deref())?;

    // 2. Race defaults
    println!();
    let default_track = loop {
        let input = prompt_with_default("Default track (code or name)", "ITA")?;
        match resolve_track(&input, &data.tracks) {
            Some(track) => {
                println!("  Using {} ({})", track.name, track.code);
                break track.code.clone();
            }
            None => println!("  No track matches '{}'. Try again.", input),
        }
    };

    let weather = loop {
        let input = prompt_with_default("Default weather (dry/wet)", "dry")?;
        match input.to_lowercase().as_str() {
            "dry" => break Weather::Dry,
            "wet" => break Weather::Wet,
            _ => println!("  Invalid: must be 'dry' or 'wet'. Try again."),
        }
    };

    let safety_car_chance = loop {
        let input = prompt_with_default(
            "Default safety car chance (0-1)",
            &DEFAULT_SAFETY_CAR_CHANCE.to_string(),
        )?;
        match input.parse::<f64>() {
            Ok(v) => match validate_probability(v) {
                Ok(()) => break v,
                Err(e) => println!("  Invalid: {}. Try again.", e),
            },
            Err(_) => println!("  Invalid: must be a number between 0 and 1. Try again."),
        }
    };

    // 3. Scoring weights
    println!();
    let scoring = if prompt_yes_no("Tune scoring weights? (n accepts defaults)", false)? {
        let defaults = ScoringConfig::with_defaults();
        println!("Driver traits count for more than team traits. Raise a weight to make");
        println!("that factor matter more, set it to 0 to switch it off.");
        Some(ScoringConfig {
            team_trait_weight: Some(prompt_weight(
                "Team trait weight",
                defaults.team_trait_weight(),
            )?),
            driver_strength_bonus: Some(prompt_weight(
                "Driver strength bonus",
                defaults.driver_strength_bonus(),
            )?),
            driver_weakness_penalty: Some(prompt_weight(
                "Driver weakness penalty",
                defaults.driver_weakness_penalty(),
            )?),
            wet_weather_bonus: Some(prompt_weight(
                "Wet weather bonus",
                defaults.wet_weather_bonus(),
            )?),
            safety_car_threshold: Some(defaults.safety_car_threshold()),
            qualifying_weight: Some(prompt_weight(
                "Qualifying weight (per grid slot)",
                defaults.qualifying_weight(),
            )?),
            recent_top5_bonus: Some(prompt_weight(
                "Recent top-5 bonus",
                defaults.recent_top5_bonus(),
            )?),
            recent_dnf_penalty: Some(prompt_weight(
                "Recent DNF penalty",
                defaults.recent_dnf_penalty(),
            )?),
            home_race_bonus: Some(prompt_weight(
                "Home race bonus",
                defaults.home_race_bonus(),
            )?),
        })
    } else {
        None
    };

    // 4. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        data_dir,
        default_track: Some(default_track),
        weather: Some(weather),
        safety_car_chance: Some(safety_car_chance),
        min_results: None,
        scoring,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `f1-predictor` to get started.");

    Ok(())
}

/// Serialize `config` as YAML and write it atomically, creating parent
/// directories as needed.
pub(crate) fn write_config(path: &std::path::Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
