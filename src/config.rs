/***************************************/
/*        3rd party libraries          */
/***************************************/
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Read(#[from] io::Error),
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub dispatcher: DispatcherConfig,
    pub intake: IntakeConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DispatcherConfig {
    pub n_floors: u8,
    pub n_cars: usize,
    pub tick_interval_ms: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            n_floors: 20,
            n_cars: 2,
            tick_interval_ms: 1000,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IntakeConfig {
    pub interactive: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        IntakeConfig { interactive: true }
    }
}

/// Command line overrides. Anything left out falls back to the configuration file.
#[derive(Parser, Debug, Default)]
#[clap(name = "elevator_dispatch", about = "Dispatch simulator for a fleet of elevator cars")]
pub struct Args {
    /// Path to the configuration file
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Number of floors in the building
    #[clap(long)]
    pub floors: Option<u8>,

    /// Number of cars in the fleet
    #[clap(long)]
    pub cars: Option<usize>,

    /// Milliseconds between two dispatcher ticks
    #[clap(long)]
    pub tick_ms: Option<u64>,

    /// Do not print input prompts
    #[clap(long)]
    pub quiet: bool,
}

impl Config {
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(n_floors) = args.floors {
            self.dispatcher.n_floors = n_floors;
        }
        if let Some(n_cars) = args.cars {
            self.dispatcher.n_cars = n_cars;
        }
        if let Some(tick_ms) = args.tick_ms {
            self.dispatcher.tick_interval_ms = tick_ms;
        }
        if args.quiet {
            self.intake.interactive = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dispatcher = &self.dispatcher;

        if dispatcher.n_floors < 2 {
            return Err(ConfigError::Invalid(format!(
                "n_floors must be at least 2, got {}",
                dispatcher.n_floors
            )));
        }
        if dispatcher.n_cars == 0 {
            return Err(ConfigError::Invalid("n_cars must be at least 1".to_string()));
        }
        if dispatcher.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(config_str)?)
}

/// Read the configuration file and apply command line overrides. A missing
/// file is only an error when the path was given explicitly.
pub fn load_config(args: &Args) -> Result<Config, ConfigError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => match read_config(Path::new(DEFAULT_CONFIG_PATH)) {
            Err(ConfigError::Read(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
                Config::default()
            }
            other => other?,
        },
    };

    config.apply_args(args);
    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/
