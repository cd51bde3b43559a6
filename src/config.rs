// Configuration: command-line arguments parsed with `clap`, plus the
// `BMI_UNITS` environment variable for the interactive unit choice.

use crate::units::UnitSystem;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// Environment variable that presets the unit system for interactive mode.
pub const UNITS_ENV: &str = "BMI_UNITS";

#[derive(Parser, Debug)]
#[command(name = "bmi-calc", version, about = "Body Mass Index calculator", long_about = None)]
pub struct Cli {
    /// Print the result as JSON instead of a sentence.
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip the unit question in interactive mode (`metric` or `imperial`).
    #[arg(long)]
    pub units: Option<UnitSystem>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Calculate from centimetres and kilograms
    Metric {
        #[arg(long, allow_negative_numbers = true)]
        height_cm: f64,
        #[arg(long, allow_negative_numbers = true)]
        weight_kg: f64,
    },

    /// Calculate from feet, inches and pounds
    Imperial {
        #[arg(long)]
        feet: u32,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        inches: f64,
        #[arg(long, allow_negative_numbers = true)]
        pounds: f64,
    },
}

/// Settings for a run after flags and environment have been merged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    pub units: Option<UnitSystem>,
    pub json: bool,
}

impl Settings {
    /// Build settings from parsed arguments and the `BMI_UNITS` variable.
    pub fn from_env(cli: &Cli) -> Result<Self> {
        let env_units = std::env::var(UNITS_ENV).ok();
        Self::resolve(cli, env_units.as_deref())
    }

    /// An explicit `--units` flag wins over the environment. An empty
    /// environment value counts as unset.
    pub fn resolve(cli: &Cli, env_units: Option<&str>) -> Result<Self> {
        let units = match (cli.units, env_units.filter(|v| !v.trim().is_empty())) {
            (Some(units), _) => Some(units),
            (None, Some(raw)) => Some(
                raw.parse::<UnitSystem>()
                    .with_context(|| format!("Invalid {UNITS_ENV} value"))?,
            ),
            (None, None) => None,
        };
        Ok(Settings {
            units,
            json: cli.json,
        })
    }
}
