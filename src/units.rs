// Unit system selection shared by the interactive prompt and the CLI flags.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Centimetres and kilograms.
    #[default]
    Metric,
    /// Feet, inches and pounds.
    Imperial,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown unit system `{0}` (expected `metric` or `imperial`)")]
pub struct UnknownUnits(pub String);

impl UnitSystem {
    /// Interpret the answer to the `[M]etric or [I]mperial?` question.
    /// Anything that does not start with `i` falls back to metric.
    pub fn from_selector(input: &str) -> Self {
        if input.trim().to_lowercase().starts_with('i') {
            UnitSystem::Imperial
        } else {
            UnitSystem::Metric
        }
    }
}

impl FromStr for UnitSystem {
    type Err = UnknownUnits;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "metric" => Ok(UnitSystem::Metric),
            "i" | "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(UnknownUnits(s.to_string())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}
