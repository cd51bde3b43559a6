// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to run either the interactive prompts or
// a one-shot calculation.
//
// Module responsibilities:
// - `bmi`: the calculation engine (formulas, rounding, category table).
//   Pure functions, no I/O.
// - `units`: metric/imperial selection.
// - `config`: command-line flags and environment overrides.
// - `ui`: terminal prompts and result formatting; delegates the maths
//   to `bmi`.
pub mod bmi;
pub mod config;
pub mod ui;
pub mod units;

pub use bmi::{calculate_imperial, calculate_metric, classify, BmiError, BmiResult, Category};
pub use units::UnitSystem;
