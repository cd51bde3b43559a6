// BMI engine: pure functions that turn body measurements into a BMI value
// and a weight category. Nothing in here does I/O or keeps state, so the
// UI layer (and the tests) can call these freely.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type CalcResult<T> = Result<T, BmiError>;

/// Errors raised by the calculation functions.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BmiError {
    /// A measurement that must be positive (or non-negative) and finite
    /// was zero, negative, NaN or infinite.
    #[error("invalid measurement for {field}: {value}")]
    InvalidMeasurement { field: &'static str, value: f64 },
}

/// Weight category assigned from a BMI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Underweight,
    NormalWeight,
    Overweight,
    Obesity,
}

impl Category {
    /// Human readable label, e.g. `"Normal weight"`.
    pub fn label(self) -> &'static str {
        match self {
            Category::Underweight => "Underweight",
            Category::NormalWeight => "Normal weight",
            Category::Overweight => "Overweight",
            Category::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Upper bound (exclusive) and category, in ascending order of bound.
/// The last bound is infinite so every finite BMI lands somewhere.
pub const CATEGORIES: [(f64, Category); 4] = [
    (18.5, Category::Underweight),
    (25.0, Category::NormalWeight),
    (30.0, Category::Overweight),
    (f64::INFINITY, Category::Obesity),
];

/// Outcome of one calculation. `bmi` is rounded to one decimal place,
/// `category` is taken from the unrounded value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: Category,
}

impl BmiResult {
    /// Tiny heights or huge weights can push the formula (or the rounding
    /// step) past `f64::MAX`; those are rejected before classification.
    fn from_raw(raw: f64) -> CalcResult<Self> {
        let bmi = round1(raw);
        if !(raw.is_finite() && bmi.is_finite()) {
            log::debug!("rejected bmi = {raw}");
            return Err(BmiError::InvalidMeasurement { field: "bmi", value: raw });
        }
        Ok(BmiResult {
            bmi,
            category: classify(raw),
        })
    }
}

/// Compute BMI from height in centimetres and weight in kilograms.
pub fn calculate_metric(height_cm: f64, weight_kg: f64) -> CalcResult<BmiResult> {
    positive("height_cm", height_cm)?;
    positive("weight_kg", weight_kg)?;

    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    log::debug!("metric: {height_cm} cm, {weight_kg} kg -> {raw}");
    BmiResult::from_raw(raw)
}

/// Compute BMI from height in feet and inches and weight in pounds.
///
/// `height_in` may be zero (e.g. exactly 6 ft) and `height_ft` may be zero
/// as long as the combined height is positive.
pub fn calculate_imperial(height_ft: u32, height_in: f64, weight_lb: f64) -> CalcResult<BmiResult> {
    non_negative("height_in", height_in)?;
    positive("weight_lb", weight_lb)?;

    let total_inches = f64::from(height_ft) * 12.0 + height_in;
    positive("height", total_inches)?;

    let raw = 703.0 * weight_lb / (total_inches * total_inches);
    log::debug!("imperial: {height_ft} ft {height_in} in, {weight_lb} lb -> {raw}");
    BmiResult::from_raw(raw)
}

/// Map a BMI value to its category: the first table entry whose bound
/// strictly exceeds `bmi` wins, so a value equal to a threshold belongs to
/// the next category up.
///
/// Callers must pass a finite, non-negative value; the calculate functions
/// guarantee this.
pub fn classify(bmi: f64) -> Category {
    debug_assert!(bmi.is_finite() && bmi >= 0.0, "cannot classify bmi {bmi}");
    let [rest @ .., (_, last)] = CATEGORIES;
    rest.iter()
        .find(|(bound, _)| bmi < *bound)
        .map_or(last, |(_, category)| *category)
}

/// Round to one decimal place, halves away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn positive(field: &'static str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        log::debug!("rejected {field} = {value}");
        Err(BmiError::InvalidMeasurement { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        log::debug!("rejected {field} = {value}");
        Err(BmiError::InvalidMeasurement { field, value })
    }
}
