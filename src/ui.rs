// UI layer: the interactive prompt loop built on `dialoguer`, the one-shot
// subcommands, and the formatting shared by both.

use crate::bmi::{self, BmiError, BmiResult, Category};
use crate::config::{Command, Settings};
use crate::units::UnitSystem;
use anyhow::{Context, Result};
use crossterm::style::{Color, Stylize};
use dialoguer::Input;
use std::fmt::Display;

const POSITIVE_HINT: &str = "Please enter a positive number.";
const NON_NEGATIVE_HINT: &str = "Please enter a non-negative number.";
const WHOLE_HINT: &str = "Please enter a whole, non-negative number.";

/// Which values a numeric prompt accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Positive,
    NonNegative,
}

impl Bound {
    fn hint(self) -> &'static str {
        match self {
            Bound::Positive => POSITIVE_HINT,
            Bound::NonNegative => NON_NEGATIVE_HINT,
        }
    }
}

/// Parse a typed measurement, returning `None` for text that is not a
/// finite number inside `bound`.
pub fn parse_measurement(input: &str, bound: Bound) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    let ok = match bound {
        Bound::Positive => value > 0.0,
        Bound::NonNegative => value >= 0.0,
    };
    (value.is_finite() && ok).then_some(value)
}

/// Parse a whole number of feet.
pub fn parse_feet(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// One line summary, or a JSON object when `json` is set.
pub fn render(result: &BmiResult, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(result).context("Serializing result");
    }
    Ok(sentence(result, result.category))
}

/// `label` is the category, possibly styled for the terminal.
fn sentence(result: &BmiResult, label: impl Display) -> String {
    format!("Your BMI is {:.1} → {}", result.bmi, label)
}

/// Run a subcommand without prompting and print the result.
pub fn run_once(command: &Command, json: bool) -> Result<()> {
    let result = match *command {
        Command::Metric {
            height_cm,
            weight_kg,
        } => bmi::calculate_metric(height_cm, weight_kg)?,
        Command::Imperial {
            feet,
            inches,
            pounds,
        } => bmi::calculate_imperial(feet, inches, pounds)?,
    };
    println!("{}", render(&result, json)?);
    Ok(())
}

/// Interactive session: ask for units and measurements, then print the
/// result. Blocks until the user has answered every prompt.
pub fn run(settings: Settings) -> Result<()> {
    println!("=== BMI Calculator ===");
    let units = match settings.units {
        Some(units) => units,
        None => ask_units()?,
    };
    log::info!("using {units} units");

    let result = match units {
        UnitSystem::Metric => ask_metric()?,
        UnitSystem::Imperial => ask_imperial()?,
    };

    if settings.json {
        println!("{}", render(&result, true)?);
    } else {
        let label = result
            .category
            .label()
            .with(category_color(result.category))
            .bold();
        println!("\n{}\n", sentence(&result, label));
    }
    Ok(())
}

fn ask_units() -> Result<UnitSystem> {
    let answer: String = Input::new()
        .with_prompt("Choose units – [M]etric or [I]mperial?")
        .allow_empty(true)
        .interact_text()?;
    Ok(UnitSystem::from_selector(&answer))
}

fn ask_metric() -> Result<BmiResult> {
    loop {
        let height_cm = prompt_number("Height (cm)", Bound::Positive)?;
        let weight_kg = prompt_number("Weight (kg)", Bound::Positive)?;
        match bmi::calculate_metric(height_cm, weight_kg) {
            Ok(result) => return Ok(result),
            Err(e) => println!("  ✖ {e}"),
        }
    }
}

fn ask_imperial() -> Result<BmiResult> {
    loop {
        let height = ask_feet_and_inches()?;
        let pounds = prompt_number("Weight (pounds)", Bound::Positive)?;
        match settle_imperial(height, pounds, ask_feet_and_inches) {
            Err(e) if e.downcast_ref::<BmiError>().is_some() => println!("  ✖ {e}"),
            other => return other,
        }
    }
}

fn ask_feet_and_inches() -> Result<(u32, f64)> {
    let feet = prompt_feet()?;
    let inches = prompt_number("         inches", Bound::NonNegative)?;
    Ok((feet, inches))
}

/// Calculate from `height`, asking only for a new height while the engine
/// rejects the height (0 ft 0 in passes both prompts but not the engine).
/// The weight is kept. Any other rejection is returned to the caller.
pub fn settle_imperial<F>(height: (u32, f64), pounds: f64, mut ask_height: F) -> Result<BmiResult>
where
    F: FnMut() -> Result<(u32, f64)>,
{
    let (mut feet, mut inches) = height;
    loop {
        match bmi::calculate_imperial(feet, inches, pounds) {
            Err(e @ BmiError::InvalidMeasurement { field: "height", .. }) => {
                println!("  ✖ {e}. Please enter your height again.");
                (feet, inches) = ask_height()?;
            }
            other => return Ok(other?),
        }
    }
}

fn prompt_number(prompt: &str, bound: Bound) -> Result<f64> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            match parse_measurement(input, bound) {
                Some(_) => Ok(()),
                None => Err(bound.hint()),
            }
        })
        .interact_text()?;
    parse_measurement(&text, bound)
        .with_context(|| format!("Unreadable value for {}", prompt.trim()))
}

fn prompt_feet() -> Result<u32> {
    let text: String = Input::new()
        .with_prompt("Height - feet")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            match parse_feet(input) {
                Some(_) => Ok(()),
                None => Err(WHOLE_HINT),
            }
        })
        .interact_text()?;
    parse_feet(&text).context("Unreadable value for feet")
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Underweight => Color::Cyan,
        Category::NormalWeight => Color::Green,
        Category::Overweight => Color::Yellow,
        Category::Obesity => Color::Red,
    }
}

/// Whether an error came from the user interrupting a prompt (Ctrl-C or
/// a closed stdin).
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<std::io::Error>())
        .any(|io| {
            matches!(
                io.kind(),
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::UnexpectedEof
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_measurements() {
        assert_eq!(parse_measurement("170", Bound::Positive), Some(170.0));
        assert_eq!(parse_measurement(" 65.5 \n", Bound::Positive), Some(65.5));
        assert_eq!(parse_measurement("0", Bound::Positive), None);
        assert_eq!(parse_measurement("-3", Bound::Positive), None);
        assert_eq!(parse_measurement("abc", Bound::Positive), None);
        assert_eq!(parse_measurement("", Bound::Positive), None);
        assert_eq!(parse_measurement("inf", Bound::Positive), None);
        assert_eq!(parse_measurement("NaN", Bound::Positive), None);
    }

    #[test]
    fn non_negative_measurements() {
        assert_eq!(parse_measurement("0", Bound::NonNegative), Some(0.0));
        assert_eq!(parse_measurement("7", Bound::NonNegative), Some(7.0));
        assert_eq!(parse_measurement("-0.5", Bound::NonNegative), None);
    }

    #[test]
    fn feet_are_whole_numbers() {
        assert_eq!(parse_feet("5"), Some(5));
        assert_eq!(parse_feet("0"), Some(0));
        assert_eq!(parse_feet("5.5"), None);
        assert_eq!(parse_feet("-1"), None);
    }

    #[test]
    fn render_sentence() {
        let result = bmi::calculate_metric(150.0, 90.0).unwrap();
        assert_eq!(render(&result, false).unwrap(), "Your BMI is 40.0 → Obesity");
    }

    #[test]
    fn styled_sentence_matches_plain_text() {
        let result = bmi::calculate_metric(170.0, 65.0).unwrap();
        let label = result.category.label().with(Color::Green).bold();
        let styled = sentence(&result, label);
        assert!(styled.starts_with("Your BMI is 22.5 → "));
        assert!(styled.contains("Normal weight"));
        assert_eq!(sentence(&result, result.category), render(&result, false).unwrap());
    }

    #[test]
    fn zero_height_asks_only_for_height_again() {
        let mut asked = 0;
        let result = settle_imperial((0, 0.0), 150.0, || {
            asked += 1;
            Ok((5, 7.0))
        })
        .unwrap();
        assert_eq!(asked, 1);
        assert_eq!(result.bmi, 23.5);
        assert_eq!(result.category, Category::NormalWeight);
    }

    #[test]
    fn valid_height_is_not_asked_again() {
        let result = settle_imperial((6, 0.0), 180.0, || -> Result<(u32, f64)> {
            panic!("height should not be asked again")
        })
        .unwrap();
        assert_eq!(result.category, Category::NormalWeight);
    }

    #[test]
    fn weight_rejection_is_not_a_height_problem() {
        let err = settle_imperial((5, 7.0), 1e308, || -> Result<(u32, f64)> {
            panic!("height should not be asked again")
        })
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<BmiError>(),
            Some(&BmiError::InvalidMeasurement {
                field: "bmi",
                value: f64::INFINITY
            })
        );
    }

    #[test]
    fn render_json() {
        let result = bmi::calculate_imperial(5, 7.0, 150.0).unwrap();
        assert_eq!(
            render(&result, true).unwrap(),
            r#"{"bmi":23.5,"category":"Normal weight"}"#
        );
    }

    #[test]
    fn run_once_reports_invalid_measurement() {
        let cmd = Command::Metric {
            height_cm: 0.0,
            weight_kg: 70.0,
        };
        let err = run_once(&cmd, false).unwrap_err();
        assert!(err.downcast_ref::<bmi::BmiError>().is_some());
    }

    #[test]
    fn interrupted_io_is_detected() {
        let err = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(is_interrupted(&err));
        let err = anyhow::Error::new(std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
            .context("prompt");
        assert!(is_interrupted(&err));
        assert!(!is_interrupted(&anyhow::anyhow!("boom")));
    }
}
