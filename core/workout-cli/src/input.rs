//! Compact text syntax for exercise values on the command line.
//!
//! ```text
//! strength   60x8,62.5x6     WEIGHTxREPS, sets separated by commas
//! cardio     20/8/7.5        TIME/LEVEL/DISTANCE, trailing parts optional
//! endurance  30/5            TIME/DISTANCE
//! stretch    done | skip
//! ```
//!
//! Values are passed through as text; the session builder decides what is
//! usable. `format_input` renders a draft back into the same syntax.

use crate::error::{CliError, Result};
use workout_core::{ExerciseInput, ExerciseType, StrengthSetInput};

/// Splits `EXERCISE_ID=VALUE`. Used as a clap value parser.
pub fn parse_entry(arg: &str) -> std::result::Result<(String, String), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected EXERCISE_ID=VALUE, got '{}'", arg))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing exercise id in '{}'", arg));
    }
    Ok((id.to_string(), value.trim().to_string()))
}

pub fn parse_input(exercise_type: ExerciseType, value: &str) -> Result<ExerciseInput> {
    match exercise_type {
        ExerciseType::Strength => parse_sets(value),
        ExerciseType::Cardio => {
            let [time, level, distance] = split_parts::<3>(value, "TIME/LEVEL/DISTANCE")?;
            Ok(ExerciseInput::Cardio {
                time,
                level,
                distance,
            })
        }
        ExerciseType::Endurance => {
            let [time, distance] = split_parts::<2>(value, "TIME/DISTANCE")?;
            Ok(ExerciseInput::Endurance { time, distance })
        }
        ExerciseType::Stretch => match value.trim().to_lowercase().as_str() {
            "done" | "yes" | "true" | "1" => Ok(ExerciseInput::Stretch { completed: true }),
            "skip" | "no" | "false" | "0" | "" => Ok(ExerciseInput::Stretch { completed: false }),
            other => Err(CliError::Input(format!(
                "expected 'done' or 'skip' for a stretch, got '{}'",
                other
            ))),
        },
    }
}

fn parse_sets(value: &str) -> Result<ExerciseInput> {
    let sets = value
        .split(',')
        .map(|set| {
            set.split_once(['x', 'X'])
                .map(|(weight, reps)| StrengthSetInput::new(weight.trim(), reps.trim()))
                .ok_or_else(|| {
                    CliError::Input(format!("expected WEIGHTxREPS for a set, got '{}'", set))
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(ExerciseInput::Strength { sets })
}

/// Splits on `/`, padding missing trailing parts with blanks.
fn split_parts<const N: usize>(value: &str, shape: &str) -> Result<[String; N]> {
    let parts: Vec<&str> = value.split('/').map(str::trim).collect();
    if parts.len() > N {
        return Err(CliError::Input(format!("expected {}, got '{}'", shape, value)));
    }
    Ok(std::array::from_fn(|i| {
        parts.get(i).map(|p| p.to_string()).unwrap_or_default()
    }))
}

pub fn format_input(input: &ExerciseInput) -> String {
    match input {
        ExerciseInput::Strength { sets } => sets
            .iter()
            .map(|s| format!("{}x{}", s.weight, s.reps))
            .collect::<Vec<_>>()
            .join(","),
        ExerciseInput::Cardio {
            time,
            level,
            distance,
        } => format!("{}/{}/{}", time, level, distance),
        ExerciseInput::Endurance { time, distance } => format!("{}/{}", time, distance),
        ExerciseInput::Stretch { completed: true } => "done".to_string(),
        ExerciseInput::Stretch { completed: false } => "skip".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_splits_on_first_equals() {
        assert_eq!(
            parse_entry("12=30/5").unwrap(),
            ("12".to_string(), "30/5".to_string())
        );
        assert!(parse_entry("12").is_err());
        assert!(parse_entry("=5").is_err());
    }

    #[test]
    fn strength_sets() {
        let input = parse_input(ExerciseType::Strength, "60x8, 62.5X6,x").unwrap();
        assert_eq!(
            input,
            ExerciseInput::Strength {
                sets: vec![
                    StrengthSetInput::new("60", "8"),
                    StrengthSetInput::new("62.5", "6"),
                    StrengthSetInput::new("", ""),
                ],
            }
        );
        assert!(parse_input(ExerciseType::Strength, "60").is_err());
    }

    #[test]
    fn cardio_pads_missing_parts() {
        assert_eq!(
            parse_input(ExerciseType::Cardio, "20").unwrap(),
            ExerciseInput::Cardio {
                time: "20".into(),
                level: String::new(),
                distance: String::new(),
            }
        );
        assert!(parse_input(ExerciseType::Cardio, "1/2/3/4").is_err());
    }

    #[test]
    fn endurance_and_stretch() {
        assert_eq!(
            parse_input(ExerciseType::Endurance, "30/5").unwrap(),
            ExerciseInput::Endurance {
                time: "30".into(),
                distance: "5".into(),
            }
        );
        assert_eq!(
            parse_input(ExerciseType::Stretch, "Done").unwrap(),
            ExerciseInput::Stretch { completed: true }
        );
        assert!(parse_input(ExerciseType::Stretch, "maybe").is_err());
    }

    #[test]
    fn format_reads_back() {
        for (exercise_type, text) in [
            (ExerciseType::Strength, "60x8,62.5x6"),
            (ExerciseType::Cardio, "20/8/7.5"),
            (ExerciseType::Endurance, "30/"),
            (ExerciseType::Stretch, "skip"),
        ] {
            let input = parse_input(exercise_type, text).unwrap();
            assert_eq!(format_input(&input), text);
        }
    }
}
