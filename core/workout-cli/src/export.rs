//! CSV export of workout history and body data, oldest first.

use crate::error::Result;
use clap::ValueEnum;
use std::io::Write;
use workout_core::history::{measurements_newest_first, sessions_newest_first};
use workout_core::types::MEASUREMENT_FIELDS;
use workout_core::{BodyMeasurement, ExerciseData, WorkoutSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// One row per logged exercise
    Workouts,
    /// One row per measurement
    Body,
}

/// Human-readable summary of one exercise's data.
pub fn details(data: &ExerciseData) -> String {
    match data {
        ExerciseData::Strength { sets } => sets
            .iter()
            .map(|s| format!("{}kg x {}", s.weight, s.reps))
            .collect::<Vec<_>>()
            .join("; "),
        ExerciseData::Cardio { data } => {
            let mut parts = Vec::new();
            if data.time > 0.0 {
                parts.push(format!("{}min", data.time));
            }
            if data.level > 0.0 {
                parts.push(format!("level {}", data.level));
            }
            if data.distance > 0.0 {
                parts.push(format!("{}km", data.distance));
            }
            parts.join(", ")
        }
        ExerciseData::Endurance { data } => {
            let mut parts = Vec::new();
            if data.time > 0.0 {
                parts.push(format!("{}min", data.time));
            }
            if data.distance > 0.0 {
                parts.push(format!("{}km", data.distance));
            }
            if data.pace > 0.0 {
                parts.push(format!("pace {:.2} min/km", data.pace));
            }
            parts.join(", ")
        }
        ExerciseData::Stretch { data } if data.completed => "completed".to_string(),
        ExerciseData::Stretch { .. } => String::new(),
    }
}

pub fn write_workouts<W: Write>(out: W, sessions: &[WorkoutSession]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["date", "workout", "exercise", "type", "details"])?;

    for session in sessions_newest_first(sessions).into_iter().rev() {
        for entry in &session.exercises {
            writer.write_record([
                session.date.as_str(),
                session.template_name.as_str(),
                entry.exercise_name.as_str(),
                entry.exercise_type().as_str(),
                details(&entry.data).as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn write_body<W: Write>(out: W, measurements: &[BodyMeasurement]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    let mut header = vec!["date"];
    header.extend(MEASUREMENT_FIELDS);
    writer.write_record(&header)?;

    for measurement in measurements_newest_first(measurements).into_iter().rev() {
        let mut row = vec![measurement.date.clone()];
        row.extend(
            measurement
                .values()
                .iter()
                .map(|v| v.map(|n| n.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
