//! Subcommand implementations. Each writes its report to `out`.

use crate::error::{CliError, Result};
use crate::export::{self, details, ExportKind};
use crate::input::{format_input, parse_input};
use std::io::Write;
use workout_core::history::parse_date;
use workout_core::{ExerciseType, MeasurementInput, WorkoutDraft, WorkoutEngine, WorkoutSession};

/// Short UTC date for listings; falls back to the stored text.
fn short_date(date: &str) -> String {
    parse_date(date)
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| date.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Exercises
// ─────────────────────────────────────────────────────────────────────────────

pub fn exercises(engine: &WorkoutEngine, search: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let found = match search {
        Some(query) => engine.workouts().search_exercises(query),
        None => engine.exercises(),
    };
    for exercise in found {
        writeln!(
            out,
            "{:>26}  {:<10} {}",
            exercise.id,
            exercise.exercise_type.as_str(),
            exercise.name
        )?;
    }
    Ok(())
}

pub fn add_exercise(
    engine: &WorkoutEngine,
    name: &str,
    exercise_type: ExerciseType,
    out: &mut dyn Write,
) -> Result<()> {
    let exercise = engine.workouts().create_exercise(name, exercise_type)?;
    writeln!(out, "Added {} ({}) as {}", exercise.name, exercise.exercise_type, exercise.id)?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Templates
// ─────────────────────────────────────────────────────────────────────────────

pub fn templates(engine: &WorkoutEngine, out: &mut dyn Write) -> Result<()> {
    let workouts = engine.workouts();
    for template in workouts.templates() {
        let last = workouts
            .last_performed(&template.id)
            .map(|d| short_date(&d))
            .unwrap_or_else(|| "never".to_string());
        writeln!(
            out,
            "{}  {} ({} exercises, last {})",
            template.id,
            template.name,
            template.exercises.len(),
            last
        )?;
    }
    Ok(())
}

pub fn add_template(
    engine: &WorkoutEngine,
    name: &str,
    exercise_ids: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let workouts = engine.workouts();
    let exercises = exercise_ids
        .iter()
        .map(|id| workouts.exercise(id))
        .collect::<workout_core::Result<Vec<_>>>()?;
    let template = workouts.create_template(name, exercises)?;
    writeln!(out, "Created workout {} as {}", template.name, template.id)?;
    Ok(())
}

pub fn delete_template(engine: &WorkoutEngine, id: &str, out: &mut dyn Write) -> Result<()> {
    if engine.workouts().delete_template(id)? {
        writeln!(out, "Deleted workout {}", id)?;
    } else {
        tracing::warn!(id, "No workout with that id");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

fn print_draft(draft: &WorkoutDraft, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{} ({})", draft.template_name, draft.template_id)?;
    for slot in &draft.exercises {
        writeln!(
            out,
            "  {}={}    # {}, {}",
            slot.exercise.id,
            format_input(&slot.input),
            slot.exercise.name,
            slot.exercise.exercise_type
        )?;
    }
    Ok(())
}

/// Shows the pre-filled draft in `--entry` syntax.
pub fn start(engine: &WorkoutEngine, template_id: &str, out: &mut dyn Write) -> Result<()> {
    let draft = engine.workouts().start_workout(template_id)?;
    print_draft(&draft, out)
}

/// Logs a session from `--entry` values.
///
/// With `repeat`, exercises without an entry keep their pre-filled values;
/// otherwise they start blank and are left out.
pub fn log(
    engine: &WorkoutEngine,
    template_id: &str,
    entries: &[(String, String)],
    repeat: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let workouts = engine.workouts();
    let mut draft = if repeat {
        workouts.start_workout(template_id)?
    } else {
        WorkoutDraft::new(&workouts.template(template_id)?)
    };

    for (exercise_id, value) in entries {
        let exercise_type = draft
            .exercises
            .iter()
            .find(|slot| &slot.exercise.id == exercise_id)
            .map(|slot| slot.exercise.exercise_type)
            .ok_or_else(|| {
                CliError::Input(format!(
                    "exercise {} is not part of workout {}",
                    exercise_id, draft.template_name
                ))
            })?;
        let input = parse_input(exercise_type, value)?;
        draft.set_input(exercise_id, input);
    }

    let session = workouts.finish_workout(&draft)?;
    writeln!(
        out,
        "Logged {} with {} exercises",
        session.template_name,
        session.exercises.len()
    )?;
    Ok(())
}

fn print_session(session: &WorkoutSession, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}  {}", short_date(&session.date), session.template_name)?;
    for entry in &session.exercises {
        writeln!(out, "    {}: {}", entry.exercise_name, details(&entry.data))?;
    }
    Ok(())
}

pub fn history(engine: &WorkoutEngine, all: bool, out: &mut dyn Write) -> Result<()> {
    let sessions = if all {
        workout_core::history::sessions_newest_first(&engine.sessions())
            .into_iter()
            .cloned()
            .collect()
    } else {
        engine.recent_sessions()
    };
    if sessions.is_empty() {
        writeln!(out, "No workouts logged yet")?;
    }
    for session in &sessions {
        print_session(session, out)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Measurements
// ─────────────────────────────────────────────────────────────────────────────

pub fn measure(
    engine: &WorkoutEngine,
    input: &MeasurementInput,
    out: &mut dyn Write,
) -> Result<()> {
    let measurement = engine.workouts().add_measurement(input)?;
    writeln!(out, "Saved measurement {}", measurement.id)?;
    Ok(())
}

pub fn measurements(engine: &WorkoutEngine, out: &mut dyn Write) -> Result<()> {
    for m in engine.measurements() {
        let values: Vec<String> = workout_core::types::MEASUREMENT_FIELDS
            .iter()
            .zip(m.values())
            .filter_map(|(field, value)| value.map(|v| format!("{}={}", field, v)))
            .collect();
        writeln!(out, "{}  {}  {}", m.id, short_date(&m.date), values.join(" "))?;
    }
    Ok(())
}

pub fn delete_measurement(engine: &WorkoutEngine, id: &str, out: &mut dyn Write) -> Result<()> {
    if engine.workouts().delete_measurement(id)? {
        writeln!(out, "Deleted measurement {}", id)?;
    } else {
        tracing::warn!(id, "No measurement with that id");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Preferences & Export
// ─────────────────────────────────────────────────────────────────────────────

pub fn prefs(
    engine: &WorkoutEngine,
    dark_mode: Option<bool>,
    dashboard_limit: Option<u32>,
    adjust_limit: Option<i32>,
    out: &mut dyn Write,
) -> Result<()> {
    let workouts = engine.workouts();
    if let Some(enabled) = dark_mode {
        workouts.set_dark_mode(enabled)?;
    }
    if let Some(limit) = dashboard_limit {
        workouts.set_dashboard_limit(limit)?;
    }
    if let Some(delta) = adjust_limit {
        workouts.adjust_dashboard_limit(delta)?;
    }
    writeln!(out, "dark_mode={}", workouts.dark_mode())?;
    writeln!(out, "dashboard_limit={}", workouts.dashboard_limit())?;
    Ok(())
}

pub fn export(engine: &WorkoutEngine, kind: ExportKind, out: &mut dyn Write) -> Result<()> {
    match kind {
        ExportKind::Workouts => export::write_workouts(out, &engine.sessions()),
        ExportKind::Body => export::write_body(out, &engine.measurements()),
    }
}
