//! Session builder: raw workout input → validated session records.
//!
//! A [`WorkoutDraft`] is the in-memory working copy of what the user typed for
//! each exercise of a template. Editing a draft (adding sets, changing fields,
//! ticking stretches) never touches storage. [`WorkoutDraft::finish`] turns the
//! draft into a [`WorkoutSession`], dropping every exercise without a usable
//! value, and refuses to produce a session with no exercises at all.
//!
//! ## Per-type rules
//!
//! | type      | kept when                         | derived |
//! |-----------|-----------------------------------|---------|
//! | strength  | ≥ 1 set with weight > 0, reps > 0 | -       |
//! | cardio    | any of time/level/distance > 0    | -       |
//! | endurance | time > 0 or distance > 0          | pace    |
//! | stretch   | marked completed                  | -       |
//!
//! Text is trimmed and a decimal comma is accepted. Whole-number fields (reps,
//! cardio level) drop any fractional part. Unparseable readings count as 0.

use crate::error::{Result, WorkoutError};
use crate::history::LatestExerciseData;
use crate::types::{
    BodyMeasurement, CardioData, EnduranceData, Exercise, ExerciseData, ExerciseType,
    SessionExerciseEntry, StrengthSet, StretchData, WorkoutSession, WorkoutTemplate,
};
use chrono::{DateTime, SecondsFormat, Utc};

// ─────────────────────────────────────────────────────────────────────────────
// Number parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Parses user-entered decimal text. Blank, malformed and non-finite input is `None`.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a whole number, truncating any fractional part.
pub fn parse_whole(text: &str) -> Option<u32> {
    parse_decimal(text)
        .map(f64::trunc)
        .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v as u32)
}

/// A reading that defaults to 0 when blank, malformed or negative.
fn reading(text: &str) -> f64 {
    parse_decimal(text).filter(|v| *v > 0.0).unwrap_or(0.0)
}

fn whole_reading(text: &str) -> f64 {
    parse_whole(text).map(f64::from).unwrap_or(0.0)
}

/// Renders a stored value back into an input field. Zero renders blank.
fn render(value: f64) -> String {
    if value > 0.0 {
        value.to_string()
    } else {
        String::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw input
// ─────────────────────────────────────────────────────────────────────────────

/// One strength set as typed.
#[derive(Debug, Clone, PartialEq, Default, uniffi::Record)]
pub struct StrengthSetInput {
    pub weight: String,
    pub reps: String,
}

impl StrengthSetInput {
    pub fn new(weight: impl Into<String>, reps: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            reps: reps.into(),
        }
    }
}

/// Which half of a strength set is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum SetField {
    Weight,
    Reps,
}

/// Which cardio/endurance reading is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ReadingField {
    Time,
    Level,
    Distance,
}

/// Raw input for one exercise, shaped by its type.
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum ExerciseInput {
    Strength {
        sets: Vec<StrengthSetInput>,
    },
    Cardio {
        time: String,
        level: String,
        distance: String,
    },
    Endurance {
        time: String,
        distance: String,
    },
    Stretch {
        completed: bool,
    },
}

impl ExerciseInput {
    /// Blank input: one empty set, empty readings, unticked stretch.
    pub fn empty(exercise_type: ExerciseType) -> Self {
        match exercise_type {
            ExerciseType::Strength => ExerciseInput::Strength {
                sets: vec![StrengthSetInput::default()],
            },
            ExerciseType::Cardio => ExerciseInput::Cardio {
                time: String::new(),
                level: String::new(),
                distance: String::new(),
            },
            ExerciseType::Endurance => ExerciseInput::Endurance {
                time: String::new(),
                distance: String::new(),
            },
            ExerciseType::Stretch => ExerciseInput::Stretch { completed: false },
        }
    }

    /// Input seeded from the last recorded data for this exercise.
    ///
    /// History recorded under a different type than the exercise has now is
    /// not converted; the blank input is used instead.
    pub fn prefilled(exercise_type: ExerciseType, previous: Option<&ExerciseData>) -> Self {
        let Some(previous) = previous else {
            return Self::empty(exercise_type);
        };
        match previous {
            ExerciseData::Strength { sets } if exercise_type == ExerciseType::Strength => {
                if sets.is_empty() {
                    return Self::empty(exercise_type);
                }
                ExerciseInput::Strength {
                    sets: sets
                        .iter()
                        .map(|s| StrengthSetInput::new(render(s.weight), render(f64::from(s.reps))))
                        .collect(),
                }
            }
            ExerciseData::Cardio { data } if exercise_type == ExerciseType::Cardio => {
                ExerciseInput::Cardio {
                    time: render(data.time),
                    level: render(data.level),
                    distance: render(data.distance),
                }
            }
            ExerciseData::Endurance { data } if exercise_type == ExerciseType::Endurance => {
                ExerciseInput::Endurance {
                    time: render(data.time),
                    distance: render(data.distance),
                }
            }
            ExerciseData::Stretch { data } if exercise_type == ExerciseType::Stretch => {
                ExerciseInput::Stretch {
                    completed: data.completed,
                }
            }
            other => {
                tracing::debug!(
                    expected = %exercise_type,
                    recorded = %other.exercise_type(),
                    "Ignoring history recorded under a different exercise type"
                );
                Self::empty(exercise_type)
            }
        }
    }

    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseInput::Strength { .. } => ExerciseType::Strength,
            ExerciseInput::Cardio { .. } => ExerciseType::Cardio,
            ExerciseInput::Endurance { .. } => ExerciseType::Endurance,
            ExerciseInput::Stretch { .. } => ExerciseType::Stretch,
        }
    }

    /// Validates the input into recorded data, or `None` if nothing usable was entered.
    pub fn to_data(&self) -> Option<ExerciseData> {
        match self {
            ExerciseInput::Strength { sets } => {
                let sets: Vec<StrengthSet> = sets
                    .iter()
                    .filter_map(|set| {
                        let weight = parse_decimal(&set.weight)?;
                        let reps = parse_whole(&set.reps)?;
                        (weight > 0.0 && reps > 0).then_some(StrengthSet { weight, reps })
                    })
                    .collect();
                (!sets.is_empty()).then_some(ExerciseData::Strength { sets })
            }
            ExerciseInput::Cardio {
                time,
                level,
                distance,
            } => {
                let data = CardioData {
                    time: reading(time),
                    level: whole_reading(level),
                    distance: reading(distance),
                };
                let empty = data.time <= 0.0 && data.level <= 0.0 && data.distance <= 0.0;
                (!empty).then_some(ExerciseData::Cardio { data })
            }
            ExerciseInput::Endurance { time, distance } => {
                let data = EnduranceData::new(reading(time), reading(distance));
                let empty = data.time <= 0.0 && data.distance <= 0.0;
                (!empty).then_some(ExerciseData::Endurance { data })
            }
            ExerciseInput::Stretch { completed } => {
                completed.then_some(ExerciseData::Stretch {
                    data: StretchData { completed: true },
                })
            }
        }
    }
}

/// Builds the session entry for one exercise, or `None` to leave it out.
pub fn build_entry(exercise: &Exercise, input: &ExerciseInput) -> Option<SessionExerciseEntry> {
    if input.exercise_type() != exercise.exercise_type {
        tracing::warn!(
            exercise_id = %exercise.id,
            expected = %exercise.exercise_type,
            got = %input.exercise_type(),
            "Input shape does not match exercise type, skipping"
        );
        return None;
    }
    input.to_data().map(|data| SessionExerciseEntry {
        exercise_id: exercise.id.clone(),
        exercise_name: exercise.name.clone(),
        data,
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Workout draft
// ─────────────────────────────────────────────────────────────────────────────

/// One exercise of a draft together with its raw input.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct DraftExercise {
    pub exercise: Exercise,
    pub input: ExerciseInput,
}

/// Working copy of an in-progress workout.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct WorkoutDraft {
    pub template_id: String,
    pub template_name: String,
    pub exercises: Vec<DraftExercise>,
}

impl WorkoutDraft {
    /// Draft with blank inputs for every exercise of the template.
    pub fn new(template: &WorkoutTemplate) -> Self {
        Self::prefilled(template, &LatestExerciseData::new())
    }

    /// Draft seeded with the last recorded values of each exercise.
    pub fn prefilled(template: &WorkoutTemplate, latest: &LatestExerciseData) -> Self {
        let exercises = template
            .exercises
            .iter()
            .map(|exercise| DraftExercise {
                input: ExerciseInput::prefilled(exercise.exercise_type, latest.get(&exercise.id)),
                exercise: exercise.clone(),
            })
            .collect();
        Self {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            exercises,
        }
    }

    pub fn input(&self, exercise_id: &str) -> Option<&ExerciseInput> {
        self.exercises
            .iter()
            .find(|d| d.exercise.id == exercise_id)
            .map(|d| &d.input)
    }

    fn input_mut(&mut self, exercise_id: &str) -> Option<&mut ExerciseInput> {
        self.exercises
            .iter_mut()
            .find(|d| d.exercise.id == exercise_id)
            .map(|d| &mut d.input)
    }

    /// Replaces an exercise's input. Rejected if the shape does not fit the exercise.
    pub fn set_input(&mut self, exercise_id: &str, input: ExerciseInput) -> bool {
        match self
            .exercises
            .iter_mut()
            .find(|d| d.exercise.id == exercise_id)
        {
            Some(slot) if slot.exercise.exercise_type == input.exercise_type() => {
                slot.input = input;
                true
            }
            _ => false,
        }
    }

    /// Appends a blank set to a strength exercise.
    pub fn add_set(&mut self, exercise_id: &str) -> bool {
        match self.input_mut(exercise_id) {
            Some(ExerciseInput::Strength { sets }) => {
                sets.push(StrengthSetInput::default());
                true
            }
            _ => false,
        }
    }

    /// Removes a set. The last remaining set cannot be removed.
    pub fn remove_set(&mut self, exercise_id: &str, index: usize) -> bool {
        match self.input_mut(exercise_id) {
            Some(ExerciseInput::Strength { sets }) if sets.len() > 1 && index < sets.len() => {
                sets.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn update_set(
        &mut self,
        exercise_id: &str,
        index: usize,
        field: SetField,
        value: impl Into<String>,
    ) -> bool {
        let Some(ExerciseInput::Strength { sets }) = self.input_mut(exercise_id) else {
            return false;
        };
        let Some(set) = sets.get_mut(index) else {
            return false;
        };
        match field {
            SetField::Weight => set.weight = value.into(),
            SetField::Reps => set.reps = value.into(),
        }
        true
    }

    /// Edits a cardio or endurance reading. Endurance has no level.
    pub fn update_reading(
        &mut self,
        exercise_id: &str,
        field: ReadingField,
        value: impl Into<String>,
    ) -> bool {
        let target = match (self.input_mut(exercise_id), field) {
            (Some(ExerciseInput::Cardio { time, .. }), ReadingField::Time)
            | (Some(ExerciseInput::Endurance { time, .. }), ReadingField::Time) => time,
            (Some(ExerciseInput::Cardio { level, .. }), ReadingField::Level) => level,
            (Some(ExerciseInput::Cardio { distance, .. }), ReadingField::Distance)
            | (Some(ExerciseInput::Endurance { distance, .. }), ReadingField::Distance) => {
                distance
            }
            _ => return false,
        };
        *target = value.into();
        true
    }

    pub fn toggle_stretch(&mut self, exercise_id: &str) -> bool {
        match self.input_mut(exercise_id) {
            Some(ExerciseInput::Stretch { completed }) => {
                *completed = !*completed;
                true
            }
            _ => false,
        }
    }

    /// Entries that would be saved right now, in template order.
    pub fn entries(&self) -> Vec<SessionExerciseEntry> {
        self.exercises
            .iter()
            .filter_map(|d| build_entry(&d.exercise, &d.input))
            .collect()
    }

    /// Produces the session record to persist.
    ///
    /// Fails with [`WorkoutError::EmptySession`] when no exercise has a value.
    pub fn finish(&self, id: String, now: DateTime<Utc>) -> Result<WorkoutSession> {
        let exercises = self.entries();
        if exercises.is_empty() {
            return Err(WorkoutError::EmptySession {
                template_id: self.template_id.clone(),
            });
        }
        Ok(WorkoutSession {
            id,
            template_id: self.template_id.clone(),
            template_name: self.template_name.clone(),
            date: format_date(now),
            exercises,
        })
    }
}

/// Timestamp format for stored records: RFC 3339, UTC, millisecond precision.
pub fn format_date(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Measurements
// ─────────────────────────────────────────────────────────────────────────────

/// Body measurement fields as typed. Blank fields are left out of the record.
#[derive(Debug, Clone, PartialEq, Default, uniffi::Record)]
pub struct MeasurementInput {
    pub weight: String,
    pub chest: String,
    pub waist: String,
    pub hips: String,
    pub upper_arm: String,
    pub forearm: String,
    pub thigh: String,
    pub calf: String,
}

impl MeasurementInput {
    /// Builds a measurement record; at least one field must hold a positive value.
    pub fn build(&self, id: String, now: DateTime<Utc>) -> Result<BodyMeasurement> {
        let value = |text: &str| parse_decimal(text).filter(|v| *v > 0.0);
        let measurement = BodyMeasurement {
            id,
            date: format_date(now),
            weight: value(&self.weight),
            chest: value(&self.chest),
            waist: value(&self.waist),
            hips: value(&self.hips),
            upper_arm: value(&self.upper_arm),
            forearm: value(&self.forearm),
            thigh: value(&self.thigh),
            calf: value(&self.calf),
        };
        if !measurement.has_values() {
            return Err(WorkoutError::EmptyMeasurement);
        }
        Ok(measurement)
    }
}
