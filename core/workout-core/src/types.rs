//! Domain records shared by every Workout Log client.
//!
//! The JSON shapes here are the on-disk format: camelCase field names and a
//! `type`/`data` pair on session entries whose `data` shape depends on the type.
//!
//! **FFI Support:** All types are annotated with UniFFI macros for Swift/Kotlin bindings.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Exercises
// ═══════════════════════════════════════════════════════════════════════════════

/// Closed set of exercise kinds. The kind fixes the shape of all recorded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Endurance,
    Stretch,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Strength,
        ExerciseType::Cardio,
        ExerciseType::Endurance,
        ExerciseType::Stretch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Strength => "strength",
            ExerciseType::Cardio => "cardio",
            ExerciseType::Endurance => "endurance",
            ExerciseType::Stretch => "stretch",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExerciseType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown exercise type: {}", s))
    }
}

/// An exercise definition. Templates embed copies of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
}

impl Exercise {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        exercise_type: ExerciseType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            exercise_type,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Templates
// ═══════════════════════════════════════════════════════════════════════════════

/// A named, ordered list of exercises. Order is the order they are performed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct WorkoutTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Performance Data
// ═══════════════════════════════════════════════════════════════════════════════

/// One strength set: weight in kg, repetitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct StrengthSet {
    pub weight: f64,
    pub reps: u32,
}

/// Reads a reading that may be stored as `null`. JSON has no infinity or NaN,
/// so writers emit `null` for them; it reads back as zero.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Cardio machine reading: minutes, machine level, kilometres.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, uniffi::Record)]
pub struct CardioData {
    #[serde(deserialize_with = "null_as_zero")]
    pub time: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub level: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub distance: f64,
}

/// Endurance reading: minutes, kilometres and derived pace in min/km.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, uniffi::Record)]
pub struct EnduranceData {
    #[serde(deserialize_with = "null_as_zero")]
    pub time: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub distance: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub pace: f64,
}

impl EnduranceData {
    /// Builds a reading with `pace` derived from time and distance.
    pub fn new(time: f64, distance: f64) -> Self {
        Self {
            time,
            distance,
            pace: pace(time, distance),
        }
    }
}

/// Minutes per kilometre; zero when no distance was covered or the ratio
/// is not a finite number.
pub fn pace(time: f64, distance: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }
    let pace = time / distance;
    if pace.is_finite() {
        pace
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, uniffi::Record)]
pub struct StretchData {
    pub completed: bool,
}

/// Recorded performance for one exercise, one variant per [`ExerciseType`].
#[derive(Debug, Clone, PartialEq, uniffi::Enum)]
pub enum ExerciseData {
    Strength { sets: Vec<StrengthSet> },
    Cardio { data: CardioData },
    Endurance { data: EnduranceData },
    Stretch { data: StretchData },
}

impl ExerciseData {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseData::Strength { .. } => ExerciseType::Strength,
            ExerciseData::Cardio { .. } => ExerciseType::Cardio,
            ExerciseData::Endurance { .. } => ExerciseType::Endurance,
            ExerciseData::Stretch { .. } => ExerciseType::Stretch,
        }
    }

    /// Decodes the `data` payload stored next to a `type` tag.
    ///
    /// Endurance pace is recomputed rather than trusted.
    pub fn from_json(
        exercise_type: ExerciseType,
        value: serde_json::Value,
    ) -> serde_json::Result<Self> {
        Ok(match exercise_type {
            ExerciseType::Strength => ExerciseData::Strength {
                sets: serde_json::from_value(value)?,
            },
            ExerciseType::Cardio => ExerciseData::Cardio {
                data: serde_json::from_value(value)?,
            },
            ExerciseType::Endurance => {
                let stored: EnduranceData = serde_json::from_value(value)?;
                ExerciseData::Endurance {
                    data: EnduranceData::new(stored.time, stored.distance),
                }
            }
            ExerciseType::Stretch => ExerciseData::Stretch {
                data: serde_json::from_value(value)?,
            },
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sessions
// ═══════════════════════════════════════════════════════════════════════════════

/// One exercise's result inside a session.
///
/// On disk: `{"exerciseId", "exerciseName", "type", "data"}`. The `type` is
/// written from the data variant, so the two cannot disagree.
#[derive(Debug, Clone, PartialEq, Deserialize, uniffi::Record)]
#[serde(try_from = "EntryWire")]
pub struct SessionExerciseEntry {
    pub exercise_id: String,
    pub exercise_name: String,
    pub data: ExerciseData,
}

impl SessionExerciseEntry {
    pub fn exercise_type(&self) -> ExerciseType {
        self.data.exercise_type()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryWire {
    exercise_id: String,
    #[serde(default)]
    exercise_name: String,
    #[serde(rename = "type")]
    exercise_type: ExerciseType,
    data: serde_json::Value,
}

impl TryFrom<EntryWire> for SessionExerciseEntry {
    type Error = serde_json::Error;

    fn try_from(wire: EntryWire) -> Result<Self, Self::Error> {
        Ok(Self {
            data: ExerciseData::from_json(wire.exercise_type, wire.data)?,
            exercise_id: wire.exercise_id,
            exercise_name: wire.exercise_name,
        })
    }
}

impl Serialize for SessionExerciseEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionExerciseEntry", 4)?;
        state.serialize_field("exerciseId", &self.exercise_id)?;
        state.serialize_field("exerciseName", &self.exercise_name)?;
        state.serialize_field("type", &self.exercise_type())?;
        match &self.data {
            ExerciseData::Strength { sets } => state.serialize_field("data", sets)?,
            ExerciseData::Cardio { data } => state.serialize_field("data", data)?,
            ExerciseData::Endurance { data } => state.serialize_field("data", data)?,
            ExerciseData::Stretch { data } => state.serialize_field("data", data)?,
        }
        state.end()
    }
}

/// A completed, dated workout. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub template_id: String,
    /// Template name at the time the session was logged.
    pub template_name: String,
    /// RFC 3339 timestamp.
    pub date: String,
    #[serde(default)]
    pub exercises: Vec<SessionExerciseEntry>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Body Measurements
// ═══════════════════════════════════════════════════════════════════════════════

/// Field names in export order, matching [`BodyMeasurement::values`].
pub const MEASUREMENT_FIELDS: [&str; 8] = [
    "weight", "upper_arm", "forearm", "thigh", "calf", "chest", "waist", "hips",
];

/// A dated set of body measurements (weight in kg, circumferences in cm).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    pub id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hips: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_arm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forearm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thigh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calf: Option<f64>,
}

impl BodyMeasurement {
    pub fn values(&self) -> [Option<f64>; 8] {
        [
            self.weight,
            self.upper_arm,
            self.forearm,
            self.thigh,
            self.calf,
            self.chest,
            self.waist,
            self.hips,
        ]
    }

    pub fn has_values(&self) -> bool {
        self.values().iter().any(Option::is_some)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Pending Exercise Selection
// ═══════════════════════════════════════════════════════════════════════════════

/// Which template flow asked for an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Create,
    Edit,
}

/// Single-slot handoff from the exercise picker back to a template editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PendingExerciseSelection {
    pub mode: SelectionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    pub exercise: Exercise,
}

impl PendingExerciseSelection {
    /// Create-mode selections match any template; edit-mode ones only their own.
    pub fn matches(&self, mode: SelectionMode, template_id: Option<&str>) -> bool {
        match (self.mode, mode) {
            (SelectionMode::Create, SelectionMode::Create) => true,
            (SelectionMode::Edit, SelectionMode::Edit) => {
                self.template_id.as_deref() == template_id
            }
            _ => false,
        }
    }
}
