//! WorkoutEngine - the entry point for workout-log clients.
//!
//! All operations follow the same shape: load the affected collection,
//! validate, mutate, save the whole snapshot. Validation runs before anything
//! is written, so a rejected call leaves storage untouched.
//!
//! [`Workouts`] holds the logic over any [`KeyValueStore`] and is what Rust
//! callers and tests use. [`WorkoutEngine`] pins it to the file backend and is
//! the object exported over UniFFI.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use workout_core::WorkoutEngine;
//!
//! let engine = WorkoutEngine::new();
//! let templates = engine.templates();
//! let draft = engine.start_workout(templates[0].id.clone())?;
//! ```

use crate::builder::{MeasurementInput, WorkoutDraft};
use crate::catalog::{default_exercises, filter_exercises};
use crate::error::{Result, WorkoutError, WorkoutFfiError};
use crate::history::{self, resolve_latest};
use crate::kv::{FileStore, KeyValueStore};
use crate::storage::{StorageConfig, StoreKey};
use crate::store::{clamp_dashboard_limit, Record, RecordStore};
use crate::types::{
    BodyMeasurement, Exercise, ExerciseType, PendingExerciseSelection, SelectionMode,
    WorkoutSession, WorkoutTemplate,
};
use chrono::Utc;
use std::collections::HashSet;
use ulid::Ulid;

fn new_id() -> String {
    Ulid::new().to_string()
}

fn saved(ok: bool, key: StoreKey) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(WorkoutError::NotSaved(key.to_string()))
    }
}

/// Trims the name and drops repeated exercises, keeping first occurrences.
fn validate_template(name: &str, exercises: Vec<Exercise>) -> Result<(String, Vec<Exercise>)> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkoutError::EmptyTemplateName);
    }
    let mut seen = HashSet::new();
    let exercises: Vec<Exercise> = exercises
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .collect();
    if exercises.is_empty() {
        return Err(WorkoutError::NoExercises);
    }
    Ok((name.to_string(), exercises))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Backend-generic operations
// ═══════════════════════════════════════════════════════════════════════════════

/// Workout operations over an arbitrary key-value backend.
pub struct Workouts<S> {
    store: RecordStore<S>,
}

impl<S: KeyValueStore> Workouts<S> {
    pub fn new(backend: S) -> Self {
        Self {
            store: RecordStore::new(backend),
        }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exercises
    // ─────────────────────────────────────────────────────────────────────────

    /// The exercise catalog. An empty catalog is seeded with the defaults.
    ///
    /// An unreadable catalog shows the defaults without overwriting the file.
    pub fn exercises(&self) -> Vec<Exercise> {
        match self.store.load_for_update::<Exercise>() {
            Ok(stored) if !stored.is_empty() => stored,
            Ok(_) => {
                let defaults = default_exercises();
                if self.store.save_exercises(&defaults) {
                    tracing::info!(count = defaults.len(), "Seeded default exercise catalog");
                }
                defaults
            }
            Err(_) => default_exercises(),
        }
    }

    pub fn search_exercises(&self, query: &str) -> Vec<Exercise> {
        filter_exercises(&self.exercises(), query)
    }

    pub fn exercise(&self, id: &str) -> Result<Exercise> {
        self.exercises()
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| WorkoutError::ExerciseNotFound(id.to_string()))
    }

    /// Adds a user-defined exercise to the catalog.
    pub fn create_exercise(&self, name: &str, exercise_type: ExerciseType) -> Result<Exercise> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkoutError::EmptyExerciseName);
        }
        let mut exercises = self.store.load_for_update::<Exercise>()?;
        if exercises.is_empty() {
            exercises = default_exercises();
        }
        let exercise = Exercise::new(new_id(), name, exercise_type);
        exercises.push(exercise.clone());
        saved(self.store.save_exercises(&exercises), StoreKey::Exercises)?;
        tracing::debug!(id = %exercise.id, name = %exercise.name, "Created exercise");
        Ok(exercise)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Templates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn templates(&self) -> Vec<WorkoutTemplate> {
        self.store.templates()
    }

    pub fn template(&self, id: &str) -> Result<WorkoutTemplate> {
        self.templates()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| WorkoutError::TemplateNotFound(id.to_string()))
    }

    pub fn create_template(&self, name: &str, exercises: Vec<Exercise>) -> Result<WorkoutTemplate> {
        let (name, exercises) = validate_template(name, exercises)?;
        let template = WorkoutTemplate {
            id: new_id(),
            name,
            exercises,
        };
        saved(self.store.append(template.clone()), StoreKey::Templates)?;
        Ok(template)
    }

    /// Replaces name and exercises of an existing template. Past sessions keep
    /// the name they were logged under.
    pub fn update_template(
        &self,
        id: &str,
        name: &str,
        exercises: Vec<Exercise>,
    ) -> Result<WorkoutTemplate> {
        let (name, exercises) = validate_template(name, exercises)?;
        let mut templates = self.store.load_for_update::<WorkoutTemplate>()?;
        let template = templates
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| WorkoutError::TemplateNotFound(id.to_string()))?;
        template.name = name;
        template.exercises = exercises;
        let updated = template.clone();
        saved(self.store.save_templates(&templates), StoreKey::Templates)?;
        Ok(updated)
    }

    /// Deletes a template. Sessions logged from it stay in history.
    ///
    /// Returns `Ok(false)` when no template had that id.
    pub fn delete_template(&self, id: &str) -> Result<bool> {
        self.delete::<WorkoutTemplate>(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sessions(&self) -> Vec<WorkoutSession> {
        self.store.sessions()
    }

    /// Opens a draft for a template, pre-filled from each exercise's last session.
    pub fn start_workout(&self, template_id: &str) -> Result<WorkoutDraft> {
        let template = self.template(template_id)?;
        let latest = resolve_latest(&self.sessions());
        Ok(WorkoutDraft::prefilled(&template, &latest))
    }

    /// Validates a draft and appends the resulting session to history.
    pub fn finish_workout(&self, draft: &WorkoutDraft) -> Result<WorkoutSession> {
        let session = draft.finish(new_id(), Utc::now())?;
        saved(self.store.append(session.clone()), StoreKey::Sessions)?;
        tracing::debug!(
            id = %session.id,
            template_id = %session.template_id,
            exercises = session.exercises.len(),
            "Logged workout"
        );
        Ok(session)
    }

    /// Newest sessions, as many as the dashboard limit allows.
    pub fn recent_sessions(&self) -> Vec<WorkoutSession> {
        let limit = self.store.dashboard_limit() as usize;
        history::recent_sessions(&self.sessions(), limit)
    }

    pub fn last_performed(&self, template_id: &str) -> Option<String> {
        history::last_performed(&self.sessions(), template_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Measurements
    // ─────────────────────────────────────────────────────────────────────────

    /// Measurements, newest first.
    pub fn measurements(&self) -> Vec<BodyMeasurement> {
        history::measurements_newest_first(&self.store.measurements())
    }

    pub fn add_measurement(&self, input: &MeasurementInput) -> Result<BodyMeasurement> {
        let measurement = input.build(new_id(), Utc::now())?;
        saved(self.store.append(measurement.clone()), StoreKey::Measurements)?;
        Ok(measurement)
    }

    pub fn delete_measurement(&self, id: &str) -> Result<bool> {
        self.delete::<BodyMeasurement>(id)
    }

    pub fn latest_measurement(&self) -> Option<BodyMeasurement> {
        history::latest_measurement(&self.store.measurements())
    }

    fn delete<R: Record>(&self, id: &str) -> Result<bool> {
        let mut items = self.store.load_for_update::<R>()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        saved(self.store.save(&items), R::KEY)?;
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn dark_mode(&self) -> bool {
        self.store.dark_mode()
    }

    pub fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        saved(self.store.save_dark_mode(enabled), StoreKey::DarkMode)
    }

    pub fn dashboard_limit(&self) -> u32 {
        self.store.dashboard_limit()
    }

    /// Stores a new limit, clamped into range. Returns the stored value.
    pub fn set_dashboard_limit(&self, limit: u32) -> Result<u32> {
        let limit = clamp_dashboard_limit(i64::from(limit));
        saved(
            self.store.save_dashboard_limit(limit),
            StoreKey::DashboardSessionLimit,
        )?;
        Ok(limit)
    }

    /// Steps the limit by `delta`. Nothing is written if clamping leaves it unchanged.
    pub fn adjust_dashboard_limit(&self, delta: i32) -> Result<u32> {
        let current = self.store.dashboard_limit();
        let next = clamp_dashboard_limit(i64::from(current) + i64::from(delta));
        if next == current {
            return Ok(current);
        }
        self.set_dashboard_limit(next)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pending Exercise Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn put_pending_selection(&self, selection: &PendingExerciseSelection) -> Result<()> {
        saved(
            self.store.put_pending_selection(selection),
            StoreKey::PendingExerciseSelection,
        )
    }

    pub fn take_pending_selection(
        &self,
        mode: SelectionMode,
        template_id: Option<&str>,
    ) -> Option<Exercise> {
        self.store.take_pending_selection(mode, template_id)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FFI Object
// ═══════════════════════════════════════════════════════════════════════════════

/// The main engine for workout-log operations, backed by JSON files.
///
/// This is the primary FFI interface for Swift/Kotlin clients.
#[derive(uniffi::Object)]
pub struct WorkoutEngine {
    storage: StorageConfig,
    workouts: Workouts<FileStore>,
}

impl WorkoutEngine {
    /// Creates an engine over a custom data root.
    ///
    /// Used for tests and the CLI's `--data-dir`. Not exposed to FFI.
    pub fn with_storage(storage: StorageConfig) -> Self {
        Self {
            workouts: Workouts::new(FileStore::new(storage.clone())),
            storage,
        }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Rust-side access to the generic operations (borrowed arguments).
    pub fn workouts(&self) -> &Workouts<FileStore> {
        &self.workouts
    }
}

#[uniffi::export]
impl WorkoutEngine {
    /// Creates an engine over `$WORKOUT_LOG_HOME`, or `~/.workout-log/` when unset.
    #[uniffi::constructor]
    pub fn new() -> Self {
        Self::with_storage(StorageConfig::from_env())
    }

    /// Path of the data directory as a string.
    pub fn data_dir(&self) -> String {
        self.storage.root().to_string_lossy().to_string()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Exercises API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn exercises(&self) -> Vec<Exercise> {
        self.workouts.exercises()
    }

    pub fn search_exercises(&self, query: String) -> Vec<Exercise> {
        self.workouts.search_exercises(&query)
    }

    pub fn create_exercise(
        &self,
        name: String,
        exercise_type: ExerciseType,
    ) -> std::result::Result<Exercise, WorkoutFfiError> {
        Ok(self.workouts.create_exercise(&name, exercise_type)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Templates API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn templates(&self) -> Vec<WorkoutTemplate> {
        self.workouts.templates()
    }

    pub fn template(&self, id: String) -> std::result::Result<WorkoutTemplate, WorkoutFfiError> {
        Ok(self.workouts.template(&id)?)
    }

    pub fn create_template(
        &self,
        name: String,
        exercises: Vec<Exercise>,
    ) -> std::result::Result<WorkoutTemplate, WorkoutFfiError> {
        Ok(self.workouts.create_template(&name, exercises)?)
    }

    pub fn update_template(
        &self,
        id: String,
        name: String,
        exercises: Vec<Exercise>,
    ) -> std::result::Result<WorkoutTemplate, WorkoutFfiError> {
        Ok(self.workouts.update_template(&id, &name, exercises)?)
    }

    pub fn delete_template(&self, id: String) -> std::result::Result<bool, WorkoutFfiError> {
        Ok(self.workouts.delete_template(&id)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Sessions API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn sessions(&self) -> Vec<WorkoutSession> {
        self.workouts.sessions()
    }

    pub fn start_workout(
        &self,
        template_id: String,
    ) -> std::result::Result<WorkoutDraft, WorkoutFfiError> {
        Ok(self.workouts.start_workout(&template_id)?)
    }

    pub fn finish_workout(
        &self,
        draft: WorkoutDraft,
    ) -> std::result::Result<WorkoutSession, WorkoutFfiError> {
        Ok(self.workouts.finish_workout(&draft)?)
    }

    pub fn recent_sessions(&self) -> Vec<WorkoutSession> {
        self.workouts.recent_sessions()
    }

    pub fn last_performed(&self, template_id: String) -> Option<String> {
        self.workouts.last_performed(&template_id)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Measurements API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn measurements(&self) -> Vec<BodyMeasurement> {
        self.workouts.measurements()
    }

    pub fn add_measurement(
        &self,
        input: MeasurementInput,
    ) -> std::result::Result<BodyMeasurement, WorkoutFfiError> {
        Ok(self.workouts.add_measurement(&input)?)
    }

    pub fn delete_measurement(&self, id: String) -> std::result::Result<bool, WorkoutFfiError> {
        Ok(self.workouts.delete_measurement(&id)?)
    }

    pub fn latest_measurement(&self) -> Option<BodyMeasurement> {
        self.workouts.latest_measurement()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Preferences API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn dark_mode(&self) -> bool {
        self.workouts.dark_mode()
    }

    pub fn set_dark_mode(&self, enabled: bool) -> std::result::Result<(), WorkoutFfiError> {
        Ok(self.workouts.set_dark_mode(enabled)?)
    }

    pub fn dashboard_limit(&self) -> u32 {
        self.workouts.dashboard_limit()
    }

    pub fn set_dashboard_limit(&self, limit: u32) -> std::result::Result<u32, WorkoutFfiError> {
        Ok(self.workouts.set_dashboard_limit(limit)?)
    }

    pub fn adjust_dashboard_limit(&self, delta: i32) -> std::result::Result<u32, WorkoutFfiError> {
        Ok(self.workouts.adjust_dashboard_limit(delta)?)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Exercise Picker Handoff
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn put_pending_selection(
        &self,
        selection: PendingExerciseSelection,
    ) -> std::result::Result<(), WorkoutFfiError> {
        Ok(self.workouts.put_pending_selection(&selection)?)
    }

    pub fn take_pending_selection(
        &self,
        mode: SelectionMode,
        template_id: Option<String>,
    ) -> Option<Exercise> {
        self.workouts
            .take_pending_selection(mode, template_id.as_deref())
    }
}

impl Default for WorkoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{ExerciseInput, SetField, StrengthSetInput};
    use crate::kv::MemoryStore;
    use crate::types::{ExerciseData, StrengthSet};
    use tempfile::TempDir;

    fn workouts() -> Workouts<MemoryStore> {
        Workouts::new(MemoryStore::new())
    }

    fn bench() -> Exercise {
        Exercise::new("1", "Bench Press", ExerciseType::Strength)
    }

    fn squat() -> Exercise {
        Exercise::new("2", "Squat", ExerciseType::Strength)
    }

    fn writes(w: &Workouts<MemoryStore>) -> usize {
        w.store().backend().write_count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Exercises
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn exercises_seed_once() {
        let w = workouts();
        assert_eq!(w.exercises().len(), 14);
        assert_eq!(writes(&w), 1);
        assert_eq!(w.exercises().len(), 14);
        assert_eq!(writes(&w), 1);
    }

    #[test]
    fn unreadable_catalog_is_never_reseeded() {
        let w = workouts();
        let key = StoreKey::Exercises.as_str();
        w.store().backend().set(key, "[{\"id\": \"99\",").unwrap();
        let before = writes(&w);

        assert_eq!(w.exercises().len(), 14);
        assert!(matches!(
            w.create_exercise("Hip Thrust", ExerciseType::Strength),
            Err(WorkoutError::NotSaved(_))
        ));
        assert_eq!(writes(&w), before);
        assert_eq!(w.store().backend().raw(key).as_deref(), Some("[{\"id\": \"99\","));
    }

    #[test]
    fn mutations_refuse_unreadable_collections() {
        let w = workouts();
        let template = w.create_template("Push", vec![bench()]).unwrap();
        let templates = StoreKey::Templates.as_str();
        w.store().backend().set(templates, "{oops").unwrap();
        w.store()
            .backend()
            .set(StoreKey::Measurements.as_str(), "{oops")
            .unwrap();

        assert!(matches!(
            w.update_template(&template.id, "Push Day", vec![bench()]),
            Err(WorkoutError::NotSaved(_))
        ));
        assert!(matches!(
            w.delete_template(&template.id),
            Err(WorkoutError::NotSaved(_))
        ));
        assert!(matches!(
            w.create_template("Pull", vec![squat()]),
            Err(WorkoutError::NotSaved(_))
        ));
        assert!(matches!(
            w.delete_measurement("m1"),
            Err(WorkoutError::NotSaved(_))
        ));
        assert_eq!(w.store().backend().raw(templates).as_deref(), Some("{oops"));
    }

    #[test]
    fn create_exercise_trims_and_appends() {
        let w = workouts();
        let created = w.create_exercise("  Hip Thrust ", ExerciseType::Strength).unwrap();
        assert_eq!(created.name, "Hip Thrust");
        assert_eq!(w.exercises().len(), 15);
        assert_eq!(w.exercise(&created.id).unwrap(), created);
        assert_eq!(w.search_exercises("thrust"), vec![created]);
    }

    #[test]
    fn blank_exercise_name_is_rejected() {
        let w = workouts();
        assert!(matches!(
            w.create_exercise("   ", ExerciseType::Cardio),
            Err(WorkoutError::EmptyExerciseName)
        ));
        assert_eq!(writes(&w), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Templates
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn template_validation_happens_before_writes() {
        let w = workouts();
        assert!(matches!(
            w.create_template(" ", vec![bench()]),
            Err(WorkoutError::EmptyTemplateName)
        ));
        assert!(matches!(
            w.create_template("Push", vec![]),
            Err(WorkoutError::NoExercises)
        ));
        assert_eq!(writes(&w), 0);
    }

    #[test]
    fn template_exercises_are_deduplicated() {
        let w = workouts();
        let template = w
            .create_template("Legs", vec![squat(), bench(), squat()])
            .unwrap();
        let ids: Vec<_> = template.exercises.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn update_and_delete_template() {
        let w = workouts();
        let template = w.create_template("Push", vec![bench()]).unwrap();

        let updated = w
            .update_template(&template.id, "Push Day", vec![bench(), squat()])
            .unwrap();
        assert_eq!(updated.name, "Push Day");
        assert_eq!(w.template(&template.id).unwrap(), updated);

        assert!(matches!(
            w.update_template("nope", "X", vec![bench()]),
            Err(WorkoutError::TemplateNotFound(_))
        ));

        assert!(w.delete_template(&template.id).unwrap());
        assert!(!w.delete_template(&template.id).unwrap());
        assert!(w.templates().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sessions
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_workout_is_rejected_without_writing() {
        let w = workouts();
        let template = w.create_template("Push", vec![bench()]).unwrap();
        let before = writes(&w);

        let draft = w.start_workout(&template.id).unwrap();
        let err = w.finish_workout(&draft).unwrap_err();

        assert!(matches!(err, WorkoutError::EmptySession { .. }));
        assert_eq!(writes(&w), before);
        assert!(w.sessions().is_empty());
    }

    #[test]
    fn finished_workout_prefills_the_next_one() {
        let w = workouts();
        let template = w.create_template("Push", vec![bench()]).unwrap();

        let mut draft = w.start_workout(&template.id).unwrap();
        draft.update_set("1", 0, SetField::Weight, "60");
        draft.update_set("1", 0, SetField::Reps, "8");
        let session = w.finish_workout(&draft).unwrap();

        assert_eq!(session.template_name, "Push");
        assert_eq!(w.sessions(), vec![session.clone()]);
        assert_eq!(w.last_performed(&template.id), Some(session.date.clone()));

        let next = w.start_workout(&template.id).unwrap();
        assert_eq!(
            next.input("1"),
            Some(&ExerciseInput::Strength {
                sets: vec![StrengthSetInput::new("60", "8")],
            })
        );
        assert_eq!(
            next.finish("x".into(), Utc::now()).unwrap().exercises[0].data,
            ExerciseData::Strength {
                sets: vec![StrengthSet {
                    weight: 60.0,
                    reps: 8,
                }],
            }
        );
    }

    #[test]
    fn start_workout_for_unknown_template() {
        assert!(matches!(
            workouts().start_workout("ghost"),
            Err(WorkoutError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn recent_sessions_follow_dashboard_limit() {
        let w = workouts();
        let template = w.create_template("Push", vec![bench()]).unwrap();
        for _ in 0..4 {
            let mut draft = w.start_workout(&template.id).unwrap();
            draft.update_set("1", 0, SetField::Weight, "50");
            draft.update_set("1", 0, SetField::Reps, "5");
            w.finish_workout(&draft).unwrap();
        }
        w.set_dashboard_limit(2).unwrap();
        assert_eq!(w.recent_sessions().len(), 2);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Measurements
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn measurements_add_and_delete() {
        let w = workouts();
        assert!(matches!(
            w.add_measurement(&MeasurementInput::default()),
            Err(WorkoutError::EmptyMeasurement)
        ));
        assert_eq!(writes(&w), 0);

        let added = w
            .add_measurement(&MeasurementInput {
                weight: "80".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(w.latest_measurement(), Some(added.clone()));
        assert_eq!(w.measurements().len(), 1);

        assert!(w.delete_measurement(&added.id).unwrap());
        assert!(!w.delete_measurement(&added.id).unwrap());
        assert_eq!(w.latest_measurement(), None);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn adjust_dashboard_limit_clamps_and_skips_noop_writes() {
        let w = workouts();
        assert_eq!(w.adjust_dashboard_limit(1).unwrap(), 6);
        assert_eq!(w.adjust_dashboard_limit(20).unwrap(), 10);

        let before = writes(&w);
        assert_eq!(w.adjust_dashboard_limit(1).unwrap(), 10);
        assert_eq!(writes(&w), before);

        assert_eq!(w.adjust_dashboard_limit(-50).unwrap(), 1);
        assert_eq!(w.dashboard_limit(), 1);
    }

    #[test]
    fn dark_mode_round_trip() {
        let w = workouts();
        assert!(!w.dark_mode());
        w.set_dark_mode(true).unwrap();
        assert!(w.dark_mode());
    }

    #[test]
    fn pending_selection_round_trip() {
        let w = workouts();
        w.put_pending_selection(&PendingExerciseSelection {
            mode: SelectionMode::Edit,
            template_id: Some("t1".into()),
            exercise: squat(),
        })
        .unwrap();
        assert_eq!(w.take_pending_selection(SelectionMode::Edit, Some("t2")), None);
        assert_eq!(
            w.take_pending_selection(SelectionMode::Edit, Some("t1")),
            Some(squat())
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // FFI Object
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn engine_persists_to_its_data_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("workouts");
        let engine = WorkoutEngine::with_storage(StorageConfig::with_root(root.clone()));

        let created = engine
            .create_template("Push".into(), vec![bench()])
            .unwrap();
        assert!(root.join("workout_templates.json").exists());
        assert_eq!(engine.data_dir(), root.to_string_lossy());

        let reopened = WorkoutEngine::with_storage(StorageConfig::with_root(root));
        assert_eq!(reopened.templates(), vec![created]);
    }

    #[test]
    fn engine_maps_errors_to_ffi() {
        let temp = TempDir::new().unwrap();
        let engine = WorkoutEngine::with_storage(StorageConfig::with_root(temp.path().into()));
        let err = engine.create_template("".into(), vec![bench()]).unwrap_err();
        assert_eq!(err.to_string(), "Workout name must not be empty");
    }
}
