//! Typed record store over a [`KeyValueStore`].
//!
//! Each collection (templates, sessions, measurements, exercises) is one JSON
//! array under its own key, always written as a whole snapshot. Mutations are
//! read-modify-write: load everything, change it, save everything.
//!
//! # Failure Handling
//!
//! Reads never fail:
//! - Missing key → empty collection / default preference
//! - Corrupt JSON → empty collection / default preference, logged at warn
//!
//! Writes report instead of failing:
//! - Failed write → `false`, logged at warn; previous snapshot stays intact
//! - Mutations load through [`RecordStore::load_for_update`], which errors on
//!   a value that exists but does not parse. The unreadable file is left as is
//!   rather than replaced by a snapshot built from an empty list.
//!
//! There is no locking. Two flows that load, modify and save the same
//! collection overlap as last-write-wins.

use crate::error::{Result, WorkoutError};
use crate::kv::KeyValueStore;
use crate::storage::StoreKey;
use crate::types::{
    BodyMeasurement, Exercise, PendingExerciseSelection, SelectionMode, WorkoutSession,
    WorkoutTemplate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Dashboard shows this many recent sessions unless the user changed it.
pub const DEFAULT_DASHBOARD_SESSION_LIMIT: u32 = 5;
pub const DASHBOARD_LIMIT_MIN: u32 = 1;
pub const DASHBOARD_LIMIT_MAX: u32 = 10;

/// A record kept in one of the four persisted collections.
pub trait Record: Serialize + DeserializeOwned {
    const KEY: StoreKey;

    fn id(&self) -> &str;
}

impl Record for WorkoutTemplate {
    const KEY: StoreKey = StoreKey::Templates;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for WorkoutSession {
    const KEY: StoreKey = StoreKey::Sessions;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for BodyMeasurement {
    const KEY: StoreKey = StoreKey::Measurements;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Exercise {
    const KEY: StoreKey = StoreKey::Exercises;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Clamps a dashboard limit into `[DASHBOARD_LIMIT_MIN, DASHBOARD_LIMIT_MAX]`.
pub fn clamp_dashboard_limit(limit: i64) -> u32 {
    limit.clamp(DASHBOARD_LIMIT_MIN as i64, DASHBOARD_LIMIT_MAX as i64) as u32
}

/// Interprets a stored dashboard limit. Anything but a positive number is the default.
fn dashboard_limit_from_json(value: &Value) -> u32 {
    match value.as_f64() {
        Some(n) if n.is_finite() && n > 0.0 => clamp_dashboard_limit(n.floor() as i64),
        _ => DEFAULT_DASHBOARD_SESSION_LIMIT,
    }
}

/// Durable storage for every record collection and preference.
pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Collections
    // ─────────────────────────────────────────────────────────────────────────

    /// Loads a whole collection. Absent or unreadable data yields an empty list.
    pub fn load<R: Record>(&self) -> Vec<R> {
        self.read_json(R::KEY).unwrap_or_default()
    }

    /// Overwrites a whole collection. Returns whether the snapshot was persisted.
    pub fn save<R: Record>(&self, items: &[R]) -> bool {
        self.write_json(R::KEY, items)
    }

    /// Loads a collection that is about to be rewritten.
    ///
    /// Absent data is an empty list. Data that is present but unreadable is
    /// `NotSaved`, so the caller never overwrites what it could not parse.
    pub fn load_for_update<R: Record>(&self) -> Result<Vec<R>> {
        let key = R::KEY;
        match self.try_read_json(key) {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(err) => {
                tracing::warn!(
                    key = %key,
                    error = %err,
                    "Stored collection is unreadable, refusing to overwrite it"
                );
                Err(WorkoutError::NotSaved(key.to_string()))
            }
        }
    }

    /// Loads, appends one record, saves. An unreadable collection is left
    /// untouched and reported as `false`.
    pub fn append<R: Record>(&self, item: R) -> bool {
        let Ok(mut items) = self.load_for_update::<R>() else {
            return false;
        };
        items.push(item);
        self.save(&items)
    }

    pub fn templates(&self) -> Vec<WorkoutTemplate> {
        self.load()
    }

    pub fn save_templates(&self, templates: &[WorkoutTemplate]) -> bool {
        self.save(templates)
    }

    pub fn sessions(&self) -> Vec<WorkoutSession> {
        self.load()
    }

    pub fn save_sessions(&self, sessions: &[WorkoutSession]) -> bool {
        self.save(sessions)
    }

    pub fn measurements(&self) -> Vec<BodyMeasurement> {
        self.load()
    }

    pub fn save_measurements(&self, measurements: &[BodyMeasurement]) -> bool {
        self.save(measurements)
    }

    pub fn exercises(&self) -> Vec<Exercise> {
        self.load()
    }

    pub fn save_exercises(&self, exercises: &[Exercise]) -> bool {
        self.save(exercises)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn dark_mode(&self) -> bool {
        self.read_json(StoreKey::DarkMode).unwrap_or(false)
    }

    pub fn save_dark_mode(&self, enabled: bool) -> bool {
        self.write_json(StoreKey::DarkMode, &enabled)
    }

    /// Stored dashboard limit, re-validated on every read.
    pub fn dashboard_limit(&self) -> u32 {
        self.read_json::<Value>(StoreKey::DashboardSessionLimit)
            .map(|value| dashboard_limit_from_json(&value))
            .unwrap_or(DEFAULT_DASHBOARD_SESSION_LIMIT)
    }

    /// Saves a dashboard limit after clamping it into range.
    pub fn save_dashboard_limit(&self, limit: u32) -> bool {
        let limit = clamp_dashboard_limit(limit as i64);
        self.write_json(StoreKey::DashboardSessionLimit, &limit)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pending Exercise Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces whatever selection is waiting. Last write wins.
    pub fn put_pending_selection(&self, selection: &PendingExerciseSelection) -> bool {
        self.write_json(StoreKey::PendingExerciseSelection, selection)
    }

    /// Claims the waiting selection if it was meant for this flow.
    ///
    /// A match empties the slot, so each selection is delivered once. A
    /// mismatch leaves the slot for the flow it belongs to.
    pub fn take_pending_selection(
        &self,
        mode: SelectionMode,
        template_id: Option<&str>,
    ) -> Option<Exercise> {
        let selection: PendingExerciseSelection =
            self.read_json(StoreKey::PendingExerciseSelection)?;

        if !selection.matches(mode, template_id) {
            tracing::debug!(
                requested_mode = ?mode,
                pending_mode = ?selection.mode,
                "Pending exercise selection belongs to another flow"
            );
            return None;
        }

        let key = StoreKey::PendingExerciseSelection;
        if let Err(err) = self.backend.remove(key.as_str()) {
            tracing::warn!(key = %key, error = %err, "Failed to clear pending exercise selection");
        }
        Some(selection.exercise)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JSON plumbing
    // ─────────────────────────────────────────────────────────────────────────

    fn read_json<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        match self.try_read_json(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(
                    key = %key,
                    error = %err,
                    "Failed to load stored value, using default"
                );
                None
            }
        }
    }

    fn try_read_json<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>> {
        let Some(content) = self.backend.get(key.as_str())? else {
            return Ok(None);
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| WorkoutError::Json {
                context: format!("parsing {}", key),
                source: e,
            })
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> bool {
        match self.try_write_json(key, value) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to persist value");
                false
            }
        }
    }

    fn try_write_json<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let content = serde_json::to_string(value).map_err(|e| WorkoutError::Json {
            context: format!("serializing {}", key),
            source: e,
        })?;
        self.backend.set(key.as_str(), &content)
    }
}
