//! Storage configuration and key management for Workout Log.
//!
//! `StorageConfig` owns every path decision. Each persisted value lives under a
//! [`StoreKey`] and the file backend maps a key to `<root>/<key>.json`.
//!
//! - Production code uses `StorageConfig::default()` (`~/.workout-log/`)
//! - `StorageConfig::from_env()` honours `WORKOUT_LOG_HOME`
//! - Tests use `StorageConfig::with_root(temp_dir)` for isolation

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the data root.
pub const DATA_HOME_ENV: &str = "WORKOUT_LOG_HOME";

/// Directory name used under the home directory.
pub const DEFAULT_DIR_NAME: &str = ".workout-log";

/// Every key the record store reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Templates,
    Sessions,
    Measurements,
    Exercises,
    DarkMode,
    DashboardSessionLimit,
    PendingExerciseSelection,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Templates => "workout_templates",
            StoreKey::Sessions => "workout_sessions",
            StoreKey::Measurements => "body_measurements",
            StoreKey::Exercises => "exercises",
            StoreKey::DarkMode => "dark_mode",
            StoreKey::DashboardSessionLimit => "dashboard_session_limit",
            StoreKey::PendingExerciseSelection => "pending_exercise_selection",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Central configuration for all Workout Log storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for all data (default: ~/.workout-log)
    root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: home.join(DEFAULT_DIR_NAME),
        }
    }
}

impl StorageConfig {
    /// Creates a StorageConfig with a custom root directory.
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Uses `WORKOUT_LOG_HOME` when set and non-empty, otherwise the default root.
    pub fn from_env() -> Self {
        match std::env::var(DATA_HOME_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::with_root(PathBuf::from(value)),
            _ => Self::default(),
        }
    }

    /// Returns the root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the JSON file backing a key.
    pub fn key_file(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Path of the JSON file backing a well-known store key.
    pub fn store_file(&self, key: StoreKey) -> PathBuf {
        self.key_file(key.as_str())
    }

    /// Ensures the root directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs_err::create_dir_all(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_default_root_is_workout_log() {
        let config = StorageConfig::default();
        assert!(config.root().ends_with(DEFAULT_DIR_NAME));
    }

    #[test]
    fn test_with_root_sets_custom_path() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/test-workouts"));
        assert_eq!(config.root(), Path::new("/tmp/test-workouts"));
    }

    #[test]
    fn test_store_file_paths() {
        let config = StorageConfig::with_root(PathBuf::from("/tmp/workouts"));
        assert_eq!(
            config.store_file(StoreKey::Sessions),
            PathBuf::from("/tmp/workouts/workout_sessions.json")
        );
        assert_eq!(
            config.store_file(StoreKey::DashboardSessionLimit),
            PathBuf::from("/tmp/workouts/dashboard_session_limit.json")
        );
    }

    #[test]
    fn test_store_keys_are_unique() {
        let keys = [
            StoreKey::Templates,
            StoreKey::Sessions,
            StoreKey::Measurements,
            StoreKey::Exercises,
            StoreKey::DarkMode,
            StoreKey::DashboardSessionLimit,
            StoreKey::PendingExerciseSelection,
        ];
        let names: HashSet<_> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), keys.len());
    }

    #[test]
    fn test_ensure_dirs_creates_nested_root() {
        let temp = TempDir::new().unwrap();
        let config = StorageConfig::with_root(temp.path().join("a").join("b"));

        config.ensure_dirs().unwrap();

        assert!(config.root().is_dir());
    }
}
