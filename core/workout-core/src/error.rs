//! Error types for workout-core operations.
//! Keep WorkoutFfiError minimal and stable to avoid breaking FFI clients.

// ═══════════════════════════════════════════════════════════════════════════════
// FFI-Compatible Error (for Swift/Kotlin)
// ═══════════════════════════════════════════════════════════════════════════════

/// FFI-safe error type for use across language boundaries.
///
/// Carries only a message string so UniFFI can marshal it.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum WorkoutFfiError {
    #[error("{message}")]
    General { message: String },
}

impl From<String> for WorkoutFfiError {
    fn from(message: String) -> Self {
        WorkoutFfiError::General { message }
    }
}

impl From<&str> for WorkoutFfiError {
    fn from(message: &str) -> Self {
        WorkoutFfiError::General {
            message: message.to_string(),
        }
    }
}

impl From<WorkoutError> for WorkoutFfiError {
    fn from(err: WorkoutError) -> Self {
        WorkoutFfiError::General {
            message: err.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Internal Error (for Rust-only use)
// ═══════════════════════════════════════════════════════════════════════════════

/// All errors that can occur in workout-core operations.
///
/// `Io` and `Json` never escape the record store (it degrades to defaults).
/// `NotSaved` is how the engine reports a write the store gave up on.
/// Validation variants are what callers show to the user.
#[derive(Debug, thiserror::Error)]
pub enum WorkoutError {
    // ─────────────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not save {0}")]
    NotSaved(String),

    // ─────────────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Workout name must not be empty")]
    EmptyTemplateName,

    #[error("A workout needs at least one exercise")]
    NoExercises,

    #[error("No values entered for workout {template_id}")]
    EmptySession { template_id: String },

    #[error("A measurement needs at least one value")]
    EmptyMeasurement,

    #[error("Exercise name must not be empty")]
    EmptyExerciseName,

    // ─────────────────────────────────────────────────────────────────────
    // Lookup Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Workout not found: {0}")]
    TemplateNotFound(String),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),
}

impl WorkoutError {
    /// True for errors raised before any write, which are meant for the user.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            WorkoutError::Io { .. } | WorkoutError::Json { .. } | WorkoutError::NotSaved(_)
        )
    }
}

/// Convenience type alias for Results using WorkoutError.
pub type Result<T> = std::result::Result<T, WorkoutError>;
