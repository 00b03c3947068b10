//! # workout-core
//!
//! Persistence and domain layer for Workout Log, shared by every client
//! (the `workout-log` CLI, Swift/Kotlin apps over UniFFI).
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Clients can wrap with async if needed.
//! - **Not thread-safe**: No locking around read-modify-write; the last save wins.
//! - **Graceful degradation**: Missing or corrupt data loads as empty/default values.
//! - **No blind overwrites**: A mutation on a corrupt collection fails and leaves the file alone.
//! - **Validate before writing**: Rejected input never reaches storage.
//! - **FFI-ready**: UniFFI annotations enable Swift and Kotlin bindings.
//!
//! ## Layers
//!
//! - [`kv`]: string key-value backends (files, memory)
//! - [`store`]: typed collections and preferences on top of a backend
//! - [`history`]: newest-first ordering and last-performed lookups
//! - [`builder`]: raw workout input → validated session records
//! - [`engine`]: the operations clients call
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use workout_core::WorkoutEngine;
//!
//! let engine = WorkoutEngine::new();
//! let recent = engine.recent_sessions();
//! ```

// UniFFI scaffolding for Swift/Kotlin bindings
uniffi::setup_scaffolding!();

pub mod builder;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod history;
pub mod kv;
pub mod storage;
pub mod store;
pub mod types;

pub use builder::{
    DraftExercise, ExerciseInput, MeasurementInput, ReadingField, SetField, StrengthSetInput,
    WorkoutDraft,
};
pub use engine::{WorkoutEngine, Workouts};
pub use error::{Result, WorkoutError, WorkoutFfiError};
pub use history::LatestExerciseData;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use storage::{StorageConfig, StoreKey};
pub use store::RecordStore;
pub use types::*;
