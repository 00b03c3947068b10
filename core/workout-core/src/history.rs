//! History lookups over stored sessions and measurements.
//!
//! Everything here is a pure function of the loaded collections. Ordering is by
//! the record's `date`, newest first, with a stable sort so records sharing a
//! timestamp keep their stored order. A date that does not parse as RFC 3339
//! sorts as the oldest possible instant.

use crate::types::{BodyMeasurement, ExerciseData, WorkoutSession};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Most recent recorded data per exercise id.
pub type LatestExerciseData = HashMap<String, ExerciseData>;

/// Parses a stored RFC 3339 timestamp.
pub fn parse_date(date: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn sort_key(date: &str) -> DateTime<Utc> {
    parse_date(date).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn newest_first<'a, T>(items: &'a [T], date: impl Fn(&T) -> &str) -> Vec<&'a T> {
    let mut keyed: Vec<_> = items.iter().map(|item| (sort_key(date(item)), item)).collect();
    keyed.sort_by_key(|(when, _)| Reverse(*when));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Sessions ordered newest first.
pub fn sessions_newest_first(sessions: &[WorkoutSession]) -> Vec<&WorkoutSession> {
    newest_first(sessions, |s| s.date.as_str())
}

/// Resolves the last recorded data for every exercise that appears in history.
///
/// Sessions are scanned newest first and the first entry seen for an exercise
/// id wins. Exercises never performed have no entry; callers fall back to
/// empty defaults.
pub fn resolve_latest(sessions: &[WorkoutSession]) -> LatestExerciseData {
    let mut latest = LatestExerciseData::new();
    for session in sessions_newest_first(sessions) {
        for entry in &session.exercises {
            latest
                .entry(entry.exercise_id.clone())
                .or_insert_with(|| entry.data.clone());
        }
    }
    latest
}

/// Date of the newest session logged for a template.
pub fn last_performed(sessions: &[WorkoutSession], template_id: &str) -> Option<String> {
    sessions_newest_first(sessions)
        .into_iter()
        .find(|s| s.template_id == template_id)
        .map(|s| s.date.clone())
}

/// The `limit` newest sessions, newest first.
pub fn recent_sessions(sessions: &[WorkoutSession], limit: usize) -> Vec<WorkoutSession> {
    sessions_newest_first(sessions)
        .into_iter()
        .take(limit)
        .cloned()
        .collect()
}

/// Measurements ordered newest first.
pub fn measurements_newest_first(measurements: &[BodyMeasurement]) -> Vec<BodyMeasurement> {
    newest_first(measurements, |m| m.date.as_str())
        .into_iter()
        .cloned()
        .collect()
}

pub fn latest_measurement(measurements: &[BodyMeasurement]) -> Option<BodyMeasurement> {
    newest_first(measurements, |m| m.date.as_str())
        .first()
        .map(|m| (*m).clone())
}
