//! Built-in exercise catalog written on first use of the exercise picker.

use crate::types::{Exercise, ExerciseType};

const DEFAULT_EXERCISES: [(&str, &str, ExerciseType); 14] = [
    ("1", "Bench Press", ExerciseType::Strength),
    ("2", "Squat", ExerciseType::Strength),
    ("3", "Deadlift", ExerciseType::Strength),
    ("4", "Overhead Press", ExerciseType::Strength),
    ("5", "Biceps Curl", ExerciseType::Strength),
    ("6", "Triceps Dip", ExerciseType::Strength),
    ("7", "Pull-up", ExerciseType::Strength),
    ("8", "Barbell Row", ExerciseType::Strength),
    ("9", "Treadmill", ExerciseType::Cardio),
    ("10", "Stationary Bike", ExerciseType::Cardio),
    ("11", "Cross Trainer", ExerciseType::Cardio),
    ("12", "Running", ExerciseType::Endurance),
    ("13", "Cycling", ExerciseType::Endurance),
    ("14", "Full-Body Stretch", ExerciseType::Stretch),
];

pub fn default_exercises() -> Vec<Exercise> {
    DEFAULT_EXERCISES
        .iter()
        .map(|(id, name, exercise_type)| Exercise::new(*id, *name, *exercise_type))
        .collect()
}

/// Case-insensitive substring match on exercise names. A blank query matches all.
pub fn filter_exercises(exercises: &[Exercise], query: &str) -> Vec<Exercise> {
    let needle = query.trim().to_lowercase();
    exercises
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
