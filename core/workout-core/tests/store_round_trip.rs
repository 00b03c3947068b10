use tempfile::TempDir;
use workout_core::{
    BodyMeasurement, CardioData, EnduranceData, Exercise, ExerciseData, ExerciseType, FileStore,
    RecordStore, SessionExerciseEntry, StorageConfig, StrengthSet, StretchData, WorkoutSession,
    WorkoutTemplate,
};

fn file_store(temp: &TempDir) -> RecordStore<FileStore> {
    RecordStore::new(FileStore::new(StorageConfig::with_root(
        temp.path().join("data"),
    )))
}

fn entry(exercise_id: &str, name: &str, data: ExerciseData) -> SessionExerciseEntry {
    SessionExerciseEntry {
        exercise_id: exercise_id.into(),
        exercise_name: name.into(),
        data,
    }
}

fn sample_sessions() -> Vec<WorkoutSession> {
    vec![
        WorkoutSession {
            id: "s1".into(),
            template_id: "t1".into(),
            template_name: "Mixed".into(),
            date: "2024-05-05T09:15:02.114Z".into(),
            exercises: vec![
                entry(
                    "1",
                    "Bench Press",
                    ExerciseData::Strength {
                        sets: vec![
                            StrengthSet {
                                weight: 60.0,
                                reps: 8,
                            },
                            StrengthSet {
                                weight: 62.5,
                                reps: 6,
                            },
                        ],
                    },
                ),
                entry(
                    "10",
                    "Stationary Bike",
                    ExerciseData::Cardio {
                        data: CardioData {
                            time: 20.0,
                            level: 8.0,
                            distance: 7.5,
                        },
                    },
                ),
                entry(
                    "12",
                    "Running",
                    ExerciseData::Endurance {
                        data: EnduranceData::new(30.0, 5.0),
                    },
                ),
                entry(
                    "14",
                    "Full-Body Stretch",
                    ExerciseData::Stretch {
                        data: StretchData { completed: true },
                    },
                ),
            ],
        },
        WorkoutSession {
            id: "s2".into(),
            template_id: "t2".into(),
            template_name: "Walk".into(),
            date: "2024-05-06T18:40:55.900Z".into(),
            exercises: vec![entry(
                "13",
                "Cycling",
                ExerciseData::Endurance {
                    data: EnduranceData::new(45.0, 0.0),
                },
            )],
        },
    ]
}

#[test]
fn test_empty_collections_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);

    assert!(store.save_templates(&[]));
    assert!(store.save_sessions(&[]));
    assert!(store.save_measurements(&[]));
    assert!(store.save_exercises(&[]));

    assert!(store.templates().is_empty());
    assert!(store.sessions().is_empty());
    assert!(store.measurements().is_empty());
    assert!(store.exercises().is_empty());
}

#[test]
fn test_exercises_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let exercises = vec![
        Exercise::new("1", "Bench Press", ExerciseType::Strength),
        Exercise::new("01HXYZ", "Rowing Machine", ExerciseType::Cardio),
    ];

    assert!(store.save_exercises(&exercises));
    assert_eq!(store.exercises(), exercises);
}

#[test]
fn test_templates_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let templates = vec![WorkoutTemplate {
        id: "t1".into(),
        name: "Push Day".into(),
        exercises: vec![
            Exercise::new("1", "Bench Press", ExerciseType::Strength),
            Exercise::new("14", "Full-Body Stretch", ExerciseType::Stretch),
        ],
    }];

    assert!(store.save_templates(&templates));
    assert_eq!(store.templates(), templates);
}

#[test]
fn test_sessions_round_trip_every_exercise_type() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let sessions = sample_sessions();

    assert!(store.save_sessions(&sessions));
    assert_eq!(store.sessions(), sessions);
}

#[test]
fn test_measurements_round_trip() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    let measurements = vec![
        BodyMeasurement {
            id: "m1".into(),
            date: "2024-05-04T06:30:00.000Z".into(),
            weight: Some(82.4),
            waist: Some(88.0),
            ..Default::default()
        },
        BodyMeasurement {
            id: "m2".into(),
            date: "2024-05-09T06:30:00.000Z".into(),
            upper_arm: Some(36.5),
            ..Default::default()
        },
    ];

    assert!(store.save_measurements(&measurements));
    assert_eq!(store.measurements(), measurements);
}

#[test]
fn test_saved_files_use_camel_case_keys() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    store.save_sessions(&sample_sessions());

    let raw = std::fs::read_to_string(temp.path().join("data/workout_sessions.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(value[0]["templateName"], "Mixed");
    assert_eq!(value[0]["exercises"][2]["exerciseName"], "Running");
    assert_eq!(value[0]["exercises"][2]["type"], "endurance");
    assert_eq!(value[0]["exercises"][2]["data"]["pace"], 6.0);
}

#[test]
fn test_corrupt_file_does_not_poison_other_collections() {
    let temp = TempDir::new().unwrap();
    let store = file_store(&temp);
    store.save_templates(&[WorkoutTemplate {
        id: "t1".into(),
        name: "Legs".into(),
        exercises: vec![Exercise::new("2", "Squat", ExerciseType::Strength)],
    }]);
    std::fs::write(temp.path().join("data/workout_sessions.json"), "[{\"id\":").unwrap();

    assert!(store.sessions().is_empty());
    assert_eq!(store.templates().len(), 1);
}
