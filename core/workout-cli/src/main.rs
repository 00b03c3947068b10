//! workout-log: command-line client for Workout Log.
//!
//! Works on the same data directory as the app clients (`~/.workout-log/`
//! unless `WORKOUT_LOG_HOME` or `--data-dir` says otherwise).
//!
//! ## Typical session
//!
//! ```text
//! workout-log template-add "Push Day" --exercise 1 --exercise 4
//! workout-log start <TEMPLATE_ID>          # shows last values in entry syntax
//! workout-log log <TEMPLATE_ID> --entry 1=60x8,62.5x6 --entry 4=40x10
//! workout-log export workouts > workouts.csv
//! ```

mod commands;
mod error;
mod export;
mod input;
mod logging;

use clap::{Parser, Subcommand};
use export::ExportKind;
use std::io::{self, Write};
use std::path::PathBuf;
use workout_core::{ExerciseType, MeasurementInput, StorageConfig, WorkoutEngine};

#[derive(Parser)]
#[command(name = "workout-log")]
#[command(about = "Log workouts and body measurements")]
#[command(version)]
struct Cli {
    /// Data directory (default: $WORKOUT_LOG_HOME or ~/.workout-log)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the exercise catalog
    Exercises {
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },

    /// Add a custom exercise
    ExerciseAdd {
        name: String,

        /// strength, cardio, endurance or stretch
        #[arg(long = "type", value_name = "TYPE")]
        exercise_type: ExerciseType,
    },

    /// List workouts (templates)
    Templates,

    /// Create a workout from catalog exercise ids, in order
    TemplateAdd {
        name: String,

        #[arg(long = "exercise", value_name = "ID", required = true)]
        exercises: Vec<String>,
    },

    /// Delete a workout; its logged sessions stay in history
    TemplateDelete { id: String },

    /// Show a workout pre-filled with the last logged values
    Start { template_id: String },

    /// Log a session
    Log {
        template_id: String,

        /// EXERCISE_ID=VALUE, e.g. 1=60x8,62.5x6 / 10=20/8/7.5 / 12=30/5 / 14=done
        #[arg(long = "entry", value_name = "ID=VALUE", value_parser = input::parse_entry)]
        entries: Vec<(String, String)>,

        /// Keep last values for exercises without an --entry
        #[arg(long)]
        repeat: bool,
    },

    /// Show recent sessions (dashboard limit), or all with --all
    History {
        #[arg(long)]
        all: bool,
    },

    /// Record body measurements (kg / cm)
    Measure {
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        chest: Option<String>,
        #[arg(long)]
        waist: Option<String>,
        #[arg(long)]
        hips: Option<String>,
        #[arg(long)]
        upper_arm: Option<String>,
        #[arg(long)]
        forearm: Option<String>,
        #[arg(long)]
        thigh: Option<String>,
        #[arg(long)]
        calf: Option<String>,
    },

    /// List body measurements, newest first
    Measurements,

    /// Delete a body measurement
    MeasurementDelete { id: String },

    /// Show or change preferences
    Prefs {
        #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
        dark_mode: Option<bool>,

        /// Sessions shown by `history` (1-10)
        #[arg(long, value_name = "N")]
        dashboard_limit: Option<u32>,

        /// Step the dashboard limit up or down
        #[arg(long, value_name = "DELTA", allow_negative_numbers = true)]
        adjust_limit: Option<i32>,
    },

    /// Write CSV to stdout
    Export {
        #[arg(value_enum)]
        kind: ExportKind,
    },
}

fn run(engine: &WorkoutEngine, command: Commands, out: &mut dyn Write) -> error::Result<()> {
    match command {
        Commands::Exercises { search } => commands::exercises(engine, search.as_deref(), out),
        Commands::ExerciseAdd {
            name,
            exercise_type,
        } => commands::add_exercise(engine, &name, exercise_type, out),
        Commands::Templates => commands::templates(engine, out),
        Commands::TemplateAdd { name, exercises } => {
            commands::add_template(engine, &name, &exercises, out)
        }
        Commands::TemplateDelete { id } => commands::delete_template(engine, &id, out),
        Commands::Start { template_id } => commands::start(engine, &template_id, out),
        Commands::Log {
            template_id,
            entries,
            repeat,
        } => commands::log(engine, &template_id, &entries, repeat, out),
        Commands::History { all } => commands::history(engine, all, out),
        Commands::Measure {
            weight,
            chest,
            waist,
            hips,
            upper_arm,
            forearm,
            thigh,
            calf,
        } => {
            let input = MeasurementInput {
                weight: weight.unwrap_or_default(),
                chest: chest.unwrap_or_default(),
                waist: waist.unwrap_or_default(),
                hips: hips.unwrap_or_default(),
                upper_arm: upper_arm.unwrap_or_default(),
                forearm: forearm.unwrap_or_default(),
                thigh: thigh.unwrap_or_default(),
                calf: calf.unwrap_or_default(),
            };
            commands::measure(engine, &input, out)
        }
        Commands::Measurements => commands::measurements(engine, out),
        Commands::MeasurementDelete { id } => commands::delete_measurement(engine, &id, out),
        Commands::Prefs {
            dark_mode,
            dashboard_limit,
            adjust_limit,
        } => commands::prefs(engine, dark_mode, dashboard_limit, adjust_limit, out),
        Commands::Export { kind } => commands::export(engine, kind, out),
    }
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    let storage = match cli.data_dir {
        Some(root) => StorageConfig::with_root(root),
        None => StorageConfig::from_env(),
    };
    tracing::debug!(root = %storage.root().display(), "Using data directory");
    let engine = WorkoutEngine::with_storage(storage);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&engine, cli.command, &mut out) {
        if e.is_user_error() {
            eprintln!("workout-log: {e}");
        } else {
            tracing::error!(error = %e, "workout-log failed");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_log_entries_and_negative_adjust() {
        let cli = Cli::try_parse_from([
            "workout-log",
            "log",
            "T1",
            "--entry",
            "1=60x8",
            "--entry",
            "12=30/5",
        ])
        .unwrap();
        match cli.command {
            Commands::Log { entries, .. } => assert_eq!(
                entries,
                vec![
                    ("1".to_string(), "60x8".to_string()),
                    ("12".to_string(), "30/5".to_string())
                ]
            ),
            _ => panic!("expected log"),
        }

        let cli = Cli::try_parse_from(["workout-log", "prefs", "--adjust-limit", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Prefs {
                adjust_limit: Some(-2),
                ..
            }
        ));
    }

    #[test]
    fn parses_exercise_type_and_data_dir() {
        let cli = Cli::try_parse_from([
            "workout-log",
            "exercise-add",
            "Rowing",
            "--type",
            "cardio",
            "--data-dir",
            "/tmp/wl",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/wl")));
        assert!(matches!(
            cli.command,
            Commands::ExerciseAdd {
                exercise_type: ExerciseType::Cardio,
                ..
            }
        ));
    }
}
