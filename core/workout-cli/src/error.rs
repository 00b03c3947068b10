use workout_core::WorkoutError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Workout(#[from] WorkoutError),

    #[error("{0}")]
    Input(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Errors caused by what was typed on the command line.
    pub fn is_user_error(&self) -> bool {
        match self {
            CliError::Workout(err) => err.is_validation(),
            CliError::Input(_) => true,
            CliError::Csv(_) | CliError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
