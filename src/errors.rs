// Error types for liftlog

use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LiftlogError {
    // Errors for the live session store. Only the strict try_* API
    // surfaces these; the lenient API absorbs them as no-ops.
    #[snafu(display("No live exercise with id {exercise_instance_id}"))]
    ExerciseNotFound { exercise_instance_id: String },
    #[snafu(display("Set index {set_index} out of range, exercise has {set_count} sets"))]
    SetIndexOutOfRange { set_index: usize, set_count: usize },
    #[snafu(display("Cannot remove the only remaining set of {exercise_instance_id}"))]
    CannotRemoveLastSet { exercise_instance_id: String },

    // Config management errors
    #[snafu(display("Could not find application config directory"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },

    // Workout storage errors
    #[snafu(display("Could not find application data directory"))]
    NoDataDir,
    #[snafu(display("Workout storage I/O error"))]
    StorageIOError { source: io::Error },
    #[snafu(display("Error serializing workout data"))]
    StorageSerializeError { source: serde_json::Error },
    #[snafu(display("No workout template named {name}"))]
    TemplateNotFound { name: String },
    #[snafu(display("No exercise named {name} in the catalog"))]
    ExerciseTypeNotFound { name: String },
    #[snafu(display("Workout template validation failed: {reason}"))]
    TemplateValidationError { reason: String },
    #[snafu(display("Error appending to workout history"))]
    HistoryAppendError { source: io::Error },
    #[snafu(display("Error reading workout history"))]
    HistoryReadError { source: io::Error },

    // User input validation errors
    #[snafu(display("Invalid user input: {field} - {reason}"))]
    InvalidUserInput { field: String, reason: String },
    #[snafu(display("Error reading user input"))]
    ConsoleIOError { source: io::Error },
}
