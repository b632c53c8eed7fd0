// Library interface for liftlog
// This allows integration tests to access internal modules

pub mod analytics;
pub mod config;
pub mod errors;
pub mod format;
pub mod session;
pub mod workout;

// Re-export commonly used types
pub use analytics::{PersonalRecords, ProgressionPoint, SetHistory};
pub use config::AppConfig;
pub use errors::LiftlogError;
pub use session::{LiveExerciseState, LiveWorkoutSession};
pub use workout::storage::{FileWorkoutStore, WorkoutStore};
pub use workout::{
    BodyPart, ExerciseCategory, ExerciseRecord, ExerciseType, TemplateExercise, WeightType,
    WorkoutRecord, WorkoutTemplate,
};
