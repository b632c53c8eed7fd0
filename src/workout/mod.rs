// Workout domain model: exercise catalog entries, reusable workout
// templates with per-exercise defaults, and completed-workout records

pub mod seed;
pub mod storage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::SetHistory;

/// Equipment used to perform an exercise.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    Barbell,
    Cable,
    Dumbbell,
    SmithMachine,
    Machine,
    Bodyweight,
    None,
}

impl ExerciseCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ExerciseCategory::Barbell => "Barbell",
            ExerciseCategory::Cable => "Cable",
            ExerciseCategory::Dumbbell => "Dumbbell",
            ExerciseCategory::SmithMachine => "Smith Machine",
            ExerciseCategory::Machine => "Machine",
            ExerciseCategory::Bodyweight => "Bodyweight",
            ExerciseCategory::None => "None",
        }
    }
}

impl std::fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Primary body part targeted by an exercise.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Shoulders,
    Chest,
    Biceps,
    Triceps,
    Forearm,
    Back,
    Abs,
    Glutes,
    Quadriceps,
    Hamstrings,
    Calves,
    FullBody,
    None,
}

impl BodyPart {
    pub fn label(&self) -> &'static str {
        match self {
            BodyPart::Shoulders => "Shoulders",
            BodyPart::Chest => "Chest",
            BodyPart::Biceps => "Biceps",
            BodyPart::Triceps => "Triceps",
            BodyPart::Forearm => "Forearm",
            BodyPart::Back => "Back",
            BodyPart::Abs => "Abs",
            BodyPart::Glutes => "Glutes",
            BodyPart::Quadriceps => "Quadriceps",
            BodyPart::Hamstrings => "Hamstrings",
            BodyPart::Calves => "Calves",
            BodyPart::FullBody => "Full Body",
            BodyPart::None => "None",
        }
    }
}

impl std::fmt::Display for BodyPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for BodyPart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "shoulders" => Ok(BodyPart::Shoulders),
            "chest" => Ok(BodyPart::Chest),
            "biceps" => Ok(BodyPart::Biceps),
            "triceps" => Ok(BodyPart::Triceps),
            "forearm" => Ok(BodyPart::Forearm),
            "back" => Ok(BodyPart::Back),
            "abs" => Ok(BodyPart::Abs),
            "glutes" => Ok(BodyPart::Glutes),
            "quadriceps" => Ok(BodyPart::Quadriceps),
            "hamstrings" => Ok(BodyPart::Hamstrings),
            "calves" => Ok(BodyPart::Calves),
            "full_body" => Ok(BodyPart::FullBody),
            "none" => Ok(BodyPart::None),
            other => Err(format!("unknown body part: {}", other)),
        }
    }
}

/// Unit a weight was entered in. Values are stored as entered, no
/// conversion happens on unit changes.
#[derive(Debug, Clone, Copy, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightType {
    #[default]
    Lbs,
    Kg,
}

impl WeightType {
    pub fn label(&self) -> &'static str {
        match self {
            WeightType::Lbs => "lbs",
            WeightType::Kg => "kg",
        }
    }
}

impl std::fmt::Display for WeightType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for WeightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbs" | "lb" => Ok(WeightType::Lbs),
            "kg" | "kgs" => Ok(WeightType::Kg),
            other => Err(format!("unknown weight unit: {}", other)),
        }
    }
}

/// Normalize a display name into a filesystem- and id-safe slug.
pub(crate) fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// One entry in the exercise catalog.
///
/// The same exercise name can appear once per equipment category
/// (e.g. a barbell and a dumbbell "Bench Press" are distinct entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseType {
    /// Unique catalog identifier, derived from name and category
    pub id: String,
    /// Human-readable exercise name (e.g. "Bench Press")
    pub name: String,
    /// Equipment category
    pub category: ExerciseCategory,
    /// Primary body part targeted
    pub body_part: BodyPart,
}

impl ExerciseType {
    pub fn new(name: &str, category: ExerciseCategory, body_part: BodyPart) -> Self {
        let id = format!("{}__{}", slugify(name), slugify(category.label()));
        Self {
            id,
            name: name.to_string(),
            category,
            body_part,
        }
    }
}

/// Per-exercise defaults inside a workout template. The defaults seed the
/// live session when a workout is started from the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExercise {
    /// Catalog entry this slot refers to
    pub exercise_type_id: String,
    /// Position of the exercise within the workout
    pub index_position: usize,
    /// Default number of sets
    pub sets: usize,
    /// Default rep target per set
    pub reps: u32,
    /// Default weight per set, 0 when unset
    pub weight: f64,
    /// Unit the default weight is expressed in
    pub weight_type: WeightType,
    /// Rest period between sets, in seconds
    pub rest_period_s: u32,
    /// Target reps in reserve at the end of each set
    pub reps_in_reserve: u32,
}

impl TemplateExercise {
    /// Rep seed for a live session: the default rep target repeated once
    /// per set.
    pub fn initial_reps(&self) -> Vec<u32> {
        vec![self.reps; self.sets.max(1)]
    }

    /// Weight seed for a live session, same length as `initial_reps`.
    pub fn initial_weights(&self) -> Vec<f64> {
        vec![self.weight; self.sets.max(1)]
    }
}

/// A reusable workout definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Unique template identifier, derived from the name
    pub id: String,
    /// Human-readable workout name (e.g. "Push Day")
    pub name: String,
    /// Short description shown in listings
    pub summary: String,
    /// Exercises in workout order
    pub exercises: Vec<TemplateExercise>,
}

impl WorkoutTemplate {
    pub fn new(name: &str, summary: &str) -> Self {
        Self {
            id: slugify(name),
            name: name.to_string(),
            summary: summary.to_string(),
            exercises: Vec::new(),
        }
    }

    /// Append an exercise slot at the next index position.
    pub fn add_exercise(
        &mut self,
        exercise_type_id: &str,
        sets: usize,
        reps: u32,
        weight: f64,
        weight_type: WeightType,
        rest_period_s: u32,
    ) {
        self.exercises.push(TemplateExercise {
            exercise_type_id: exercise_type_id.to_string(),
            index_position: self.exercises.len(),
            sets,
            reps,
            weight,
            weight_type,
            rest_period_s,
            reps_in_reserve: 2,
        });
    }

    /// Validate that the template is storable: non-empty name, at least
    /// one set per exercise, unique index positions.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("template name cannot be empty".to_string());
        }
        let mut positions = std::collections::HashSet::new();
        for exercise in &self.exercises {
            if exercise.sets == 0 {
                return Err(format!(
                    "exercise {} has no sets",
                    exercise.exercise_type_id
                ));
            }
            if !positions.insert(exercise.index_position) {
                return Err(format!(
                    "duplicate index position: {}",
                    exercise.index_position
                ));
            }
        }
        Ok(())
    }
}

/// One completed exercise inside a logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Catalog entry this performance belongs to
    pub exercise_type_id: String,
    /// Exercise name at the time of logging
    pub exercise_name: String,
    /// Position of the exercise within the workout
    pub index_position: usize,
    /// Unit the weights were entered in
    pub weight_type: WeightType,
    /// Reps performed per set
    pub reps_per_set: Vec<u32>,
    /// Weight used per set, same length as `reps_per_set`
    pub weights_per_set: Vec<f64>,
    /// Free-text note entered during the session
    pub note: String,
    /// When the exercise was logged
    pub recorded_at: DateTime<Utc>,
}

impl SetHistory for ExerciseRecord {
    fn reps_per_set(&self) -> &[u32] {
        &self.reps_per_set
    }

    fn weights_per_set(&self) -> &[f64] {
        &self.weights_per_set
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// A logged workout: a dated collection of completed exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique record identifier
    pub id: String,
    /// Workout name, usually copied from the source template
    pub name: String,
    /// Short description, copied from the source template
    pub summary: String,
    /// When the workout was performed
    pub performed_at: DateTime<Utc>,
    /// Completed exercises in workout order
    pub exercises: Vec<ExerciseRecord>,
}

impl WorkoutRecord {
    pub fn new(name: &str, summary: &str, performed_at: DateTime<Utc>) -> Self {
        let id = format!("{}__{}", slugify(name), performed_at.timestamp_millis());
        Self {
            id,
            name: name.to_string(),
            summary: summary.to_string(),
            performed_at,
            exercises: Vec::new(),
        }
    }

    pub fn add_exercise(&mut self, exercise: ExerciseRecord) {
        self.exercises.push(exercise);
    }

    /// Total number of logged sets across all exercises.
    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|e| e.reps_per_set.len()).sum()
    }
}
