// Starter data: the built-in exercise catalog and the default workout
// templates written on first run

use log::{info, warn};

use crate::errors::LiftlogError;
use crate::workout::storage::WorkoutStore;
use crate::workout::{BodyPart as B, ExerciseCategory as C, ExerciseType, WeightType, WorkoutTemplate};

const STARTER_EXERCISES: &[(&str, C, B)] = &[
    ("Arnold Press", C::Dumbbell, B::Shoulders),
    ("Back Squat", C::Barbell, B::Quadriceps),
    ("Bench Dips", C::None, B::Triceps),
    ("Bench Press", C::Barbell, B::Chest),
    ("Bench Press", C::Dumbbell, B::Chest),
    ("Bench Press", C::SmithMachine, B::Chest),
    ("Bent Over One Arm Row", C::Dumbbell, B::Back),
    ("Bent Over Row", C::Barbell, B::Back),
    ("Bicep Curl", C::Barbell, B::Biceps),
    ("Bicep Curl", C::Dumbbell, B::Biceps),
    ("Bulgarian Split Squat", C::Dumbbell, B::Quadriceps),
    ("Bulgarian Split Squat", C::Barbell, B::Quadriceps),
    ("Burpee", C::None, B::None),
    ("Cable Crossover", C::Cable, B::Chest),
    ("Calf Raise", C::Barbell, B::Calves),
    ("Calf Raise", C::None, B::Calves),
    ("Calf Raise", C::Dumbbell, B::Calves),
    ("Calf Raise", C::SmithMachine, B::Calves),
    ("Chest Fly", C::Cable, B::Chest),
    ("Chest Fly", C::Dumbbell, B::Chest),
    ("Chin Up", C::None, B::Back),
    ("Clean", C::Barbell, B::FullBody),
    ("Clean and Jerk", C::Barbell, B::FullBody),
    ("Crunch", C::None, B::Abs),
    ("Decline Bench Press", C::Barbell, B::Chest),
    ("Decline Bench Press", C::Dumbbell, B::Chest),
    ("Deadlift", C::Barbell, B::Back),
    ("Dips", C::None, B::Triceps),
    ("Face Pull", C::Cable, B::Shoulders),
    ("Front Raise", C::Barbell, B::Shoulders),
    ("Front Raise", C::Cable, B::Shoulders),
    ("Front Raise", C::Dumbbell, B::Shoulders),
    ("Front Squat", C::Barbell, B::Quadriceps),
    ("Good Morning", C::Dumbbell, B::Back),
    ("Hack Squat", C::None, B::Quadriceps),
    ("Hammer Curl", C::Dumbbell, B::Biceps),
    ("Hanging Knee Raise", C::None, B::Abs),
    ("Hip Adductor", C::None, B::Glutes),
    ("Hip Thrust", C::Barbell, B::Glutes),
    ("Hip Thrust", C::None, B::Glutes),
    ("Incline Bench Press", C::Barbell, B::Chest),
    ("Incline Bench Press", C::Dumbbell, B::Chest),
    ("Incline Bench Press", C::SmithMachine, B::Chest),
    ("Kettle Bell Swing", C::None, B::FullBody),
    ("Lat Pulldown", C::Cable, B::Back),
    ("Lat Pulldown", C::SmithMachine, B::Back),
    ("Lateral Raise", C::Cable, B::Shoulders),
    ("Lateral Raise", C::Dumbbell, B::Shoulders),
    ("Lateral Raise", C::None, B::Shoulders),
    ("Leg Curl", C::None, B::Hamstrings),
    ("Leg Extension", C::None, B::Quadriceps),
    ("Leg Press", C::None, B::Quadriceps),
    ("Lunge", C::Barbell, B::Quadriceps),
    ("Lunge", C::Dumbbell, B::Quadriceps),
    ("Neutral Grip Pull Up", C::None, B::Back),
    ("Overhead Press", C::Barbell, B::Shoulders),
    ("Overhead Press", C::Dumbbell, B::Shoulders),
    ("Overhead Press", C::SmithMachine, B::Shoulders),
    ("Pec Deck", C::None, B::Chest),
    ("Pistol Squat", C::None, B::Quadriceps),
    ("Plank", C::None, B::Abs),
    ("Preacher Curls", C::None, B::Biceps),
    ("Power Clean", C::None, B::FullBody),
    ("Power Snatch", C::None, B::FullBody),
    ("Push Up", C::None, B::Chest),
    ("Pull Up", C::None, B::Back),
    ("Reverse Fly", C::Cable, B::Shoulders),
    ("Reverse Fly", C::None, B::Shoulders),
    ("Romanian Deadlift", C::Dumbbell, B::Hamstrings),
    ("Romanian Deadlift", C::Barbell, B::Hamstrings),
    ("Row", C::Barbell, B::Back),
    ("Row", C::Cable, B::Back),
    ("Row", C::Dumbbell, B::Back),
    ("Seated Overhead Press", C::Barbell, B::Shoulders),
    ("Seated Overhead Press", C::Dumbbell, B::Shoulders),
    ("Seated Row", C::Cable, B::Back),
    ("Seated Row", C::None, B::Back),
    ("Shoulder Press", C::Dumbbell, B::Shoulders),
    ("Shrug", C::Barbell, B::Shoulders),
    ("Shrug", C::Dumbbell, B::Shoulders),
    ("Squat", C::Barbell, B::Quadriceps),
    ("Squat", C::Dumbbell, B::Quadriceps),
    ("Squat", C::SmithMachine, B::Quadriceps),
    ("T-Bar Row", C::None, B::Back),
    ("Triceps Extension", C::Cable, B::Triceps),
    ("Triceps Extension", C::Dumbbell, B::Triceps),
    ("Wide Grip Pull Up", C::None, B::Back),
];

/// (exercise name, category, sets, reps, rest seconds)
type ExerciseSeed = (&'static str, C, usize, u32, u32);

const STARTER_TEMPLATES: &[(&str, &str, &[ExerciseSeed])] = &[
    (
        "Push Day",
        "Chest, Triceps and Shoulders",
        &[
            ("Bench Press", C::Barbell, 3, 6, 60),
            ("Overhead Press", C::Barbell, 3, 8, 60),
            ("Incline Bench Press", C::Dumbbell, 3, 10, 60),
            ("Lateral Raise", C::Dumbbell, 3, 12, 60),
            ("Chest Fly", C::Dumbbell, 2, 12, 60),
            ("Triceps Extension", C::Cable, 3, 15, 60),
        ],
    ),
    (
        "Pull Day",
        "Back and Biceps",
        &[
            ("Row", C::Barbell, 3, 8, 60),
            ("Pull Up", C::None, 3, 6, 60),
            ("Seated Row", C::Cable, 3, 8, 60),
            ("Lat Pulldown", C::Cable, 4, 12, 60),
            ("Preacher Curls", C::None, 3, 10, 60),
        ],
    ),
    (
        "Leg Day",
        "Quads, Hamstrings, Glutes and Calves",
        &[
            ("Squat", C::Barbell, 3, 6, 60),
            ("Romanian Deadlift", C::Barbell, 3, 8, 60),
            ("Bulgarian Split Squat", C::Dumbbell, 3, 10, 60),
            ("Leg Curl", C::None, 3, 12, 60),
            ("Leg Extension", C::None, 2, 12, 60),
            ("Calf Raise", C::None, 3, 15, 60),
        ],
    ),
    (
        "5x5 Strength - A",
        "3 workouts using the 5x5 set and repetition scheme",
        &[
            ("Back Squat", C::Barbell, 5, 5, 150),
            ("Bench Press", C::Barbell, 5, 5, 150),
            ("Row", C::Barbell, 5, 5, 150),
        ],
    ),
    (
        "5x5 Strength - B",
        "2 workouts using the 5x5 set and reps, Deadlifts performed 1 set",
        &[
            ("Back Squat", C::Barbell, 5, 5, 150),
            ("Overhead Press", C::Barbell, 5, 5, 150),
            ("Deadlift", C::Barbell, 1, 5, 150),
        ],
    ),
];

/// The built-in exercise catalog.
pub fn starter_catalog() -> Vec<ExerciseType> {
    STARTER_EXERCISES
        .iter()
        .map(|(name, category, body_part)| ExerciseType::new(name, *category, *body_part))
        .collect()
}

/// The default workout templates, resolved against a catalog. Template
/// entries whose exercise is missing from the catalog are skipped.
pub fn starter_templates(catalog: &[ExerciseType]) -> Vec<WorkoutTemplate> {
    let find = |name: &str, category: C| {
        catalog
            .iter()
            .find(|e| e.name == name && e.category == category)
    };

    STARTER_TEMPLATES
        .iter()
        .map(|(template_name, summary, exercises)| {
            let mut template = WorkoutTemplate::new(template_name, summary);
            for (name, category, sets, reps, rest_period_s) in exercises.iter() {
                match find(name, *category) {
                    Some(exercise_type) => template.add_exercise(
                        &exercise_type.id,
                        *sets,
                        *reps,
                        0.0,
                        WeightType::Lbs,
                        *rest_period_s,
                    ),
                    None => warn!("{} ({}) not in catalog, skipping", name, category),
                }
            }
            template
        })
        .collect()
}

/// Write the starter catalog and templates into a store. Refuses to
/// touch a store that already has a catalog unless `force` is set.
/// Returns whether anything was written.
pub fn seed_store<S: WorkoutStore>(store: &mut S, force: bool) -> Result<bool, LiftlogError> {
    if !force && !store.load_catalog()?.is_empty() {
        info!("store already seeded, skipping");
        return Ok(false);
    }

    let catalog = starter_catalog();
    store.save_catalog(&catalog)?;

    let templates = starter_templates(&catalog);
    for template in &templates {
        store.save_template(template)?;
    }

    info!(
        "seeded {} exercises and {} templates",
        catalog.len(),
        templates.len()
    );
    Ok(true)
}
