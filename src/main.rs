use std::io::{self, Write};

use chrono::Utc;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use log::debug;

use liftlog::analytics::{
    group_by, personal_records, sets_progression, sort_alphabetically, weight_progression,
};
use liftlog::config::AppConfig;
use liftlog::errors::LiftlogError;
use liftlog::format::{format_date, format_month_year, format_time};
use liftlog::session::LiveWorkoutSession;
use liftlog::workout::storage::{FileWorkoutStore, WorkoutStore};
use liftlog::workout::{seed, ExerciseCategory, ExerciseRecord, WeightType, WorkoutRecord};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the starter exercise catalog and workout templates
    Seed {
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
    /// List the exercise catalog, grouped by body part
    Exercises {
        #[arg(short, long)]
        body_part: Option<String>,
    },
    /// List the stored workout templates
    Templates,
    /// List recent workouts
    History {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Personal records and progression for one exercise
    Analytics { exercise: String },
    /// Log a workout interactively from a template
    Log {
        template: String,

        #[arg(short, long)]
        unit: Option<WeightType>,
    },
}

fn seed_data(force: bool) -> Result<(), LiftlogError> {
    let mut store = FileWorkoutStore::new_default()?;
    if seed::seed_store(&mut store, force)? {
        println!("Seeded starter catalog and templates into {:?}", store.storage_path());
    } else {
        println!("Store already seeded; pass --force to overwrite");
    }
    Ok(())
}

fn list_exercises(body_part: Option<String>) -> Result<(), LiftlogError> {
    let store = FileWorkoutStore::new_default()?;
    let mut catalog = store.load_catalog()?;

    if let Some(part) = body_part {
        let part = part
            .parse::<liftlog::workout::BodyPart>()
            .map_err(|reason| LiftlogError::InvalidUserInput {
                field: "body-part".to_string(),
                reason,
            })?;
        catalog.retain(|e| e.body_part == part);
    }

    if catalog.is_empty() {
        println!("No exercises found. Run `liftlog seed` to install the starter catalog.");
        return Ok(());
    }

    let groups = group_by(catalog, |e| e.body_part.label());
    for group_name in groups.keys().copied().sorted() {
        println!("{}", group_name);
        for exercise in sort_alphabetically(&groups[group_name], |e| e.name.clone()) {
            println!("  {} ({})", exercise.name, exercise.category);
        }
    }
    Ok(())
}

fn list_templates() -> Result<(), LiftlogError> {
    let store = FileWorkoutStore::new_default()?;
    let templates = store.list_templates()?;

    if templates.is_empty() {
        println!("No templates found. Run `liftlog seed` to install the starter templates.");
        return Ok(());
    }

    for template in templates {
        println!(
            "{} - {} ({} exercises)",
            template.name,
            template.summary,
            template.exercises.len()
        );
    }
    Ok(())
}

fn show_history(limit: Option<usize>) -> Result<(), LiftlogError> {
    let config = AppConfig::from_local_file().unwrap_or_default();
    let store = FileWorkoutStore::new_default()?;
    let records = store.list_records()?;

    if records.is_empty() {
        println!("No workouts logged yet.");
        return Ok(());
    }

    // Month sections in newest-first order, mirroring the history list
    let recent: Vec<_> = records
        .into_iter()
        .take(limit.unwrap_or(config.history_page_size))
        .collect();
    let months: Vec<String> = recent
        .iter()
        .map(|r| format_month_year(&r.performed_at))
        .dedup()
        .collect();
    let groups = group_by(recent, |r| format_month_year(&r.performed_at));

    for month in months {
        println!("{}", month);
        for record in &groups[&month] {
            println!(
                "  {}  {} ({} exercises, {} sets)",
                format_date(&record.performed_at),
                record.name,
                record.exercises.len(),
                record.set_count(),
            );
        }
    }
    Ok(())
}

fn show_analytics(exercise_name: &str) -> Result<(), LiftlogError> {
    let store = FileWorkoutStore::new_default()?;
    let exercise_type = store.find_exercise_type(exercise_name)?.ok_or_else(|| {
        LiftlogError::ExerciseTypeNotFound {
            name: exercise_name.to_string(),
        }
    })?;

    let history = store.exercise_history(&exercise_type.id)?;
    if history.is_empty() {
        println!(
            "No history for {} yet. Complete a workout to see your progress.",
            exercise_type.name
        );
        return Ok(());
    }

    let records = personal_records(&history);
    println!("{} ({} | {})", exercise_type.name, exercise_type.category, exercise_type.body_part);
    println!();
    println!("Personal Records");
    println!("  Max Weight: {}", records.max_weight);
    println!("  Max Reps:   {}", records.max_reps);
    println!("  Est. 1RM:   {}", records.best_one_rep_max);
    println!("  Total Sets: {}", records.total_sets);
    println!("  Volume:     {}", records.total_volume);

    println!();
    println!("Weight Progression");
    for point in weight_progression(&history) {
        println!("  {}  {}", format_date(&point.recorded_at), point.value);
    }

    println!();
    println!("Sets per Session");
    for point in sets_progression(&history) {
        println!("  {}  {}", format_date(&point.recorded_at), point.value);
    }
    Ok(())
}

fn prompt(text: &str) -> Result<String, LiftlogError> {
    print!("{}", text);
    io::stdout()
        .flush()
        .map_err(|e| LiftlogError::ConsoleIOError { source: e })?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| LiftlogError::ConsoleIOError { source: e })?;
    Ok(line.trim().to_string())
}

/// Parse a set entry like "8x140", "8 x 140" or "8 140" into reps and
/// weight.
fn parse_set_entry(line: &str) -> Result<(u32, f64), LiftlogError> {
    let parts: Vec<&str> = line
        .split(|c: char| c == 'x' || c == 'X' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() != 2 {
        return Err(LiftlogError::InvalidUserInput {
            field: "set".to_string(),
            reason: format!("expected `reps x weight`, got `{}`", line),
        });
    }

    let reps = parts[0]
        .parse::<u32>()
        .map_err(|e| LiftlogError::InvalidUserInput {
            field: "reps".to_string(),
            reason: e.to_string(),
        })?;
    let weight = parts[1]
        .parse::<f64>()
        .map_err(|e| LiftlogError::InvalidUserInput {
            field: "weight".to_string(),
            reason: e.to_string(),
        })?;
    Ok((reps, weight))
}

fn log_workout(template_name: &str, unit: Option<WeightType>) -> Result<(), LiftlogError> {
    let mut store = FileWorkoutStore::new_default()?;
    let catalog = store.load_catalog()?;
    let template =
        store
            .load_template(template_name)?
            .ok_or_else(|| LiftlogError::TemplateNotFound {
                name: template_name.to_string(),
            })?;

    let config = AppConfig::from_local_file().unwrap_or_default();
    let weight_type = unit.unwrap_or(config.preferred_weight_type);

    let mut session = LiveWorkoutSession::new();
    session.set_preferred_weight_type(weight_type);
    session.set_active_workout_id(Some(template.id.clone()));

    println!("Logging {} - {}", template.name, template.summary);
    println!("Per set: enter to keep the target, `reps x weight` to override,");
    println!("`+` to add a set, `-` to drop the last set. Ctrl-C discards.");

    for exercise in &template.exercises {
        let instance_id = format!("{}:{}", exercise.index_position, exercise.exercise_type_id);
        session.init_live_exercise(
            &instance_id,
            &exercise.initial_reps(),
            &exercise.initial_weights(),
        );

        let exercise_name = catalog
            .iter()
            .find(|e| e.id == exercise.exercise_type_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| exercise.exercise_type_id.clone());

        println!();
        println!(
            "{} (target {}x{} @ {} {}, rest {})",
            exercise_name,
            exercise.sets,
            exercise.reps,
            exercise.weight,
            weight_type,
            format_time(exercise.rest_period_s),
        );

        let mut set_index = 0;
        while set_index < session.get_live_exercise(&instance_id).map(|e| e.set_count()).unwrap_or(0)
        {
            let state = session.get_live_exercise(&instance_id).unwrap();
            let line = prompt(&format!(
                "  set {} [{} x {}]: ",
                set_index + 1,
                state.reps_per_set[set_index],
                state.weights_per_set[set_index],
            ))?;

            match line.as_str() {
                "" => set_index += 1,
                "+" => session.add_set(&instance_id),
                "-" => {
                    // dropping below one set is refused by the store
                    let count = session
                        .get_live_exercise(&instance_id)
                        .map(|e| e.set_count())
                        .unwrap_or(1);
                    session.remove_set(&instance_id, count - 1);
                }
                entry => match parse_set_entry(entry) {
                    Ok((reps, weight)) => {
                        session.update_set_reps(&instance_id, set_index, reps);
                        session.update_set_weight(&instance_id, set_index, weight);
                        set_index += 1;
                    }
                    Err(e) => println!("  {}", e),
                },
            }
        }

        let note = prompt("  note (optional): ")?;
        if !note.is_empty() {
            session.update_note(&instance_id, &note);
        }
    }

    let performed_at = Utc::now();
    let mut record = WorkoutRecord::new(&template.name, &template.summary, performed_at);

    for exercise in &template.exercises {
        let instance_id = format!("{}:{}", exercise.index_position, exercise.exercise_type_id);
        let Some(state) = session.get_live_exercise(&instance_id) else {
            continue;
        };

        let category = catalog
            .iter()
            .find(|e| e.id == exercise.exercise_type_id)
            .map(|e| e.category);
        let keeps_zero_weight = matches!(
            category,
            Some(ExerciseCategory::Bodyweight) | Some(ExerciseCategory::None)
        );

        // Discard sets the user never performed; the store itself does
        // not filter
        let mut reps_per_set = Vec::new();
        let mut weights_per_set = Vec::new();
        for (i, &reps) in state.reps_per_set.iter().enumerate() {
            let weight = state.weights_per_set[i];
            if reps > 0 && (weight > 0.0 || keeps_zero_weight) {
                reps_per_set.push(reps);
                weights_per_set.push(weight);
            }
        }

        if reps_per_set.is_empty() {
            debug!("no completed sets for {}, skipping", instance_id);
            continue;
        }

        let exercise_name = catalog
            .iter()
            .find(|e| e.id == exercise.exercise_type_id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| exercise.exercise_type_id.clone());

        record.add_exercise(ExerciseRecord {
            exercise_type_id: exercise.exercise_type_id.clone(),
            exercise_name,
            index_position: exercise.index_position,
            weight_type,
            reps_per_set,
            weights_per_set,
            note: state.note.clone(),
            recorded_at: performed_at,
        });
    }

    session.clear_live_workout();

    if record.exercises.is_empty() {
        println!("No completed sets, nothing saved.");
        return Ok(());
    }

    store.append_record(&record)?;
    println!(
        "Saved {} with {} exercises and {} sets.",
        record.name,
        record.exercises.len(),
        record.set_count(),
    );
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    ctrlc::set_handler(move || {
        println!("Discarding workout...");
        std::process::exit(0);
    })
    .expect("Could not set Ctrl-C handler");

    match &cli.command {
        Commands::Seed { force } => seed_data(*force).expect("Error seeding starter data"),
        Commands::Exercises { body_part } => {
            list_exercises(body_part.clone()).expect("Error listing exercises")
        }
        Commands::Templates => list_templates().expect("Error listing templates"),
        Commands::History { limit } => show_history(*limit).expect("Error listing history"),
        Commands::Analytics { exercise } => {
            show_analytics(exercise).expect("Error computing analytics")
        }
        Commands::Log { template, unit } => {
            log_workout(template, *unit).expect("Error logging workout")
        }
    };
}
