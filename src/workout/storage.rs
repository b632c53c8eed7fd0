// Storage implementation for workout data persistence

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde_jsonlines::{append_json_lines, json_lines};

use crate::errors::LiftlogError;
use crate::workout::{ExerciseRecord, ExerciseType, WorkoutRecord, WorkoutTemplate, slugify};

const CATALOG_FILE_NAME: &str = "catalog.json";
const HISTORY_FILE_NAME: &str = "history.jsonl";
const TEMPLATES_DIR_NAME: &str = "templates";

/// Trait defining the interface for workout storage operations
pub trait WorkoutStore {
    /// Replace the exercise catalog
    fn save_catalog(&mut self, catalog: &[ExerciseType]) -> Result<(), LiftlogError>;

    /// Load the exercise catalog; empty when none has been saved yet
    fn load_catalog(&self) -> Result<Vec<ExerciseType>, LiftlogError>;

    /// Find a catalog entry by display name (case-insensitive)
    fn find_exercise_type(&self, name: &str) -> Result<Option<ExerciseType>, LiftlogError>;

    /// Save a workout template to persistent storage
    fn save_template(&mut self, template: &WorkoutTemplate) -> Result<(), LiftlogError>;

    /// Load a workout template by name
    fn load_template(&self, name: &str) -> Result<Option<WorkoutTemplate>, LiftlogError>;

    /// List all stored templates, sorted by name
    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, LiftlogError>;

    /// Delete a workout template from storage
    fn delete_template(&mut self, name: &str) -> Result<(), LiftlogError>;

    /// Check if a template exists for a given name
    fn template_exists(&self, name: &str) -> Result<bool, LiftlogError>;

    /// Append a completed workout to the history log
    fn append_record(&mut self, record: &WorkoutRecord) -> Result<(), LiftlogError>;

    /// All logged workouts, newest first
    fn list_records(&self) -> Result<Vec<WorkoutRecord>, LiftlogError>;

    /// All completed performances of one catalog entry, newest first
    fn exercise_history(
        &self,
        exercise_type_id: &str,
    ) -> Result<Vec<ExerciseRecord>, LiftlogError>;
}

/// File-based implementation of workout storage.
///
/// Catalog and templates are JSON documents; the workout history is an
/// append-only JSON-lines log, one record per line.
pub struct FileWorkoutStore {
    /// Base directory for all workout data files
    storage_path: PathBuf,
    /// In-memory cache of loaded templates
    template_cache: HashMap<String, WorkoutTemplate>,
}

impl FileWorkoutStore {
    /// Create a new file-based store rooted at the given directory
    pub fn new(storage_path: PathBuf) -> Result<Self, LiftlogError> {
        let templates_dir = storage_path.join(TEMPLATES_DIR_NAME);
        if !templates_dir.exists() {
            fs::create_dir_all(&templates_dir)
                .map_err(|e| LiftlogError::StorageIOError { source: e })?;
        }

        Ok(Self {
            storage_path,
            template_cache: HashMap::new(),
        })
    }

    /// Create a store in the default application data directory
    pub fn new_default() -> Result<Self, LiftlogError> {
        Self::new(Self::default_storage_path()?)
    }

    /// Default data directory for workout storage
    pub fn default_storage_path() -> Result<PathBuf, LiftlogError> {
        let app_data_dir = dirs::data_dir().ok_or(LiftlogError::NoDataDir)?;
        Ok(app_data_dir.join("liftlog"))
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Clear the in-memory template cache
    pub fn clear_cache(&mut self) {
        self.template_cache.clear();
    }

    fn catalog_path(&self) -> PathBuf {
        self.storage_path.join(CATALOG_FILE_NAME)
    }

    fn history_path(&self) -> PathBuf {
        self.storage_path.join(HISTORY_FILE_NAME)
    }

    fn template_path(&self, name: &str) -> PathBuf {
        self.storage_path
            .join(TEMPLATES_DIR_NAME)
            .join(format!("{}.json", slugify(name)))
    }

    /// Serialize a value and move it into place atomically so a crashed
    /// write can never leave a half-written document behind.
    fn write_json_atomically<T: serde::Serialize>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), LiftlogError> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| LiftlogError::StorageSerializeError { source: e })?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut temp_file = fs::File::create(&temp_path)
                .map_err(|e| LiftlogError::StorageIOError { source: e })?;
            temp_file
                .write_all(content.as_bytes())
                .map_err(|e| LiftlogError::StorageIOError { source: e })?;
            temp_file
                .sync_all()
                .map_err(|e| LiftlogError::StorageIOError { source: e })?;
        }

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LiftlogError::StorageIOError { source: e }
        })
    }

    fn load_template_from_file(
        &self,
        name: &str,
    ) -> Result<Option<WorkoutTemplate>, LiftlogError> {
        let file_path = self.template_path(name);
        if !file_path.exists() {
            debug!("template file does not exist: {:?}", file_path);
            return Ok(None);
        }

        let content = fs::read_to_string(&file_path)
            .map_err(|e| LiftlogError::StorageIOError { source: e })?;
        let template: WorkoutTemplate = serde_json::from_str(&content)
            .map_err(|e| LiftlogError::StorageSerializeError { source: e })?;
        Ok(Some(template))
    }
}

impl WorkoutStore for FileWorkoutStore {
    fn save_catalog(&mut self, catalog: &[ExerciseType]) -> Result<(), LiftlogError> {
        info!("saving exercise catalog with {} entries", catalog.len());
        self.write_json_atomically(&self.catalog_path(), &catalog)
    }

    fn load_catalog(&self) -> Result<Vec<ExerciseType>, LiftlogError> {
        let path = self.catalog_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&path).map_err(|e| LiftlogError::StorageIOError { source: e })?;
        serde_json::from_str(&content).map_err(|e| LiftlogError::StorageSerializeError { source: e })
    }

    fn find_exercise_type(&self, name: &str) -> Result<Option<ExerciseType>, LiftlogError> {
        let needle = name.to_lowercase();
        Ok(self
            .load_catalog()?
            .into_iter()
            .find(|e| e.name.to_lowercase() == needle))
    }

    fn save_template(&mut self, template: &WorkoutTemplate) -> Result<(), LiftlogError> {
        template
            .validate()
            .map_err(|reason| LiftlogError::TemplateValidationError { reason })?;

        info!("saving workout template: {}", template.name);
        self.write_json_atomically(&self.template_path(&template.name), template)?;

        self.template_cache
            .insert(slugify(&template.name), template.clone());
        Ok(())
    }

    fn load_template(&self, name: &str) -> Result<Option<WorkoutTemplate>, LiftlogError> {
        let key = slugify(name);
        if let Some(template) = self.template_cache.get(&key) {
            debug!("template cache hit for {}", name);
            return Ok(Some(template.clone()));
        }
        self.load_template_from_file(name)
    }

    fn list_templates(&self) -> Result<Vec<WorkoutTemplate>, LiftlogError> {
        let templates_dir = self.storage_path.join(TEMPLATES_DIR_NAME);
        let mut templates = Vec::new();

        let entries = fs::read_dir(&templates_dir)
            .map_err(|e| LiftlogError::StorageIOError { source: e })?;
        for entry in entries {
            let entry = entry.map_err(|e| LiftlogError::StorageIOError { source: e })?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                let content = fs::read_to_string(&path)
                    .map_err(|e| LiftlogError::StorageIOError { source: e })?;
                match serde_json::from_str::<WorkoutTemplate>(&content) {
                    Ok(template) => templates.push(template),
                    Err(e) => warn!("skipping unreadable template {:?}: {}", path, e),
                }
            }
        }

        templates.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(templates)
    }

    fn delete_template(&mut self, name: &str) -> Result<(), LiftlogError> {
        let file_path = self.template_path(name);
        if file_path.exists() {
            fs::remove_file(&file_path)
                .map_err(|e| LiftlogError::StorageIOError { source: e })?;
        }
        self.template_cache.remove(&slugify(name));
        Ok(())
    }

    fn template_exists(&self, name: &str) -> Result<bool, LiftlogError> {
        if self.template_cache.contains_key(&slugify(name)) {
            return Ok(true);
        }
        Ok(self.template_path(name).exists())
    }

    fn append_record(&mut self, record: &WorkoutRecord) -> Result<(), LiftlogError> {
        info!(
            "appending workout record {} with {} exercises",
            record.name,
            record.exercises.len()
        );
        append_json_lines(self.history_path(), [record])
            .map_err(|e| LiftlogError::HistoryAppendError { source: e })
    }

    fn list_records(&self) -> Result<Vec<WorkoutRecord>, LiftlogError> {
        let path = self.history_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut records = json_lines::<WorkoutRecord, _>(&path)
            .map_err(|e| LiftlogError::HistoryReadError { source: e })?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LiftlogError::HistoryReadError { source: e })?;

        records.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
        Ok(records)
    }

    fn exercise_history(
        &self,
        exercise_type_id: &str,
    ) -> Result<Vec<ExerciseRecord>, LiftlogError> {
        let mut history: Vec<ExerciseRecord> = self
            .list_records()?
            .into_iter()
            .flat_map(|record| record.exercises)
            .filter(|exercise| exercise.exercise_type_id == exercise_type_id)
            .collect();

        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::{BodyPart, ExerciseCategory, WeightType};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn test_store() -> (TempDir, FileWorkoutStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileWorkoutStore::new(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, store)
    }

    fn test_template() -> WorkoutTemplate {
        let mut template = WorkoutTemplate::new("Push Day", "Chest, Triceps and Shoulders");
        template.add_exercise("bench_press__barbell", 3, 6, 135.0, WeightType::Lbs, 60);
        template.add_exercise("overhead_press__barbell", 3, 8, 95.0, WeightType::Lbs, 60);
        template
    }

    fn test_record(day: u32, exercise_type_id: &str) -> WorkoutRecord {
        let performed_at = Utc.with_ymd_and_hms(2024, 3, day, 18, 0, 0).unwrap();
        let mut record = WorkoutRecord::new("Push Day", "", performed_at);
        record.add_exercise(ExerciseRecord {
            exercise_type_id: exercise_type_id.to_string(),
            exercise_name: "Bench Press".to_string(),
            index_position: 0,
            weight_type: WeightType::Lbs,
            reps_per_set: vec![10, 8, 6],
            weights_per_set: vec![135.0, 145.0, 155.0],
            note: String::new(),
            recorded_at: performed_at,
        });
        record
    }

    #[test]
    fn test_store_creation_makes_templates_dir() {
        let (temp_dir, store) = test_store();
        assert_eq!(store.storage_path(), temp_dir.path());
        assert!(temp_dir.path().join(TEMPLATES_DIR_NAME).is_dir());
    }

    #[test]
    fn test_save_and_load_catalog() {
        let (_temp_dir, mut store) = test_store();
        let catalog = vec![
            ExerciseType::new("Bench Press", ExerciseCategory::Barbell, BodyPart::Chest),
            ExerciseType::new("Back Squat", ExerciseCategory::Barbell, BodyPart::Quadriceps),
        ];

        store.save_catalog(&catalog).unwrap();
        let loaded = store.load_catalog().unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn test_find_exercise_type_is_case_insensitive() {
        let (_temp_dir, mut store) = test_store();
        let catalog = vec![ExerciseType::new(
            "Bench Press",
            ExerciseCategory::Barbell,
            BodyPart::Chest,
        )];
        store.save_catalog(&catalog).unwrap();

        let found = store.find_exercise_type("bench press").unwrap();
        assert_eq!(found.unwrap().id, "bench_press__barbell");
        assert!(store.find_exercise_type("leg press").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_template() {
        let (_temp_dir, mut store) = test_store();
        let template = test_template();

        store.save_template(&template).unwrap();
        let loaded = store.load_template("Push Day").unwrap().unwrap();
        assert_eq!(loaded, template);
    }

    #[test]
    fn test_load_template_survives_cache_clear() {
        let (_temp_dir, mut store) = test_store();
        store.save_template(&test_template()).unwrap();

        store.clear_cache();
        let loaded = store.load_template("Push Day").unwrap();
        assert!(loaded.is_some());
    }

    #[test]
    fn test_save_template_rejects_invalid() {
        let (_temp_dir, mut store) = test_store();
        let template = WorkoutTemplate::new("   ", "");

        let result = store.save_template(&template);
        assert!(matches!(
            result,
            Err(LiftlogError::TemplateValidationError { .. })
        ));
    }

    #[test]
    fn test_list_templates_sorted_by_name() {
        let (_temp_dir, mut store) = test_store();
        store
            .save_template(&WorkoutTemplate::new("Pull Day", ""))
            .unwrap();
        store
            .save_template(&WorkoutTemplate::new("Leg Day", ""))
            .unwrap();
        store
            .save_template(&WorkoutTemplate::new("push day", ""))
            .unwrap();

        let names: Vec<String> = store
            .list_templates()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Leg Day", "Pull Day", "push day"]);
    }

    #[test]
    fn test_delete_template() {
        let (_temp_dir, mut store) = test_store();
        store.save_template(&test_template()).unwrap();
        assert!(store.template_exists("Push Day").unwrap());

        store.delete_template("Push Day").unwrap();
        assert!(!store.template_exists("Push Day").unwrap());
        assert!(store.load_template("Push Day").unwrap().is_none());
    }

    #[test]
    fn test_history_appends_and_lists_newest_first() {
        let (_temp_dir, mut store) = test_store();
        store.append_record(&test_record(1, "bench_press__barbell")).unwrap();
        store.append_record(&test_record(15, "bench_press__barbell")).unwrap();
        store.append_record(&test_record(8, "bench_press__barbell")).unwrap();

        let records = store.list_records().unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[0].performed_at > records[1].performed_at);
        assert!(records[1].performed_at > records[2].performed_at);
    }

    #[test]
    fn test_empty_history_is_not_an_error() {
        let (_temp_dir, store) = test_store();
        assert!(store.list_records().unwrap().is_empty());
        assert!(store.exercise_history("anything").unwrap().is_empty());
    }

    #[test]
    fn test_exercise_history_filters_by_type() {
        let (_temp_dir, mut store) = test_store();
        store.append_record(&test_record(1, "bench_press__barbell")).unwrap();
        store.append_record(&test_record(8, "back_squat__barbell")).unwrap();
        store.append_record(&test_record(15, "bench_press__barbell")).unwrap();

        let history = store.exercise_history("bench_press__barbell").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].recorded_at > history[1].recorded_at);
        assert!(history
            .iter()
            .all(|e| e.exercise_type_id == "bench_press__barbell"));
    }
}
