// Live workout session state: the in-memory log of sets in progress
// while a workout is being performed. Owned by whoever drives the
// session (CLI, UI); nothing here touches disk.

use std::collections::HashMap;

use log::debug;

use crate::LiftlogError;
use crate::workout::WeightType;

/// In-progress performance of one exercise during an active session.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveExerciseState {
    /// Key into the session store, unique within a session
    pub exercise_instance_id: String,
    /// Reps entered per set
    pub reps_per_set: Vec<u32>,
    /// Weight entered per set. Always the same length as `reps_per_set`;
    /// every sequence-modifying operation updates both in lockstep.
    pub weights_per_set: Vec<f64>,
    /// Free-text note for the exercise
    pub note: String,
}

impl LiveExerciseState {
    pub fn set_count(&self) -> usize {
        self.reps_per_set.len()
    }
}

/// State store for the workout currently being performed.
///
/// The store is a plain constructible object handed to the layer driving
/// the session; mutations are synchronous and immediately visible to
/// subsequent reads. Each mutating operation comes in two flavors: the
/// default one silently ignores references to unknown exercises or
/// out-of-range set indices (an interactive caller has nothing useful to
/// do with that error mid-set), and a strict `try_` variant that reports
/// them as typed errors for call sites that want to know.
#[derive(Debug, Default)]
pub struct LiveWorkoutSession {
    live_exercises: HashMap<String, LiveExerciseState>,
    active_workout_id: Option<String>,
    preferred_weight_type: WeightType,
}

impl LiveWorkoutSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the live entry for an exercise. Re-initializing
    /// an existing id is an explicit last-write-wins contract, not an
    /// error. The seed slices are copied; the caller's buffers stay
    /// independent of the stored state.
    pub fn init_live_exercise(
        &mut self,
        exercise_instance_id: &str,
        initial_reps: &[u32],
        initial_weights: &[f64],
    ) {
        debug!(
            "initializing live exercise {} with {} sets",
            exercise_instance_id,
            initial_reps.len()
        );
        self.live_exercises.insert(
            exercise_instance_id.to_string(),
            LiveExerciseState {
                exercise_instance_id: exercise_instance_id.to_string(),
                reps_per_set: initial_reps.to_vec(),
                weights_per_set: initial_weights.to_vec(),
                note: String::new(),
            },
        );
    }

    /// Replace the rep count of one set. Unknown ids and out-of-range
    /// indices are ignored.
    pub fn update_set_reps(&mut self, exercise_instance_id: &str, set_index: usize, reps: u32) {
        let _ = self.try_update_set_reps(exercise_instance_id, set_index, reps);
    }

    pub fn try_update_set_reps(
        &mut self,
        exercise_instance_id: &str,
        set_index: usize,
        reps: u32,
    ) -> Result<(), LiftlogError> {
        let exercise = self.entry_mut(exercise_instance_id)?;
        let set_count = exercise.reps_per_set.len();
        let slot = exercise
            .reps_per_set
            .get_mut(set_index)
            .ok_or(LiftlogError::SetIndexOutOfRange {
                set_index,
                set_count,
            })?;
        *slot = reps;
        Ok(())
    }

    /// Replace the weight of one set. Unknown ids and out-of-range
    /// indices are ignored.
    pub fn update_set_weight(
        &mut self,
        exercise_instance_id: &str,
        set_index: usize,
        weight: f64,
    ) {
        let _ = self.try_update_set_weight(exercise_instance_id, set_index, weight);
    }

    pub fn try_update_set_weight(
        &mut self,
        exercise_instance_id: &str,
        set_index: usize,
        weight: f64,
    ) -> Result<(), LiftlogError> {
        let exercise = self.entry_mut(exercise_instance_id)?;
        let set_count = exercise.reps_per_set.len();
        let slot = exercise
            .weights_per_set
            .get_mut(set_index)
            .ok_or(LiftlogError::SetIndexOutOfRange {
                set_index,
                set_count,
            })?;
        *slot = weight;
        Ok(())
    }

    /// Append an empty set (0 reps, 0 weight) pending user entry. The new
    /// set deliberately does not copy the previous one.
    pub fn add_set(&mut self, exercise_instance_id: &str) {
        let _ = self.try_add_set(exercise_instance_id);
    }

    pub fn try_add_set(&mut self, exercise_instance_id: &str) -> Result<(), LiftlogError> {
        let exercise = self.entry_mut(exercise_instance_id)?;
        exercise.reps_per_set.push(0);
        exercise.weights_per_set.push(0.0);
        Ok(())
    }

    /// Remove one set from both sequences. The last remaining set is
    /// never removed; an exercise always keeps at least one set.
    pub fn remove_set(&mut self, exercise_instance_id: &str, set_index: usize) {
        let _ = self.try_remove_set(exercise_instance_id, set_index);
    }

    pub fn try_remove_set(
        &mut self,
        exercise_instance_id: &str,
        set_index: usize,
    ) -> Result<(), LiftlogError> {
        let exercise = self.entry_mut(exercise_instance_id)?;
        if exercise.reps_per_set.len() <= 1 {
            return Err(LiftlogError::CannotRemoveLastSet {
                exercise_instance_id: exercise_instance_id.to_string(),
            });
        }
        if set_index >= exercise.reps_per_set.len() {
            return Err(LiftlogError::SetIndexOutOfRange {
                set_index,
                set_count: exercise.reps_per_set.len(),
            });
        }
        exercise.reps_per_set.remove(set_index);
        exercise.weights_per_set.remove(set_index);
        Ok(())
    }

    /// Replace the exercise note. An empty string clears it.
    pub fn update_note(&mut self, exercise_instance_id: &str, note: &str) {
        let _ = self.try_update_note(exercise_instance_id, note);
    }

    pub fn try_update_note(
        &mut self,
        exercise_instance_id: &str,
        note: &str,
    ) -> Result<(), LiftlogError> {
        let exercise = self.entry_mut(exercise_instance_id)?;
        exercise.note = note.to_string();
        Ok(())
    }

    pub fn get_live_exercise(&self, exercise_instance_id: &str) -> Option<&LiveExerciseState> {
        self.live_exercises.get(exercise_instance_id)
    }

    /// Live entries in no particular order.
    pub fn live_exercises(&self) -> impl Iterator<Item = &LiveExerciseState> {
        self.live_exercises.values()
    }

    pub fn exercise_count(&self) -> usize {
        self.live_exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live_exercises.is_empty()
    }

    /// Drop every live entry and the active workout marker. Called once
    /// at session end, on save or discard; no entry outlives its session.
    pub fn clear_live_workout(&mut self) {
        debug!(
            "clearing live workout, dropping {} exercises",
            self.live_exercises.len()
        );
        self.live_exercises.clear();
        self.active_workout_id = None;
    }

    /// Identifier of the workout currently being logged, if any.
    pub fn active_workout_id(&self) -> Option<&str> {
        self.active_workout_id.as_deref()
    }

    pub fn set_active_workout_id(&mut self, workout_id: Option<String>) {
        self.active_workout_id = workout_id;
    }

    pub fn preferred_weight_type(&self) -> WeightType {
        self.preferred_weight_type
    }

    pub fn set_preferred_weight_type(&mut self, weight_type: WeightType) {
        self.preferred_weight_type = weight_type;
    }

    fn entry_mut(
        &mut self,
        exercise_instance_id: &str,
    ) -> Result<&mut LiveExerciseState, LiftlogError> {
        self.live_exercises
            .get_mut(exercise_instance_id)
            .ok_or_else(|| LiftlogError::ExerciseNotFound {
                exercise_instance_id: exercise_instance_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_live_exercise() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 10, 10], &[135.0, 135.0, 135.0]);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 10, 10]);
        assert_eq!(exercise.weights_per_set, vec![135.0, 135.0, 135.0]);
        assert_eq!(exercise.note, "");
    }

    #[test]
    fn test_init_copies_caller_buffers() {
        let mut session = LiveWorkoutSession::new();
        let mut reps = vec![10, 10];
        let mut weights = vec![135.0, 135.0];
        session.init_live_exercise("exercise-1", &reps, &weights);

        reps[0] = 1;
        weights[0] = 1.0;

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 10]);
        assert_eq!(exercise.weights_per_set, vec![135.0, 135.0]);
    }

    #[test]
    fn test_init_multiple_exercises_independently() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10], &[135.0]);
        session.init_live_exercise("exercise-2", &[8], &[155.0]);

        assert_eq!(
            session.get_live_exercise("exercise-1").unwrap().weights_per_set,
            vec![135.0]
        );
        assert_eq!(
            session.get_live_exercise("exercise-2").unwrap().weights_per_set,
            vec![155.0]
        );
    }

    #[test]
    fn test_reinit_overwrites_last_write_wins() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10], &[135.0]);
        session.init_live_exercise("exercise-1", &[5], &[200.0]);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![5]);
        assert_eq!(exercise.weights_per_set, vec![200.0]);
    }

    #[test]
    fn test_update_set_reps() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 10, 10], &[135.0, 135.0, 135.0]);
        session.update_set_reps("exercise-1", 1, 12);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 12, 10]);
    }

    #[test]
    fn test_update_set_weight() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 10, 10], &[135.0, 135.0, 135.0]);
        session.update_set_weight("exercise-1", 2, 150.0);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.weights_per_set, vec![135.0, 135.0, 150.0]);
    }

    #[test]
    fn test_mutations_on_unknown_id_are_no_ops() {
        let mut session = LiveWorkoutSession::new();
        session.update_set_reps("ghost", 0, 10);
        session.update_set_weight("ghost", 0, 100.0);
        session.add_set("ghost");
        session.remove_set("ghost", 0);
        session.update_note("ghost", "nothing");

        assert!(session.get_live_exercise("ghost").is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_a_no_op() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 10], &[135.0, 135.0]);

        session.update_set_reps("exercise-1", 5, 12);
        session.update_set_weight("exercise-1", 5, 150.0);
        session.remove_set("exercise-1", 5);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 10]);
        assert_eq!(exercise.weights_per_set, vec![135.0, 135.0]);
    }

    #[test]
    fn test_add_set_appends_zeros_to_both_sequences() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 10], &[135.0, 135.0]);
        session.add_set("exercise-1");

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 10, 0]);
        assert_eq!(exercise.weights_per_set, vec![135.0, 135.0, 0.0]);
    }

    #[test]
    fn test_remove_set_removes_from_both_sequences() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10, 12, 8], &[135.0, 140.0, 145.0]);
        session.remove_set("exercise-1", 1);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.reps_per_set, vec![10, 8]);
        assert_eq!(exercise.weights_per_set, vec![135.0, 145.0]);
    }

    #[test]
    fn test_remove_set_never_removes_the_last_set() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10], &[135.0]);
        session.remove_set("exercise-1", 0);

        let exercise = session.get_live_exercise("exercise-1").unwrap();
        assert_eq!(exercise.set_count(), 1);
    }

    #[test]
    fn test_update_note_and_clear_with_empty_string() {
        let mut session = LiveWorkoutSession::new();
        session.init_live_exercise("exercise-1", &[10], &[135.0]);

        session.update_note("exercise-1", "Felt strong today");
        assert_eq!(
            session.get_live_exercise("exercise-1").unwrap().note,
            "Felt strong today"
        );

        session.update_note("exercise-1", "");
        assert_eq!(session.get_live_exercise("exercise-1").unwrap().note, "");
    }

    #[test]
    fn test_clear_live_workout_drops_everything() {
        let mut session = LiveWorkoutSession::new();
        session.set_active_workout_id(Some("push_day".to_string()));
        session.init_live_exercise("exercise-1", &[10], &[135.0]);
        session.init_live_exercise("exercise-2", &[8], &[155.0]);

        session.clear_live_workout();

        assert!(session.get_live_exercise("exercise-1").is_none());
        assert!(session.get_live_exercise("exercise-2").is_none());
        assert!(session.is_empty());
        assert!(session.active_workout_id().is_none());
    }

    #[test]
    fn test_strict_variants_report_errors() {
        let mut session = LiveWorkoutSession::new();

        assert!(matches!(
            session.try_update_set_reps("ghost", 0, 10),
            Err(LiftlogError::ExerciseNotFound { .. })
        ));

        session.init_live_exercise("exercise-1", &[10], &[135.0]);
        assert!(matches!(
            session.try_update_set_weight("exercise-1", 3, 100.0),
            Err(LiftlogError::SetIndexOutOfRange { set_index: 3, .. })
        ));
        assert!(matches!(
            session.try_remove_set("exercise-1", 0),
            Err(LiftlogError::CannotRemoveLastSet { .. })
        ));
    }

    #[test]
    fn test_preferred_weight_type_defaults_to_lbs() {
        let session = LiveWorkoutSession::new();
        assert_eq!(session.preferred_weight_type(), WeightType::Lbs);
    }

    #[test]
    fn test_preferred_weight_type_can_switch() {
        let mut session = LiveWorkoutSession::new();
        session.set_preferred_weight_type(WeightType::Kg);
        assert_eq!(session.preferred_weight_type(), WeightType::Kg);
        session.set_preferred_weight_type(WeightType::Lbs);
        assert_eq!(session.preferred_weight_type(), WeightType::Lbs);
    }

    #[test]
    fn test_complete_workout_session_scenario() {
        let mut session = LiveWorkoutSession::new();
        session.set_active_workout_id(Some("push_day".to_string()));

        session.init_live_exercise("bench-press", &[10, 10, 10], &[135.0, 135.0, 135.0]);
        session.init_live_exercise("overhead-press", &[8, 8, 8], &[95.0, 95.0, 95.0]);

        session.update_set_weight("bench-press", 0, 140.0);
        session.update_set_reps("bench-press", 0, 8);
        session.update_set_weight("bench-press", 1, 145.0);
        session.update_set_reps("bench-press", 1, 6);

        session.add_set("bench-press");
        session.update_set_weight("bench-press", 3, 135.0);
        session.update_set_reps("bench-press", 3, 10);

        session.update_note("bench-press", "PR on second set!");

        let bench_press = session.get_live_exercise("bench-press").unwrap();
        assert_eq!(bench_press.reps_per_set, vec![8, 6, 10, 10]);
        assert_eq!(bench_press.weights_per_set, vec![140.0, 145.0, 135.0, 135.0]);
        assert_eq!(bench_press.note, "PR on second set!");

        session.clear_live_workout();
        assert!(session.get_live_exercise("bench-press").is_none());
    }
}
