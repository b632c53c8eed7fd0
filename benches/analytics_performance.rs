use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use liftlog::analytics::{best_one_rep_max, personal_records, weight_progression};
use liftlog::workout::{ExerciseRecord, WeightType};

fn sample_history(sessions: usize) -> Vec<ExerciseRecord> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap();
    (0..sessions)
        .map(|i| ExerciseRecord {
            exercise_type_id: "bench_press__barbell".to_string(),
            exercise_name: "Bench Press".to_string(),
            index_position: 0,
            weight_type: WeightType::Lbs,
            reps_per_set: vec![10, 8, 6, 10],
            weights_per_set: vec![135.0, 145.0, 155.0, 135.0 + i as f64],
            note: String::new(),
            recorded_at: start + Duration::days(i as i64),
        })
        .collect()
}

fn bench_single_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_entry");

    let reps = vec![10u32, 8, 6, 10];
    let weights = vec![135.0, 145.0, 155.0, 135.0];

    group.bench_function("best_one_rep_max", |b| {
        b.iter(|| black_box(best_one_rep_max(&reps, &weights)));
    });

    group.finish();
}

fn bench_history_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_aggregation");

    for sessions in [52usize, 520] {
        let history = sample_history(sessions);

        group.bench_function(format!("personal_records_{}", sessions), |b| {
            b.iter(|| black_box(personal_records(&history)));
        });

        group.bench_function(format!("weight_progression_{}", sessions), |b| {
            b.iter(|| black_box(weight_progression(&history)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_entry, bench_history_aggregation);
criterion_main!(benches);
