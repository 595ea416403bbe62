// Criterion benchmarks for the NutriAI relay's local rules

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nutri_relay::core::{summarize, AdviceEngine};
use nutri_relay::models::{ClassificationResult, Prediction, ProfileField, SummaryRequest, RECOGNITION_THRESHOLD};

fn create_predictions(count: usize) -> ClassificationResult {
    ClassificationResult {
        predictions: (0..count)
            .map(|i| Prediction {
                tag_name: format!("label-{}", i),
                probability: (i % 100) as f64 / 100.0,
            })
            .collect(),
    }
}

fn bench_recognition(c: &mut Criterion) {
    let mut group = c.benchmark_group("recognition");

    for size in [10, 100, 1000].iter() {
        let result = create_predictions(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(&result).labels_above(black_box(RECOGNITION_THRESHOLD)))
        });
    }

    group.finish();
}

fn bench_advice(c: &mut Criterion) {
    let engine = AdviceEngine::default();
    let mut group = c.benchmark_group("advice");

    for size in [1, 10, 100].iter() {
        let mut items: Vec<String> = (0..*size).map(|i| format!("label-{}", i)).collect();
        items.push("pomme".to_string());

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| engine.advise(black_box(items.as_slice())))
        });
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let req = SummaryRequest {
        goal: Some(ProfileField::Text("perdre du poids".to_string())),
        allergies: Some(ProfileField::List(vec!["gluten".to_string(), "lactose".to_string()])),
        preferences: None,
    };

    c.bench_function("summary", |b| b.iter(|| summarize(black_box(&req))));
}

criterion_group!(benches, bench_recognition, bench_advice, bench_summary);
criterion_main!(benches);
