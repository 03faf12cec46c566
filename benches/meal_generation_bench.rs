// ABOUTME: Criterion benchmarks for the meal plan pipeline
// ABOUTME: Measures filtering, evolutionary selection, and end-to-end generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitness Companion Contributors

//! Criterion benchmarks for meal plan generation.
//!
//! Measures the preference filter, the index-triple search across candidate
//! list sizes, and a full generate call over the standard catalog.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use companion_core::models::{MealPreferences, MealRecord, MealTag};
use companion_intelligence::meals::filter::candidates_for;
use companion_intelligence::{EvolutionarySelector, MealCatalog, MealPlanGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn synthetic_candidates(count: usize) -> Vec<MealRecord> {
    (0..count)
        .map(|index| {
            MealRecord::new(
                format!("Bench Meal {index}"),
                &[MealTag::Vegetarian, MealTag::StayFit, MealTag::Adult],
            )
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let catalog = MealCatalog::standard();
    let strict = MealPreferences::new("adult", "vegetarian", "weight_loss");
    let relaxed = MealPreferences::new("young", "vegetarian", "stay_fit");

    let mut group = c.benchmark_group("meal_filter");
    group.bench_function("strict_match", |b| {
        b.iter(|| candidates_for(black_box(&catalog), black_box(&strict)));
    });
    group.bench_function("fallback_match", |b| {
        b.iter(|| candidates_for(black_box(&catalog), black_box(&relaxed)));
    });
    group.finish();
}

fn bench_selector(c: &mut Criterion) {
    let selector = EvolutionarySelector::default();
    let mut group = c.benchmark_group("meal_selector");

    for count in [0_usize, 2, 9, 40] {
        let meals = synthetic_candidates(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("select", count), &meals, |b, meals| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| selector.select(black_box(meals), black_box("stay_fit"), &mut rng));
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let generator = MealPlanGenerator::default();
    let prefs = MealPreferences::new("adult", "vegetarian", "stay_fit");

    c.bench_function("generate_meal_plan", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| generator.generate_with_rng(black_box(&prefs), &mut rng));
    });
}

criterion_group!(benches, bench_filter, bench_selector, bench_generate);
criterion_main!(benches);
