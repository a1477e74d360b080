//! Criterion benchmarks for the schema library
//!
//! Same cases and fixtures as the bench-schema runner, measured with
//! criterion's statistics for cross-checking its ops/sec figures.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schema_bench::benchmark::FixtureKind;
use schema_bench::config::Preset;
use schema_bench::schema::Library;
use schema_bench::suites;

// ============================================================================
// Built-in suite
// ============================================================================

fn bench_builtin_suite(c: &mut Criterion) {
    let library = Library::current();
    let cases = suites::builtin();
    let mut group = c.benchmark_group("builtin");

    for case in &cases {
        let Ok(resolved) = case.resolve(&library) else {
            continue;
        };
        let Ok(trials) = resolved.trial_names() else {
            continue;
        };
        for (kind, name) in trials {
            let Some(input) = resolved.input(kind) else {
                continue;
            };
            group.bench_with_input(BenchmarkId::from_parameter(&name), input, |b, input| {
                b.iter(|| black_box(resolved.validate(black_box(input)).is_ok()));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Builds
// ============================================================================

fn bench_legacy_build(c: &mut Criterion) {
    let library = Library::with_version("1.4.0");
    let cases = suites::builtin();
    let mut group = c.benchmark_group("legacy_invalid");

    for case in &cases {
        let Ok(resolved) = case.resolve(&library) else {
            continue;
        };
        if let Some(input) = resolved.input(FixtureKind::Invalid) {
            group.bench_with_input(BenchmarkId::from_parameter(case.name.as_str()), input, |b, input| {
                b.iter(|| black_box(resolved.validate(black_box(input)).is_err()));
            });
        }
    }

    group.finish();
}

fn bench_config_load(c: &mut Criterion) {
    let yaml = r#"version: 1
preset: fast
threshold_pct: 5.0
trial:
  max_samples: 50
"#;
    c.bench_function("options_from_yaml", |b| {
        b.iter(|| black_box(schema_bench::benchmark::BenchmarkOptions::from_yaml_str(black_box(yaml))))
    });

    c.bench_function("trial_preset", |b| {
        b.iter(|| black_box(schema_bench::benchmark::TrialOptions::preset(black_box(Preset::Thorough))))
    });
}

criterion_group!(benches, bench_builtin_suite, bench_legacy_build, bench_config_load);
criterion_main!(benches);
