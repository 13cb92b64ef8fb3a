use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jobly::{EntityKind, FieldMap, Fields, compile_filter, compile_update};

/// `n` fields named col0, col1, ... with integer values.
fn build_fields(n: usize) -> Fields {
    (0..n).map(|i| (format!("col{i}"), i as i64)).collect()
}

fn bench_compile_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("clause/compile_update");
    let map = FieldMap::quoted(&[("col0", "column_zero"), ("col1", "column_one")]);

    for n in [1, 5, 10, 50] {
        let fields = build_fields(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &fields, |b, fields| {
            b.iter(|| black_box(compile_update(fields, &map).unwrap()));
        });
    }

    group.finish();
}

fn bench_compile_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("clause/compile_filter");

    let organization = Fields::new()
        .with("name", "tech")
        .with("minEmployees", 10)
        .with("maxEmployees", 500);
    group.bench_function("organization", |b| {
        b.iter(|| black_box(compile_filter(&organization, EntityKind::Organization).unwrap()));
    });

    let posting = Fields::new()
        .with("title", "engineer")
        .with("minSalary", 90_000)
        .with("hasEquity", true);
    group.bench_function("posting", |b| {
        b.iter(|| black_box(compile_filter(&posting, EntityKind::Posting).unwrap()));
    });

    // Mostly unrecognized keys exercise the skip path.
    let noisy = build_fields(20).with("name", "tech");
    group.bench_function("organization_unknown_keys", |b| {
        b.iter(|| black_box(compile_filter(&noisy, EntityKind::Organization).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_compile_update, bench_compile_filter);
criterion_main!(benches);
