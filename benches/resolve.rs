use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pipeline_scheduler::{
    fingerprint, resolve, Presubmit, Presubmits, ReplaceableMapOfStringString,
    ReplaceableSliceOfStrings, SchedulerSpec,
};

/// A layer with `jobs` presubmits, half of them shared with every other layer.
fn make_layer(depth: usize, jobs: usize) -> SchedulerSpec {
    let items = (0..jobs)
        .map(|i| {
            let name = if i % 2 == 0 {
                format!("shared-{i}")
            } else {
                format!("layer{depth}-{i}")
            };
            let mut job = Presubmit::named(name).with_context(format!("ctx-{depth}-{i}"));
            job.job.labels = Some(ReplaceableMapOfStringString::new([(
                format!("layer{depth}"),
                "true".to_string(),
            )]));
            job
        })
        .collect();

    SchedulerSpec {
        plugins: Some(ReplaceableSliceOfStrings::new(
            (0..16).map(|i| format!("plugin-{}", (i + depth) % 24)),
        )),
        presubmits: Some(Presubmits {
            items,
            replace: false,
        }),
        ..SchedulerSpec::default()
    }
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for jobs in [8usize, 64, 256] {
        let layers: Vec<_> = (0..4).map(|depth| make_layer(depth, jobs)).collect();
        group.throughput(Throughput::Elements(jobs as u64));
        group.bench_with_input(BenchmarkId::new("four_layers", jobs), &layers, |b, layers| {
            b.iter(|| resolve(black_box(layers)).unwrap());
        });
    }
    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let layers: Vec<_> = (0..4).map(|depth| make_layer(depth, 64)).collect();
    let resolved = resolve(&layers).unwrap();
    c.bench_function("fingerprint/64_jobs", |b| {
        b.iter(|| fingerprint(black_box(&resolved)).unwrap());
    });
}

criterion_group!(benches, bench_resolve, bench_fingerprint);
criterion_main!(benches);
