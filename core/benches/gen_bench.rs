use criterion::{Criterion, criterion_group, criterion_main};
use genbench_core::{fixtures, perf::catalogue};
use std::time::Duration;

// One Criterion group per catalogue group; only each case's measured region
// is timed (thread spawn and parameter fixtures stay outside).
fn bench_catalogue(c: &mut Criterion) {
    fixtures::init();
    for group in catalogue() {
        let mut bench_group = c.benchmark_group(group.key);
        if group.key == "sample" {
            bench_group.sample_size(10);
        }
        for case in group.cases {
            let case = *case;
            bench_group.bench_function(case.label(), move |b| {
                b.iter_custom(|iters| {
                    case.run(iters)
                        .expect("benchmark case failed")
                        .elapsed
                });
            });
        }
        bench_group.finish();
    }
}

criterion_group! {
    name = pipelines;
    config = Criterion::default().measurement_time(Duration::from_secs(3));
    targets = bench_catalogue
}
criterion_main!(pipelines);
