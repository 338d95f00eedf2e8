use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use persons_core::PersonPatch;
use persons_infra::persons::build_update;

fn patches() -> Vec<(&'static str, PersonPatch)> {
    vec![
        ("empty", PersonPatch::new(1)),
        ("age_only", PersonPatch::new(1).age(23)),
        (
            "all_fields",
            PersonPatch::new(1)
                .name("Johnny")
                .age(22)
                .address("Moscow, Red Square")
                .work("Yandex"),
        ),
    ]
}

fn bench_build_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_update");
    for (label, patch) in patches() {
        group.bench_with_input(BenchmarkId::from_parameter(label), &patch, |b, patch| {
            b.iter(|| build_update(black_box(patch)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_update);
criterion_main!(benches);
