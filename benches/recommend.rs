use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dinerec::prelude::*;

#[path = "../tests/common/mod.rs"]
mod common;

fn bench_recommend(c: &mut Criterion) {
    let fixture = common::Fixture::new();
    let ctx = AppContext::load(&fixture.config()).expect("fixture loads");
    let recommender = Recommender::new(&ctx);

    let mut group = c.benchmark_group("recommend");
    for method in DistanceMethod::ALL {
        let selection = common::selection(common::DRAGON_WOK, method);
        group.bench_with_input(
            BenchmarkId::from_parameter(method),
            &selection,
            |b, selection| b.iter(|| recommender.recommend(black_box(selection))),
        );
    }
    group.finish();
}

fn bench_options(c: &mut Criterion) {
    let fixture = common::Fixture::new();
    let ctx = AppContext::load(&fixture.config()).expect("fixture loads");
    let state = FilterState::new()
        .with_city("Bangalore")
        .with_cuisine("Chinese")
        .with_rating(4.0)
        .with_rating_count(80.0);

    c.bench_function("available_options", |b| {
        b.iter(|| available_options(black_box(ctx.dataset()), black_box(&state)))
    });
}

criterion_group!(benches, bench_recommend, bench_options);
criterion_main!(benches);
