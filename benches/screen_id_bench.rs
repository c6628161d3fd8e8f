use criterion::{black_box, criterion_group, criterion_main, Criterion};
use screen_image_generator::{resolve_options, FunctionalCode, ScreenIdResolver};
use std::time::Duration;

// Fast settings for all benchmarks
fn configure_fast_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_millis(500));
    group.sample_size(20);
}

fn benchmark_screen_id_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen_id");
    configure_fast_group(&mut group);

    let resolver = ScreenIdResolver::default();
    let filenames = vec![
        "01_task_list.html",
        "10_custom_feature.html",
        "11_category_edit.html",
        "task_done.html",
    ];

    group.bench_function("table_hit", |b| {
        b.iter(|| black_box(resolver.resolve(black_box("03_task_detail.html"))));
    });

    group.bench_function("mixed", |b| {
        b.iter(|| {
            for filename in &filenames {
                black_box(resolver.resolve(filename));
            }
        });
    });

    group.bench_function("classify", |b| {
        b.iter(|| black_box(FunctionalCode::classify(black_box("category_edit"))));
    });

    group.finish();
}

fn benchmark_option_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");
    configure_fast_group(&mut group);

    let args = [
        "screen-image-generator",
        "--file",
        "01_task_list.html",
        "--unknown",
        "--scale",
        "2",
        "--fullpage",
    ];

    group.bench_function("resolve", |b| {
        b.iter(|| {
            let cli = resolve_options(args.iter().copied());
            let _ = black_box(cli);
        });
    });

    group.finish();
}

criterion_group!(unit_benches, benchmark_screen_id_resolution, benchmark_option_resolution);
criterion_main!(unit_benches);
