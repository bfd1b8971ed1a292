use criterion::{black_box, criterion_group, criterion_main, Criterion};
use termpie::{Category, PieChart};

fn sample_data() -> Vec<Category> {
    vec![
        Category::new("Rust", "cyan", 44.0),
        Category::new("Go", "magenta", 26.5),
        Category::new("Python", "yellow", 17.5),
        Category::new("Shell", "green", 8.0),
        Category::new("TypeScript", "blue", 3.0),
        Category::new("Other", "red", 1.0),
    ]
}

fn bench_render(c: &mut Criterion) {
    let mut small = PieChart::new(5).with_data(sample_data());
    c.bench_function("render_radius_5", |b| b.iter(|| black_box(small.render())));

    let mut large = PieChart::new(20).with_data(sample_data());
    c.bench_function("render_radius_20", |b| b.iter(|| black_box(large.render())));
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
