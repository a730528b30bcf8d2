use chart_layout::axis::{RangeOptions, compute_range};
use chart_layout::geometry::Rect;
use chart_layout::legend::{LegendConfig, LegendEntry, layout_legend};
use chart_layout::render::Color;
use chart_layout::text::CharGridMeasurer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn bench_compute_range_10k(c: &mut Criterion) {
    let values: Vec<f64> = (0..10_000)
        .map(|i| (i as f64 * 0.731).sin() * 500.0 + 500.0)
        .collect();
    let options = RangeOptions {
        start_from_zero: true,
        ..RangeOptions::default()
    };

    c.bench_function("compute_range_10k", |b| {
        b.iter(|| {
            let range = compute_range(black_box(&values), options).expect("valid range");
            black_box(range)
        })
    });
}

fn bench_legend_layout_1k(c: &mut Criterion) {
    let entries: Vec<LegendEntry> = (0..1_000)
        .map(|i| LegendEntry::new(format!("series-{i}"), Color::rgb(0.2, 0.4, 0.8), i))
        .collect();
    let bounds = Rect::new(0.0, 0.0, 800.0, 400.0);
    let config = LegendConfig::default();
    let measurer = CharGridMeasurer::default();

    c.bench_function("legend_layout_1k", |b| {
        b.iter(|| {
            let layout = layout_legend(black_box(&entries), bounds, &config, &measurer)
                .expect("valid layout");
            black_box(layout)
        })
    });
}

criterion_group!(benches, bench_compute_range_10k, bench_legend_layout_1k);
criterion_main!(benches);
