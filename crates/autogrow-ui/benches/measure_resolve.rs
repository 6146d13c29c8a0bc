use autogrow_foundation::HeightBounds;
use autogrow_ui::{MonospacedTextMeasurer, TextMeasurer};
use autogrow_ui_graphics::FontSpec;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CONTENT_WIDTH: f32 = 343.0;
const PARAGRAPH_SAMPLES: &[usize] = &[1, 8, 64];

fn note(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|index| format!("Paragraph {index} keeps going with a few more words to wrap"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_measure_resolve(c: &mut Criterion) {
    let font = FontSpec::default();
    let bounds = HeightBounds::REFERENCE;
    let mut group = c.benchmark_group("measure_resolve");

    for &paragraphs in PARAGRAPH_SAMPLES {
        let text = note(paragraphs);
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| {
                let metrics = MonospacedTextMeasurer.measure(black_box(text), CONTENT_WIDTH, &font);
                black_box(bounds.resolve(metrics.height))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_measure_resolve);
criterion_main!(benches);
