use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use flicker_core::EffectOptions;
use flicker_render::pipeline::RenderPipeline;

fn bench_render_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("flicker_render_pipeline");
    group.sample_size(10);

    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    for name in EffectOptions::NAMES {
        let Some(options) = EffectOptions::defaults(name) else {
            continue;
        };
        group.bench_function(format!("{}_defaults", name), |b| {
            b.iter(|| RenderPipeline::render(&options, now).unwrap());
        });
    }

    let countdown = EffectOptions::from_json(
        r#"{"effect": "countdown", "frames": 60, "kind": "rounded-ticks", "date": "2025-01-03T04:05:06.000Z"}"#,
    )
    .unwrap();
    group.bench_function("countdown_ticks_60_frames_encoded", |b| {
        b.iter(|| {
            let result = RenderPipeline::render(&countdown, now).unwrap();
            result.encode().unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render_pipeline);
criterion_main!(benches);
