use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use picplus::batch::OperationMode;
use picplus::router::route;
use picplus::sniff::SniffedFormat;
use picplus::strategy::resolve_strategies;
use std::io::Cursor;
use std::path::Path;

fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn bench_sniffing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sniffing");

    let samples: &[(&str, &[u8])] = &[
        ("png", &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0]),
        ("jpeg", &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, 0, 0, 0, 0, 0, 0]),
        ("webp", b"RIFF\x10\x00\x00\x00WEBP"),
        ("unknown", b"hello world!"),
    ];

    for (name, prefix) in samples {
        group.bench_with_input(BenchmarkId::new("detect", name), prefix, |b, prefix| {
            b.iter(|| SniffedFormat::detect(black_box(prefix)))
        });
    }

    group.finish();
}

fn bench_strategy_resolution(c: &mut Criterion) {
    c.bench_function("strategy_resolution_default_set", |b| {
        b.iter(|| resolve_strategies(black_box(&[]), black_box(80)))
    });
}

fn bench_routing(c: &mut Criterion) {
    c.bench_function("routing", |b| {
        b.iter(|| {
            route(
                black_box(OperationMode::Compress),
                black_box(4),
                black_box(Some(Path::new("out"))),
                black_box(false),
            )
        })
    });
}

fn bench_png_optimization(c: &mut Criterion) {
    let strategies = resolve_strategies(&["optipng".to_string()], 80).unwrap();
    let png = encoded_png(64, 64);

    c.bench_function("optipng_strategy_64x64", |b| {
        b.iter(|| strategies[0].compress(black_box(&png)))
    });
}

fn bench_jpeg_transcode(c: &mut Criterion) {
    let strategies = resolve_strategies(&["jpegtran".to_string()], 80).unwrap();
    let img = image::DynamicImage::new_rgb8(64, 64);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Jpeg).unwrap();
    let jpeg = out.into_inner();

    c.bench_function("jpegtran_strategy_64x64", |b| {
        b.iter(|| strategies[0].compress(black_box(&jpeg)))
    });
}

criterion_group!(
    benches,
    bench_sniffing,
    bench_strategy_resolution,
    bench_routing,
    bench_png_optimization,
    bench_jpeg_transcode
);
criterion_main!(benches);
