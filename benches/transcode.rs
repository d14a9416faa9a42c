use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn corpus(name: &str) -> String {
    match name {
        "ascii" => "The quick brown fox jumps over the lazy dog. ".repeat(512),
        "latin" => "Le cœur déçu mais l'âme plutôt naïve, Louÿs rêva. ".repeat(512),
        "cjk" => "色は匂へど散りぬるを我が世誰ぞ常ならむ有為の奥山今日越えて ".repeat(512),
        "emoji" => "🦀🚀😀 mixed with ascii and 漢字 🎉 ".repeat(512),
        _ => unreachable!(),
    }
}

fn bench_validate_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_utf8");
    for name in ["ascii", "latin", "cjk", "emoji"] {
        let data = corpus(name);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| yutf::validate_utf8(black_box(data.as_bytes())))
        });
    }
    group.finish();
}

fn bench_utf8_to_utf16(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8_to_utf16le");
    for name in ["ascii", "latin", "cjk", "emoji"] {
        let data = corpus(name);
        let mut dst = vec![0u16; yutf::utf16_length_from_utf8(data.as_bytes())];
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| yutf::convert_utf8_to_utf16le(black_box(data.as_bytes()), &mut dst))
        });
    }
    group.finish();
}

fn bench_utf8_to_utf16_valid(c: &mut Criterion) {
    let mut group = c.benchmark_group("valid_utf8_to_utf16le");
    for name in ["ascii", "emoji"] {
        let data = corpus(name);
        let mut dst = vec![0u16; yutf::utf16_length_from_utf8(data.as_bytes())];
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| yutf::convert_valid_utf8_to_utf16le(black_box(data.as_bytes()), &mut dst))
        });
    }
    group.finish();
}

fn bench_utf16_to_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf16le_to_utf8");
    for name in ["ascii", "cjk"] {
        let units: Vec<u16> = corpus(name).encode_utf16().collect();
        let mut dst = vec![0u8; yutf::utf8_length_from_utf16le(&units)];
        group.throughput(Throughput::Bytes((units.len() * 2) as u64));
        group.bench_function(name, |b| {
            b.iter(|| yutf::convert_utf16le_to_utf8(black_box(&units), &mut dst))
        });
    }
    group.finish();
}

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_utf8");
    for name in ["ascii", "cjk"] {
        let data = corpus(name);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| yutf::count_utf8(black_box(data.as_bytes())))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_validate_utf8,
    bench_utf8_to_utf16,
    bench_utf8_to_utf16_valid,
    bench_utf16_to_utf8,
    bench_count
);
criterion_main!(benches);
