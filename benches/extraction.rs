//! Extraction benchmark: content → 5-slot vector, small and large inputs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use webshell_trainer::features::FeatureExtractor;

const SHELL_LINE: &str =
    "<?php if(isset($_POST['c'])){ eval(base64_decode($_POST['c'])); chmod(__FILE__, 0777); } ?>\n";
const PAGE_LINE: &str = "<div class=\"row\"><?php echo htmlspecialchars($title); ?></div>\n";

fn bench_extract_small(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    c.bench_function("extract_webshell_line", |b| {
        b.iter(|| extractor.extract(black_box(SHELL_LINE)))
    });
}

fn bench_extract_by_size(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    let mut g = c.benchmark_group("extract_by_lines");
    for lines in [100usize, 1_000, 10_000] {
        let content: String = (0..lines)
            .map(|i| if i % 50 == 0 { SHELL_LINE } else { PAGE_LINE })
            .collect();
        g.bench_function(format!("lines_{}", lines).as_str(), |b| {
            b.iter(|| extractor.extract(black_box(&content)))
        });
    }
    g.finish();
}

fn bench_extract_lossy_bytes(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    let mut bytes = SHELL_LINE.repeat(200).into_bytes();
    bytes.extend_from_slice(&[0xff, 0xfe, 0x00]);
    c.bench_function("extract_lossy_bytes", |b| {
        b.iter(|| extractor.extract_bytes(black_box(&bytes)))
    });
}

criterion_group!(
    benches,
    bench_extract_small,
    bench_extract_by_size,
    bench_extract_lossy_bytes
);
criterion_main!(benches);
