use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sg_core::pattern::CompiledPattern;
use sg_core::script::{is_eligible, Metadata};

const URLS: &[&str] = &[
    "https://www.example.com/page",
    "https://example.com/admin/settings?tab=users",
    "https://cdn.static.test/assets/app.js",
    "http://localhost:8080/",
    "about:blank",
];

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_pattern", |b| {
        b.iter(|| CompiledPattern::compile(black_box("*://*.example.com/*")))
    });
}

fn bench_eligibility(c: &mut Criterion) {
    let mut metadata = Metadata::new();
    metadata.insert("match", "*://*/*");
    metadata.insert("match", "https://*.static.test/*");
    metadata.insert("exclude", "*://example.com/admin/*");
    let matches: Vec<_> = metadata.matches().iter().map(|p| CompiledPattern::compile(p)).collect();
    let excludes: Vec<_> = metadata.excludes().iter().map(|p| CompiledPattern::compile(p)).collect();

    c.bench_function("is_eligible", |b| {
        b.iter(|| {
            for url in URLS {
                black_box(is_eligible(&matches, &excludes, black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_compile, bench_eligibility);
criterion_main!(benches);
