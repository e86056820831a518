// Performance benchmarks for corpus indexing and query matching
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use faqmatch_core::{Corpus, KnowledgeRecord, Matcher, MatcherConfig};
use std::sync::Arc;

const TOPICS: &[&str] = &[
    "examination", "registration", "certificate", "transcript", "revaluation", "attendance",
    "malpractice", "duplicate", "attestation", "convocation", "semester", "hall ticket",
];

const QUERIES: &[&str] = &[
    "exm fee",
    "How do I regstr?",
    "provisional certifcate",
    "I lost my certificate, what do I do?",
    "revalution",
    "how do i get it",
];

fn generate_corpus(size: usize) -> Corpus {
    let groups = TOPICS.iter().map(|topic| {
        let records = (0..size / TOPICS.len())
            .map(|i| {
                KnowledgeRecord::new(
                    format!("What is the {} rule number {} for semester {}?", topic, i, i % 8),
                    format!("Answer {} about {}.", i, topic),
                )
            })
            .collect();
        (topic.to_string(), records)
    });
    Corpus::from_categories(groups)
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [120, 1200, 12000].iter() {
        group.bench_with_input(BenchmarkId::new("matcher", size), size, |b, &size| {
            let corpus = generate_corpus(size);
            b.iter(|| Matcher::new(black_box(corpus.clone()), MatcherConfig::default()).unwrap());
        });
    }

    group.finish();
}

fn benchmark_find_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_match");

    for size in [120, 1200, 12000].iter() {
        let matcher = Matcher::new(generate_corpus(*size), MatcherConfig::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("mixed", size), size, |b, _| {
            b.iter(|| {
                for query in QUERIES {
                    black_box(matcher.find_match(black_box(query)).unwrap());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_concurrent_queries(c: &mut Criterion) {
    let matcher = Arc::new(Matcher::new(generate_corpus(1200), MatcherConfig::default()).unwrap());

    c.bench_function("concurrent_find_match", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let matcher = Arc::clone(&matcher);
                    std::thread::spawn(move || {
                        for query in QUERIES {
                            black_box(matcher.find_match(query).unwrap().is_match());
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    });
}

criterion_group!(benches, benchmark_build, benchmark_find_match, benchmark_concurrent_queries);
criterion_main!(benches);
