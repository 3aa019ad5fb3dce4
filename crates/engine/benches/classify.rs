use adoc_tally_engine::census::constructs::SourceTable;
use adoc_tally_engine::census::source::classify_source;
use adoc_tally_engine::config::ClassifierConfig;
use adoc_tally_engine::processor::LineTally;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Cursor;

fn sample_document() -> String {
    let section = "== Section\n:toc: left\n\n// note\nSome *bold* text with `code`.\n\
                   * item one\n* [x] done\nNOTE: careful\nhttps://example.com[link]\n\n";
    section.repeat(200)
}

fn bench_line_tally(c: &mut Criterion) {
    let doc = sample_document();
    let config = ClassifierConfig::default();
    c.bench_function("line_tally_2k_lines", |b| {
        b.iter(|| {
            let tally = LineTally::read_from(&mut Cursor::new(black_box(doc.as_bytes())), &config)
                .unwrap();
            black_box(tally.counts);
        })
    });
}

fn bench_source_census(c: &mut Criterion) {
    let doc = sample_document();
    let table = SourceTable::asciidoc().unwrap();
    c.bench_function("source_census_2k_lines", |b| {
        b.iter(|| black_box(classify_source(black_box(&doc), "bench", &table)))
    });
}

criterion_group!(benches, bench_line_tally, bench_source_census);
criterion_main!(benches);
