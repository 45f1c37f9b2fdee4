//! Throughput of lexicon scanning over growing input texts.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use medjargon_core::{Lexicon, find_jargon_spans, tokenizer::tokenize};

const SENTENCE: &str = "Test results returned positive for chronic emphysema and an embolism. \
                        Patient reports shortness of breath; history of COPD and type 2 diabetes. ";

fn create_test_lexicon() -> Lexicon {
    Lexicon::from_entries([
        ("chronic emphysema", "C0034067"),
        ("embolism", "C0013922"),
        ("shortness of breath", "C0013404"),
        ("copd", "C0024117"),
        ("type 2 diabetes", "C0011860"),
        ("chronic obstructive pulmonary disease", "C0024117"),
    ])
    .unwrap()
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for repeat in [1, 10, 100].iter() {
        let text = SENTENCE.repeat(*repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| tokenize(black_box(text)));
        });
    }
    group.finish();
}

fn bench_find_jargon_spans(c: &mut Criterion) {
    let lexicon = create_test_lexicon();
    let mut group = c.benchmark_group("find_jargon_spans");
    for repeat in [1, 10, 100].iter() {
        let text = SENTENCE.repeat(*repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| find_jargon_spans(black_box(text), &lexicon));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_find_jargon_spans);
criterion_main!(benches);
