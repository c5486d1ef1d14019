use criterion::{criterion_group, criterion_main, Criterion};
use notegrep_core::tokenizer::tokenize;

const SAMPLE: &str = r#"# Weekly review

Shipped the indexing queue rewrite, the worker now drains one document at
a time and the store transaction covers postings and metadata together.

- follow up on the #search-quality thread
- don't forget the パフォーマンス numbers from Tuesday
- benchmark TF-IDF scoring against the 2024 corpus (1234 documents)

Open questions: should the highlighter cap context lines per match, and
how do #multi-word-tags interact with stopword removal?
"#;

fn bench_tokenize(c: &mut Criterion) {
    let text = SAMPLE.repeat(50);
    c.bench_function("tokenize_notes", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
