use criterion::{black_box, criterion_group, criterion_main, Criterion};
use snip_core::tokenizer;

fn bench_tokenize(c: &mut Criterion) {
    let text = "The aquarium visit started early. Running past tanks of \
                birds, fish, and other specimens, we counted well over \
                forty distinct species before lunch."
        .repeat(64);
    c.bench_function("tokenize_words", |b| {
        b.iter(|| tokenizer::words(black_box(&text)))
    });
    c.bench_function("count_words", |b| {
        b.iter(|| tokenizer::count_words(black_box(&text)))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
