use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sitelex_core::{AuditConfig, CorpusStats, DocumentKind, Stopwords, ngrams, strip_body, tokenize};

const PARAGRAPH: &str = "Static sites are fast because every page is rendered ahead of time. \
    Edge caches store the rendered pages close to readers, and a deploy purges stale copies. \
    Bundlers combine modules into fewer files so browsers download less code. ";

fn markdown_page(paragraphs: usize) -> String {
    format!(
        "---\ntitle: Benchmark Page\ndescription: Synthetic page used for benchmarks.\n---\n# Benchmark\n\n{}\n```sh\nnpm run build\n```\n",
        PARAGRAPH.repeat(paragraphs)
    )
}

fn bench_tokenize(c: &mut Criterion) {
    let stopwords = Stopwords::english();
    let mut group = c.benchmark_group("tokenize");

    for paragraphs in [1, 10, 100] {
        let body = strip_body(DocumentKind::Markdown, &markdown_page(paragraphs));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &body, |b, body| {
            b.iter(|| tokenize(black_box(body), &stopwords))
        });
    }

    group.finish();
}

fn bench_strip_body(c: &mut Criterion) {
    let page = markdown_page(50);
    c.bench_function("strip_body_markdown", |b| b.iter(|| strip_body(DocumentKind::Markdown, black_box(&page))));
}

fn bench_tfidf(c: &mut Criterion) {
    let stopwords = Stopwords::english();
    let config = AuditConfig::default();
    let corpus: Vec<Vec<String>> = (0..200)
        .map(|i| {
            let mut tokens = tokenize(&PARAGRAPH.repeat(1 + i % 7), &stopwords);
            tokens.push(format!("topic{}", i % 13));
            tokens
        })
        .collect();
    let bigrams: Vec<Vec<String>> = corpus.iter().map(|doc| ngrams(doc, 2)).collect();

    let mut group = c.benchmark_group("tfidf");

    group.bench_function("build_unigrams", |b| {
        b.iter(|| CorpusStats::build(black_box(&corpus), config.min_doc_freq))
    });

    group.bench_function("build_bigrams", |b| {
        b.iter(|| CorpusStats::build(black_box(&bigrams), config.min_doc_freq))
    });

    let stats = CorpusStats::build(&corpus, config.min_doc_freq);
    group.bench_function("rank_corpus", |b| b.iter(|| stats.rank_corpus(black_box(config.top_terms))));
    group.bench_function("rank_document", |b| {
        b.iter(|| {
            (0..stats.doc_count()).map(|i| stats.rank_document(i, config.keywords_per_document).len()).sum::<usize>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_strip_body, bench_tfidf);
criterion_main!(benches);
