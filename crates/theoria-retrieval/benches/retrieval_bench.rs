use criterion::{criterion_group, criterion_main, Criterion};

use theoria_core::config::RetrievalConfig;
use theoria_core::models::{Document, Passage, SearchRequest};
use theoria_core::traits::IEmbeddingService;
use theoria_embeddings::HashingEmbedder;
use theoria_retrieval::RetrievalEngine;
use theoria_storage::StorageEngine;

const WORDS: &[&str] = &[
    "grace", "faith", "works", "love", "hope", "law", "gospel", "church", "covenant", "mercy",
    "spirit", "kingdom",
];

/// 1K passages across 20 documents, every passage embedded.
fn build_corpus(native: bool, embedder: &HashingEmbedder) -> StorageEngine {
    let storage = StorageEngine::open_in_memory(native).unwrap();
    for d in 0..20 {
        storage
            .insert_document(&Document {
                id: format!("doc-{d}"),
                title: Some(format!("Volume {d}")),
                collection: Some("Bench".into()),
                authors: vec![format!("Author {}", d % 5)],
                source_type: None,
                theological_tradition: None,
                topic_domains: vec![WORDS[d % WORDS.len()].into()],
            })
            .unwrap();
    }
    for i in 0..1_000 {
        let text: Vec<&str> = (0..24).map(|j| WORDS[(i * 7 + j * 3) % WORDS.len()]).collect();
        let passage = Passage {
            id: format!("p{i}"),
            document_id: format!("doc-{}", i % 20),
            text: text.join(" "),
            osis_ref: Some(format!("Ps.{}.{}", i % 150 + 1, i % 20 + 1)),
            page_no: None,
            start_char: None,
            end_char: None,
            keywords: vec![WORDS[i % WORDS.len()].into()],
        };
        let embedding = embedder.embed(&[passage.text.clone()]).unwrap().remove(0);
        storage.insert_passage(&passage, Some(&embedding)).unwrap();
    }
    storage
}

fn bench_fallback(c: &mut Criterion) {
    let embedder = HashingEmbedder::new(Some(128));
    let storage = build_corpus(false, &embedder);
    let engine = RetrievalEngine::new(RetrievalConfig::default());
    let request = SearchRequest::for_query("grace and mercy").with_osis("Ps.23");

    c.bench_function("fallback_search_1k_passages", |b| {
        b.iter(|| engine.hybrid_search(&storage, &request).unwrap());
    });
}

fn bench_native(c: &mut Criterion) {
    let embedder = HashingEmbedder::new(Some(128));
    let storage = build_corpus(true, &embedder);
    let engine = RetrievalEngine::new(RetrievalConfig::default()).with_embeddings(&embedder);
    let request = SearchRequest::for_query("grace and mercy").with_osis("Ps.23");

    c.bench_function("native_search_1k_passages", |b| {
        b.iter(|| engine.hybrid_search(&storage, &request).unwrap());
    });
}

criterion_group!(benches, bench_fallback, bench_native);
criterion_main!(benches);
