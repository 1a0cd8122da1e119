use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use theoria_core::config::RetrievalConfig;
use theoria_core::models::{Document, Passage, SearchFilters, SearchRequest, SearchResult};
use theoria_core::traits::IEmbeddingService;
use theoria_embeddings::HashingEmbedder;
use theoria_retrieval::guardrails;
use theoria_retrieval::lexical::{build_highlights, tokenize};
use theoria_retrieval::osis;
use theoria_retrieval::RetrievalEngine;
use theoria_storage::StorageEngine;

const WORDS: &[&str] = &["grace", "faith", "works", "love", "hope", "law", "gospel", "church"];
const REFS: &[&str] = &[
    "Gen.1.1",
    "Gen.1.2",
    "Gen.1",
    "John.3.16",
    "John.3.16-18",
    "John.3.36-4.2",
    "Rom.5",
    "Rom.5.8",
    "Ps.23",
];
const AUTHORS: &[&str] = &["Augustine", "Calvin", "Luther"];
const TOPICS: &[&str] = &["grace", "church", "law"];

fn documents() -> Vec<Document> {
    (0..3)
        .map(|i| Document {
            id: format!("doc-{i}"),
            title: Some(format!("Document {i}")),
            collection: Some(if i % 2 == 0 { "A" } else { "B" }.into()),
            authors: vec![AUTHORS[i].into()],
            source_type: None,
            theological_tradition: None,
            topic_domains: vec![TOPICS[i].into(), TOPICS[(i + 1) % 3].into()],
        })
        .collect()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 1..8).prop_map(|w| w.join(" "))
}

fn passages_strategy() -> impl Strategy<Value = Vec<Passage>> {
    prop::collection::vec(
        (
            0..3usize,
            text_strategy(),
            prop::option::of(prop::sample::select(REFS)),
            prop::collection::vec(prop::sample::select(WORDS), 0..2),
        ),
        1..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (doc, text, osis_ref, keywords))| Passage {
                id: format!("p{i}"),
                document_id: format!("doc-{doc}"),
                text,
                osis_ref: osis_ref.map(str::to_string),
                page_no: None,
                start_char: None,
                end_char: None,
                keywords: keywords.into_iter().map(str::to_string).collect(),
            })
            .collect()
    })
}

fn request_strategy() -> impl Strategy<Value = SearchRequest> {
    (
        prop::option::of(text_strategy()),
        prop::option::of(prop::sample::select(REFS)),
        prop::option::of(prop::sample::select(AUTHORS)),
        prop::option::of(prop::sample::select(TOPICS)),
        1..10usize,
    )
        .prop_map(|(query, osis, author, topic, k)| SearchRequest {
            query,
            osis: osis.map(str::to_string),
            filters: SearchFilters {
                author: author.map(str::to_string),
                topic_domain: topic.map(str::to_string),
                ..Default::default()
            },
            k,
            ..Default::default()
        })
}

fn seed(passages: &[Passage], native: bool, embedder: &HashingEmbedder) -> StorageEngine {
    let storage = StorageEngine::open_in_memory(native).unwrap();
    for document in documents() {
        storage.insert_document(&document).unwrap();
    }
    for passage in passages {
        let embedding = embedder.embed(&[passage.text.clone()]).unwrap().remove(0);
        storage.insert_passage(passage, Some(&embedding)).unwrap();
    }
    storage
}

fn id_set(results: &[SearchResult]) -> BTreeSet<String> {
    results.iter().map(|r| r.id.clone()).collect()
}

fn assert_ranked(results: &[SearchResult], k: usize) -> Result<(), TestCaseError> {
    prop_assert!(results.len() <= k);
    for (i, result) in results.iter().enumerate() {
        prop_assert_eq!(result.rank, i + 1);
        prop_assert!(result.score > 0.0);
        if i > 0 {
            prop_assert!(results[i - 1].score >= result.score);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn results_are_ranked_and_deterministic(
        passages in passages_strategy(),
        request in request_strategy(),
        native in any::<bool>(),
    ) {
        let embedder = HashingEmbedder::new(Some(32));
        let storage = seed(&passages, native, &embedder);
        let engine = RetrievalEngine::new(RetrievalConfig::default()).with_embeddings(&embedder);

        let first = engine.hybrid_search(&storage, &request).unwrap();
        let second = engine.hybrid_search(&storage, &request).unwrap();
        assert_ranked(&first, request.k)?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn guardrails_hold_on_both_backends(
        passages in passages_strategy(),
        request in request_strategy(),
    ) {
        let embedder = HashingEmbedder::new(Some(32));
        let by_id: HashMap<String, Document> =
            documents().into_iter().map(|d| (d.id.clone(), d)).collect();

        for native in [false, true] {
            let storage = seed(&passages, native, &embedder);
            let engine = RetrievalEngine::new(RetrievalConfig::default()).with_embeddings(&embedder);
            for result in engine.hybrid_search(&storage, &request).unwrap() {
                let document = &by_id[&result.document_id];
                prop_assert!(guardrails::allowed(document, &request.filters));
                if let Some(anchor) = request.osis.as_deref() {
                    let osis_ref = result.osis_ref.as_deref().unwrap_or("");
                    prop_assert!(osis::intersects(osis_ref, anchor));
                    prop_assert_eq!(result.osis_distance, Some(0.0));
                }
            }
        }
    }

    #[test]
    fn backends_agree_on_allowed_passages_when_k_covers_the_pool(
        passages in passages_strategy(),
        request in request_strategy(),
    ) {
        // Without an embedder both engines qualify a passage by the same
        // signals: a query word in its text, a query word in its keywords,
        // or an exact OSIS match.
        let embedder = HashingEmbedder::new(Some(32));
        let request = SearchRequest { k: 32, ..request };
        let engine = RetrievalEngine::new(RetrievalConfig::default());

        let fallback = engine.hybrid_search(&seed(&passages, false, &embedder), &request).unwrap();
        let native = engine.hybrid_search(&seed(&passages, true, &embedder), &request).unwrap();
        prop_assert_eq!(id_set(&fallback), id_set(&native));
    }

    #[test]
    fn backends_agree_when_filtered_out_passages_outrank_the_allowed_one(
        blocked in 1..12usize,
        k in 1..4usize,
        filler in prop::collection::vec(prop::sample::select(WORDS), 1..6),
    ) {
        let embedder = HashingEmbedder::new(Some(32));
        let mut passages: Vec<Passage> = (0..blocked)
            .map(|i| Passage {
                id: format!("blocked-{i}"),
                document_id: "doc-1".into(),
                text: "grace grace grace".into(),
                osis_ref: None,
                page_no: None,
                start_char: None,
                end_char: None,
                keywords: vec![],
            })
            .collect();
        passages.push(Passage {
            id: "allowed".into(),
            document_id: "doc-0".into(),
            text: format!("grace {}", filler.join(" ")),
            osis_ref: None,
            page_no: None,
            start_char: None,
            end_char: None,
            keywords: vec![],
        });
        let request = SearchRequest {
            query: Some("grace".into()),
            filters: SearchFilters {
                author: Some(AUTHORS[0].into()),
                ..Default::default()
            },
            k,
            ..Default::default()
        };

        let engine = RetrievalEngine::new(RetrievalConfig::default()).with_embeddings(&embedder);
        let expected: BTreeSet<String> = ["allowed".to_string()].into_iter().collect();
        for native in [false, true] {
            let results = engine.hybrid_search(&seed(&passages, native, &embedder), &request).unwrap();
            prop_assert_eq!(id_set(&results), expected.clone());
        }
    }

    #[test]
    fn valid_references_are_at_distance_zero_from_themselves(reference in prop::sample::select(REFS)) {
        prop_assert!(osis::intersects(reference, reference));
        prop_assert_eq!(osis::distance(reference, reference), 0.0);
    }

    #[test]
    fn distance_is_symmetric(a in prop::sample::select(REFS), b in prop::sample::select(REFS)) {
        prop_assert_eq!(osis::distance(a, b), osis::distance(b, a));
        prop_assert_eq!(osis::intersects(a, b), osis::distance(a, b) == 0.0);
    }

    #[test]
    fn tokens_are_lowercase_words(s in ".{0,80}") {
        for token in tokenize(&s) {
            prop_assert!(!token.is_empty());
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn highlights_are_capped_and_contain_a_token(
        text in text_strategy(),
        token in prop::sample::select(WORDS),
        window in 10..80usize,
        max in 1..4usize,
    ) {
        let tokens = vec![token.to_string()];
        let highlights = build_highlights(&text, &tokens, window, max);
        prop_assert!(highlights.len() <= max);
        for h in &highlights {
            prop_assert!(h.to_lowercase().contains(token));
        }
    }
}
