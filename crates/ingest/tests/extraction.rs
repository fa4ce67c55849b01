//! End-to-end tests for the embedding extractor: mixed MIME input, chunk and
//! vector counts, default chunk size, determinism and concurrent callers.

use std::sync::Arc;

use embedkit_core::{Content, Extractor};
use embedkit_ingest::embedding::{CachedEmbedder, HashEmbedder};
use embedkit_ingest::{EmbeddingExtractor, EmbeddingInputParams, TextSplitter, TextSplitterKind};

// ============================================================================
// Test Helpers
// ============================================================================

const ARTICLE: &str = "Embedding models map text to vectors.\n\n\
    Long documents are split into chunks first, because every model has a \
    maximum context length. Adjacent chunks may overlap so that sentences cut \
    at a boundary keep some of their context.\n\n\
    Each chunk is embedded separately and stored with its vector.";

fn hash_extractor(max_context_length: usize) -> EmbeddingExtractor {
    EmbeddingExtractor::new(max_context_length, Arc::new(HashEmbedder::new(32))).unwrap()
}

fn plain(text: &str) -> Content {
    Content::new("text/plain", text)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn output_counts_follow_splitter() {
    let extractor = hash_extractor(512);
    for kind in [TextSplitterKind::Char, TextSplitterKind::Recursive] {
        let params = EmbeddingInputParams::default()
            .with_chunk_size(60)
            .with_overlap(10)
            .with_text_splitter(kind);
        let expected = TextSplitter::new(kind, 60, 10).unwrap().split(ARTICLE);

        let out = extractor.extract(&[plain(ARTICLE)], &params).await.unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].len(), expected.len(), "splitter {kind}");
        for (content, chunk) in out[0].iter().zip(&expected) {
            assert_eq!(content.text().unwrap(), chunk);
            assert_eq!(content.embedding().map(<[f32]>::len), Some(32));
        }
    }
}

#[tokio::test]
async fn entries_follow_input_order_and_skip_non_text() {
    let extractor = hash_extractor(512);
    let input = vec![
        plain("first document"),
        Content::new("image/png", vec![0x89, 0x50, 0x4e, 0x47]),
        Content::new("text/plain; charset=utf-8", "second document"),
        Content::new("application/json", "{}"),
    ];

    let out = extractor
        .extract(&input, &EmbeddingInputParams::default())
        .await
        .unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0][0].text().unwrap(), "first document");
    assert_eq!(out[1][0].text().unwrap(), "second document");
}

#[tokio::test]
async fn default_chunk_size_is_model_context_length() {
    let long = "word ".repeat(300);
    let extractor = hash_extractor(512);

    let defaulted = extractor
        .extract(&[plain(&long)], &EmbeddingInputParams::default())
        .await
        .unwrap();
    let explicit = extractor
        .extract(
            &[plain(&long)],
            &EmbeddingInputParams::default().with_chunk_size(512),
        )
        .await
        .unwrap();

    assert_eq!(defaulted, explicit);
    assert!(defaulted[0].len() >= 3);
    assert!(defaulted[0]
        .iter()
        .all(|c| c.text().unwrap().chars().count() <= 512));
}

#[tokio::test]
async fn repeated_extraction_is_identical() {
    let extractor = hash_extractor(128);
    let params = EmbeddingInputParams::new(40, 5, "recursive").unwrap();
    let input = vec![plain(ARTICLE), plain("short note")];

    let first = extractor.extract(&input, &params).await.unwrap();
    let second = extractor.extract(&input, &params).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn cached_backend_gives_same_output() {
    let plain_extractor = hash_extractor(512);
    let cached = Arc::new(CachedEmbedder::new(Arc::new(HashEmbedder::new(32)), 64));
    let cached_extractor = EmbeddingExtractor::new(512, cached.clone()).unwrap();
    let params = EmbeddingInputParams::new(50, 0, "char").unwrap();

    let expected = plain_extractor.extract(&[plain(ARTICLE)], &params).await.unwrap();
    let warm = cached_extractor.extract(&[plain(ARTICLE)], &params).await.unwrap();
    let hot = cached_extractor.extract(&[plain(ARTICLE)], &params).await.unwrap();

    assert_eq!(warm, expected);
    assert_eq!(hot, expected);
    let stats = cached.stats().await;
    assert_eq!(stats.hits as usize, expected[0].len());
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let extractor = Arc::new(hash_extractor(256));
    let mut handles = Vec::new();
    for size in [20usize, 40, 80, 160] {
        let extractor = extractor.clone();
        handles.push(tokio::spawn(async move {
            let params = EmbeddingInputParams::default().with_chunk_size(size);
            let out = extractor.extract(&[plain(ARTICLE)], &params).await.unwrap();
            (size, out)
        }));
    }

    for handle in handles {
        let (size, out) = handle.await.unwrap();
        let expected = TextSplitter::new(TextSplitterKind::Recursive, size, 0)
            .unwrap()
            .split(ARTICLE);
        assert_eq!(out[0].len(), expected.len());
    }
}

#[tokio::test]
async fn json_params_drive_extraction() {
    let extractor = hash_extractor(512);
    let out = extractor
        .extract_json(
            &[plain("AAAA BBBB CCCC")],
            Some(r#"{"chunk_size": 5, "overlap": 0, "text_splitter": "char"}"#),
        )
        .await
        .unwrap();
    let texts: Vec<&str> = out[0].iter().map(|c| c.text().unwrap()).collect();
    assert_eq!(texts, vec!["AAAA", "BBBB", "CCCC"]);
}
