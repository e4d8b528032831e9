//! Tests for retrieval ranking correctness.

use crate::embeddings::{EmbeddingProvider, TrigramProvider};
use crate::types::Chunk;
use crate::vector_index::{InMemoryIndex, VectorIndex};

/// Helper to create a chunk at the given position.
fn create_test_chunk(order: usize, text: &str) -> Chunk {
    Chunk {
        text: text.to_string(),
        order,
        page: 1,
    }
}

/// Helper to create a normalized embedding.
fn normalize(v: &[f32]) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter().map(|x| x / norm).collect()
    } else {
        v.to_vec()
    }
}

#[test]
fn test_relevant_query_returns_high_scores() {
    let mut index = InMemoryIndex::new(4);

    // Query will be about the weekly market
    index
        .insert(
            create_test_chunk(0, "Der Wochenmarkt findet donnerstags statt"),
            normalize(&[1.0, 0.5, 0.2, 0.1]),
        )
        .unwrap();
    index
        .insert(
            create_test_chunk(1, "Öffnungszeiten der Thermalbäder"),
            normalize(&[-0.3, -0.8, 0.4, -0.2]),
        )
        .unwrap();

    let results = index.search(&normalize(&[0.9, 0.4, 0.3, 0.1]), 5).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(
        results[0].chunk.order, 0,
        "Most relevant chunk should be first"
    );
    assert!(
        results[0].score > 0.8,
        "Relevant chunk score should be high: {}",
        results[0].score
    );
    assert!(results[0].score > results[1].score, "Scores should be ordered");
}

#[test]
fn test_unrelated_query_returns_low_scores() {
    let mut index = InMemoryIndex::new(4);
    index
        .insert(
            create_test_chunk(0, "Stadtrat und Fraktionen"),
            normalize(&[1.0, 0.0, 0.0, 0.0]),
        )
        .unwrap();

    let results = index.search(&normalize(&[0.0, 1.0, 0.0, 0.0]), 5).unwrap();

    assert_eq!(results.len(), 1);
    assert!(
        results[0].score < 0.5,
        "Unrelated chunk score should be low: {}",
        results[0].score
    );
}

#[test]
fn test_scores_are_ordered_descending() {
    let mut index = InMemoryIndex::new(3);
    let embeddings = [
        [1.0, 0.0, 0.0],
        [0.7, 0.7, 0.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
    ];
    for (order, embedding) in embeddings.iter().enumerate() {
        index
            .insert(
                create_test_chunk(order, &format!("Text {}", order)),
                normalize(embedding),
            )
            .unwrap();
    }

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 10).unwrap();

    for i in 1..results.len() {
        assert!(
            results[i - 1].score >= results[i].score,
            "Scores should be ordered: {} >= {}",
            results[i - 1].score,
            results[i].score
        );
    }

    assert_eq!(results[0].chunk.order, 0);
    assert!(
        results[0].score > 0.99,
        "Perfect match should have score near 1.0"
    );
    assert_eq!(results[3].chunk.order, 3);
}

#[test]
fn test_negative_similarity_chunks() {
    let mut index = InMemoryIndex::new(3);
    index
        .insert(
            create_test_chunk(0, "Opposite content"),
            normalize(&[-1.0, 0.0, 0.0]),
        )
        .unwrap();

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 5).unwrap();

    assert_eq!(results.len(), 1);
    assert!(
        results[0].score < 0.0,
        "Opposite vectors should have negative similarity"
    );
    assert!(
        results[0].score > -1.1 && results[0].score < -0.9,
        "Should be close to -1.0"
    );
}

#[test]
fn test_empty_index_returns_no_results() {
    let index = InMemoryIndex::new(3);

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 5).unwrap();

    assert_eq!(results.len(), 0, "Empty index should return no results");
}

#[test]
fn test_top_k_limit_respected() {
    let mut index = InMemoryIndex::new(3);
    for i in 0..10 {
        index
            .insert(
                create_test_chunk(i, &format!("Text {}", i)),
                normalize(&[(i + 1) as f32 / 10.0, i as f32 / 20.0, 0.0]),
            )
            .unwrap();
    }

    let results = index.search(&normalize(&[1.0, 0.0, 0.0]), 3).unwrap();

    assert_eq!(results.len(), 3, "Should return exactly top_k results");
}

#[tokio::test]
async fn test_trigram_embeddings_rank_matching_text_first() {
    let provider = TrigramProvider::new(256);
    let texts = vec![
        "Der Wochenmarkt findet jeden Donnerstag auf dem Marktplatz statt.".to_string(),
        "Das Rathaus befindet sich am Koblenzer Platz.".to_string(),
        "Bad Breisig ist bekannt für seine Thermalquellen.".to_string(),
    ];
    let embeddings = provider.embed_batch(&texts).await.unwrap();

    let mut index = InMemoryIndex::new(provider.dimensions());
    for (order, (text, embedding)) in texts.iter().zip(embeddings).enumerate() {
        index.insert(create_test_chunk(order, text), embedding).unwrap();
    }

    let query = provider.embed("Wann ist der Wochenmarkt?").await.unwrap();
    let results = index.search(&query, 3).unwrap();

    assert_eq!(results[0].chunk.order, 0);
}
