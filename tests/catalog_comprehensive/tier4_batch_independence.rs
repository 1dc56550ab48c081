//! Tier 4: Batch independence
//!
//! Processing items in any order, or split across workers, gives the same
//! per-item results as a sequential pass.

use crate::test_utils::{media_names, segment_document, seeded_vector};
use catalog_kit::{encode, extract_key, quantize_document, EmbeddingOptions};
use rayon::prelude::*;
use serde_json::Map;

#[test]
fn tier4_encode_parallel_equals_sequential() {
    let vectors: Vec<Vec<f64>> = (0..500).map(|s| seeded_vector(s, 96)).collect();
    let sequential: Vec<String> = vectors.iter().map(|v| encode(v).unwrap()).collect();
    let parallel: Vec<String> = vectors.par_iter().map(|v| encode(v).unwrap()).collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn tier4_encode_reverse_order() {
    let vectors: Vec<Vec<f64>> = (0..100).map(|s| seeded_vector(s, 32)).collect();
    let forward: Vec<String> = vectors.iter().map(|v| encode(v).unwrap()).collect();
    let mut backward: Vec<String> = vectors.iter().rev().map(|v| encode(v).unwrap()).collect();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn tier4_extract_sharded_across_threads() {
    let names = media_names(1000);
    let sequential: Vec<_> = names.iter().map(|n| extract_key(n)).collect();

    let sharded: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = names
            .chunks(137)
            .map(|chunk| scope.spawn(move || chunk.iter().map(|n| extract_key(n)).collect::<Vec<_>>()))
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });
    assert_eq!(sequential, sharded);
}

#[test]
fn tier4_document_split_then_merged() {
    let doc = segment_document(300, 24);
    let opts = EmbeddingOptions {
        dimension: Some(24),
        ..EmbeddingOptions::default()
    };

    let mut whole = doc.clone();
    let whole_report = quantize_document(&mut whole, &opts);

    // Quantize three disjoint shards independently, then merge
    let mut merged = Map::new();
    let mut processed = 0;
    for shard in 0..3 {
        let mut part: Map<_, _> = doc
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 == shard)
            .map(|(_, (k, v))| (k.clone(), v.clone()))
            .collect();
        processed += quantize_document(&mut part, &opts).processed;
        merged.extend(part);
    }

    assert_eq!(processed, whole_report.processed);
    assert_eq!(merged, whole);
}
