//! Integration tests for batch operations on files
//!
//! These tests exercise the full on-disk flow:
//! - Loading segment documents through DocumentStore
//! - Quantize, save, reopen, dequantize cycles
//! - Config-driven options
//! - Lookup building from a catalog file

use catalog_engine::{
    build_lookup, dequantize_document, load_json, lookup_table_json, quantize_document,
    validate_document, write_json_atomic, CatalogConfig, DocumentStore, EmbeddingOptions,
    JsonFormat, CONFIG_FILE_NAME,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn segment_document(count: usize, dim: usize) -> Value {
    let mut map = Map::new();
    for i in 0..count {
        let embedding: Vec<f64> = (0..dim)
            .map(|j| ((i * dim + j) as f64 * 0.37).sin() * 0.1)
            .collect();
        map.insert(
            format!("seg-{:05}", i),
            json!({"text": format!("segment {}", i), "embedding": embedding}),
        );
    }
    Value::Object(map)
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    dot / (na * nb)
}

fn floats(value: &Value) -> Vec<f64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect()
}

#[test]
fn test_quantize_save_reopen_dequantize() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("segments.json");
    let original = segment_document(40, 768);
    write_json_atomic(&path, &original, JsonFormat::Compact).unwrap();

    let opts = EmbeddingOptions::default();

    // Phase 1: quantize in place
    {
        let mut store = DocumentStore::open(&path).unwrap();
        let report = quantize_document(store.records_mut(), &opts);
        assert_eq!(report.processed, 40);
        assert!(report.is_clean());
        store.save().unwrap();
    }

    // Phase 2: file is smaller and validates
    {
        let store = DocumentStore::open(&path).unwrap();
        assert!(store.get("seg-00000").unwrap()["embedding"].is_string());
        let report = validate_document(store.records(), &opts);
        assert!(report.is_valid());
        assert_eq!(report.encoded, 40);
        let encoded_size = std::fs::metadata(&path).unwrap().len() as usize;
        let raw_size = serde_json::to_vec(&original).unwrap().len();
        assert!(encoded_size * 3 < raw_size);
    }

    // Phase 3: dequantize and compare
    {
        let mut store = DocumentStore::open(&path).unwrap();
        let report = dequantize_document(store.records_mut(), &opts);
        assert_eq!(report.processed, 40);
        for (id, record) in store.records() {
            let restored = floats(&record["embedding"]);
            let source = floats(&original[id]["embedding"]);
            assert!(cosine(&restored, &source) > 0.9999, "{} drifted", id);
            assert_eq!(record["text"], original[id]["text"]);
        }
    }
}

#[test]
fn test_quantize_keeps_record_and_field_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("segments.json");
    std::fs::write(
        &path,
        r#"{"seg-b":{"text":"x","embedding":[1,2,3]},"seg-a":{"zeta":1,"embedding":[0.5,0.5,0.5]}}"#,
    )
    .unwrap();
    let opts = EmbeddingOptions {
        dimension: Some(3),
        ..EmbeddingOptions::default()
    };

    let mut store = DocumentStore::open(&path).unwrap();
    assert!(quantize_document(store.records_mut(), &opts).is_clean());
    store.save().unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{"seg-b":{"text":"x","embedding":"ADwAQABC"},"seg-a":{"zeta":1,"embedding":"ADgAOAA4"}}"#
    );

    let mut store = DocumentStore::open(&path).unwrap();
    assert!(dequantize_document(store.records_mut(), &opts).is_clean());
    assert_eq!(
        serde_json::to_string(store.records()).unwrap(),
        r#"{"seg-b":{"text":"x","embedding":[1.0,2.0,3.0]},"seg-a":{"zeta":1,"embedding":[0.5,0.5,0.5]}}"#
    );
}

#[test]
fn test_second_quantize_is_noop() {
    let mut doc = segment_document(10, 16).as_object().unwrap().clone();
    let opts = EmbeddingOptions {
        dimension: Some(16),
        ..EmbeddingOptions::default()
    };
    quantize_document(&mut doc, &opts);
    let once = doc.clone();
    let report = quantize_document(&mut doc, &opts);
    assert_eq!(report.processed, 0);
    assert_eq!(report.skipped, 10);
    assert_eq!(doc, once);
}

#[test]
fn test_config_file_drives_options() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &config_path,
        "dimension = 4\ndtype = \"f32\"\nembedding_field = \"vec\"\nparallel = false\n",
    )
    .unwrap();

    let config = CatalogConfig::from_file(&config_path).unwrap();
    let opts = config.embedding_options().unwrap();

    let mut doc = json!({
        "a": {"vec": [0.1, 0.2, 0.3, 0.4]},
        "b": {"vec": [0.1, 0.2, 0.3]},
        "c": {"embedding": [0.1, 0.2, 0.3, 0.4]},
    })
    .as_object()
    .unwrap()
    .clone();

    let report = quantize_document(&mut doc, &opts);
    assert_eq!(report.processed, 1);
    let failed: Vec<_> = report.failures.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(failed, vec!["b", "c"]);
    // 4 f32 elements = 16 bytes = 24 base64 chars
    assert_eq!(doc["a"]["vec"].as_str().unwrap().len(), 24);

    dequantize_document(&mut doc, &opts);
    assert_eq!(floats(&doc["a"]["vec"]), vec![
        f64::from(0.1f32),
        f64::from(0.2f32),
        f64::from(0.3f32),
        f64::from(0.4f32),
    ]);
}

#[test]
fn test_lookup_from_catalog_file() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("drive.json");
    let out_path = temp_dir.path().join("lookup.json");
    write_json_atomic(
        &catalog_path,
        &json!([
            {"name": "100.01_18_BlueprintEditor_55.mp4", "id": "1AbC"},
            {"name": "112.02_03_Night_Lighting.mp4", "id": "2DeF"},
            {"name": "notes.pdf", "id": "3GhI"},
        ]),
        JsonFormat::Pretty,
    )
    .unwrap();

    let catalog = load_json(&catalog_path).unwrap();
    let config = CatalogConfig::default();
    let report = build_lookup(&catalog, &config.lookup_options()).unwrap();
    write_json_atomic(&out_path, &lookup_table_json(&report), JsonFormat::Pretty).unwrap();

    assert_eq!(
        load_json(&out_path).unwrap(),
        json!({
            "100_01/18_BlueprintEditor": "1AbC",
            "112_02/03_Night_Lighting": "2DeF",
        })
    );
    assert_eq!(report.lookup.unmatched, vec!["notes.pdf".to_string()]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn parallel_and_sequential_agree(
        vectors in prop::collection::vec(prop::collection::vec(-2.0f64..2.0, 1..6), 1..40)
    ) {
        let mut doc = Map::new();
        for (i, v) in vectors.iter().enumerate() {
            doc.insert(format!("r{}", i), json!({"embedding": v}));
        }
        let base = EmbeddingOptions { dimension: Some(3), ..EmbeddingOptions::default() };
        let mut seq = doc.clone();
        let mut par = doc;
        let a = quantize_document(&mut seq, &EmbeddingOptions { parallel: false, ..base.clone() });
        let b = quantize_document(&mut par, &EmbeddingOptions { parallel: true, ..base });
        prop_assert_eq!(a, b);
        prop_assert_eq!(seq, par);
    }

    #[test]
    fn report_accounts_for_every_record(
        vectors in prop::collection::vec(prop::collection::vec(-2.0f64..2.0, 1..6), 0..40)
    ) {
        let mut doc = Map::new();
        for (i, v) in vectors.iter().enumerate() {
            doc.insert(format!("r{}", i), json!({"embedding": v}));
        }
        let total = doc.len();
        let opts = EmbeddingOptions { dimension: Some(3), ..EmbeddingOptions::default() };
        let report = quantize_document(&mut doc, &opts);
        prop_assert_eq!(report.total(), total);
    }
}
