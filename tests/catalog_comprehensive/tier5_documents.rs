//! Tier 5: Documents and lookup on disk

use crate::test_utils::{cosine, media_names, segment_document};
use catalog_kit::{
    build_lookup, dequantize_document, load_json, lookup_table_json, quantize_document,
    validate_document, write_json_atomic, CatalogConfig, DocumentStore, EmbeddingOptions,
    JsonFormat, LookupOptions, CONFIG_FILE_NAME,
};
use serde_json::{json, Value};
use tempfile::TempDir;

fn floats(v: &Value) -> Vec<f64> {
    v.as_array().unwrap().iter().map(|x| x.as_f64().unwrap()).collect()
}

#[test]
fn tier5_store_quantize_cycle_shrinks_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("segments.json");
    let doc = segment_document(25, 768);
    write_json_atomic(&path, &Value::Object(doc.clone()), JsonFormat::Compact).unwrap();
    let raw_size = std::fs::metadata(&path).unwrap().len();

    let opts = EmbeddingOptions::default();
    let mut store = DocumentStore::open(&path).unwrap();
    assert!(quantize_document(store.records_mut(), &opts).is_clean());
    store.save().unwrap();

    let encoded_size = std::fs::metadata(&path).unwrap().len();
    assert!(encoded_size * 4 < raw_size, "{} vs {}", encoded_size, raw_size);

    let mut store = DocumentStore::open(&path).unwrap();
    assert!(validate_document(store.records(), &opts).is_valid());
    dequantize_document(store.records_mut(), &opts);
    for (id, record) in store.records() {
        let similarity = cosine(&floats(&record["embedding"]), &floats(&doc[id]["embedding"]));
        assert!(similarity > 0.9999);
    }
}

#[test]
fn tier5_config_controls_batch() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join(CONFIG_FILE_NAME);
    assert!(CatalogConfig::write_default_if_missing(&config_path).unwrap());
    let config = CatalogConfig::from_file(&config_path).unwrap();
    assert_eq!(config.embedding_options().unwrap(), EmbeddingOptions::default());
}

#[test]
fn tier5_lookup_over_media_catalog() {
    let names = media_names(40);
    let catalog: Value = names
        .iter()
        .enumerate()
        .map(|(i, n)| json!({"name": n, "id": format!("drive-{}", i)}))
        .collect();
    let report = build_lookup(&catalog, &LookupOptions::default()).unwrap();

    // Every fourth name is a notes file
    assert_eq!(report.lookup.unmatched.len(), 10);
    assert_eq!(
        report.lookup.len() + report.lookup.duplicates.len(),
        names.len() - 10
    );

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("lookup.json");
    write_json_atomic(&out, &lookup_table_json(&report), JsonFormat::Pretty).unwrap();
    let table = load_json(&out).unwrap();
    for (key, id) in &report.lookup.table {
        assert_eq!(table[key], json!(id));
    }
}
