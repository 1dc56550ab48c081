//! Tier 3: Key extraction
//!
//! Documented file names, the ambiguity rule, and names that must not match.

use catalog_kit::{extract_key, extract_lookup_key, FilenameKey, KeyExtractor};

fn key(code: &str, sub: &str) -> Option<FilenameKey> {
    Some(FilenameKey::new(code, sub))
}

#[test]
fn tier3_documented_examples() {
    assert_eq!(
        extract_key("100.01_18_BlueprintEditor_55.mp4"),
        key("100_01", "18_BlueprintEditor")
    );
    assert_eq!(
        extract_key("112.02_03_Night_Lighting.mp4"),
        key("112_02", "03_Night_Lighting")
    );
    assert_eq!(extract_key("readme.txt"), None);
}

#[test]
fn tier3_trailing_version_not_absorbed() {
    assert_eq!(extract_key("100.01_18_Part_2_55.mp4"), key("100_01", "18_Part_2"));
    assert_eq!(extract_key("100.01_18_v2_3_4.mp4"), key("100_01", "18_v2_3"));
}

#[test]
fn tier3_no_extension() {
    assert_eq!(
        extract_key("100.01_18_BlueprintEditor_55"),
        key("100_01", "18_BlueprintEditor")
    );
    assert_eq!(extract_key("100.01_18_Intro"), key("100_01", "18_Intro"));
}

#[test]
fn tier3_non_conforming() {
    for name in [
        "",
        ".mp4",
        "100.01.mp4",
        "100_01_18_Intro.mp4",
        "100.01-18-Intro.mp4",
        "100.01_Intro.mp4",
        "a100.01_18_Intro.mp4",
        "100.01_18_.mp4",
        "１００.01_18_Intro.mp4",
    ] {
        assert_eq!(extract_key(name), None, "{:?} should not match", name);
    }
}

#[test]
fn tier3_lookup_key_format() {
    assert_eq!(
        extract_lookup_key("112.02_03_Night_Lighting.mp4").as_deref(),
        Some("112_02/03_Night_Lighting")
    );
    let parsed = FilenameKey::from_lookup_key("112_02/03_Night_Lighting").unwrap();
    assert_eq!(parsed, FilenameKey::new("112_02", "03_Night_Lighting"));
}

#[test]
fn tier3_pattern_order_is_versioned_first() {
    let extractor = KeyExtractor::default();
    let names: Vec<_> = extractor.patterns().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["versioned", "plain"]);
}

#[test]
fn tier3_deterministic() {
    for name in crate::test_utils::media_names(200) {
        assert_eq!(extract_key(&name), extract_key(&name));
    }
}
