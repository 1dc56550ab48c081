//! Tier 1: Codec contract
//!
//! Error conditions, output length and determinism of the default codec.

use crate::test_utils::seeded_vector;
use catalog_kit::{
    decode, encode, get_codec, CatalogError, DecodingError, EncodingError, VectorCodec,
    HALF_CODEC_ID,
};

#[test]
fn tier1_empty_vector_rejected() {
    assert!(matches!(encode(&[]), Err(EncodingError::Empty)));
}

#[test]
fn tier1_nan_rejected() {
    assert!(matches!(
        encode(&[1.0, f64::NAN]),
        Err(EncodingError::NonFinite { index: 1, .. })
    ));
}

#[test]
fn tier1_infinity_rejected() {
    assert!(encode(&[f64::NEG_INFINITY]).is_err());
}

#[test]
fn tier1_invalid_base64_rejected() {
    assert!(matches!(
        decode("not-valid-base64!!", 768),
        Err(DecodingError::InvalidBase64(_))
    ));
}

#[test]
fn tier1_dimension_mismatch_rejected() {
    let encoded = encode(&[1.0, 2.0, 3.0]).unwrap();
    assert!(matches!(
        decode(&encoded, 4),
        Err(DecodingError::DimensionMismatch { expected: 4, got: 3 })
    ));
}

#[test]
fn tier1_odd_byte_count_rejected() {
    // "AA==" decodes to a single byte
    assert!(matches!(
        decode("AA==", 1),
        Err(DecodingError::InvalidLength { len: 1, .. })
    ));
}

#[test]
fn tier1_errors_convert_to_catalog_error() {
    let err: CatalogError = decode("ADwAQABC", 2).unwrap_err().into();
    assert!(matches!(err, CatalogError::DimensionMismatch { expected: 2, got: 3 }));
    let err: CatalogError = encode(&[]).unwrap_err().into();
    assert!(matches!(err, CatalogError::Encoding { .. }));
}

#[test]
fn tier1_length_is_base64_of_two_bytes_per_element() {
    for n in 1..=64usize {
        let encoded = encode(&seeded_vector(n as u64, n)).unwrap();
        assert_eq!(encoded.len(), (2 * n + 2) / 3 * 4, "n = {}", n);
    }
}

#[test]
fn tier1_encoded_len_matches_trait() {
    let codec = get_codec(HALF_CODEC_ID).unwrap();
    for n in [1usize, 2, 3, 767, 768, 769] {
        let v = seeded_vector(7, n);
        assert_eq!(codec.encode(&v).unwrap().len(), codec.encoded_len(n));
    }
}

#[test]
fn tier1_deterministic() {
    let v = seeded_vector(42, 768);
    assert_eq!(encode(&v).unwrap(), encode(&v).unwrap());
}

#[test]
fn tier1_known_vectors() {
    assert_eq!(encode(&[1.0, 2.0, 3.0]).unwrap(), "ADwAQABC");
    assert_eq!(encode(&[0.0]).unwrap(), "AAA=");
    assert_eq!(encode(&[-0.0]).unwrap(), "AIA=");
}

#[test]
fn tier1_requantization_is_stable() {
    let v = seeded_vector(3, 256);
    let once = encode(&v).unwrap();
    let twice = encode(&decode(&once, 256).unwrap()).unwrap();
    assert_eq!(once, twice);
}
