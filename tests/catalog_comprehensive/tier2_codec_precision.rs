//! Tier 2: Codec precision
//!
//! Decoded elements stay within half-precision rounding of the input, and
//! the loss does not disturb cosine ranking.

use crate::test_utils::{cosine, half_tolerance, seeded_vector};
use catalog_kit::{codec_for_dtype, decode, encode, ElementDtype, VectorCodec};
use proptest::prelude::*;

#[test]
fn tier2_round_trip_bound_768() {
    for seed in 0..20 {
        let v = seeded_vector(seed, 768);
        let back = decode(&encode(&v).unwrap(), 768).unwrap();
        for (i, (a, b)) in v.iter().zip(&back).enumerate() {
            assert!(
                (a - b).abs() <= half_tolerance(*a),
                "seed {} element {}: {} vs {}",
                seed,
                i,
                a,
                b
            );
        }
    }
}

#[test]
fn tier2_cosine_ranking_preserved() {
    let query = seeded_vector(1000, 768);
    let corpus: Vec<Vec<f64>> = (0..50).map(|s| seeded_vector(s, 768)).collect();
    let decoded: Vec<Vec<f64>> = corpus
        .iter()
        .map(|v| decode(&encode(v).unwrap(), 768).unwrap())
        .collect();

    for (original, restored) in corpus.iter().zip(&decoded) {
        let drift = (cosine(&query, original) - cosine(&query, restored)).abs();
        assert!(drift < 1e-3, "cosine drift {}", drift);
    }
}

#[test]
fn tier2_single_precision_is_tighter() {
    let v = seeded_vector(5, 64);
    let single = codec_for_dtype(ElementDtype::F32);
    let back = single.decode(&single.encode(&v).unwrap(), Some(64)).unwrap();
    for (a, b) in v.iter().zip(&back) {
        assert!((a - b).abs() <= a.abs() * 2f64.powi(-24) + f64::MIN_POSITIVE);
    }
}

#[test]
fn tier2_extremes_of_half_range() {
    let v = [65504.0, -65504.0, 2f64.powi(-14), 2f64.powi(-24), 0.0];
    assert_eq!(decode(&encode(&v).unwrap(), 5).unwrap(), v.to_vec());
    assert!(encode(&[70000.0]).is_err());
}

proptest! {
    #[test]
    fn tier2_round_trip_any_vector(v in prop::collection::vec(-60000.0f64..60000.0, 1..128)) {
        let back = decode(&encode(&v).unwrap(), v.len()).unwrap();
        for (a, b) in v.iter().zip(&back) {
            prop_assert!((a - b).abs() <= half_tolerance(*a));
        }
    }

    #[test]
    fn tier2_size_quarter_of_json(v in prop::collection::vec(-1.0f64..1.0, 16..256)) {
        let json_len = serde_json::to_string(&v).unwrap().len();
        let encoded_len = encode(&v).unwrap().len();
        prop_assert!(encoded_len * 4 <= json_len);
    }
}
