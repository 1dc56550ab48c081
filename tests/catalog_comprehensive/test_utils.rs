//! Shared helpers for the comprehensive suite.

#![allow(dead_code)]

use serde_json::{json, Map, Value};

/// Deterministic pseudo-random vector (xorshift), values in [-1, 1)
pub fn seeded_vector(seed: u64, dim: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..dim)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 52) as f64 - 1.0
        })
        .collect()
}

pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    dot / (na * nb)
}

/// Half-precision rounding bound for one element
pub fn half_tolerance(x: f64) -> f64 {
    // Half a ULP relative, or half the smallest subnormal step
    (x.abs() * 2f64.powi(-11)).max(2f64.powi(-25))
}

/// Segment document with `count` records of dimension `dim`
pub fn segment_document(count: usize, dim: usize) -> Map<String, Value> {
    (0..count)
        .map(|i| {
            (
                format!("seg-{:05}", i),
                json!({"text": format!("segment {}", i), "embedding": seeded_vector(i as u64, dim)}),
            )
        })
        .collect()
}

/// Media file names in the catalog's naming convention, plus noise
pub fn media_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("{}.{:02}_{:02}_Lesson_{}_{}.mp4", 100 + i / 40, i % 10, i % 30, i, i % 7),
            1 => format!("{}.{:02}_{:02}_Topic_{}.mov", 100 + i / 40, i % 10, i % 30, i),
            2 => format!("notes_{}.txt", i),
            _ => format!("{}.{:02}_{:02}_Clip_{}", 200 + i / 40, i % 10, i % 30, i),
        })
        .collect()
}
