//! Catalog Comprehensive Test Suite
//!
//! End-to-end checks of the public facade.
//!
//! ## Test Tier Structure
//!
//! - **Tier 1: Codec Contract** (errors, size, determinism)
//! - **Tier 2: Codec Precision** (round-trip bound, cosine ranking)
//! - **Tier 3: Key Extraction** (documented names, ambiguity, negatives)
//! - **Tier 4: Batch Independence** (order and partitioning never change results)
//! - **Tier 5: Documents & Lookup** (store, quantize, lookup on disk)
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test catalog_comprehensive
//! cargo test --test catalog_comprehensive tier4
//! ```

mod test_utils;

mod tier1_codec_contract;
mod tier2_codec_precision;
mod tier3_key_extraction;
mod tier4_batch_independence;
mod tier5_documents;
