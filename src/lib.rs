//! # Sigil: noise-tolerant text signatures
//!
//! Sigil decides whether two text samples carry the same content once
//! incidental variation (timestamps, random identifiers, counters) is ignored.
//! It is meant for de-duplicating or clustering repeated observations, such as
//! network responses that differ only in volatile fields.
//!
//! - **Signatures**: whitespace tokenization into a [`Signature`]
//! - **Refinement**: masking positions that vary across samples as wildcards
//! - **Metrics**: token edit distance and insertion/deletion difference count
//! - **Grouping**: incremental clustering with [`Deduplicator`]
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 Deduplicator                   │
//! ├───────────────────────────────────────────────┤
//! │  Signature: refine · distance · is_similar · ==│
//! ├───────────────┬───────────────┬───────────────┤
//! │   Tokenizer   │   Alignment   │    Metrics    │
//! │ • whitespace  │ • LCS pairing │ • Levenshtein │
//! │ • wildcards   │ • rolling LCS │ • indel count │
//! └───────────────┴───────────────┴───────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use sigil::{Signature, SignatureOptions};
//!
//! let options = SignatureOptions::with_threshold(3.0);
//! let signature = Signature::new("a b c d", options)?;
//! let other: Signature = "a x c y".parse()?;
//!
//! assert_eq!(signature.distance(&other), 2);
//! assert_eq!(signature.differences_between(&other), 4);
//! assert!(signature.is_similar(&other));
//! # Ok::<(), sigil::SigilError>(())
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Options and error handling
pub mod core {
    //! Configuration and error types shared by every module.

    pub mod config;
    pub mod errors;
}

pub mod dedupe;
pub mod signature;

// Re-export primary types for convenience
pub use crate::core::config::{DedupeOptions, SignatureOptions};
pub use crate::core::errors::{Result, ResultExt, SigilError};
pub use dedupe::{Deduplicator, Group, Observation};
pub use signature::{Alignment, Signature, Token};
