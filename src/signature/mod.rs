//! Noise-tolerant text signatures.
//!
//! A [`Signature`] is a whitespace-tokenized text sample whose volatile
//! positions (timestamps, nonces, counters) can be masked out by refining it
//! against further samples of the same template. Masked positions become
//! [`Token::Wildcard`] and match anything in later comparisons.
//!
//! ```
//! use sigil::{Signature, SignatureOptions};
//!
//! let mut signature = Signature::new("GET / 17 HTTP/1.1", SignatureOptions::with_threshold(2.0))?;
//! signature.refine_mut("GET / 93 HTTP/1.1");
//! assert_eq!(signature.to_string(), "GET / * HTTP/1.1");
//!
//! let other: Signature = "GET / 55 HTTP/1.1".parse()?;
//! assert!(signature.is_similar(&other));
//! # Ok::<(), sigil::SigilError>(())
//! ```

pub mod alignment;
pub mod metrics;
pub mod token;

use std::any::{type_name, Any};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::core::config::SignatureOptions;
use crate::core::errors::{Result, SigilError};

pub use alignment::{align, lcs_len, Alignment};
pub use token::{tokenize, tokenize_bytes, Token, WILDCARD};

/// A token sequence with masked noise positions plus a similarity threshold.
///
/// Equality is structural and wildcard-aware: two signatures are equal when
/// they have the same length and every position is either the same literal or
/// a wildcard on at least one side. The threshold does not take part. Since
/// wildcard compatibility is not transitive, `Signature` implements
/// [`PartialEq`] only. Use [`Signature::same_instance`] to ask whether two
/// references denote the same value in memory.
///
/// [`refine`](Self::refine) leaves the receiver untouched and returns a new
/// signature. [`refine_mut`](Self::refine_mut) takes `&mut self`, so the
/// borrow checker guarantees a single writer while it runs; shared readers of
/// an unrefined signature may compare concurrently.
#[derive(Debug, Clone)]
pub struct Signature {
    tokens: Vec<Token>,
    threshold: f64,
}

impl Signature {
    /// Tokenize `text` into a new signature.
    ///
    /// Fails with [`SigilError::InvalidArgument`] if the threshold is
    /// negative or not finite.
    pub fn new(text: &str, options: SignatureOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_tokens(token::tokenize(text), options.threshold))
    }

    /// Tokenize `text` with an explicit threshold.
    pub fn with_threshold(text: &str, threshold: f64) -> Result<Self> {
        Self::new(text, SignatureOptions::with_threshold(threshold))
    }

    /// Tokenize raw bytes, failing with [`SigilError::InvalidArgument`] if
    /// they are not UTF-8 text.
    pub fn from_bytes(bytes: &[u8], options: SignatureOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_tokens(
            token::tokenize_bytes(bytes)?,
            options.threshold,
        ))
    }

    fn from_tokens(tokens: Vec<Token>, threshold: f64) -> Self {
        trace!(tokens = tokens.len(), threshold, "built signature");
        Self { tokens, threshold }
    }

    /// The current token sequence
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the source text had no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of masked positions
    pub fn wildcard_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_wildcard()).count()
    }

    /// Similarity threshold fixed at construction
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Return a copy of this signature refined against another sample.
    pub fn refine(&self, text: &str) -> Self {
        let mut refined = self.clone();
        refined.refine_mut(text);
        refined
    }

    /// Refine in place against another sample and return the receiver.
    ///
    /// Positions whose token is absent from, or differs in, the aligned
    /// sample become wildcards. Tokens that appear only in the sample are
    /// ignored, so the length never changes and a wildcard never reverts.
    pub fn refine_mut(&mut self, text: &str) -> &mut Self {
        let sample = token::tokenize(text);
        self.mask_against(&sample);
        self
    }

    /// Return a copy of this signature refined against an existing signature.
    pub fn refine_with(&self, other: &Signature) -> Self {
        let mut refined = self.clone();
        refined.refine_with_mut(other);
        refined
    }

    /// Refine in place against an existing signature.
    ///
    /// A wildcard in `other` masks the position it is aligned with.
    pub fn refine_with_mut(&mut self, other: &Signature) -> &mut Self {
        self.mask_against(&other.tokens);
        self
    }

    fn mask_against(&mut self, sample: &[Token]) {
        let before = self.wildcard_count();
        let partners = alignment::align(&self.tokens, sample).left_partners();

        for (token, partner) in self.tokens.iter_mut().zip(partners) {
            let keep = matches!(partner, Some(index) if sample[index] == *token);
            if !keep {
                *token = Token::Wildcard;
            }
        }

        let after = self.wildcard_count();
        debug!(
            tokens = self.tokens.len(),
            sample_tokens = sample.len(),
            newly_masked = after - before,
            wildcards = after,
            "refined signature"
        );
    }

    /// Substitution-aware token edit distance to `other`.
    pub fn distance(&self, other: &Signature) -> usize {
        metrics::distance(&self.tokens, &other.tokens)
    }

    /// Insertion/deletion-only token edit cost to `other`.
    pub fn differences_between(&self, other: &Signature) -> usize {
        metrics::differences_between(&self.tokens, &other.tokens)
    }

    /// [`distance`](Self::distance) for callers holding an untyped operand.
    ///
    /// Fails with [`SigilError::TypeMismatch`] unless `other` is a signature.
    pub fn distance_any<T: Any>(&self, other: &T) -> Result<usize> {
        downcast_operand(other).map(|other| self.distance(other))
    }

    /// [`differences_between`](Self::differences_between) for callers
    /// holding an untyped operand.
    pub fn differences_between_any<T: Any>(&self, other: &T) -> Result<usize> {
        downcast_operand(other).map(|other| self.differences_between(other))
    }

    /// The alignment used for refinement and the difference count.
    pub fn alignment_with(&self, other: &Signature) -> Alignment {
        alignment::align(&self.tokens, &other.tokens)
    }

    /// [`is_similar_within`](Self::is_similar_within) using this signature's
    /// own threshold.
    pub fn is_similar(&self, other: &Signature) -> bool {
        self.is_similar_within(other, self.threshold)
    }

    /// Whether `other` is within `threshold` of this signature.
    ///
    /// Two cases make signatures similar:
    /// - they compare equal with `==` (same length, every position equal or a
    ///   wildcard). This holds for any threshold, including zero, where
    ///   `distance < 0.0` could never be true;
    /// - otherwise, their [`distance`](Self::distance) is strictly below
    ///   `threshold`.
    #[allow(clippy::cast_precision_loss)]
    pub fn is_similar_within(&self, other: &Signature, threshold: f64) -> bool {
        self == other || (self.distance(other) as f64) < threshold
    }

    /// Whether both references point at the same signature value.
    pub fn same_instance(a: &Signature, b: &Signature) -> bool {
        std::ptr::eq(a, b)
    }
}

fn downcast_operand<T: Any>(other: &T) -> Result<&Signature> {
    (other as &dyn Any)
        .downcast_ref::<Signature>()
        .ok_or_else(|| SigilError::type_mismatch("Signature", type_name::<T>()))
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| a.matches(b))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl FromStr for Signature {
    type Err = SigilError;

    /// Builds a signature with default options (zero threshold).
    fn from_str(text: &str) -> Result<Self> {
        Self::new(text, SignatureOptions::default())
    }
}
