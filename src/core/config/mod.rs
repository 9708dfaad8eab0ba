//! Option types for signatures and the deduplicator.
//!
//! Options can be built in code, deserialized with serde, or parsed from
//! untyped JSON/YAML data. The untyped path validates every field explicitly
//! so that a non-numeric threshold surfaces as
//! [`SigilError::InvalidArgument`] rather than a generic deserialization
//! failure.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::{Result, ResultExt, SigilError};
use validation::{parse_limit, parse_threshold, validate_positive_limit, validate_threshold};

/// Options applied when constructing a [`Signature`](crate::Signature).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureOptions {
    /// Maximum token distance (exclusive) at which two signatures are similar
    pub threshold: f64,
}

impl Default for SignatureOptions {
    /// Zero threshold: only wildcard-compatible identical signatures are similar.
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

impl SignatureOptions {
    /// Options with the given threshold. Call [`validate`](Self::validate)
    /// (or construct a signature) to check it.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold, "threshold")
    }

    /// Parse options from untyped data such as a decoded JSON object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            SigilError::invalid_argument("options", value, "expected a mapping of options")
        })?;

        let mut options = Self::default();
        for (key, raw) in map {
            match key.as_str() {
                "threshold" => {
                    if let Some(threshold) = parse_threshold(raw, "threshold")? {
                        options.threshold = threshold;
                    }
                }
                other => {
                    return Err(SigilError::config_field(
                        format!("unknown signature option '{other}'"),
                        other,
                    ))
                }
            }
        }

        Ok(options)
    }

    /// Parse options from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).context("Failed to parse signature options")?;
        Self::from_value(&value)
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).context("Failed to parse signature options")?;
        Self::from_value(&value)
    }
}

/// Options for the [`Deduplicator`](crate::dedupe::Deduplicator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeOptions {
    /// Options applied to every group representative
    pub signature: SignatureOptions,

    /// Refine a group's representative with each sample that matches it
    pub refine_on_match: bool,

    /// Reject samples with more tokens than this
    pub max_tokens: Option<usize>,

    /// Keep at most this many groups. A new group replaces the group with
    /// the fewest hits once the limit is reached.
    pub max_groups: Option<usize>,
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            signature: SignatureOptions::default(),
            refine_on_match: true,
            max_tokens: None,
            max_groups: None,
        }
    }
}

impl DedupeOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.signature.validate()?;
        validate_positive_limit(self.max_tokens, "max_tokens")?;
        validate_positive_limit(self.max_groups, "max_groups")?;
        Ok(())
    }

    /// Parse options from untyped data.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            SigilError::invalid_argument("options", value, "expected a mapping of options")
        })?;

        let mut options = Self::default();
        for (key, raw) in map {
            match key.as_str() {
                "signature" => options.signature = SignatureOptions::from_value(raw)?,
                "refine_on_match" => {
                    options.refine_on_match = raw.as_bool().ok_or_else(|| {
                        SigilError::invalid_argument(key, raw, "expected a boolean")
                    })?;
                }
                "max_tokens" => options.max_tokens = parse_limit(raw, key)?,
                "max_groups" => options.max_groups = parse_limit(raw, key)?,
                other => {
                    return Err(SigilError::config_field(
                        format!("unknown dedupe option '{other}'"),
                        other,
                    ))
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Parse options from a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value =
            serde_yaml::from_str(content).context("Failed to parse dedupe options")?;
        Self::from_value(&value)
    }

    /// Load options from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid options file {}", path.display()))
    }

    /// Save options to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self).context("Failed to serialize dedupe options")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write options file {}", path.display()))
    }
}
