//! Loading and saving deduplicator options on disk.

use sigil::{DedupeOptions, SigilError, SignatureOptions};
use tempfile::tempdir;

#[test]
fn yaml_round_trip_preserves_options() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dedupe.yml");

    let options = DedupeOptions {
        signature: SignatureOptions::with_threshold(3.0),
        refine_on_match: false,
        max_tokens: Some(256),
        max_groups: Some(64),
    };
    options.to_yaml_file(&path).unwrap();

    let loaded = DedupeOptions::from_yaml_file(&path).unwrap();
    assert_eq!(loaded, options);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = DedupeOptions::from_yaml_file(dir.path().join("absent.yml")).unwrap_err();

    assert!(matches!(err, SigilError::Io { .. }));
    let message = err.to_string();
    assert!(message.contains("Failed to read options file"));
    assert!(message.contains("absent.yml"));
}

#[test]
fn non_numeric_threshold_in_file_is_an_invalid_argument() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yml");
    std::fs::write(&path, "signature:\n  threshold: bad\n").unwrap();

    let err = DedupeOptions::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, SigilError::InvalidArgument { .. }));
    let message = err.to_string();
    assert!(message.contains("bad"));
    assert!(message.contains("Invalid options file"));
    assert!(message.contains("bad.yml"));
}

#[test]
fn malformed_yaml_is_a_serialization_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "signature: [unclosed\n").unwrap();

    let err = DedupeOptions::from_yaml_file(&path).unwrap_err();
    assert!(matches!(err, SigilError::Serialization { .. }));
    let message = err.to_string();
    assert!(message.contains("broken.yml"));
    assert!(message.contains("Failed to parse dedupe options"));
}

#[test]
fn unwritable_path_is_an_io_error_naming_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("dedupe.yml");

    let err = DedupeOptions::default().to_yaml_file(&path).unwrap_err();
    assert!(matches!(err, SigilError::Io { .. }));
    let message = err.to_string();
    assert!(message.contains("Failed to write options file"));
    assert!(message.contains("missing-dir"));
}
