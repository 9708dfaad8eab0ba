//! End-to-end refinement and comparison over noisy samples.

use sigil::{Deduplicator, DedupeOptions, SigilError, Signature, SignatureOptions};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A multi-line sample whose four numbers are the only volatile fields.
fn noisy_sample(noise: [u32; 4]) -> String {
    format!(
        "
        This {} is a test.
        Not {} really sure what {} else to put here...
        {}
        ",
        noise[0], noise[1], noise[2], noise[3]
    )
}

fn different_noisy_sample(noise: u32) -> String {
    format!("\n        This {noise} is a different test.\n")
}

/// Noise values for sample `round`, disjoint from every other round.
fn noise_for(round: u32) -> [u32; 4] {
    let base = 1000 * (round + 1);
    [base + 7, base + 131, base + 402, base + 999]
}

fn signature(text: &str) -> Signature {
    Signature::new(text, SignatureOptions::default()).unwrap()
}

#[test]
fn refine_masks_exactly_the_volatile_positions() {
    init_tracing();

    let mut refined = signature(&noisy_sample(noise_for(0)));
    for round in 1..10 {
        refined.refine_mut(&noisy_sample(noise_for(round)));
    }

    assert_eq!(
        refined.to_string(),
        "This * is a test. Not * really sure what * else to put here... *"
    );
    assert_eq!(refined.wildcard_count(), 4);
}

#[test]
fn independent_refinement_converges() {
    let mut first = signature(&noisy_sample(noise_for(0)));
    for round in 1..10 {
        first = first.refine(&noisy_sample(noise_for(round)));
    }

    let mut second = signature(&noisy_sample(noise_for(20)));
    for round in 21..30 {
        second = second.refine(&noisy_sample(noise_for(round)));
    }

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn http_template_converges_after_one_refinement() {
    let mut first = signature("GET / 17 HTTP/1.1");
    first.refine_mut("GET / 93 HTTP/1.1");
    assert_eq!(first.to_string(), "GET / * HTTP/1.1");

    let mut second = signature("GET / 28 HTTP/1.1");
    second.refine_mut("GET / 64 HTTP/1.1");
    let mut third = signature("GET / 5 HTTP/1.1");
    third.refine_mut("GET / 300 HTTP/1.1");

    assert_eq!(second.to_string(), "GET / * HTTP/1.1");
    assert_eq!(third.to_string(), "GET / * HTTP/1.1");
    assert_eq!(second, third);
}

#[test]
fn different_templates_stay_unequal_after_refinement() {
    let mut first = signature(&noisy_sample(noise_for(0)));
    let mut second = signature(&different_noisy_sample(11));
    for round in 1..10 {
        first.refine_mut(&noisy_sample(noise_for(round)));
        second.refine_mut(&different_noisy_sample(11 + round));
    }

    assert_ne!(first, second);
    assert_eq!(second.to_string(), "This * is a different test.");
}

#[test]
fn metrics_count_volatile_tokens() {
    let first = signature(&noisy_sample(noise_for(0)));
    let second = signature(&noisy_sample(noise_for(1)));
    let third = signature(&different_noisy_sample(1));
    let fourth = signature(&different_noisy_sample(2));

    assert_eq!(first.distance(&second), 4);
    assert_eq!(second.distance(&second), 0);
    assert_eq!(first.differences_between(&second), 8);
    assert_eq!(second.differences_between(&second), 0);

    assert_eq!(third.distance(&fourth), 1);
    assert_eq!(fourth.distance(&fourth), 0);
    assert_eq!(third.differences_between(&fourth), 2);
    assert_eq!(fourth.differences_between(&fourth), 0);

    // Different lengths: 16 and 6 tokens sharing "This", "is", "a", "test."
    assert_eq!(first.differences_between(&third), 16 + 6 - 2 * 4);
    assert!(first.differences_between(&third) >= first.distance(&third));
}

#[test]
fn threshold_controls_similarity() {
    let other = signature("test that here 2");

    let strict = Signature::with_threshold("test this here 1", 2.0).unwrap();
    let loose = Signature::with_threshold("test this here 1", 5.0).unwrap();

    assert!(!strict.is_similar(&other));
    assert!(loose.is_similar(&other));
}

#[test]
fn non_numeric_threshold_is_an_invalid_argument() {
    let err = SignatureOptions::from_json_str(r#"{"threshold": "stuff"}"#).unwrap_err();
    assert!(matches!(err, SigilError::InvalidArgument { .. }));
    assert!(err.to_string().contains("stuff"));
}

#[test]
fn comparing_against_a_non_signature_is_a_type_mismatch() {
    let sig = signature("a b c");
    let err = sig.distance_any(&String::from("a b c")).unwrap_err();
    assert!(matches!(err, SigilError::TypeMismatch { .. }));
}

#[test]
fn deduplicator_collapses_noisy_observations() {
    init_tracing();

    let mut dedupe = Deduplicator::new(DedupeOptions {
        signature: SignatureOptions::with_threshold(5.0),
        ..DedupeOptions::default()
    })
    .unwrap();

    for round in 0..10 {
        dedupe.observe(&noisy_sample(noise_for(round))).unwrap();
        dedupe.observe(&different_noisy_sample(round)).unwrap();
    }

    assert_eq!(dedupe.len(), 2);
    assert_eq!(dedupe.observed(), 20);
    assert!(dedupe.groups().iter().all(|group| group.hits() == 10));
    assert_eq!(
        dedupe.groups()[0].representative().to_string(),
        "This * is a test. Not * really sure what * else to put here... *"
    );
}
