//! Token lifecycle checks against the public library API

use order_desk::user_auth::{issue_token, verify_token};

const SECRET: &str = "integration-test-secret";

#[test]
fn issued_token_carries_email_subject_and_hour_expiry() {
    let token = issue_token(SECRET, "rashed@example.com", 3600).unwrap();

    let claims = verify_token(SECRET, &token).unwrap();
    assert_eq!(claims.sub, "rashed@example.com");
    assert_eq!(claims.exp - claims.iat, 3600, "TTL must be exactly 1 hour");
}

#[test]
fn token_survives_roundtrip_only_with_issuing_secret() {
    let token = issue_token(SECRET, "rashed@example.com", 3600).unwrap();

    assert!(verify_token(SECRET, &token).is_ok());
    assert!(
        verify_token("some-other-secret", &token).is_err(),
        "A token must not verify under a different secret"
    );
}

#[test]
fn expired_token_is_rejected() {
    // Negative TTL puts exp in the past, beyond the verifier's leeway
    let token = issue_token(SECRET, "rashed@example.com", -120).unwrap();
    assert!(verify_token(SECRET, &token).is_err());
}

#[test]
fn tampered_token_is_rejected() {
    let token = issue_token(SECRET, "rashed@example.com", 3600).unwrap();

    // Flip a character in the payload segment
    let mut parts: Vec<String> = token.split('.').map(String::from).collect();
    assert_eq!(parts.len(), 3);
    let mut payload: Vec<u8> = parts[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    parts[1] = String::from_utf8(payload).unwrap();
    let tampered = parts.join(".");

    assert!(verify_token(SECRET, &tampered).is_err());
}
