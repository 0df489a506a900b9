// SPDX-License-Identifier: MIT

//! OAuth state signing tests.
//!
//! These tests verify that the signed state parameter survives the
//! round-trip through the identity provider and that tampering or key
//! mismatch is rejected.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use gallery_api::routes::auth::{sign_state, verify_state};

const KEY: &[u8] = b"test_state_key_32_bytes_minimum!";

#[test]
fn test_state_roundtrip() {
    let state = sign_state(KEY).unwrap();
    assert!(verify_state(&state, KEY).is_ok());
}

#[test]
fn test_state_rejects_wrong_key() {
    let state = sign_state(KEY).unwrap();
    assert!(verify_state(&state, b"another_key_entirely............").is_err());
}

#[test]
fn test_state_rejects_tampered_payload() {
    let state = sign_state(KEY).unwrap();

    // Flip the payload while keeping the signature
    let decoded = String::from_utf8(URL_SAFE_NO_PAD.decode(&state).unwrap()).unwrap();
    let (payload, sig) = decoded.rsplit_once('|').unwrap();
    let tampered_payload = payload.replace("login", "admin");
    let tampered = URL_SAFE_NO_PAD.encode(format!("{}|{}", tampered_payload, sig).as_bytes());

    assert!(verify_state(&tampered, KEY).is_err());
}

#[test]
fn test_state_rejects_garbage() {
    assert!(verify_state("not-valid-base64!!!", KEY).is_err());
    assert!(verify_state("", KEY).is_err());

    // Valid base64 but no signature segment
    let no_sig = URL_SAFE_NO_PAD.encode(b"login-abcdef");
    assert!(verify_state(&no_sig, KEY).is_err());
}

#[test]
fn test_state_base64_url_safe() {
    // The state travels in a query string, so it must be URL-safe
    let state = sign_state(KEY).unwrap();

    assert!(!state.contains('+'), "State should not contain '+'");
    assert!(!state.contains('/'), "State should not contain '/'");
    assert!(!state.contains('='), "State should not contain '=' padding");
}
