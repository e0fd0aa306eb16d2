//! Encryption adapter integration harness.
//!
//! # What this covers
//!
//! - **Preconditions**: empty passphrase / empty plaintext are rejected with
//!   the user-facing messages the shell shows as alerts.
//! - **Round trip**: encrypt → decrypt restores the plaintext, including
//!   multi-line and non-ASCII text.
//! - **Freshness**: sealing the same input twice yields different armor
//!   (fresh salt and nonce per call).
//! - **Rejection**: wrong passphrase and tampered armor fail closed.
//!
//! # What this does NOT cover
//!
//! - Cipher internals — the AES implementation is an opaque dependency.
//!
//! # Running
//!
//! ```sh
//! cargo test --test encryption_harness
//! ```

use pretty_assertions::assert_eq;
use tbx_crypto::{decrypt, encrypt, CryptoError};

#[test]
fn empty_passphrase_is_a_user_facing_error() {
    let err = encrypt("", "some text").unwrap_err();
    assert_eq!(err, CryptoError::EmptyPassphrase);
    assert!(err.to_string().contains("encryption key"));
}

#[test]
fn empty_plaintext_is_a_user_facing_error() {
    let err = encrypt("key", "").unwrap_err();
    assert_eq!(err, CryptoError::EmptyPlaintext);
    assert!(err.to_string().contains("text to encrypt"));
}

#[test]
fn round_trip_restores_plaintext() {
    let armored = encrypt("correct horse battery staple", "attack at dawn").unwrap();
    assert_eq!(
        decrypt("correct horse battery staple", &armored).unwrap(),
        "attack at dawn"
    );
}

#[test]
fn round_trip_multiline_and_unicode() {
    let plaintext = "line one\nline two\n— fin 日本語";
    let armored = encrypt("pw", plaintext).unwrap();
    assert_eq!(decrypt("pw", &armored).unwrap(), plaintext);
}

#[test]
fn armor_differs_between_calls() {
    let a = encrypt("key", "same input").unwrap();
    let b = encrypt("key", "same input").unwrap();
    assert_ne!(a, b);
    // Both still decrypt to the same plaintext.
    assert_eq!(decrypt("key", &a).unwrap(), decrypt("key", &b).unwrap());
}

#[test]
fn wrong_passphrase_fails_closed() {
    let armored = encrypt("right", "secret").unwrap();
    assert_eq!(decrypt("wrong", &armored), Err(CryptoError::Rejected));
}

#[test]
fn truncated_armor_is_malformed() {
    let armored = encrypt("key", "secret").unwrap();
    let truncated = &armored[..8];
    assert!(matches!(
        decrypt("key", truncated),
        Err(CryptoError::Malformed(_))
    ));
}
