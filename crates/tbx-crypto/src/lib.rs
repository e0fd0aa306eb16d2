//! tbx-crypto — passphrase-based text sealing for tbx.
//!
//! A thin adapter over the RustCrypto AES-GCM implementation. The passphrase
//! is stretched into a 256-bit key with PBKDF2-HMAC-SHA256 over a fresh
//! random salt; the plaintext is sealed under a fresh random nonce. The
//! armored output is `base64(salt ‖ nonce ‖ ciphertext)`, self-contained for
//! later decryption with the same passphrase.
//!
//! The cipher itself is a black box: nothing cryptographic is implemented
//! here beyond wiring the primitives together.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const PBKDF2_ROUNDS: u32 = 100_000;

/// Errors from the sealing adapter.
///
/// The first two are user-input preconditions surfaced verbatim as transient
/// alerts; the last two only occur on decryption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Please enter an encryption key!")]
    EmptyPassphrase,
    #[error("Please enter some text to encrypt!")]
    EmptyPlaintext,
    #[error("input is not a valid sealed message: {0}")]
    Malformed(String),
    #[error("decryption failed — wrong key or corrupted input")]
    Rejected,
}

/// Seal `plaintext` under `passphrase`.
///
/// Every call draws a fresh salt and nonce, so sealing the same input twice
/// yields different armored strings.
pub fn encrypt(passphrase: &str, plaintext: &str) -> Result<String, CryptoError> {
    if passphrase.is_empty() {
        return Err(CryptoError::EmptyPassphrase);
    }
    if plaintext.is_empty() {
        return Err(CryptoError::EmptyPlaintext);
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let cipher = cipher_for(passphrase, &salt);
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::Rejected)?;

    let mut sealed = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    sealed.extend_from_slice(&salt);
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);

    tracing::debug!(plaintext_len = plaintext.len(), "sealed message");
    Ok(BASE64.encode(sealed))
}

/// Open an armored string produced by [`encrypt`] with the same passphrase.
pub fn decrypt(passphrase: &str, armored: &str) -> Result<String, CryptoError> {
    if passphrase.is_empty() {
        return Err(CryptoError::EmptyPassphrase);
    }

    let sealed = BASE64
        .decode(armored.trim())
        .map_err(|e| CryptoError::Malformed(e.to_string()))?;
    if sealed.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(CryptoError::Malformed("too short".to_string()));
    }

    let (salt, rest) = sealed.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let cipher = cipher_for(passphrase, salt);
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CryptoError::Rejected)?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Malformed(e.to_string()))
}

fn cipher_for(passphrase: &str, salt: &[u8]) -> Aes256Gcm {
    let mut key_bytes = [0u8; 32];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ROUNDS, &mut key_bytes);
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_passphrase_rejected() {
        assert_eq!(encrypt("", "hello"), Err(CryptoError::EmptyPassphrase));
    }

    #[test]
    fn empty_plaintext_rejected() {
        assert_eq!(encrypt("key", ""), Err(CryptoError::EmptyPlaintext));
    }

    #[test]
    fn round_trip() {
        let armored = encrypt("hunter2", "attack at dawn").unwrap();
        assert_eq!(decrypt("hunter2", &armored).unwrap(), "attack at dawn");
    }

    #[test]
    fn round_trip_unicode() {
        let armored = encrypt("clé", "héllo wörld — 日本語").unwrap();
        assert_eq!(decrypt("clé", &armored).unwrap(), "héllo wörld — 日本語");
    }

    #[test]
    fn output_is_base64_and_long_enough() {
        let armored = encrypt("key", "x").unwrap();
        let sealed = BASE64.decode(&armored).unwrap();
        assert!(sealed.len() >= SALT_LEN + NONCE_LEN + TAG_LEN + 1);
    }

    #[test]
    fn same_input_seals_differently_each_time() {
        let a = encrypt("key", "same text").unwrap();
        let b = encrypt("key", "same text").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_passphrase_is_rejected() {
        let armored = encrypt("right", "secret").unwrap();
        assert_eq!(decrypt("wrong", &armored), Err(CryptoError::Rejected));
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let armored = encrypt("key", "secret").unwrap();
        let mut sealed = BASE64.decode(&armored).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let tampered = BASE64.encode(sealed);
        assert_eq!(decrypt("key", &tampered), Err(CryptoError::Rejected));
    }

    #[test]
    fn garbage_input_is_malformed() {
        assert!(matches!(
            decrypt("key", "not base64 at all!!!"),
            Err(CryptoError::Malformed(_))
        ));
        assert!(matches!(
            decrypt("key", "AAAA"),
            Err(CryptoError::Malformed(_))
        ));
    }
}
