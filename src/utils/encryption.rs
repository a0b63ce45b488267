//! Password-based secret encryption
//!
//! Encrypts small secrets (mnemonic passphrases, private keys) using:
//! - Argon2id for key derivation from the profile password
//! - AES-256-GCM for authenticated encryption
//! - A fresh random salt and nonce per call
//!
//! The ciphertext is a single base64 string so it can be stored inside a
//! JSON field:
//!
//! ```text
//! version(1) || m_cost(4) || t_cost(4) || p_cost(4) || salt(16) || nonce(12) || ciphertext+tag
//! ```

#![allow(deprecated)] // GenericArray::from_slice deprecated in generic-array 1.x

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{ProfileError, ProfileResult};
use crate::types::Password;

/// Ciphertext layout version
pub const CIPHERTEXT_VERSION: u8 = 1;

const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = 1 + 12 + SALT_LEN + NONCE_LEN;

/// Upper bounds accepted when reading KDF cost from a stored ciphertext
const MAX_MEMORY_COST: u32 = 1024 * 1024;
const MAX_TIME_COST: u32 = 64;
const MAX_PARALLELISM: u32 = 16;

/// Key derivation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in KiB
    pub memory_cost: u32,
    /// Time cost (iterations)
    pub time_cost: u32,
    /// Parallelism
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            // 19 MiB, 2 iterations, 1 lane (OWASP Argon2id baseline)
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
        }
    }
}

/// Encrypt a secret under a password with the default KDF cost
pub fn encrypt(plaintext: &str, password: &Password) -> ProfileResult<String> {
    encrypt_with_params(plaintext, password, KdfParams::default())
}

/// Encrypt a secret under a password with explicit KDF cost
pub fn encrypt_with_params(
    plaintext: &str,
    password: &Password,
    params: KdfParams,
) -> ProfileResult<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    let key = derive_key(password.expose(), &salt, &params)?;

    let cipher = Aes256Gcm::new_from_slice(key.as_ref())
        .map_err(|e| ProfileError::crypto_error(format!("Failed to create cipher: {}", e)))?;

    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| ProfileError::crypto_error(format!("Encryption failed: {}", e)))?;

    let mut out = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    out.push(CIPHERTEXT_VERSION);
    out.extend_from_slice(&params.memory_cost.to_be_bytes());
    out.extend_from_slice(&params.time_cost.to_be_bytes());
    out.extend_from_slice(&params.parallelism.to_be_bytes());
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);

    Ok(base64_encode(&out))
}

/// Decrypt a secret produced by [`encrypt`]
///
/// Fails with `DecryptionError` when the password is wrong or the
/// ciphertext is malformed.
pub fn decrypt(ciphertext: &str, password: &Password) -> ProfileResult<String> {
    let raw = base64_decode(ciphertext)?;

    if raw.len() < HEADER_LEN + TAG_LEN {
        return Err(ProfileError::decryption("Ciphertext is too short"));
    }
    if raw[0] != CIPHERTEXT_VERSION {
        return Err(ProfileError::decryption(format!(
            "Unsupported ciphertext version: {}",
            raw[0]
        )));
    }

    let params = KdfParams {
        memory_cost: read_u32(&raw[1..5]),
        time_cost: read_u32(&raw[5..9]),
        parallelism: read_u32(&raw[9..13]),
    };
    if params.memory_cost > MAX_MEMORY_COST
        || params.time_cost > MAX_TIME_COST
        || params.parallelism > MAX_PARALLELISM
    {
        return Err(ProfileError::decryption("Ciphertext declares an unsupported KDF cost"));
    }

    let salt = &raw[13..13 + SALT_LEN];
    let nonce_bytes = &raw[13 + SALT_LEN..HEADER_LEN];
    let body = &raw[HEADER_LEN..];

    let key = derive_key(password.expose(), salt, &params)
        .map_err(|e| ProfileError::decryption(e.message))?;

    let cipher = Aes256Gcm::new_from_slice(key.as_ref())
        .map_err(|e| ProfileError::decryption(format!("Failed to create cipher: {}", e)))?;

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), body)
        .map_err(|_| {
            ProfileError::decryption("Decryption failed - incorrect password or corrupted data")
        })?;
    let plaintext = Zeroizing::new(plaintext);

    String::from_utf8(plaintext.to_vec())
        .map_err(|_| ProfileError::decryption("Decrypted secret is not valid UTF-8"))
}

/// Extract the nonce from a ciphertext, hex encoded
pub fn nonce_hex(ciphertext: &str) -> ProfileResult<String> {
    let raw = base64_decode(ciphertext)?;
    if raw.len() < HEADER_LEN {
        return Err(ProfileError::decryption("Ciphertext is too short"));
    }
    Ok(hex::encode(&raw[13 + SALT_LEN..HEADER_LEN]))
}

/// Derive encryption key from password using Argon2id
fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> ProfileResult<Zeroizing<[u8; 32]>> {
    use argon2::{Algorithm, Argon2, Params, Version};

    let argon2_params = Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(32), // Output length
    )
    .map_err(|e| ProfileError::crypto_error(format!("Invalid KDF params: {}", e)))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), salt, key.as_mut())
        .map_err(|e| ProfileError::crypto_error(format!("Key derivation failed: {}", e)))?;

    Ok(key)
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_be_bytes(buf)
}

fn base64_encode(data: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(data)
}

fn base64_decode(s: &str) -> ProfileResult<Vec<u8>> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(s.trim())
        .map_err(|e| ProfileError::decryption(format!("Invalid base64: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn password(value: &str) -> Password {
        Password::new(value).unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let plaintext = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
        let password = password("test_password_123");

        let encrypted = encrypt(plaintext, &password).unwrap();
        let decrypted = decrypt(&encrypted, &password).unwrap();

        assert_eq!(plaintext, decrypted);
    }

    #[test]
    fn test_empty_plaintext_roundtrip() {
        let password = password("test_password_123");
        let encrypted = encrypt("", &password).unwrap();
        assert_eq!(decrypt(&encrypted, &password).unwrap(), "");
    }

    #[test]
    fn test_wrong_password_fails() {
        let encrypted = encrypt("secret data", &password("correct_password")).unwrap();
        let err = decrypt(&encrypted, &password("wrong_password")).unwrap_err();

        assert_eq!(err.code, ErrorCode::DecryptionError);
    }

    #[test]
    fn test_malformed_ciphertext_fails() {
        let password = password("correct_password");

        let err = decrypt("not base64 at all!", &password).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecryptionError);

        let err = decrypt("AQID", &password).unwrap_err();
        assert_eq!(err.code, ErrorCode::DecryptionError);
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let password = password("correct_password");
        let encrypted = encrypt("secret data", &password).unwrap();

        use base64::Engine;
        let mut raw = base64::engine::general_purpose::STANDARD.decode(&encrypted).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = base64::engine::general_purpose::STANDARD.encode(&raw);

        assert!(decrypt(&tampered, &password).is_err());
    }

    #[test]
    fn test_different_encryptions_produce_different_output() {
        let password = password("same_password");

        let encrypted1 = encrypt("same data", &password).unwrap();
        let encrypted2 = encrypt("same data", &password).unwrap();

        assert_ne!(encrypted1, encrypted2);
        assert_ne!(nonce_hex(&encrypted1).unwrap(), nonce_hex(&encrypted2).unwrap());
    }

    #[test]
    fn test_params_travel_with_ciphertext() {
        let password = password("same_password");
        let cheap = KdfParams {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        };

        let encrypted = encrypt_with_params("payload", &password, cheap).unwrap();
        assert_eq!(decrypt(&encrypted, &password).unwrap(), "payload");
    }
}
