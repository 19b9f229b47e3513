//! At-rest cipher layer
//!
//! Reversible byte-stream transform applied to segment files and merged
//! artifacts. This is obfuscation, not confidentiality-grade encryption:
//! XOR with a single-byte key, applied whole-file. Applying the transform
//! twice with the same key restores the original bytes.
//!
//! There is no integrity check. Corrupted or never-encrypted input
//! silently "decrypts" to garbage; callers must not assume tampering is
//! detectable.

use crate::Result;
use std::fs;
use std::path::Path;

/// Default transform key, compatible with archives written by the
/// original release.
pub const DEFAULT_KEY: u8 = 0x55;

/// Stateless at-rest byte transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cipher {
    key: u8,
}

impl Default for Cipher {
    fn default() -> Self {
        Self { key: DEFAULT_KEY }
    }
}

impl Cipher {
    /// Cipher with an explicit key
    pub fn with_key(key: u8) -> Self {
        Self { key }
    }

    /// Transform a byte slice into a new buffer
    ///
    /// Involutive: `transform(transform(x)) == x`.
    pub fn transform(&self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|b| b ^ self.key).collect()
    }

    /// Transform a buffer in place
    pub fn transform_in_place(&self, data: &mut [u8]) {
        for byte in data.iter_mut() {
            *byte ^= self.key;
        }
    }

    /// Encrypt a file in place
    pub fn encrypt_file(&self, path: &Path) -> Result<()> {
        let mut data = fs::read(path)?;
        self.transform_in_place(&mut data);
        fs::write(path, data)?;
        Ok(())
    }

    /// Encrypt `src`, writing the result to `dst`
    pub fn encrypt_file_to(&self, src: &Path, dst: &Path) -> Result<()> {
        let mut data = fs::read(src)?;
        self.transform_in_place(&mut data);
        fs::write(dst, data)?;
        Ok(())
    }

    /// Decrypt `encrypted`, writing the result to `dst`
    ///
    /// The transform is symmetric; this exists as a distinct name for
    /// call-site clarity.
    pub fn decrypt_file(&self, encrypted: &Path, dst: &Path) -> Result<()> {
        self.encrypt_file_to(encrypted, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_is_involutive() {
        let cipher = Cipher::default();
        let data: Vec<u8> = (0u8..=255).collect();
        assert_eq!(cipher.transform(&cipher.transform(&data)), data);
    }

    #[test]
    fn transform_is_involutive_for_every_key() {
        let data = b"attack at dawn \x00\xff\x7f";
        for key in 0u8..=255 {
            let cipher = Cipher::with_key(key);
            assert_eq!(cipher.transform(&cipher.transform(data)), data);
        }
    }

    #[test]
    fn in_place_matches_allocating_transform() {
        let cipher = Cipher::with_key(0x3c);
        let original = b"0123456789".to_vec();
        let mut in_place = original.clone();
        cipher.transform_in_place(&mut in_place);
        assert_eq!(in_place, cipher.transform(&original));
    }

    #[test]
    fn empty_input_stays_empty() {
        let cipher = Cipher::default();
        assert!(cipher.transform(&[]).is_empty());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.bin");
        let encrypted = dir.path().join("enc.bin");
        let restored = dir.path().join("restored.bin");

        std::fs::write(&plain, b"lecture audio bytes").unwrap();
        let cipher = Cipher::default();
        cipher.encrypt_file_to(&plain, &encrypted).unwrap();
        assert_ne!(std::fs::read(&encrypted).unwrap(), b"lecture audio bytes");

        cipher.decrypt_file(&encrypted, &restored).unwrap();
        assert_eq!(std::fs::read(&restored).unwrap(), b"lecture audio bytes");
    }

    #[test]
    fn missing_file_propagates_io_error() {
        let cipher = Cipher::default();
        let err = cipher.encrypt_file(Path::new("/nonexistent/lectern/file")).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
