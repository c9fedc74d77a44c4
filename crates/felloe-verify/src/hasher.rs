use crate::digest::Sha256Digest;
use sha2::Digest;

/// Incremental hashing fed chunk by chunk while bytes stream to disk.
pub trait Hasher: Send {
    type Output;

    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Self::Output;
}

#[derive(Clone, Default)]
pub struct Sha256Hasher(sha2::Sha256);

impl Hasher for Sha256Hasher {
    type Output = Sha256Digest;

    fn update(&mut self, data: &[u8]) { self.0.update(data); }

    fn finalize(self) -> Sha256Digest { Sha256Digest::from_bytes(self.0.finalize().into()) }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self::default() }

    pub fn digest(data: &[u8]) -> Sha256Digest {
        Sha256Digest::from_bytes(sha2::Sha256::digest(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental_matches_one_shot() {
        let mut hasher = Sha256Hasher::new();
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.finalize(), Sha256Hasher::digest(b"hello world"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Sha256Hasher::digest(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
