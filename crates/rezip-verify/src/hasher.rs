use sha2::Digest;

use crate::ContentHash;

pub trait Hasher {
    type Output;

    fn update(&mut self, data: &[u8]);
    fn finalize(self) -> Self::Output;
}

#[derive(Clone, Default)]
pub struct Sha256Hasher(sha2::Sha256);

impl Hasher for Sha256Hasher {
    type Output = ContentHash;

    fn update(&mut self, data: &[u8]) { self.0.update(data); }

    fn finalize(self) -> ContentHash { ContentHash::new(self.0.finalize().into()) }
}

impl Sha256Hasher {
    pub fn new() -> Self { Self(sha2::Sha256::new()) }

    pub fn digest(data: &[u8]) -> ContentHash { ContentHash::new(sha2::Sha256::digest(data).into()) }
}
