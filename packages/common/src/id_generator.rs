use crc32fast::Hasher;

/// Short hex prefix for client-side ids, stable for a given gallery
pub fn gallery_seed(gallery_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(b"gallery://");
    hasher.update(gallery_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hands out ids for things the server never names: sections, spacers and
/// collections that have not been saved yet.
///
/// Ids are `<seed>-<n>`. Decoding the same gallery with a fresh generator
/// yields the same ids, so a section id printed by one run can be used by
/// an edit script in the next.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: String,
    issued: u32,
}

impl IdGenerator {
    pub fn for_gallery(gallery_id: &str) -> Self {
        Self::from_seed(gallery_seed(gallery_id))
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, issued: 0 }
    }

    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{}", self.seed, self.issued)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
