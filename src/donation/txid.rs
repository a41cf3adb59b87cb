use rand::Rng;
use uuid::Uuid;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Correlation token embedded in the outbound and return URLs. Generated
/// fresh per donation attempt; collisions are treated as impossible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a v4 UUID from the OS secure random source.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Fallback for environments without an entropy source: stamp random
    /// hex digits into the standard 8-4-4-4-12 layout, with the version
    /// nibble fixed to 4 and the variant nibble in 8..=b. Both paths emit
    /// syntactically valid UUIDs.
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut out = String::with_capacity(36);
        for c in "xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx".chars() {
            match c {
                'x' => out.push(HEX[rng.random_range(0..16usize)] as char),
                'y' => out.push(HEX[(rng.random_range(0..16usize) & 0x3) | 0x8] as char),
                other => out.push(other),
            }
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TransactionId> for String {
    fn from(id: TransactionId) -> Self {
        id.0
    }
}
