use serde::{Deserialize, Serialize};

/// One donation attempt. Built per click, embedded in the outbound redirect
/// URL and then discarded; never persisted. The transaction id is a
/// fire-and-forget correlation token — nothing reconciles it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRequest {
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// Referrer token, or the configured sentinel when none is stored.
    pub referrer: String,
    pub transaction_id: String,
    /// Unix timestamp, informational only.
    pub created_at: i64,
}
