pub mod amount;
pub mod link;
pub mod txid;

pub use amount::resolve_amount;
pub use link::build_donation_url;
pub use txid::TransactionId;

use std::sync::Arc;

use anyhow::Context;
use thiserror::Error;
use url::Url;

use crate::attribution::AttributionStore;
use crate::config::{CampaignConfig, ProviderConfig, SiteConfig};
use crate::models::DonationRequest;

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("no donation amount could be resolved")]
    UnresolvableAmount,
    #[error("donation amount must be positive, got {0}")]
    NonPositiveAmount(i64),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Terminal side effect of a donation: leaving for the provider's checkout
/// page. Implementations decide what navigating means (print the URL, open
/// a browser, record it in tests).
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url) -> anyhow::Result<()>;
}

pub struct DonationService {
    attribution: Arc<AttributionStore>,
    provider: ProviderConfig,
    campaign: CampaignConfig,
    site: SiteConfig,
}

impl DonationService {
    pub fn new(
        attribution: Arc<AttributionStore>,
        provider: ProviderConfig,
        campaign: CampaignConfig,
        site: SiteConfig,
    ) -> Self {
        Self {
            attribution,
            provider,
            campaign,
            site,
        }
    }

    /// Orchestrate one donation: read the stored referrer (falling back to
    /// the sentinel), generate a transaction id, build the redirect URL and
    /// hand it to the navigator.
    ///
    /// Navigates at most once per call. There is no internal debounce; the
    /// caller owns disabling the triggering control against double clicks.
    pub async fn initiate(
        &self,
        amount: i64,
        navigator: &dyn Navigator,
    ) -> Result<DonationRequest, DonationError> {
        let referrer = self
            .attribution
            .current_referrer()
            .await?
            .unwrap_or_else(|| self.campaign.sentinel.clone());

        let transaction_id = TransactionId::generate();
        let request = DonationRequest {
            amount,
            referrer,
            transaction_id: transaction_id.to_string(),
            created_at: chrono::Utc::now().timestamp(),
        };

        tracing::info!(
            amount = request.amount,
            referrer = %request.referrer,
            transaction_id = %request.transaction_id,
            created_at = request.created_at,
            "prepared donation"
        );

        let return_page = self.return_page()?;
        let url = build_donation_url(
            &self.provider,
            &self.campaign,
            request.amount,
            &request.referrer,
            &request.transaction_id,
            &return_page,
            &self.site.page_url,
        )?;

        navigator.navigate(&url)?;

        Ok(request)
    }

    fn return_page(&self) -> Result<Url, DonationError> {
        let page = self
            .site
            .origin
            .join(&self.campaign.return_path)
            .context("return path does not join onto the site origin")?;
        Ok(page)
    }
}
