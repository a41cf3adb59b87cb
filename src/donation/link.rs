use anyhow::Context;
use url::Url;

use crate::config::{CampaignConfig, ProviderConfig};

use super::DonationError;

/// Build the fully-formed redirect URL to the payment provider. Pure
/// construction, no network call.
///
/// `return_page` is the page the provider sends the donor back to; the
/// transaction id is appended to it as `uuid` so the confirmation can be
/// correlated later. `cancel_url` is the current page.
pub fn build_donation_url(
    provider: &ProviderConfig,
    campaign: &CampaignConfig,
    amount: i64,
    referrer: &str,
    transaction_id: &str,
    return_page: &Url,
    cancel_url: &Url,
) -> Result<Url, DonationError> {
    if amount <= 0 {
        return Err(DonationError::NonPositiveAmount(amount));
    }

    let mut return_url = return_page.clone();
    return_url
        .query_pairs_mut()
        .append_pair("uuid", transaction_id);

    let mut url =
        Url::parse(&provider.base_url).context("provider base URL is not a valid URL")?;
    {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("amount", &amount.to_string())
            .append_pair("subject", &campaign.subject)
            .append_pair("external_id", transaction_id)
            .append_pair("custom_fields[voluntario]", referrer)
            .append_pair("custom_fields[campana]", &campaign.campaign_id)
            .append_pair("return_url", return_url.as_str())
            .append_pair("cancel_url", cancel_url.as_str());

        if let Some(key) = &provider.public_key {
            pairs.append_pair("public_key", key);
        }
    }

    Ok(url)
}
