use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub campaign: CampaignConfig,
    pub site: SiteConfig,
    pub database: DatabaseConfig,
}

/// Payment provider endpoint. The provider is an opaque collaborator: it
/// accepts the redirect URL built here and eventually sends the donor back
/// to the return URL with the correlation id preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub public_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub campaign_id: String,
    pub subject: String,
    /// Referrer used when nobody's campaign link was followed.
    pub sentinel: String,
    /// Key the referrer token is stored under.
    pub storage_key: String,
    /// Path on the site origin the provider returns the donor to.
    pub return_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub origin: Url,
    /// Current page; used as the cancel target.
    pub page_url: Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend_str =
            std::env::var("DATABASE_BACKEND").unwrap_or_else(|_| "sqlite".to_string());

        let backend = match backend_str.to_lowercase().as_str() {
            "memory" => DatabaseBackend::Memory,
            "sqlite" => DatabaseBackend::Sqlite,
            other => {
                tracing::warn!(
                    "Unknown DATABASE_BACKEND '{other}', falling back to 'sqlite'. Supported values: sqlite, memory"
                );
                DatabaseBackend::Sqlite
            }
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://./alcancia.db".to_string());

        let base_url = std::env::var("PROVIDER_BASE_URL")
            .unwrap_or_else(|_| "https://app.payku.cl/payment".to_string());
        let public_key = std::env::var("PROVIDER_PUBLIC_KEY").ok();

        let campaign_id = std::env::var("CAMPAIGN_ID")
            .unwrap_or_else(|_| "alcancia_digital_2025".to_string());
        let subject = std::env::var("DONATION_SUBJECT")
            .unwrap_or_else(|_| "Donación ISF Chile".to_string());
        let sentinel = std::env::var("DIRECT_SENTINEL").unwrap_or_else(|_| "directo".to_string());
        let storage_key =
            std::env::var("REFERRER_STORAGE_KEY").unwrap_or_else(|_| "isf_voluntario".to_string());
        let return_path =
            std::env::var("RETURN_PATH").unwrap_or_else(|_| "/gracias.html".to_string());

        let origin = std::env::var("SITE_ORIGIN")
            .unwrap_or_else(|_| "https://alcancias.isf.cl".to_string());
        let origin = Url::parse(&origin).context("SITE_ORIGIN must be a valid URL")?;

        let page_url = match std::env::var("SITE_PAGE_URL") {
            Ok(raw) => Url::parse(&raw).context("SITE_PAGE_URL must be a valid URL")?,
            Err(_) => origin.clone(),
        };

        Ok(Config {
            provider: ProviderConfig {
                base_url,
                public_key,
            },
            campaign: CampaignConfig {
                campaign_id,
                subject,
                sentinel,
                storage_key,
                return_path,
            },
            site: SiteConfig { origin, page_url },
            database: DatabaseConfig {
                backend,
                url: database_url,
            },
        })
    }
}
