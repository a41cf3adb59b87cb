use std::sync::Arc;

use anyhow::Result;
use url::form_urlencoded;

use crate::storage::KeyValueStore;

/// Query parameter carried by campaign links, e.g. `?vol=juan_perez`.
pub const REFERRER_PARAM: &str = "vol";

/// Holds the one referrer token a visitor carries around. At most one token
/// is stored at a time; a new one silently overwrites the old.
pub struct AttributionStore {
    storage: Arc<dyn KeyValueStore>,
    storage_key: String,
}

impl AttributionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, storage_key: impl Into<String>) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
        }
    }

    /// Record the referrer carried by a landing query string.
    ///
    /// When the query holds the referral parameter, the token is persisted
    /// (overwriting any previous one) and returned. Otherwise the currently
    /// persisted token, if any, is returned. An absent parameter is a normal
    /// case, not an error — any token string is accepted as-is.
    pub async fn record_referrer_from_query(&self, query: &str) -> Result<Option<String>> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let referrer = form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == REFERRER_PARAM)
            .map(|(_, value)| value.into_owned());

        if let Some(token) = referrer {
            self.storage.set(&self.storage_key, &token).await?;
            tracing::info!(referrer = %token, "referrer detected");
            return Ok(Some(token));
        }

        self.current_referrer().await
    }

    /// Currently persisted referrer token, if any. Pure read.
    pub async fn current_referrer(&self) -> Result<Option<String>> {
        self.storage.get(&self.storage_key).await
    }

    /// Remove the persisted referrer. Idempotent.
    pub async fn clear_referrer(&self) -> Result<()> {
        self.storage.remove(&self.storage_key).await?;
        tracing::info!("referrer cleared");
        Ok(())
    }
}

/// Convert a referrer token like `juan_perez` into `Juan Perez`: split on
/// underscores, uppercase the first character of each segment (only the
/// first, whatever it is), join with single spaces.
pub fn display_name(token: &str) -> String {
    token
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store() -> AttributionStore {
        AttributionStore::new(Arc::new(MemoryStore::new()), "isf_voluntario")
    }

    #[test]
    fn display_name_capitalizes_each_segment() {
        assert_eq!(display_name("juan_perez"), "Juan Perez");
        assert_eq!(display_name("maria_jose_del_campo"), "Maria Jose Del Campo");
    }

    #[test]
    fn display_name_single_segment() {
        assert_eq!(display_name("maria"), "Maria");
    }

    #[test]
    fn display_name_empty_string() {
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn display_name_is_idempotent() {
        let once = display_name("juan_perez");
        assert_eq!(display_name("Juan_Perez"), once);
    }

    #[test]
    fn display_name_leaves_non_letter_leading_chars_alone() {
        assert_eq!(display_name("3amigos_del_sur"), "3amigos Del Sur");
    }

    #[tokio::test]
    async fn records_and_returns_referrer() {
        let store = store();
        let recorded = store
            .record_referrer_from_query("vol=juan_perez")
            .await
            .unwrap();
        assert_eq!(recorded, Some("juan_perez".to_string()));
        assert_eq!(
            store.current_referrer().await.unwrap(),
            Some("juan_perez".to_string())
        );
    }

    #[tokio::test]
    async fn second_visit_without_param_returns_stored_value() {
        let store = store();
        store
            .record_referrer_from_query("?vol=juan_perez")
            .await
            .unwrap();
        let recorded = store
            .record_referrer_from_query("utm_source=mail")
            .await
            .unwrap();
        assert_eq!(recorded, Some("juan_perez".to_string()));
    }

    #[tokio::test]
    async fn new_referrer_overwrites_old() {
        let store = store();
        store
            .record_referrer_from_query("vol=juan_perez")
            .await
            .unwrap();
        let recorded = store
            .record_referrer_from_query("vol=ana_rojas")
            .await
            .unwrap();
        assert_eq!(recorded, Some("ana_rojas".to_string()));
        assert_eq!(
            store.current_referrer().await.unwrap(),
            Some("ana_rojas".to_string())
        );
    }

    #[tokio::test]
    async fn empty_query_on_fresh_store_is_absent() {
        let store = store();
        assert_eq!(store.record_referrer_from_query("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = store();
        store
            .record_referrer_from_query("vol=juan_perez")
            .await
            .unwrap();
        store.clear_referrer().await.unwrap();
        assert_eq!(store.current_referrer().await.unwrap(), None);
        store.clear_referrer().await.unwrap();
        assert_eq!(store.current_referrer().await.unwrap(), None);
    }
}
