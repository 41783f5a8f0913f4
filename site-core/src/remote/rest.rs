//! PostgREST client for the hosted database
//!
//! This module provides HTTP access to the `site_content`, `site_design`
//! and `site_settings` tables with:
//! - API key authentication
//! - Proxy support
//! - Timeout configuration

#[cfg(feature = "remote")]
use async_trait::async_trait;
#[cfg(feature = "remote")]
use reqwest::Client;
#[cfg(feature = "remote")]
use serde::de::DeserializeOwned;
#[cfg(feature = "remote")]
use serde::Deserialize;
#[cfg(feature = "remote")]
use serde_json::{json, Value};

use super::RemoteError;
#[cfg(feature = "remote")]
use super::RemoteStore;
use crate::config::SiteConfig;
#[cfg(feature = "remote")]
use crate::content::ContentBlock;
#[cfg(feature = "remote")]
use crate::design::DesignPreset;

/// Talks to the hosted database's REST endpoint
#[cfg(feature = "remote")]
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[cfg(feature = "remote")]
#[derive(Deserialize)]
struct SettingRow {
    value: Value,
}

#[cfg(feature = "remote")]
impl RestStore {
    /// Create a new REST store from config
    pub fn new(config: &SiteConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!(
                "site/{}",
                option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0")
            ));

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.remote_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, RemoteError> {
        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Http(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(feature = "remote")]
#[async_trait]
impl RemoteStore for RestStore {
    async fn fetch_content(&self, section_key: &str) -> Result<ContentBlock, RemoteError> {
        let rows: Vec<ContentBlock> = self
            .select(
                "site_content",
                &[
                    ("select", "section_key,content,updated_at".to_string()),
                    ("section_key", format!("eq.{}", section_key)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteError::NotFound(format!("site_content/{}", section_key)))
    }

    async fn fetch_design_presets(&self) -> Result<Vec<DesignPreset>, RemoteError> {
        self.select(
            "site_design",
            &[
                ("select", "*".to_string()),
                ("order", "preset_number.asc".to_string()),
            ],
        )
        .await
    }

    async fn fetch_setting(&self, key: &str) -> Result<String, RemoteError> {
        let rows: Vec<SettingRow> = self
            .select(
                "site_settings",
                &[
                    ("select", "value".to_string()),
                    ("key", format!("eq.{}", key)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::NotFound(format!("site_settings/{}", key)))?;

        Ok(match row.value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    async fn update_content(&self, section_key: &str, content: &Value) -> Result<(), RemoteError> {
        let response = self
            .client
            .patch(self.table_url("site_content"))
            .query(&[("section_key", format!("eq.{}", section_key))])
            .header("apikey", &self.anon_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&self.anon_key)
            .json(&json!({
                "content": content,
                "updated_at": chrono::Utc::now().to_rfc3339(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RemoteError::Http(response.status().as_u16()));
        }

        // PATCH matching no rows still succeeds, with an empty body
        let updated: Vec<Value> = response.json().await?;
        if updated.is_empty() {
            return Err(RemoteError::NotFound(format!("site_content/{}", section_key)));
        }

        Ok(())
    }
}

/// Stub store when the remote feature is not enabled
#[cfg(not(feature = "remote"))]
pub struct RestStore {
    _private: (),
}

#[cfg(not(feature = "remote"))]
impl RestStore {
    /// Create a new REST store (stub - always fails)
    pub fn new(_config: &SiteConfig) -> Result<Self, RemoteError> {
        Err(RemoteError::FeatureDisabled)
    }
}

#[cfg(not(feature = "remote"))]
#[async_trait::async_trait]
impl super::RemoteStore for RestStore {
    async fn fetch_content(
        &self,
        _section_key: &str,
    ) -> Result<crate::content::ContentBlock, RemoteError> {
        Err(RemoteError::FeatureDisabled)
    }

    async fn fetch_design_presets(&self) -> Result<Vec<crate::design::DesignPreset>, RemoteError> {
        Err(RemoteError::FeatureDisabled)
    }

    async fn fetch_setting(&self, _key: &str) -> Result<String, RemoteError> {
        Err(RemoteError::FeatureDisabled)
    }

    async fn update_content(
        &self,
        _section_key: &str,
        _content: &serde_json::Value,
    ) -> Result<(), RemoteError> {
        Err(RemoteError::FeatureDisabled)
    }
}
