//! HTTP client for the remote playlist store

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Bouquet, BouquetChannel, EpgEntry, Playlist, StreamHit};

pub type ApiResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Batch bouquet upsert item. An id means update; no id means create.
#[derive(Debug, Clone, Serialize)]
pub struct BouquetUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BouquetOrder {
    pub id: i64,
    pub order: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelCreate {
    pub stream_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub order: usize,
    pub is_excluded: bool,
}

/// Batch channel upsert item, used for reorder persistence and bulk add.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelUpsert {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub stream_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    pub order: usize,
    pub is_excluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epg_channel_id: Option<String>,
}

/// Single-channel field update. Only present fields are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_excluded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epg_channel_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct BulkDeleteBody {
    channel_ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChannelBatchResponse {
    #[serde(default)]
    channels: Vec<BouquetChannel>,
}

#[derive(Debug, Clone)]
pub struct SyncClient {
    base_url: String,
    api_token: String,
    user_agent: String,
    timeout_secs: u64,
}

impl SyncClient {
    pub fn new(base_url: &str, api_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            user_agent: "LineupEditor/0.2".to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(self.timeout_secs)))
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .new_agent()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn get_text(&self, path: &str) -> ApiResult<String> {
        let mut response = self
            .agent()
            .get(&self.url(path))
            .header("User-Agent", &self.user_agent)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .call()?;
        if response.status() != 200 {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(response.body_mut().read_to_string()?)
    }

    fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self
            .agent()
            .delete(&self.url(path))
            .header("User-Agent", &self.user_agent)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .call()?;
        if response.status() != 200 && response.status() != 204 {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(())
    }

    fn send_json<B: Serialize>(&self, method: &str, path: &str, body: &B) -> ApiResult<String> {
        let payload = serde_json::to_string(body)?;
        let agent = self.agent();
        let builder = match method {
            "POST" => agent.post(&self.url(path)),
            _ => agent.put(&self.url(path)),
        };
        let mut response = builder
            .header("User-Agent", &self.user_agent)
            .header("Authorization", &format!("Bearer {}", self.api_token))
            .header("Content-Type", "application/json")
            .send(payload.as_bytes())?;
        if response.status() != 200 && response.status() != 201 {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        Ok(response.body_mut().read_to_string()?)
    }

    pub fn fetch_playlist(&self, playlist_id: i64) -> ApiResult<Playlist> {
        let body = self.get_text(&format!("playlists/{}", playlist_id))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Batch upsert; the response lists the affected bouquets with their
    /// server-assigned ids (needed when a create is chained with channel
    /// posts, as in import).
    pub fn upsert_bouquets(&self, playlist_id: i64, items: &[BouquetUpsert]) -> ApiResult<Vec<Bouquet>> {
        let body = self.send_json("PUT", &format!("playlists/{}/bouquets", playlist_id), &items)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn delete_bouquet(&self, bouquet_id: i64) -> ApiResult<()> {
        self.delete(&format!("bouquets/{}", bouquet_id))
    }

    pub fn reorder_bouquets(&self, playlist_id: i64, items: &[BouquetOrder]) -> ApiResult<()> {
        self.send_json("PUT", &format!("playlists/{}/bouquets/order", playlist_id), &items)?;
        Ok(())
    }

    pub fn add_channel(&self, bouquet_id: i64, channel: &ChannelCreate) -> ApiResult<BouquetChannel> {
        let body = self.send_json("POST", &format!("bouquets/{}/channels", bouquet_id), channel)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Batch upsert; the response lists created/updated channels with their
    /// server-assigned ids.
    pub fn upsert_channels(&self, bouquet_id: i64, items: &[ChannelUpsert]) -> ApiResult<Vec<BouquetChannel>> {
        let body = self.send_json("PUT", &format!("bouquets/{}/channels", bouquet_id), &items)?;
        let parsed: ChannelBatchResponse = serde_json::from_str(&body)?;
        Ok(parsed.channels)
    }

    pub fn delete_channel(&self, channel_id: i64) -> ApiResult<()> {
        self.delete(&format!("channels/{}", channel_id))
    }

    pub fn bulk_delete_channels(&self, channel_ids: &[i64]) -> ApiResult<()> {
        let body = BulkDeleteBody {
            channel_ids: channel_ids.to_vec(),
        };
        self.send_json("POST", "channels/bulk-delete", &body)?;
        Ok(())
    }

    pub fn duplicate_bouquet(&self, bouquet_id: i64) -> ApiResult<Bouquet> {
        let body = self.send_json("POST", &format!("bouquets/{}/duplicate", bouquet_id), &())?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn update_channel(&self, channel_id: i64, update: &ChannelUpdate) -> ApiResult<()> {
        self.send_json("PUT", &format!("channels/{}", channel_id), update)?;
        Ok(())
    }

    pub fn search_streams(&self, query: &str) -> ApiResult<Vec<StreamHit>> {
        let body = self.get_text(&format!("streams/search?q={}", encode_query(query)))?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn list_epg_channels(&self) -> ApiResult<Vec<EpgEntry>> {
        let body = self.get_text("epg/channels")?;
        Ok(serde_json::from_str(&body)?)
    }

    pub fn search_epg_channels(&self, query: &str) -> ApiResult<Vec<EpgEntry>> {
        let body = self.get_text(&format!("epg/channels/search?q={}", encode_query(query)))?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Minimal percent-encoding for a query value.
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("sports hd"), "sports%20hd");
        assert_eq!(encode_query("cnn"), "cnn");
        assert_eq!(encode_query("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn test_upsert_skips_missing_id() {
        let item = BouquetUpsert {
            id: None,
            custom_name: Some("News".to_string()),
            category_id: None,
            order: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["order"], 2);
    }

    #[test]
    fn test_channel_update_partial() {
        let update = ChannelUpdate {
            is_excluded: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"is_excluded":true}"#);
    }
}
