//! Bouquet export/import documents
//!
//! A bouquet and its channels serialize to a self-describing JSON document so
//! lineups can be shared between playlists or installations. Import validates
//! the channel list and is followed by a full playlist reload, so local
//! placeholder ids never outlive the operation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::Bouquet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouquetDocument {
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub channels: Vec<ChannelDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDocument {
    pub stream_id: i64,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub is_excluded: bool,
    #[serde(default)]
    pub epg_channel_id: Option<String>,
}

pub fn export_bouquet(bouquet: &Bouquet) -> BouquetDocument {
    BouquetDocument {
        custom_name: bouquet.custom_name.clone(),
        category_id: bouquet.category_id.clone(),
        channels: bouquet
            .channels
            .iter()
            .map(|c| ChannelDocument {
                stream_id: c.stream_id,
                custom_name: c.custom_name.clone(),
                order: c.order,
                is_excluded: c.is_excluded,
                epg_channel_id: c.epg_channel_id.clone(),
            })
            .collect(),
    }
}

pub fn write_bouquet_file(bouquet: &Bouquet, path: &Path) -> Result<(), String> {
    let doc = export_bouquet(bouquet);
    let content = serde_json::to_string_pretty(&doc)
        .map_err(|e| format!("Serialize failed: {}", e))?;
    fs::write(path, content).map_err(|e| format!("Write failed: {}", e))
}

/// Parse an exported document. An empty or missing `channels` array is
/// rejected: there is nothing to import.
pub fn parse_bouquet_document(content: &str) -> Result<BouquetDocument, String> {
    let doc: BouquetDocument =
        serde_json::from_str(content).map_err(|e| format!("Parse failed: {}", e))?;
    if doc.channels.is_empty() {
        return Err("Document has no channels".to_string());
    }
    Ok(doc)
}

pub fn read_bouquet_file(path: &Path) -> Result<BouquetDocument, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Read failed: {}", e))?;
    parse_bouquet_document(&content)
}
