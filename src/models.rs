//! Data models for the lineup editor

use serde::{Deserialize, Serialize};

/// A playlist fetched from the remote store: the editing session's tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: i64,
    pub subscription_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bouquets: Vec<Bouquet>,
}

/// A named, ordered collection of channels. `category_id` present means the
/// bouquet is tied to an upstream category ("smart"); absent means it is
/// free-standing ("virtual").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bouquet {
    pub id: i64,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub order: usize,
    #[serde(default)]
    pub channels: Vec<BouquetChannel>,
}

impl Bouquet {
    /// Display label before overlays are applied.
    pub fn label(&self) -> &str {
        match &self.custom_name {
            Some(name) if !name.is_empty() => name,
            _ => match &self.category_id {
                Some(cat) => cat,
                None => "Unnamed bouquet",
            },
        }
    }
}

/// One entry in a bouquet referencing an external stream. `stream_id` is not
/// unique across the playlist: the same stream may appear in several bouquets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouquetChannel {
    pub id: i64,
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

/// A stream as returned by the cross-subscription search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamHit {
    pub stream_id: i64,
    pub name: String,
    #[serde(default)]
    pub subscription_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub epg_channel_id: Option<String>,
}

/// One entry from the program-guide channel listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpgEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}
