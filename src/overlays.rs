//! Overlay maps: display names and EPG mappings keyed by stable ids
//!
//! A single rename applies to every occurrence of the same stream anywhere in
//! the tree, so these lookups are kept outside the tree structure. The maps
//! are authoritative; a node's own override field is only a fallback.

use std::collections::HashMap;

use crate::models::Playlist;

#[derive(Debug, Clone, Default)]
pub struct OverlayMaps {
    /// Keyed by stream reference (decimal string) or category id.
    custom_names: HashMap<String, String>,
    /// Keyed by stream reference.
    epg_mappings: HashMap<i64, String>,
}

/// Overlay key for a stream reference.
pub fn stream_key(stream_id: i64) -> String {
    stream_id.to_string()
}

impl OverlayMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a freshly fetched tree for already-persisted overrides.
    /// Called once per load; rename/mapping operations mutate from there.
    pub fn populate_from(&mut self, playlist: &Playlist) {
        self.custom_names.clear();
        self.epg_mappings.clear();
        for bouquet in &playlist.bouquets {
            if let (Some(cat), Some(name)) = (&bouquet.category_id, &bouquet.custom_name) {
                if !name.is_empty() {
                    self.custom_names.insert(cat.clone(), name.clone());
                }
            }
            for channel in &bouquet.channels {
                if let Some(name) = &channel.custom_name {
                    if !name.is_empty() {
                        self.custom_names.insert(stream_key(channel.stream_id), name.clone());
                    }
                }
                if let Some(epg) = &channel.epg_channel_id {
                    if !epg.is_empty() {
                        self.epg_mappings.insert(channel.stream_id, epg.clone());
                    }
                }
            }
        }
    }

    pub fn set_custom_name(&mut self, key: &str, name: &str) {
        self.custom_names.insert(key.to_string(), name.to_string());
    }

    pub fn set_epg_mapping(&mut self, stream_id: i64, epg_id: &str) {
        self.epg_mappings.insert(stream_id, epg_id.to_string());
    }

    /// Overlay first, then the entity's own override, then the fallback label.
    pub fn display_name<'a>(&'a self, key: &str, own: Option<&'a str>, fallback: &'a str) -> &'a str {
        match self.custom_names.get(key) {
            Some(name) if !name.is_empty() => name,
            _ => match own {
                Some(name) if !name.is_empty() => name,
                _ => fallback,
            },
        }
    }

    pub fn epg_id<'a>(&'a self, stream_id: i64, own: Option<&'a str>) -> Option<&'a str> {
        self.epg_mappings
            .get(&stream_id)
            .map(String::as_str)
            .or(own)
    }

    pub fn custom_names(&self) -> &HashMap<String, String> {
        &self.custom_names
    }

    pub fn epg_mappings(&self) -> &HashMap<i64, String> {
        &self.epg_mappings
    }

    /// Restore both maps from an undo/redo snapshot.
    pub fn restore(&mut self, custom_names: HashMap<String, String>, epg_mappings: HashMap<i64, String>) {
        self.custom_names = custom_names;
        self.epg_mappings = epg_mappings;
    }
}
