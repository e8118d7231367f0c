//! Playlist tree and its structural mutation operations
//!
//! The store owns the one mutable Playlist of the editing session. Every
//! operation is a defensive no-op on missing or invalid identifiers and
//! reports whether the tree actually changed, so the caller knows when to
//! record history and mirror the edit remotely.
//!
//! After any structural change, sibling `order` fields are renumbered to a
//! dense 0..n-1 matching array position. That includes removals.

use crate::models::{Bouquet, BouquetChannel, Playlist, StreamHit};
use crate::overlays::{stream_key, OverlayMaps};
use crate::selection::SelectionManager;

/// What a rename resolved to, so the matching remote call can be issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameTarget {
    Bouquet(i64),
    Channel(i64),
}

#[derive(Debug, Default)]
pub struct PlaylistStore {
    playlist: Option<Playlist>,
    active_bouquet: Option<i64>,
    /// Placeholder ids for locally created entities that have not
    /// round-tripped to the remote store yet. Always negative.
    next_local_id: i64,
}

fn renumber_bouquets(bouquets: &mut [Bouquet]) {
    for (i, b) in bouquets.iter_mut().enumerate() {
        b.order = i;
    }
}

fn renumber_channels(channels: &mut [BouquetChannel]) {
    for (i, c) in channels.iter_mut().enumerate() {
        c.order = i;
    }
}

/// Remove at `from` and reinsert at the target's original index.
fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to.min(items.len()), item);
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self {
            playlist: None,
            active_bouquet: None,
            next_local_id: -1,
        }
    }

    /// Replace the session tree with a freshly fetched playlist.
    pub fn load(&mut self, playlist: Playlist) {
        self.active_bouquet = playlist.bouquets.first().map(|b| b.id);
        self.playlist = Some(playlist);
        self.next_local_id = -1;
    }

    /// Restore the tree from an undo/redo snapshot without touching the
    /// local-id counter.
    pub fn restore(&mut self, playlist: Playlist) {
        if let Some(active) = self.active_bouquet {
            if !playlist.bouquets.iter().any(|b| b.id == active) {
                self.active_bouquet = playlist.bouquets.first().map(|b| b.id);
            }
        }
        self.playlist = Some(playlist);
    }

    pub fn unload(&mut self) {
        self.playlist = None;
        self.active_bouquet = None;
    }

    pub fn playlist(&self) -> Option<&Playlist> {
        self.playlist.as_ref()
    }

    pub fn active_bouquet(&self) -> Option<i64> {
        self.active_bouquet
    }

    pub fn set_active_bouquet(&mut self, id: i64) -> bool {
        match &self.playlist {
            Some(p) if p.bouquets.iter().any(|b| b.id == id) => {
                self.active_bouquet = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn bouquet(&self, id: i64) -> Option<&Bouquet> {
        self.playlist
            .as_ref()
            .and_then(|p| p.bouquets.iter().find(|b| b.id == id))
    }

    pub fn find_channel(&self, id: i64) -> Option<(&Bouquet, &BouquetChannel)> {
        let playlist = self.playlist.as_ref()?;
        for bouquet in &playlist.bouquets {
            if let Some(channel) = bouquet.channels.iter().find(|c| c.id == id) {
                return Some((bouquet, channel));
            }
        }
        None
    }

    fn next_placeholder_id(&mut self) -> i64 {
        let id = self.next_local_id;
        self.next_local_id -= 1;
        id
    }

    /// Append a free-standing ("virtual") bouquet. Returns its placeholder id,
    /// or None when the name is empty or no playlist is loaded.
    pub fn add_bouquet(&mut self, name: &str) -> Option<i64> {
        if name.trim().is_empty() || self.playlist.is_none() {
            return None;
        }
        let id = self.next_placeholder_id();
        let playlist = self.playlist.as_mut()?;
        let order = playlist.bouquets.len();
        playlist.bouquets.push(Bouquet {
            id,
            category_id: None,
            custom_name: Some(name.trim().to_string()),
            order,
            channels: Vec::new(),
        });
        Some(id)
    }

    /// Remove a bouquet, prune its channels from the selection, and renumber
    /// the survivors. Clears the active-bouquet pointer if it was the target.
    pub fn delete_bouquet(&mut self, id: i64, selection: &mut SelectionManager) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let Some(pos) = playlist.bouquets.iter().position(|b| b.id == id) else {
            return false;
        };
        let removed = playlist.bouquets.remove(pos);
        for channel in &removed.channels {
            selection.remove(channel.id);
        }
        renumber_bouquets(&mut playlist.bouquets);
        if self.active_bouquet == Some(id) {
            self.active_bouquet = None;
        }
        true
    }

    /// Resolve `id` as a bouquet or a channel and apply the new name.
    /// A channel rename writes the overlay entry keyed by stream reference
    /// (so every occurrence of the stream picks it up) and the channel's own
    /// field, which mirrors the remote store's row-level column.
    pub fn rename(&mut self, id: i64, text: &str, overlays: &mut OverlayMaps) -> Option<RenameTarget> {
        if text.trim().is_empty() {
            return None;
        }
        let text = text.trim();
        let playlist = self.playlist.as_mut()?;
        if let Some(bouquet) = playlist.bouquets.iter_mut().find(|b| b.id == id) {
            bouquet.custom_name = Some(text.to_string());
            return Some(RenameTarget::Bouquet(id));
        }
        for bouquet in &mut playlist.bouquets {
            if let Some(channel) = bouquet.channels.iter_mut().find(|c| c.id == id) {
                overlays.set_custom_name(&stream_key(channel.stream_id), text);
                channel.custom_name = Some(text.to_string());
                return Some(RenameTarget::Channel(id));
            }
        }
        None
    }

    pub fn reorder_bouquets(&mut self, active: i64, over: i64) -> bool {
        if active == over {
            return false;
        }
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let from = playlist.bouquets.iter().position(|b| b.id == active);
        let to = playlist.bouquets.iter().position(|b| b.id == over);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        array_move(&mut playlist.bouquets, from, to);
        renumber_bouquets(&mut playlist.bouquets);
        true
    }

    pub fn reorder_channels(&mut self, bouquet_id: i64, active: i64, over: i64) -> bool {
        if active == over {
            return false;
        }
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let Some(bouquet) = playlist.bouquets.iter_mut().find(|b| b.id == bouquet_id) else {
            return false;
        };
        let from = bouquet.channels.iter().position(|c| c.id == active);
        let to = bouquet.channels.iter().position(|c| c.id == over);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        array_move(&mut bouquet.channels, from, to);
        renumber_channels(&mut bouquet.channels);
        true
    }

    /// Move a channel to the end of another bouquet, preserving its override,
    /// exclusion and EPG fields. Both sides are renumbered.
    pub fn move_channel(&mut self, channel_id: i64, target_bouquet: i64) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let Some(target_idx) = playlist.bouquets.iter().position(|b| b.id == target_bouquet) else {
            return false;
        };
        let mut source = None;
        for (i, bouquet) in playlist.bouquets.iter().enumerate() {
            if let Some(pos) = bouquet.channels.iter().position(|c| c.id == channel_id) {
                source = Some((i, pos));
                break;
            }
        }
        let Some((source_idx, pos)) = source else {
            return false;
        };
        if source_idx == target_idx {
            return false;
        }
        let mut channel = playlist.bouquets[source_idx].channels.remove(pos);
        renumber_channels(&mut playlist.bouquets[source_idx].channels);
        let target = &mut playlist.bouquets[target_idx];
        channel.order = target.channels.len();
        target.channels.push(channel);
        renumber_channels(&mut target.channels);
        true
    }

    /// Append a bouquet copied by the remote store and make it active.
    pub fn adopt_duplicate(&mut self, mut bouquet: Bouquet) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        bouquet.order = playlist.bouquets.len();
        renumber_channels(&mut bouquet.channels);
        self.active_bouquet = Some(bouquet.id);
        playlist.bouquets.push(bouquet);
        true
    }

    /// Append a stream to the active bouquet under a placeholder id and seed
    /// its overlay name, so it is renameable before the server responds.
    pub fn add_stream(&mut self, hit: &StreamHit, overlays: &mut OverlayMaps) -> bool {
        let Some(active) = self.active_bouquet else {
            return false;
        };
        if self.bouquet(active).is_none() {
            return false;
        }
        let id = self.next_placeholder_id();
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let Some(bouquet) = playlist.bouquets.iter_mut().find(|b| b.id == active) else {
            return false;
        };
        let order = bouquet.channels.len();
        bouquet.channels.push(BouquetChannel {
            id,
            stream_id: hit.stream_id,
            custom_name: Some(hit.name.clone()),
            order,
            is_excluded: false,
            epg_channel_id: hit.epg_channel_id.clone(),
        });
        overlays.set_custom_name(&stream_key(hit.stream_id), &hit.name);
        true
    }

    pub fn bulk_add_streams(&mut self, hits: &[StreamHit], overlays: &mut OverlayMaps) -> usize {
        let mut added = 0;
        for hit in hits {
            if self.add_stream(hit, overlays) {
                added += 1;
            }
        }
        added
    }

    /// Delete a channel and renumber its former siblings.
    pub fn remove_channel(&mut self, id: i64, selection: &mut SelectionManager) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        for bouquet in &mut playlist.bouquets {
            if let Some(pos) = bouquet.channels.iter().position(|c| c.id == id) {
                bouquet.channels.remove(pos);
                renumber_channels(&mut bouquet.channels);
                selection.remove(id);
                return true;
            }
        }
        false
    }

    /// Remove every listed channel from every bouquet that holds it, then
    /// clear the selection unconditionally. Returns how many were removed.
    pub fn bulk_delete_channels(&mut self, ids: &[i64], selection: &mut SelectionManager) -> usize {
        selection.clear();
        let Some(playlist) = self.playlist.as_mut() else {
            return 0;
        };
        let mut removed = 0;
        for bouquet in &mut playlist.bouquets {
            let before = bouquet.channels.len();
            bouquet.channels.retain(|c| !ids.contains(&c.id));
            if bouquet.channels.len() != before {
                removed += before - bouquet.channels.len();
                renumber_channels(&mut bouquet.channels);
            }
        }
        removed
    }

    /// Sequential per-channel moves, not atomic. Returns the ids that were
    /// actually moved so the caller can report the ones that were not.
    pub fn bulk_move_channels(
        &mut self,
        ids: &[i64],
        target_bouquet: i64,
        selection: &mut SelectionManager,
    ) -> Vec<i64> {
        let mut moved = Vec::new();
        for &id in ids {
            if self.move_channel(id, target_bouquet) {
                moved.push(id);
            }
        }
        selection.clear();
        moved
    }

    /// Toggle the guide-exclusion flag on a channel.
    pub fn set_excluded(&mut self, channel_id: i64, excluded: bool) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        for bouquet in &mut playlist.bouquets {
            if let Some(channel) = bouquet.channels.iter_mut().find(|c| c.id == channel_id) {
                if channel.is_excluded == excluded {
                    return false;
                }
                channel.is_excluded = excluded;
                return true;
            }
        }
        false
    }

    /// Map a stream to a program-guide id. The overlay entry is authoritative;
    /// every occurrence's own field is updated for remote cache coherency.
    pub fn set_epg_mapping(&mut self, stream_id: i64, epg_id: &str, overlays: &mut OverlayMaps) -> bool {
        let Some(playlist) = self.playlist.as_mut() else {
            return false;
        };
        let mut touched = false;
        for bouquet in &mut playlist.bouquets {
            for channel in &mut bouquet.channels {
                if channel.stream_id == stream_id {
                    channel.epg_channel_id = Some(epg_id.to_string());
                    touched = true;
                }
            }
        }
        if touched {
            overlays.set_epg_mapping(stream_id, epg_id);
        }
        touched
    }

    /// Merge a bulk-add response: adopt server ids for placeholder channels,
    /// matching by stream reference. Tolerant of reordering and of channels
    /// deleted locally while the request was in flight.
    pub fn merge_created_channels(&mut self, bouquet_id: i64, created: &[BouquetChannel]) -> usize {
        let Some(playlist) = self.playlist.as_mut() else {
            return 0;
        };
        let Some(bouquet) = playlist.bouquets.iter_mut().find(|b| b.id == bouquet_id) else {
            return 0;
        };
        let mut merged = 0;
        for server_channel in created {
            if let Some(local) = bouquet
                .channels
                .iter_mut()
                .find(|c| c.id < 0 && c.stream_id == server_channel.stream_id)
            {
                local.id = server_channel.id;
                merged += 1;
            }
        }
        merged
    }

    /// Channel ids across the whole tree, for select-all.
    pub fn all_channel_ids(&self) -> Vec<i64> {
        match &self.playlist {
            Some(p) => p
                .bouquets
                .iter()
                .flat_map(|b| b.channels.iter().map(|c| c.id))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
