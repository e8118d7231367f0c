//! Optimistic remote mirroring
//!
//! Every accepted local mutation is mirrored with one background request.
//! Requests are dispatched on worker threads and never joined: the local
//! state is already committed by the time the request leaves, and a failure
//! never rolls it back. Results come home through an mpsc channel and are
//! merged (or just logged) on the shell's next poll.

use std::sync::mpsc::Sender;
use std::thread;

use crate::api::{
    BouquetOrder, BouquetUpsert, ChannelCreate, ChannelUpdate, ChannelUpsert, SyncClient,
};
use crate::models::{Bouquet, BouquetChannel, EpgEntry, Playlist, StreamHit};
use crate::transfer::BouquetDocument;

/// Outcome of a background remote call.
#[derive(Debug)]
pub enum TaskResult {
    PlaylistFetched(Playlist),
    BouquetDuplicated(Bouquet),
    /// Channels created by the remote store; merged into the tree by
    /// stream reference.
    ChannelsCreated {
        bouquet_id: i64,
        channels: Vec<BouquetChannel>,
    },
    StreamResults(Vec<StreamHit>),
    EpgResults(Vec<EpgEntry>),
    /// A mirror call succeeded and its response carries nothing to merge.
    Synced(&'static str),
    SyncFailed {
        op: &'static str,
        error: String,
    },
}

/// Fire-and-forget dispatcher over the remote client.
pub struct SyncGateway {
    client: SyncClient,
    sender: Sender<TaskResult>,
}

impl SyncGateway {
    pub fn new(client: SyncClient, sender: Sender<TaskResult>) -> Self {
        Self { client, sender }
    }

    pub fn client(&self) -> &SyncClient {
        &self.client
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(SyncClient, Sender<TaskResult>) + Send + 'static,
    {
        let client = self.client.clone();
        let sender = self.sender.clone();
        thread::spawn(move || job(client, sender));
    }

    pub fn fetch_playlist(&self, playlist_id: i64) {
        self.spawn(move |client, sender| {
            let result = match client.fetch_playlist(playlist_id) {
                Ok(playlist) => TaskResult::PlaylistFetched(playlist),
                Err(e) => TaskResult::SyncFailed {
                    op: "fetch playlist",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn upsert_bouquets(&self, playlist_id: i64, items: Vec<BouquetUpsert>) {
        self.spawn(move |client, sender| {
            let result = match client.upsert_bouquets(playlist_id, &items) {
                Ok(_) => TaskResult::Synced("upsert bouquets"),
                Err(e) => TaskResult::SyncFailed {
                    op: "upsert bouquets",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn delete_bouquet(&self, bouquet_id: i64) {
        self.spawn(move |client, sender| {
            let result = match client.delete_bouquet(bouquet_id) {
                Ok(()) => TaskResult::Synced("delete bouquet"),
                Err(e) => TaskResult::SyncFailed {
                    op: "delete bouquet",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn reorder_bouquets(&self, playlist_id: i64, items: Vec<BouquetOrder>) {
        self.spawn(move |client, sender| {
            let result = match client.reorder_bouquets(playlist_id, &items) {
                Ok(()) => TaskResult::Synced("reorder bouquets"),
                Err(e) => TaskResult::SyncFailed {
                    op: "reorder bouquets",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn add_channel(&self, bouquet_id: i64, channel: ChannelCreate) {
        self.spawn(move |client, sender| {
            let result = match client.add_channel(bouquet_id, &channel) {
                Ok(created) => TaskResult::ChannelsCreated {
                    bouquet_id,
                    channels: vec![created],
                },
                Err(e) => TaskResult::SyncFailed {
                    op: "add channel",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn upsert_channels(&self, bouquet_id: i64, items: Vec<ChannelUpsert>) {
        self.spawn(move |client, sender| {
            let result = match client.upsert_channels(bouquet_id, &items) {
                Ok(channels) => TaskResult::ChannelsCreated {
                    bouquet_id,
                    channels,
                },
                Err(e) => TaskResult::SyncFailed {
                    op: "upsert channels",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn delete_channel(&self, channel_id: i64) {
        self.spawn(move |client, sender| {
            let result = match client.delete_channel(channel_id) {
                Ok(()) => TaskResult::Synced("delete channel"),
                Err(e) => TaskResult::SyncFailed {
                    op: "delete channel",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn bulk_delete_channels(&self, channel_ids: Vec<i64>) {
        self.spawn(move |client, sender| {
            let result = match client.bulk_delete_channels(&channel_ids) {
                Ok(()) => TaskResult::Synced("bulk delete channels"),
                Err(e) => TaskResult::SyncFailed {
                    op: "bulk delete channels",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn duplicate_bouquet(&self, bouquet_id: i64) {
        self.spawn(move |client, sender| {
            let result = match client.duplicate_bouquet(bouquet_id) {
                Ok(bouquet) => TaskResult::BouquetDuplicated(bouquet),
                Err(e) => TaskResult::SyncFailed {
                    op: "duplicate bouquet",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn update_channel(&self, channel_id: i64, update: ChannelUpdate) {
        self.spawn(move |client, sender| {
            let result = match client.update_channel(channel_id, &update) {
                Ok(()) => TaskResult::Synced("update channel"),
                Err(e) => TaskResult::SyncFailed {
                    op: "update channel",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn search_streams(&self, query: String) {
        self.spawn(move |client, sender| {
            let result = match client.search_streams(&query) {
                Ok(hits) => TaskResult::StreamResults(hits),
                Err(e) => TaskResult::SyncFailed {
                    op: "search streams",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn list_epg_channels(&self) {
        self.spawn(move |client, sender| {
            let result = match client.list_epg_channels() {
                Ok(entries) => TaskResult::EpgResults(entries),
                Err(e) => TaskResult::SyncFailed {
                    op: "list epg channels",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    pub fn search_epg_channels(&self, query: String) {
        self.spawn(move |client, sender| {
            let result = match client.search_epg_channels(&query) {
                Ok(entries) => TaskResult::EpgResults(entries),
                Err(e) => TaskResult::SyncFailed {
                    op: "search epg channels",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    /// Import chain: create the bouquet, post its channels as one batch, then
    /// refetch the whole playlist so local identities match the remote store.
    /// Runs sequentially on one worker; any step failing aborts the chain.
    pub fn import_bouquet(&self, playlist_id: i64, doc: BouquetDocument, order: usize) {
        self.spawn(move |client, sender| {
            let upsert = BouquetUpsert {
                id: None,
                custom_name: doc.custom_name.clone(),
                category_id: doc.category_id.clone(),
                order,
            };
            let created = match client.upsert_bouquets(playlist_id, &[upsert]) {
                Ok(mut bouquets) if !bouquets.is_empty() => bouquets.remove(0),
                Ok(_) => {
                    let _ = sender.send(TaskResult::SyncFailed {
                        op: "import bouquet",
                        error: "server returned no bouquet".to_string(),
                    });
                    return;
                }
                Err(e) => {
                    let _ = sender.send(TaskResult::SyncFailed {
                        op: "import bouquet",
                        error: e.to_string(),
                    });
                    return;
                }
            };
            let items: Vec<ChannelUpsert> = doc
                .channels
                .iter()
                .map(|c| ChannelUpsert {
                    id: None,
                    stream_id: c.stream_id,
                    custom_name: c.custom_name.clone(),
                    order: c.order,
                    is_excluded: c.is_excluded,
                    epg_channel_id: c.epg_channel_id.clone(),
                })
                .collect();
            if let Err(e) = client.upsert_channels(created.id, &items) {
                let _ = sender.send(TaskResult::SyncFailed {
                    op: "import bouquet",
                    error: e.to_string(),
                });
                return;
            }
            let result = match client.fetch_playlist(playlist_id) {
                Ok(playlist) => TaskResult::PlaylistFetched(playlist),
                Err(e) => TaskResult::SyncFailed {
                    op: "import bouquet",
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }
}
