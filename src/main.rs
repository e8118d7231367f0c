//! Lineup Editor - compose custom IPTV channel lineups
//!
//! The editing session owns one playlist tree plus overlay maps, selection
//! and history. Commands mutate the tree synchronously, record a history
//! snapshot, and mirror the edit to the remote store in the background.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{channel, Receiver};

mod api;
mod config;
mod drag;
mod history;
mod models;
mod overlays;
mod selection;
mod store;
mod sync;
mod transfer;

use api::{BouquetOrder, BouquetUpsert, ChannelCreate, ChannelUpdate, ChannelUpsert, SyncClient};
use config::AppConfig;
use drag::DragOp;
use history::{HistoryManager, Snapshot};
use models::{EpgEntry, StreamHit};
use overlays::OverlayMaps;
use selection::SelectionManager;
use store::{PlaylistStore, RenameTarget};
use sync::{SyncGateway, TaskResult};

struct EditorApp {
    config: AppConfig,

    // Session state: single writer, mutated only on this thread.
    store: PlaylistStore,
    overlays: OverlayMaps,
    selection: SelectionManager,
    history: HistoryManager,

    // Background task channel
    gateway: SyncGateway,
    task_receiver: Receiver<TaskResult>,

    // Last search results, addressed by index in the add command
    stream_results: Vec<StreamHit>,
    epg_results: Vec<EpgEntry>,

    // Set when a mirror call failed; cleared by a full reload.
    needs_reload: bool,

    console_log: Vec<String>,
}

impl EditorApp {
    fn new(config: AppConfig) -> Self {
        let (sender, receiver) = channel();
        let client = SyncClient::new(&config.server_url, &config.api_token)
            .with_user_agent(&config.user_agent)
            .with_timeout(config.request_timeout_secs);
        Self {
            config,
            store: PlaylistStore::new(),
            overlays: OverlayMaps::new(),
            selection: SelectionManager::new(),
            history: HistoryManager::new(),
            gateway: SyncGateway::new(client, sender),
            task_receiver: receiver,
            stream_results: Vec::new(),
            epg_results: Vec::new(),
            needs_reload: false,
            console_log: vec!["[INFO] Lineup Editor started".to_string()],
        }
    }

    fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%H:%M:%S");
        let line = format!("[{}] {}", timestamp, message);
        println!("{}", line);
        self.console_log.push(line);
        // Keep log size reasonable
        if self.console_log.len() > 500 {
            self.console_log.remove(0);
        }
    }

    fn playlist_id(&self) -> Option<i64> {
        self.store.playlist().map(|p| p.id)
    }

    fn snapshot(&self) -> Option<Snapshot> {
        let playlist = self.store.playlist()?.clone();
        Some(Snapshot {
            playlist,
            custom_names: self.overlays.custom_names().clone(),
            epg_mappings: self.overlays.epg_mappings().clone(),
        })
    }

    fn record(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.history.record(snapshot);
        }
    }

    fn reset_history(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.history.reset(snapshot);
        }
    }

    // ---- Remote result handling ----

    fn poll_tasks(&mut self) {
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::PlaylistFetched(playlist) => {
                    let name = playlist.name.clone();
                    self.overlays.populate_from(&playlist);
                    self.store.load(playlist);
                    self.selection.clear();
                    self.reset_history();
                    self.needs_reload = false;
                    self.log(&format!("[INFO] Loaded playlist '{}'", name));
                }
                TaskResult::BouquetDuplicated(bouquet) => {
                    let label = bouquet.label().to_string();
                    if self.store.adopt_duplicate(bouquet) {
                        self.record();
                        self.log(&format!("[INFO] Duplicated bouquet as '{}'", label));
                    }
                }
                TaskResult::ChannelsCreated { bouquet_id, channels } => {
                    let merged = self.store.merge_created_channels(bouquet_id, &channels);
                    if merged > 0 {
                        self.log(&format!("[INFO] Adopted {} server channel id(s)", merged));
                    }
                }
                TaskResult::StreamResults(hits) => {
                    self.log(&format!("[INFO] {} stream(s) found", hits.len()));
                    for (i, hit) in hits.iter().enumerate() {
                        println!("  [{}] {} (stream {})", i, hit.name, hit.stream_id);
                    }
                    self.stream_results = hits;
                }
                TaskResult::EpgResults(entries) => {
                    self.log(&format!("[INFO] {} EPG channel(s)", entries.len()));
                    for entry in entries.iter().take(50) {
                        println!("  {} - {}", entry.id, entry.name.as_deref().unwrap_or(""));
                    }
                    self.epg_results = entries;
                }
                TaskResult::Synced(op) => {
                    self.log(&format!("[SYNC] {} ok", op));
                }
                TaskResult::SyncFailed { op, error } => {
                    self.needs_reload = true;
                    self.log(&format!(
                        "[ERROR] {} failed: {} (local state kept; 'reload' to reconcile)",
                        op, error
                    ));
                }
            }
        }
    }

    // ---- Commands ----

    fn open_playlist(&mut self, id: i64) {
        self.log(&format!("[INFO] Fetching playlist {}...", id));
        self.gateway.fetch_playlist(id);
    }

    fn reload(&mut self) {
        if let Some(id) = self.playlist_id() {
            self.log("[INFO] Reloading from remote store...");
            self.gateway.fetch_playlist(id);
        } else {
            self.log("[WARN] No playlist open");
        }
    }

    fn add_bouquet(&mut self, name: &str) {
        let Some(playlist_id) = self.playlist_id() else {
            self.log("[WARN] No playlist open");
            return;
        };
        if let Some(_id) = self.store.add_bouquet(name) {
            self.record();
            let order = self.store.playlist().map(|p| p.bouquets.len() - 1).unwrap_or(0);
            self.gateway.upsert_bouquets(
                playlist_id,
                vec![BouquetUpsert {
                    id: None,
                    custom_name: Some(name.trim().to_string()),
                    category_id: None,
                    order,
                }],
            );
            self.log(&format!("[INFO] Added bouquet '{}'", name.trim()));
        }
    }

    fn delete_bouquet(&mut self, id: i64) {
        if self.store.delete_bouquet(id, &mut self.selection) {
            self.record();
            if id > 0 {
                self.gateway.delete_bouquet(id);
            }
            self.log(&format!("[INFO] Deleted bouquet {}", id));
        }
    }

    fn rename(&mut self, id: i64, text: &str) {
        match self.store.rename(id, text, &mut self.overlays) {
            Some(RenameTarget::Bouquet(bouquet_id)) => {
                self.record();
                if let (Some(playlist_id), Some(bouquet)) =
                    (self.playlist_id(), self.store.bouquet(bouquet_id))
                {
                    if bouquet_id > 0 {
                        self.gateway.upsert_bouquets(
                            playlist_id,
                            vec![BouquetUpsert {
                                id: Some(bouquet_id),
                                custom_name: bouquet.custom_name.clone(),
                                category_id: bouquet.category_id.clone(),
                                order: bouquet.order,
                            }],
                        );
                    }
                }
                self.log(&format!("[INFO] Renamed bouquet {}", id));
            }
            Some(RenameTarget::Channel(channel_id)) => {
                self.record();
                if channel_id > 0 {
                    self.gateway.update_channel(
                        channel_id,
                        ChannelUpdate {
                            custom_name: Some(text.trim().to_string()),
                            ..Default::default()
                        },
                    );
                }
                self.log(&format!("[INFO] Renamed channel {}", id));
            }
            None => self.log("[WARN] Nothing renamed (unknown id or empty name)"),
        }
    }

    /// Apply a completed drag gesture given its begin/end tokens.
    fn drag(&mut self, active_token: &str, target_token: &str) {
        match drag::resolve(active_token, target_token) {
            DragOp::ReorderBouquets { active, over } => {
                if self.store.reorder_bouquets(active, over) {
                    self.record();
                    self.mirror_bouquet_order();
                    self.log("[INFO] Reordered bouquets");
                }
            }
            DragOp::ReorderChannels { active, over } => {
                let Some(bouquet_id) = self.store.active_bouquet() else {
                    self.log("[WARN] No active bouquet");
                    return;
                };
                if self.store.reorder_channels(bouquet_id, active, over) {
                    self.record();
                    self.mirror_channel_list(bouquet_id);
                    self.log("[INFO] Reordered channels");
                }
            }
            DragOp::MoveToBouquet { channel, bouquet } => {
                let source = self.store.find_channel(channel).map(|(b, _)| b.id);
                if self.store.move_channel(channel, bouquet) {
                    self.record();
                    self.mirror_channel_list(bouquet);
                    if let Some(source_id) = source {
                        self.mirror_channel_list(source_id);
                    }
                    self.log(&format!("[INFO] Moved channel {} to bouquet {}", channel, bouquet));
                }
            }
            DragOp::None => {}
        }
    }

    /// Persist the whole bouquet ordering as a batch.
    fn mirror_bouquet_order(&mut self) {
        let (Some(playlist_id), Some(playlist)) = (self.playlist_id(), self.store.playlist())
        else {
            return;
        };
        let items: Vec<BouquetOrder> = playlist
            .bouquets
            .iter()
            .filter(|b| b.id > 0)
            .map(|b| BouquetOrder { id: b.id, order: b.order })
            .collect();
        self.gateway.reorder_bouquets(playlist_id, items);
    }

    /// Persist one bouquet's channel list (order and membership) as a batch.
    fn mirror_channel_list(&mut self, bouquet_id: i64) {
        if bouquet_id <= 0 {
            return;
        }
        let Some(bouquet) = self.store.bouquet(bouquet_id) else {
            return;
        };
        let items: Vec<ChannelUpsert> = bouquet
            .channels
            .iter()
            .map(|c| ChannelUpsert {
                id: if c.id > 0 { Some(c.id) } else { None },
                stream_id: c.stream_id,
                custom_name: c.custom_name.clone(),
                order: c.order,
                is_excluded: c.is_excluded,
                epg_channel_id: c.epg_channel_id.clone(),
            })
            .collect();
        self.gateway.upsert_channels(bouquet_id, items);
    }

    fn add_stream(&mut self, index: usize) {
        let Some(hit) = self.stream_results.get(index).cloned() else {
            self.log("[WARN] No such search result");
            return;
        };
        let Some(bouquet_id) = self.store.active_bouquet() else {
            self.log("[WARN] No active bouquet");
            return;
        };
        if self.store.add_stream(&hit, &mut self.overlays) {
            self.record();
            if bouquet_id > 0 {
                let order = self
                    .store
                    .bouquet(bouquet_id)
                    .map(|b| b.channels.len() - 1)
                    .unwrap_or(0);
                self.gateway.add_channel(
                    bouquet_id,
                    ChannelCreate {
                        stream_id: hit.stream_id,
                        custom_name: Some(hit.name.clone()),
                        order,
                        is_excluded: false,
                    },
                );
            }
            self.log(&format!("[INFO] Added '{}'", hit.name));
        }
    }

    fn add_all_streams(&mut self) {
        let hits = self.stream_results.clone();
        if hits.is_empty() {
            self.log("[WARN] No search results to add");
            return;
        }
        let Some(bouquet_id) = self.store.active_bouquet() else {
            self.log("[WARN] No active bouquet");
            return;
        };
        let added = self.store.bulk_add_streams(&hits, &mut self.overlays);
        if added > 0 {
            self.record();
            if bouquet_id > 0 {
                let items: Vec<ChannelUpsert> = self
                    .store
                    .bouquet(bouquet_id)
                    .map(|b| {
                        b.channels
                            .iter()
                            .filter(|c| c.id < 0)
                            .map(|c| ChannelUpsert {
                                id: None,
                                stream_id: c.stream_id,
                                custom_name: c.custom_name.clone(),
                                order: c.order,
                                is_excluded: c.is_excluded,
                                epg_channel_id: c.epg_channel_id.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                self.gateway.upsert_channels(bouquet_id, items);
            }
            self.log(&format!("[INFO] Added {} stream(s)", added));
        }
    }

    fn remove_channel(&mut self, id: i64) {
        if self.store.remove_channel(id, &mut self.selection) {
            self.record();
            if id > 0 {
                self.gateway.delete_channel(id);
            }
            self.log(&format!("[INFO] Removed channel {}", id));
        }
    }

    fn delete_selected(&mut self) {
        let ids = self.selection.ids();
        if ids.is_empty() {
            self.log("[WARN] Nothing selected");
            return;
        }
        let removed = self.store.bulk_delete_channels(&ids, &mut self.selection);
        if removed > 0 {
            self.record();
        }
        let remote_ids: Vec<i64> = ids.iter().copied().filter(|&id| id > 0).collect();
        if !remote_ids.is_empty() {
            self.gateway.bulk_delete_channels(remote_ids);
        }
        self.log(&format!("[INFO] Deleted {} channel(s)", removed));
    }

    fn move_selected(&mut self, target_bouquet: i64) {
        let ids = self.selection.ids();
        if ids.is_empty() {
            self.log("[WARN] Nothing selected");
            return;
        }
        let mut source_bouquets: Vec<i64> = ids
            .iter()
            .filter_map(|&id| self.store.find_channel(id).map(|(b, _)| b.id))
            .collect();
        source_bouquets.sort();
        source_bouquets.dedup();
        let moved = self.store.bulk_move_channels(&ids, target_bouquet, &mut self.selection);
        if !moved.is_empty() {
            self.record();
            self.mirror_channel_list(target_bouquet);
            for bouquet_id in source_bouquets {
                if bouquet_id != target_bouquet {
                    self.mirror_channel_list(bouquet_id);
                }
            }
        }
        let skipped = ids.len() - moved.len();
        if skipped > 0 {
            self.log(&format!(
                "[WARN] Moved {} channel(s), {} could not be moved",
                moved.len(),
                skipped
            ));
        } else {
            self.log(&format!("[INFO] Moved {} channel(s)", moved.len()));
        }
    }

    fn duplicate_bouquet(&mut self, id: i64) {
        if id <= 0 || self.store.bouquet(id).is_none() {
            self.log("[WARN] Unknown bouquet");
            return;
        }
        self.log("[INFO] Requesting duplicate from remote store...");
        self.gateway.duplicate_bouquet(id);
    }

    fn set_excluded(&mut self, channel_id: i64, excluded: bool) {
        if self.store.set_excluded(channel_id, excluded) {
            self.record();
            if channel_id > 0 {
                self.gateway.update_channel(
                    channel_id,
                    ChannelUpdate {
                        is_excluded: Some(excluded),
                        ..Default::default()
                    },
                );
            }
            self.log(&format!("[INFO] Channel {} excluded={}", channel_id, excluded));
        }
    }

    fn map_epg(&mut self, stream_id: i64, epg_id: &str) {
        // Collect remote ids of every occurrence before mutating.
        let channel_ids: Vec<i64> = self
            .store
            .playlist()
            .map(|p| {
                p.bouquets
                    .iter()
                    .flat_map(|b| b.channels.iter())
                    .filter(|c| c.stream_id == stream_id && c.id > 0)
                    .map(|c| c.id)
                    .collect()
            })
            .unwrap_or_default();
        if self.store.set_epg_mapping(stream_id, epg_id, &mut self.overlays) {
            self.record();
            for channel_id in channel_ids {
                self.gateway.update_channel(
                    channel_id,
                    ChannelUpdate {
                        epg_channel_id: Some(epg_id.to_string()),
                        ..Default::default()
                    },
                );
            }
            self.log(&format!("[INFO] Mapped stream {} to '{}'", stream_id, epg_id));
        } else {
            self.log("[WARN] Stream not found in playlist");
        }
    }

    fn export_bouquet(&mut self, id: i64, path: &str) {
        let Some(bouquet) = self.store.bouquet(id) else {
            self.log("[WARN] Unknown bouquet");
            return;
        };
        match transfer::write_bouquet_file(bouquet, std::path::Path::new(path)) {
            Ok(()) => self.log(&format!("[INFO] Exported bouquet {} to {}", id, path)),
            Err(e) => self.log(&format!("[ERROR] Export failed: {}", e)),
        }
    }

    fn import_bouquet(&mut self, path: &str) {
        let Some(playlist_id) = self.playlist_id() else {
            self.log("[WARN] No playlist open");
            return;
        };
        match transfer::read_bouquet_file(std::path::Path::new(path)) {
            Ok(doc) => {
                let order = self.store.playlist().map(|p| p.bouquets.len()).unwrap_or(0);
                let count = doc.channels.len();
                self.gateway.import_bouquet(playlist_id, doc, order);
                self.log(&format!(
                    "[INFO] Importing {} channel(s); playlist reloads when done",
                    count
                ));
            }
            Err(e) => self.log(&format!("[ERROR] Import failed: {}", e)),
        }
    }

    fn undo(&mut self) {
        let Some(snapshot) = self.history.undo() else {
            self.log("[INFO] Nothing to undo");
            return;
        };
        let playlist = snapshot.playlist.clone();
        let names = snapshot.custom_names.clone();
        let epg = snapshot.epg_mappings.clone();
        self.store.restore(playlist);
        self.overlays.restore(names, epg);
        // Local-only: the remote store diverges until the next reload.
        self.needs_reload = true;
        self.log("[INFO] Undone (remote store unchanged; 'reload' discards local history)");
    }

    fn redo(&mut self) {
        let Some(snapshot) = self.history.redo() else {
            self.log("[INFO] Nothing to redo");
            return;
        };
        let playlist = snapshot.playlist.clone();
        let names = snapshot.custom_names.clone();
        let epg = snapshot.epg_mappings.clone();
        self.store.restore(playlist);
        self.overlays.restore(names, epg);
        self.needs_reload = true;
        self.log("[INFO] Redone");
    }

    fn show(&self) {
        let Some(playlist) = self.store.playlist() else {
            println!("No playlist open. Use: open <id>");
            return;
        };
        println!("Playlist '{}' (id {})", playlist.name, playlist.id);
        if self.needs_reload {
            println!("  !! remote store may be out of sync; use 'reload'");
        }
        for bouquet in &playlist.bouquets {
            let marker = if Some(bouquet.id) == self.store.active_bouquet() { "*" } else { " " };
            let label_key = bouquet.category_id.clone().unwrap_or_default();
            let name = self
                .overlays
                .display_name(&label_key, bouquet.custom_name.as_deref(), bouquet.label());
            println!("{} [{}] {} ({} channels)", marker, bouquet.id, name, bouquet.channels.len());
            for channel in &bouquet.channels {
                let key = overlays::stream_key(channel.stream_id);
                let fallback = format!("Stream {}", channel.stream_id);
                let name = self
                    .overlays
                    .display_name(&key, channel.custom_name.as_deref(), &fallback)
                    .to_string();
                let sel = if self.selection.contains(channel.id) { ">" } else { " " };
                let excl = if channel.is_excluded { " [excluded]" } else { "" };
                let epg = self
                    .overlays
                    .epg_id(channel.stream_id, channel.epg_channel_id.as_deref())
                    .map(|e| format!(" epg:{}", e))
                    .unwrap_or_default();
                println!("  {}{}. [{}] {}{}{}", sel, channel.order, channel.id, name, excl, epg);
            }
        }
        println!(
            "undo: {} / redo: {} / selected: {}",
            self.history.can_undo(),
            self.history.can_redo(),
            self.selection.len()
        );
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim(), "y" | "Y" | "yes")
}

fn print_help() {
    println!("Commands:");
    println!("  open <playlist id>        fetch a playlist from the remote store");
    println!("  show                      print the current tree");
    println!("  group <name>              add a virtual bouquet");
    println!("  delgroup <id>             delete a bouquet (confirmed)");
    println!("  dup <id>                  duplicate a bouquet via the remote store");
    println!("  active <id>               set the active bouquet");
    println!("  rename <id> <text>        rename a bouquet or channel");
    println!("  drag <token> <token>      apply a drag gesture, e.g. 'drag channel-3 group-2'");
    println!("  search <text>             search streams across subscriptions");
    println!("  add <result index>        add one search result to the active bouquet");
    println!("  addall                    add every search result");
    println!("  del <channel id>          remove a channel (confirmed)");
    println!("  sel <channel id>          toggle selection");
    println!("  selall / selnone          select everything / clear selection");
    println!("  delsel                    delete selected channels (confirmed)");
    println!("  movesel <bouquet id>      move selected channels");
    println!("  excl <channel id> on|off  toggle guide exclusion");
    println!("  epglist / epg <text>      list or search program-guide channels");
    println!("  map <stream id> <epg id>  map a stream to a guide channel");
    println!("  export <id> <path>        write a bouquet document");
    println!("  import <path>             import a bouquet document (then reload)");
    println!("  undo / redo               step through history");
    println!("  reload                    refetch from the remote store");
    println!("  log                       print the console log");
    println!("  quit");
}

fn main() {
    let config = AppConfig::load();
    if config.server_url.is_empty() {
        eprintln!("No server configured. Set server_url in the config file first.");
        AppConfig::default().save();
        std::process::exit(1);
    }

    let mut app = EditorApp::new(config);

    let startup_id = std::env::args()
        .nth(1)
        .and_then(|a| a.parse::<i64>().ok())
        .or(app.config.default_playlist_id);
    if let Some(id) = startup_id {
        app.open_playlist(id);
    }

    let stdin = io::stdin();
    print_help();
    loop {
        app.poll_tasks();
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        app.poll_tasks();

        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "help" => print_help(),
            "quit" | "exit" => break,
            "open" => match rest.parse() {
                Ok(id) => app.open_playlist(id),
                Err(_) => println!("usage: open <playlist id>"),
            },
            "show" => app.show(),
            "log" => {
                for line in &app.console_log {
                    println!("{}", line);
                }
            }
            "group" => app.add_bouquet(rest),
            "delgroup" => match rest.parse() {
                Ok(id) => {
                    if confirm(&format!("Delete bouquet {}?", id)) {
                        app.delete_bouquet(id);
                    }
                }
                Err(_) => println!("usage: delgroup <id>"),
            },
            "dup" => match rest.parse() {
                Ok(id) => app.duplicate_bouquet(id),
                Err(_) => println!("usage: dup <id>"),
            },
            "active" => match rest.parse() {
                Ok(id) => {
                    if !app.store.set_active_bouquet(id) {
                        println!("unknown bouquet");
                    }
                }
                Err(_) => println!("usage: active <id>"),
            },
            "rename" => match rest.split_once(' ') {
                Some((id, text)) => match id.parse() {
                    Ok(id) => app.rename(id, text),
                    Err(_) => println!("usage: rename <id> <text>"),
                },
                None => println!("usage: rename <id> <text>"),
            },
            "drag" => match rest.split_once(' ') {
                Some((a, b)) => app.drag(a.trim(), b.trim()),
                None => println!("usage: drag <token> <token>"),
            },
            "search" => {
                if rest.is_empty() {
                    println!("usage: search <text>");
                } else {
                    app.gateway.search_streams(rest.to_string());
                }
            }
            "add" => match rest.parse() {
                Ok(index) => app.add_stream(index),
                Err(_) => println!("usage: add <result index>"),
            },
            "addall" => app.add_all_streams(),
            "del" => match rest.parse::<i64>() {
                Ok(id) => {
                    if confirm(&format!("Delete channel {}?", id)) {
                        app.remove_channel(id);
                    }
                }
                Err(_) => println!("usage: del <channel id>"),
            },
            "sel" => match rest.parse() {
                Ok(id) => app.selection.toggle(id),
                Err(_) => println!("usage: sel <channel id>"),
            },
            "selall" => {
                let ids = app.store.all_channel_ids();
                app.selection.set_all(&ids);
            }
            "selnone" => app.selection.clear(),
            "delsel" => {
                let count = app.selection.len();
                if count > 0 && confirm(&format!("Delete {} selected channel(s)?", count)) {
                    app.delete_selected();
                }
            }
            "movesel" => match rest.parse() {
                Ok(id) => app.move_selected(id),
                Err(_) => println!("usage: movesel <bouquet id>"),
            },
            "excl" => match rest.split_once(' ') {
                Some((id, flag)) => match (id.parse(), flag.trim()) {
                    (Ok(id), "on") => app.set_excluded(id, true),
                    (Ok(id), "off") => app.set_excluded(id, false),
                    _ => println!("usage: excl <channel id> on|off"),
                },
                None => println!("usage: excl <channel id> on|off"),
            },
            "epglist" => app.gateway.list_epg_channels(),
            "epg" => {
                if rest.is_empty() {
                    println!("usage: epg <text>");
                } else {
                    app.gateway.search_epg_channels(rest.to_string());
                }
            }
            "map" => match rest.split_once(' ') {
                Some((stream, epg)) => match stream.parse() {
                    Ok(stream_id) => app.map_epg(stream_id, epg.trim()),
                    Err(_) => println!("usage: map <stream id> <epg id>"),
                },
                None => println!("usage: map <stream id> <epg id>"),
            },
            "export" => match rest.split_once(' ') {
                Some((id, path)) => match id.parse() {
                    Ok(id) => app.export_bouquet(id, path.trim()),
                    Err(_) => println!("usage: export <bouquet id> <path>"),
                },
                None => println!("usage: export <bouquet id> <path>"),
            },
            "import" => {
                if rest.is_empty() {
                    println!("usage: import <path>");
                } else {
                    app.import_bouquet(rest);
                }
            }
            "undo" => app.undo(),
            "redo" => app.redo(),
            "reload" => app.reload(),
            _ => println!("Unknown command '{}'; try 'help'", cmd),
        }
    }

    app.config.save();
}
