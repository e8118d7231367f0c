//! Tests for playlist tree mutations

#[cfg(test)]
mod tests {
    use crate::models::{Bouquet, BouquetChannel, Playlist, StreamHit};
    use crate::overlays::{stream_key, OverlayMaps};
    use crate::selection::SelectionManager;
    use crate::store::{PlaylistStore, RenameTarget};

    fn channel(id: i64, stream_id: i64, order: usize) -> BouquetChannel {
        BouquetChannel {
            id,
            stream_id,
            custom_name: None,
            order,
            is_excluded: false,
            epg_channel_id: None,
        }
    }

    /// News [A(0) B(1) C(2)], Movies [D(0)], plus stream 300 repeated in both.
    fn sample_playlist() -> Playlist {
        Playlist {
            id: 1,
            subscription_id: 1,
            name: "Main".to_string(),
            description: None,
            bouquets: vec![
                Bouquet {
                    id: 10,
                    category_id: None,
                    custom_name: Some("News".to_string()),
                    order: 0,
                    channels: vec![
                        channel(101, 201, 0), // A
                        channel(102, 202, 1), // B
                        channel(103, 203, 2), // C
                        channel(104, 300, 3),
                    ],
                },
                Bouquet {
                    id: 20,
                    category_id: Some("7".to_string()),
                    custom_name: Some("Movies".to_string()),
                    order: 1,
                    channels: vec![channel(105, 204, 0), channel(106, 300, 1)],
                },
            ],
        }
    }

    fn loaded_store() -> PlaylistStore {
        let mut store = PlaylistStore::new();
        store.load(sample_playlist());
        store
    }

    fn orders(store: &PlaylistStore, bouquet_id: i64) -> Vec<usize> {
        store
            .bouquet(bouquet_id)
            .unwrap()
            .channels
            .iter()
            .map(|c| c.order)
            .collect()
    }

    fn channel_ids(store: &PlaylistStore, bouquet_id: i64) -> Vec<i64> {
        store
            .bouquet(bouquet_id)
            .unwrap()
            .channels
            .iter()
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn test_reorder_channels_scenario() {
        // [A B C ...] with A dragged onto C: A takes C's place.
        let mut store = loaded_store();
        assert!(store.reorder_channels(10, 101, 103));
        assert_eq!(channel_ids(&store, 10), vec![102, 103, 101, 104]);
        assert_eq!(orders(&store, 10), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_sequence_keeps_orders_dense() {
        let mut store = loaded_store();
        let mut streams_before: Vec<i64> = store
            .bouquet(10)
            .unwrap()
            .channels
            .iter()
            .map(|c| c.stream_id)
            .collect();
        streams_before.sort();

        for (a, b) in [(103, 101), (102, 104), (101, 102), (104, 103)] {
            assert!(store.reorder_channels(10, a, b));
            let bouquet = store.bouquet(10).unwrap();
            for (i, c) in bouquet.channels.iter().enumerate() {
                assert_eq!(c.order, i);
            }
        }

        let mut streams_after: Vec<i64> = store
            .bouquet(10)
            .unwrap()
            .channels
            .iter()
            .map(|c| c.stream_id)
            .collect();
        streams_after.sort();
        assert_eq!(streams_before, streams_after);
    }

    #[test]
    fn test_reorder_noops() {
        let mut store = loaded_store();
        assert!(!store.reorder_channels(10, 101, 101));
        assert!(!store.reorder_channels(10, 101, 999));
        assert!(!store.reorder_channels(99, 101, 102));
        assert!(!store.reorder_bouquets(10, 10));
        assert!(!store.reorder_bouquets(10, 99));
        assert_eq!(channel_ids(&store, 10), vec![101, 102, 103, 104]);
    }

    #[test]
    fn test_reorder_bouquets() {
        let mut store = loaded_store();
        assert!(store.reorder_bouquets(20, 10));
        let playlist = store.playlist().unwrap();
        assert_eq!(playlist.bouquets[0].id, 20);
        assert_eq!(playlist.bouquets[0].order, 0);
        assert_eq!(playlist.bouquets[1].id, 10);
        assert_eq!(playlist.bouquets[1].order, 1);
    }

    #[test]
    fn test_move_channel_preserves_fields_and_density() {
        let mut store = loaded_store();
        {
            // Give the moving channel distinguishing fields first.
            let mut overlays = OverlayMaps::new();
            assert!(store.set_epg_mapping(202, "b.two", &mut overlays));
            assert_eq!(
                store.rename(102, "Channel B", &mut overlays),
                Some(RenameTarget::Channel(102))
            );
        }
        let news_before = store.bouquet(10).unwrap().channels.len();
        let movies_before = store.bouquet(20).unwrap().channels.len();

        assert!(store.move_channel(102, 20));

        let news = store.bouquet(10).unwrap();
        let movies = store.bouquet(20).unwrap();
        assert_eq!(news.channels.len(), news_before - 1);
        assert_eq!(movies.channels.len(), movies_before + 1);
        assert_eq!(orders(&store, 10), vec![0, 1, 2]);
        assert_eq!(orders(&store, 20), vec![0, 1, 2]);

        let moved = store.bouquet(20).unwrap().channels.last().unwrap();
        assert_eq!(moved.id, 102);
        assert_eq!(moved.stream_id, 202);
        assert_eq!(moved.custom_name.as_deref(), Some("Channel B"));
        assert_eq!(moved.epg_channel_id.as_deref(), Some("b.two"));
    }

    #[test]
    fn test_move_channel_same_bouquet_noop() {
        let mut store = loaded_store();
        assert!(!store.move_channel(101, 10));
        assert_eq!(channel_ids(&store, 10), vec![101, 102, 103, 104]);
    }

    #[test]
    fn test_add_bouquet() {
        let mut store = loaded_store();
        let id = store.add_bouquet("Kids").unwrap();
        assert!(id < 0);
        let playlist = store.playlist().unwrap();
        assert_eq!(playlist.bouquets.len(), 3);
        assert_eq!(playlist.bouquets[2].order, 2);
        assert_eq!(playlist.bouquets[2].custom_name.as_deref(), Some("Kids"));
        assert!(playlist.bouquets[2].category_id.is_none());
    }

    #[test]
    fn test_add_bouquet_rejects_empty_name_or_unloaded() {
        let mut store = loaded_store();
        assert!(store.add_bouquet("   ").is_none());
        let mut empty = PlaylistStore::new();
        assert!(empty.add_bouquet("Kids").is_none());
    }

    #[test]
    fn test_delete_bouquet_renumbers_and_prunes() {
        let mut store = loaded_store();
        let mut selection = SelectionManager::new();
        selection.set_all(&[101, 105]);
        store.set_active_bouquet(10);

        assert!(store.delete_bouquet(10, &mut selection));
        let playlist = store.playlist().unwrap();
        assert_eq!(playlist.bouquets.len(), 1);
        assert_eq!(playlist.bouquets[0].id, 20);
        assert_eq!(playlist.bouquets[0].order, 0);
        // Selection keeps only channels that still exist.
        assert!(!selection.contains(101));
        assert!(selection.contains(105));
        // Active pointer moved off the deleted bouquet.
        assert_ne!(store.active_bouquet(), Some(10));
    }

    #[test]
    fn test_remove_channel_renumbers() {
        let mut store = loaded_store();
        let mut selection = SelectionManager::new();
        selection.toggle(102);
        assert!(store.remove_channel(102, &mut selection));
        assert_eq!(channel_ids(&store, 10), vec![101, 103, 104]);
        assert_eq!(orders(&store, 10), vec![0, 1, 2]);
        assert!(!selection.contains(102));
    }

    #[test]
    fn test_bulk_delete_across_bouquets_clears_selection() {
        let mut store = loaded_store();
        let mut selection = SelectionManager::new();
        selection.set_all(&[102, 105, 999]);
        let removed = store.bulk_delete_channels(&[102, 105, 999], &mut selection);
        assert_eq!(removed, 2);
        assert!(selection.is_empty());
        assert_eq!(channel_ids(&store, 10), vec![101, 103, 104]);
        assert_eq!(channel_ids(&store, 20), vec![106]);
        assert_eq!(orders(&store, 10), vec![0, 1, 2]);
        assert_eq!(orders(&store, 20), vec![0]);
    }

    #[test]
    fn test_bulk_move_reports_per_item_outcome() {
        let mut store = loaded_store();
        let mut selection = SelectionManager::new();
        selection.set_all(&[101, 106, 999]);
        // 106 already lives in bouquet 20, 999 does not exist.
        let moved = store.bulk_move_channels(&[101, 106, 999], 20, &mut selection);
        assert_eq!(moved, vec![101]);
        assert!(selection.is_empty());
        assert_eq!(store.bouquet(20).unwrap().channels.len(), 3);
        assert_eq!(orders(&store, 20), vec![0, 1, 2]);
    }

    #[test]
    fn test_rename_channel_applies_to_every_occurrence() {
        let mut store = loaded_store();
        let mut overlays = OverlayMaps::new();
        // Stream 300 appears in both bouquets; rename one occurrence.
        assert_eq!(
            store.rename(104, "Shared HD", &mut overlays),
            Some(RenameTarget::Channel(104))
        );
        // Overlay answers for both occurrences without touching tree shape.
        let (_, other) = store.find_channel(106).unwrap();
        assert_eq!(other.stream_id, 300);
        assert_eq!(
            overlays.display_name(&stream_key(300), other.custom_name.as_deref(), "?"),
            "Shared HD"
        );
        assert_eq!(store.bouquet(10).unwrap().channels.len(), 4);
        assert_eq!(store.bouquet(20).unwrap().channels.len(), 2);
    }

    #[test]
    fn test_rename_bouquet() {
        let mut store = loaded_store();
        let mut overlays = OverlayMaps::new();
        assert_eq!(
            store.rename(20, "Cinema", &mut overlays),
            Some(RenameTarget::Bouquet(20))
        );
        assert_eq!(store.bouquet(20).unwrap().custom_name.as_deref(), Some("Cinema"));
        assert_eq!(store.rename(999, "X", &mut overlays), None);
        assert_eq!(store.rename(20, "  ", &mut overlays), None);
    }

    #[test]
    fn test_add_stream_and_merge_server_ids() {
        let mut store = loaded_store();
        let mut overlays = OverlayMaps::new();
        store.set_active_bouquet(10);

        let hits = vec![
            StreamHit {
                stream_id: 500,
                name: "Alpha".to_string(),
                subscription_id: None,
                category_id: None,
                epg_channel_id: Some("alpha.tv".to_string()),
            },
            StreamHit {
                stream_id: 501,
                name: "Beta".to_string(),
                subscription_id: None,
                category_id: None,
                epg_channel_id: None,
            },
        ];
        assert_eq!(store.bulk_add_streams(&hits, &mut overlays), 2);

        let bouquet = store.bouquet(10).unwrap();
        assert_eq!(bouquet.channels.len(), 6);
        assert_eq!(orders(&store, 10), vec![0, 1, 2, 3, 4, 5]);
        assert!(bouquet.channels[4].id < 0);
        assert!(bouquet.channels[5].id < 0);
        // Freshly added streams are renameable right away via the overlay.
        assert_eq!(overlays.display_name(&stream_key(500), None, "?"), "Alpha");

        // Server response arrives reordered; merge by stream reference.
        let created = vec![channel(901, 501, 5), channel(900, 500, 4)];
        assert_eq!(store.merge_created_channels(10, &created), 2);
        let bouquet = store.bouquet(10).unwrap();
        assert_eq!(bouquet.channels[4].id, 900);
        assert_eq!(bouquet.channels[5].id, 901);
    }

    #[test]
    fn test_merge_tolerates_locally_deleted_channel() {
        let mut store = loaded_store();
        let mut overlays = OverlayMaps::new();
        let mut selection = SelectionManager::new();
        store.set_active_bouquet(10);
        let hit = StreamHit {
            stream_id: 500,
            name: "Alpha".to_string(),
            subscription_id: None,
            category_id: None,
            epg_channel_id: None,
        };
        assert!(store.add_stream(&hit, &mut overlays));
        let placeholder = *channel_ids(&store, 10).last().unwrap();
        assert!(store.remove_channel(placeholder, &mut selection));
        // Response for the now-deleted channel merges nothing.
        assert_eq!(store.merge_created_channels(10, &[channel(900, 500, 4)]), 0);
    }

    #[test]
    fn test_add_stream_requires_active_bouquet() {
        let mut store = loaded_store();
        let mut selection = SelectionManager::new();
        let mut overlays = OverlayMaps::new();
        // Delete both bouquets so nothing can be active.
        assert!(store.delete_bouquet(10, &mut selection));
        assert!(store.delete_bouquet(20, &mut selection));
        let hit = StreamHit {
            stream_id: 500,
            name: "Alpha".to_string(),
            subscription_id: None,
            category_id: None,
            epg_channel_id: None,
        };
        assert!(!store.add_stream(&hit, &mut overlays));
    }

    #[test]
    fn test_adopt_duplicate_appends_and_selects() {
        let mut store = loaded_store();
        let copy = Bouquet {
            id: 30,
            category_id: None,
            custom_name: Some("News (copy)".to_string()),
            order: 0,
            channels: vec![channel(300, 201, 0), channel(301, 202, 1)],
        };
        assert!(store.adopt_duplicate(copy));
        let playlist = store.playlist().unwrap();
        assert_eq!(playlist.bouquets.len(), 3);
        assert_eq!(playlist.bouquets[2].id, 30);
        assert_eq!(playlist.bouquets[2].order, 2);
        assert_eq!(store.active_bouquet(), Some(30));
    }

    #[test]
    fn test_set_excluded() {
        let mut store = loaded_store();
        assert!(store.set_excluded(101, true));
        assert!(store.find_channel(101).unwrap().1.is_excluded);
        // Setting the same value again is a no-op.
        assert!(!store.set_excluded(101, true));
        assert!(!store.set_excluded(999, true));
    }

    #[test]
    fn test_set_epg_mapping_touches_every_occurrence() {
        let mut store = loaded_store();
        let mut overlays = OverlayMaps::new();
        assert!(store.set_epg_mapping(300, "shared.tv", &mut overlays));
        assert_eq!(
            store.find_channel(104).unwrap().1.epg_channel_id.as_deref(),
            Some("shared.tv")
        );
        assert_eq!(
            store.find_channel(106).unwrap().1.epg_channel_id.as_deref(),
            Some("shared.tv")
        );
        assert_eq!(overlays.epg_id(300, None), Some("shared.tv"));
        assert!(!store.set_epg_mapping(12345, "none.tv", &mut overlays));
    }
}
