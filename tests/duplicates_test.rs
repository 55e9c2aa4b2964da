use splcli::duplicates::{DuplicateIndex, filter_owned, present_track_ids};
use splcli::types::{ExternalUrls, Owner, PlaylistSummary, SlimPlaylistItem};

// Helper function to create a playlist summary with the given owner
fn create_summary(id: &str, owner_id: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: format!("Playlist {}", id),
        owner: Owner {
            id: owner_id.to_string(),
            display_name: format!("User {}", owner_id),
        },
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/playlist/{}", id),
        },
    }
}

#[test]
fn test_filter_owned_keeps_only_matching_owner() {
    let playlists = vec![create_summary("p1", "u1"), create_summary("p2", "u2")];

    let owned = filter_owned(&playlists, "u1");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, "p1");
}

#[test]
fn test_filter_owned_preserves_relative_order() {
    let playlists = vec![
        create_summary("p1", "u1"),
        create_summary("p2", "u2"),
        create_summary("p3", "u1"),
        create_summary("p4", "u1"),
    ];

    let owned = filter_owned(&playlists, "u1");
    let ids: Vec<&str> = owned.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3", "p4"]);
}

#[test]
fn test_index_surfaces_only_multi_playlist_tracks() {
    // t1 appears in p1 and p2, t2 only in p1
    let mut index = DuplicateIndex::new();
    index.insert("t1", "p1");
    index.insert("t2", "p1");
    index.insert("t1", "p2");

    let duplicates = index.duplicates();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].0, "t1");
    assert_eq!(duplicates[0].1, &["p1".to_string(), "p2".to_string()]);
}

#[test]
fn test_index_repeat_within_one_playlist_is_not_a_duplicate() {
    let mut index = DuplicateIndex::new();
    index.insert("t1", "p1");
    index.insert("t1", "p1");

    assert!(index.duplicates().is_empty());
    assert_eq!(index.playlists_for("t1"), Some(&["p1".to_string()][..]));
}

#[test]
fn test_index_playlist_lists_keep_scan_order() {
    let mut index = DuplicateIndex::new();
    index.insert("t1", "p3");
    index.insert("t1", "p1");
    index.insert("t1", "p2");

    let duplicates = index.duplicates();
    assert_eq!(
        duplicates[0].1,
        &["p3".to_string(), "p1".to_string(), "p2".to_string()]
    );
}

#[test]
fn test_index_duplicates_in_first_seen_track_order() {
    let mut index = DuplicateIndex::new();
    index.insert("t9", "p1");
    index.insert("t3", "p1");
    index.insert("t9", "p2");
    index.insert("t3", "p2");
    index.insert("t5", "p2");
    index.insert("t5", "p3");

    let order: Vec<&str> = index.duplicates().iter().map(|(t, _)| *t).collect();
    assert_eq!(order, vec!["t9", "t3", "t5"]);
}

#[test]
fn test_index_is_idempotent_for_identical_input() {
    let sightings = [("t1", "p1"), ("t2", "p1"), ("t1", "p2"), ("t2", "p2")];

    let mut first = DuplicateIndex::new();
    let mut second = DuplicateIndex::new();
    for (track, playlist) in sightings {
        first.insert(track, playlist);
        second.insert(track, playlist);
    }

    assert_eq!(first, second);
}

#[test]
fn test_index_track_count_counts_distinct_tracks() {
    let mut index = DuplicateIndex::new();
    index.insert("t1", "p1");
    index.insert("t1", "p2");
    index.insert("t2", "p1");

    assert_eq!(index.track_count(), 2);
}

#[test]
fn test_present_track_ids_drops_null_entries() {
    // One null wrapper, one id-less local track, one regular track
    let json = r#"[
        {"track": null},
        {"track": {"id": null}},
        {"track": {"id": "t1"}}
    ]"#;
    let items: Vec<SlimPlaylistItem> = serde_json::from_str(json).unwrap();

    assert_eq!(present_track_ids(items), vec!["t1".to_string()]);
}
