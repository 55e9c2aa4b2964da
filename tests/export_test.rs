use splcli::export::{ExportFormat, export, parse_export_format, to_html, to_json};
use splcli::types::{AlbumRef, ArtistRef, ExternalUrls, Owner, Playlist, Track};

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist: &str, duration_ms: u64) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: vec![ArtistRef {
            name: artist.to_string(),
        }],
        duration_ms,
        album: AlbumRef {
            name: format!("{} Album", artist),
        },
    }
}

// Helper function to create a fully aggregated test playlist
fn create_test_playlist(id: &str, name: &str, tracks: Vec<Track>) -> Playlist {
    let track_total = tracks.len();
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: Owner {
            id: "u1".to_string(),
            display_name: "Test User".to_string(),
        },
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/playlist/{}", id),
        },
        tracks,
        track_total,
    }
}

#[test]
fn test_json_export_round_trips() {
    let playlists = vec![
        create_test_playlist(
            "p1",
            "Morning Mix",
            vec![
                create_test_track("t1", "First Song", "Artist A", 201_000),
                create_test_track("t2", "Second Song", "Artist B", 185_500),
            ],
        ),
        create_test_playlist("p2", "Empty One", Vec::new()),
    ];

    let json = to_json(&playlists).unwrap();
    let parsed: Vec<Playlist> = serde_json::from_str(&json).unwrap();

    // Field-for-field reconstruction of the aggregated input
    assert_eq!(parsed, playlists);
}

#[test]
fn test_json_export_is_deterministic() {
    let playlists = vec![create_test_playlist(
        "p1",
        "Mix",
        vec![create_test_track("t1", "Song", "Artist", 1000)],
    )];

    assert_eq!(to_json(&playlists).unwrap(), to_json(&playlists).unwrap());
}

#[test]
fn test_empty_collection_exports_as_valid_document() {
    let json = to_json(&[]).unwrap();
    let parsed: Vec<Playlist> = serde_json::from_str(&json).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_html_report_contains_derived_fields() {
    let playlists = vec![create_test_playlist(
        "p1",
        "Mix",
        vec![create_test_track("t1", "Song", "Artist A", 225_000)],
    )];

    let html = to_html(&playlists);
    assert!(html.contains("Mix"));
    assert!(html.contains("Artist A"));
    assert!(html.contains("0:03:45"));
    assert!(html.contains("1 tracks"));
}

#[test]
fn test_html_report_escapes_metadata() {
    let mut track = create_test_track("t1", "<script>alert(1)</script>", "Rock & Roll", 1000);
    track.album.name = "\"Quoted\"".to_string();
    let playlists = vec![create_test_playlist("p1", "A <b>bold</b> name", vec![track])];

    let html = to_html(&playlists);
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Rock &amp; Roll"));
    assert!(html.contains("&quot;Quoted&quot;"));
    assert!(html.contains("A &lt;b&gt;bold&lt;/b&gt; name"));
    assert!(!html.contains("<script>alert"));
}

#[test]
fn test_parse_export_format() {
    assert_eq!(parse_export_format("json").unwrap(), ExportFormat::Json);
    assert_eq!(parse_export_format("html").unwrap(), ExportFormat::Html);
    assert_eq!(parse_export_format("HTML").unwrap(), ExportFormat::Html);

    let err = parse_export_format("xml").unwrap_err();
    assert!(err.contains("invalid value 'xml'"));
    assert!(err.contains("'json'"));
    assert!(err.contains("'html'"));
}

#[tokio::test]
async fn test_export_writes_unique_artifact() {
    let dir = std::env::temp_dir().join(format!("splcli-export-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let playlists = vec![create_test_playlist(
        "p1",
        "Mix",
        vec![create_test_track("t1", "Song", "Artist", 1000)],
    )];

    let first = export(&playlists, ExportFormat::Json, &dir).await.unwrap();
    let second = export(&playlists, ExportFormat::Json, &dir).await.unwrap();

    // Two exports into the same directory never collide
    assert_ne!(first, second);
    for path in [&first, &second] {
        let file_name = path.file_name().unwrap().to_string_lossy();
        assert!(file_name.starts_with("playlist_export_"));
        assert!(file_name.ends_with(".json"));

        let content = std::fs::read_to_string(path).unwrap();
        let parsed: Vec<Playlist> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, playlists);
    }

    // The temporary staging file must not survive the publish step
    let leftovers: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
