use std::sync::atomic::{AtomicUsize, Ordering};

use splcli::management::{PlaylistCache, SummaryFetcher};
use splcli::spotify::{FetchError, FetchErrorKind};
use splcli::types::{ExternalUrls, Owner, PlaylistSummary};

// Helper function to create a playlist summary
fn create_summary(id: &str) -> PlaylistSummary {
    PlaylistSummary {
        id: id.to_string(),
        name: format!("Playlist {}", id),
        owner: Owner {
            id: "u1".to_string(),
            display_name: "User u1".to_string(),
        },
        external_urls: ExternalUrls {
            spotify: format!("https://open.spotify.com/playlist/{}", id),
        },
    }
}

// Fetcher counting its invocations, serving a snapshot tagged with the
// call number so snapshot replacement is observable.
struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

impl SummaryFetcher for CountingFetcher {
    async fn fetch_all(&self, _token: &str) -> Result<Vec<PlaylistSummary>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![create_summary(&format!("p{}", call))])
    }
}

// Fetcher whose populate always fails.
struct FailingFetcher;

impl SummaryFetcher for FailingFetcher {
    async fn fetch_all(&self, _token: &str) -> Result<Vec<PlaylistSummary>, FetchError> {
        Err(FetchError {
            page: 0,
            kind: FetchErrorKind::Other("listing unavailable".to_string()),
        })
    }
}

#[tokio::test]
async fn test_cache_populates_once_for_repeated_reads() {
    let cache = PlaylistCache::new();
    let fetcher = CountingFetcher::new();

    let first = cache.get_playlists(&fetcher, "token", false).await.unwrap();
    let second = cache.get_playlists(&fetcher, "token", false).await.unwrap();
    let third = cache.get_playlists(&fetcher, "token", false).await.unwrap();

    // Empty -> Populated on the first read; later reads hit the cache
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(first[0].id, "p1");
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[tokio::test]
async fn test_forced_refresh_replaces_snapshot_wholesale() {
    let cache = PlaylistCache::new();
    let fetcher = CountingFetcher::new();

    let initial = cache.get_playlists(&fetcher, "token", false).await.unwrap();
    assert_eq!(initial[0].id, "p1");

    let refreshed = cache.get_playlists(&fetcher, "token", true).await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(refreshed[0].id, "p2");

    // Subsequent non-forcing reads serve the new snapshot without a fetch
    let after = cache.get_playlists(&fetcher, "token", false).await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(after, refreshed);
}

#[tokio::test]
async fn test_failed_populate_leaves_cache_empty() {
    let cache = PlaylistCache::new();

    let err = cache
        .get_playlists(&FailingFetcher, "token", false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("listing unavailable"));

    // The next read still has to populate, and succeeds
    let fetcher = CountingFetcher::new();
    let recovered = cache.get_playlists(&fetcher, "token", false).await.unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    assert_eq!(recovered[0].id, "p1");
}
