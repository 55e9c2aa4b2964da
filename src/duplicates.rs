//! Duplicate track detection across owned playlists.
//!
//! A track counts as a duplicate when its id appears in two or more distinct
//! playlists owned by the current user. Tracks without an id (locally
//! uploaded or regionally unavailable) can never be duplicates and are never
//! indexed. Detection works on track ids only; display metadata is resolved
//! afterwards, one remote lookup per distinct id, through [`MetadataCache`].

use std::collections::HashMap;

use tokio::task::JoinHandle;

use crate::{
    spotify::{self, FetchError, FetchErrorKind, SessionFetcher},
    types::{DuplicateTableRow, PlaylistSummary, SlimPlaylistItem, Track},
    utils,
};

/// Inverted index from track id to the playlists the track was seen in.
///
/// Playlist lists keep scan order and never repeat a playlist id, so an
/// entry with more than one playlist means the track appears in at least two
/// distinct owned playlists. Key iteration order is first-seen order.
#[derive(Debug, Default, PartialEq)]
pub struct DuplicateIndex {
    entries: HashMap<String, Vec<String>>,
    order: Vec<String>,
}

impl DuplicateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sighting of `track_id` inside `playlist_id`. Repeated
    /// sightings within the same playlist collapse into one.
    pub fn insert(&mut self, track_id: &str, playlist_id: &str) {
        match self.entries.get_mut(track_id) {
            Some(playlists) => {
                if !playlists.iter().any(|p| p == playlist_id) {
                    playlists.push(playlist_id.to_string());
                }
            }
            None => {
                self.order.push(track_id.to_string());
                self.entries
                    .insert(track_id.to_string(), vec![playlist_id.to_string()]);
            }
        }
    }

    pub fn playlists_for(&self, track_id: &str) -> Option<&[String]> {
        self.entries.get(track_id).map(|p| p.as_slice())
    }

    /// Number of distinct track ids seen during the scan.
    pub fn track_count(&self) -> usize {
        self.order.len()
    }

    /// Entries found in more than one playlist, in first-seen track order.
    pub fn duplicates(&self) -> Vec<(&str, &[String])> {
        self.order
            .iter()
            .filter_map(|track_id| {
                let playlists = self.entries.get(track_id)?;
                (playlists.len() > 1).then_some((track_id.as_str(), playlists.as_slice()))
            })
            .collect()
    }
}

/// Narrows a playlist collection to those owned by the given user id.
///
/// Pure equality comparison on the owner id; relative order is preserved.
pub fn filter_owned(playlists: &[PlaylistSummary], user_id: &str) -> Vec<PlaylistSummary> {
    playlists
        .iter()
        .filter(|p| p.owner.id == user_id)
        .cloned()
        .collect()
}

/// Builds the duplicate index for a set of owned playlists.
///
/// Track page walks for independent playlists run concurrently; pages within
/// one playlist stay sequential because each depends on the previous page's
/// continuation URL. A playlist's ids are merged into the index only after
/// its walk completed, so a failed playlist never leaves partial entries
/// behind. Any walk error aborts the whole scan.
pub async fn scan_playlists(
    token: &str,
    owned: &[PlaylistSummary],
) -> Result<DuplicateIndex, FetchError> {
    let mut handles = Vec::new();
    for playlist in owned {
        let token = token.to_string();
        let playlist_id = playlist.id.clone();
        handles.push(tokio::spawn(async move {
            collect_track_ids(&token, &playlist_id).await
        }));
    }

    merge_scans(owned, handles).await
}

/// Joins the per-playlist walks in playlist order and merges their track
/// ids into one index. On the first failure the outstanding walks are
/// aborted, so a failed scan stops issuing remote calls.
async fn merge_scans(
    owned: &[PlaylistSummary],
    handles: Vec<JoinHandle<Result<Vec<String>, FetchError>>>,
) -> Result<DuplicateIndex, FetchError> {
    let mut index = DuplicateIndex::new();
    let mut pending = owned.iter().zip(handles);

    while let Some((playlist, handle)) = pending.next() {
        let joined = handle
            .await
            .map_err(|e| FetchError {
                page: 0,
                kind: FetchErrorKind::Other(format!("task join error: {}", e)),
            })
            .and_then(|walked| walked);

        match joined {
            Ok(track_ids) => {
                for track_id in track_ids {
                    index.insert(&track_id, &playlist.id);
                }
            }
            Err(e) => {
                for (_, outstanding) in pending {
                    outstanding.abort();
                }
                return Err(e);
            }
        }
    }

    Ok(index)
}

/// Walks every track page of one playlist and returns the present track ids
/// in page order.
async fn collect_track_ids(token: &str, playlist_id: &str) -> Result<Vec<String>, FetchError> {
    let first = spotify::playlists::first_track_id_page(token, playlist_id).await?;
    let items = spotify::collect_pages(first, &SessionFetcher { token }).await?;
    Ok(present_track_ids(items))
}

/// Extracts the usable track ids from track page entries. Null track
/// wrappers and id-less tracks (local or unavailable content) are dropped;
/// they can never be declared duplicates.
pub fn present_track_ids(items: Vec<SlimPlaylistItem>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| item.track.and_then(|t| t.id))
        .collect()
}

/// Memoizing cache for display metadata of duplicate entries.
///
/// A track or playlist referenced by several duplicate entries is fetched
/// from the API exactly once.
#[derive(Default)]
pub struct MetadataCache {
    tracks: HashMap<String, Track>,
    playlist_names: HashMap<String, String>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn track(&mut self, token: &str, track_id: &str) -> Result<Track, FetchError> {
        if !self.tracks.contains_key(track_id) {
            let track = spotify::tracks::get_track(token, track_id).await?;
            self.tracks.insert(track_id.to_string(), track);
        }
        Ok(self.tracks[track_id].clone())
    }

    pub async fn playlist_name(
        &mut self,
        token: &str,
        playlist_id: &str,
    ) -> Result<String, FetchError> {
        if !self.playlist_names.contains_key(playlist_id) {
            let name = spotify::playlists::get_playlist_name(token, playlist_id).await?;
            self.playlist_names.insert(playlist_id.to_string(), name);
        }
        Ok(self.playlist_names[playlist_id].clone())
    }
}

/// Resolves one duplicate entry into a display row: track name, flattened
/// artist string and the names of every playlist the track was found in.
pub async fn resolve_duplicate_row(
    token: &str,
    cache: &mut MetadataCache,
    track_id: &str,
    playlist_ids: &[String],
) -> Result<DuplicateTableRow, FetchError> {
    let track = cache.track(token, track_id).await?;

    let mut playlist_names = Vec::with_capacity(playlist_ids.len());
    for playlist_id in playlist_ids {
        playlist_names.push(cache.playlist_name(token, playlist_id).await?);
    }

    Ok(DuplicateTableRow {
        name: track.name,
        artists: utils::join_artists(&track.artists),
        playlists: playlist_names.join(", "),
        track_id: track_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };
    use std::time::Duration;

    use crate::types::{ExternalUrls, Owner, PlaylistSummary};

    use super::*;

    fn summary(id: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: id.to_string(),
            name: format!("Playlist {}", id),
            owner: Owner {
                id: "u1".to_string(),
                display_name: "User u1".to_string(),
            },
            external_urls: ExternalUrls::default(),
        }
    }

    // Sets the flag when dropped, so task cancellation is observable.
    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_merge_scans_keeps_playlist_order() {
        let owned = vec![summary("p1"), summary("p2")];
        let handles = vec![
            tokio::spawn(async { Ok(vec!["t1".to_string()]) }),
            tokio::spawn(async { Ok(vec!["t1".to_string(), "t2".to_string()]) }),
        ];

        let index = merge_scans(&owned, handles).await.unwrap();
        assert_eq!(
            index.playlists_for("t1"),
            Some(&["p1".to_string(), "p2".to_string()][..])
        );
        assert_eq!(index.playlists_for("t2"), Some(&["p2".to_string()][..]));
    }

    #[tokio::test]
    async fn test_merge_scans_aborts_outstanding_walks_on_failure() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let owned = vec![summary("p1"), summary("p2")];
        let handles = vec![
            tokio::spawn(async {
                Err(FetchError {
                    page: 1,
                    kind: FetchErrorKind::Other("walk failed".to_string()),
                })
            }),
            tokio::spawn(async move {
                let _guard = SetOnDrop(flag);
                std::future::pending::<()>().await;
                Ok(Vec::new())
            }),
        ];

        let err = merge_scans(&owned, handles).await.unwrap_err();
        assert!(err.to_string().contains("walk failed"));

        // The never-completing second walk must be cancelled, not left
        // running after the scan aborted
        for _ in 0..100 {
            if cancelled.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(cancelled.load(Ordering::SeqCst));
    }
}
