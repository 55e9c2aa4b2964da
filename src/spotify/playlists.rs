use serde::Deserialize;

use crate::{
    config, spotify,
    spotify::{FetchError, SessionFetcher},
    types::{Page, Playlist, PlaylistDetails, PlaylistItem, PlaylistSummary, SlimPlaylistItem},
};

/// Page size for playlist and track listing requests. Spotify caps both
/// endpoints at 50 respectively 100 items per page.
const PLAYLIST_PAGE_LIMIT: u32 = 50;
const TRACK_PAGE_LIMIT: u32 = 100;

/// Enumerates the current user's complete playlist collection.
///
/// Walks all pages of `GET /me/playlists` and returns the summaries in the
/// order the API delivers them. No track lists are fetched.
pub async fn list_playlists(token: &str) -> Result<Vec<PlaylistSummary>, FetchError> {
    let api_url = format!(
        "{uri}/me/playlists?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = PLAYLIST_PAGE_LIMIT
    );
    let first = spotify::get_json::<Page<PlaylistSummary>>(token, &api_url).await?;
    spotify::collect_pages(first, &SessionFetcher { token }).await
}

/// Retrieves playlist metadata together with the embedded first track page.
pub async fn get_playlist_details(
    token: &str,
    playlist_id: &str,
) -> Result<PlaylistDetails, FetchError> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let details = spotify::get_json::<PlaylistDetails>(token, &api_url).await?;
    Ok(details)
}

/// Resolves only the display name of a playlist.
///
/// Field-reduced variant of [`get_playlist_details`] for duplicate report
/// rendering, where nothing but the name is needed.
pub async fn get_playlist_name(token: &str, playlist_id: &str) -> Result<String, FetchError> {
    #[derive(Deserialize)]
    struct PlaylistName {
        name: String,
    }

    let api_url = format!(
        "{uri}/playlists/{id}?fields=name",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );
    let named = spotify::get_json::<PlaylistName>(token, &api_url).await?;
    Ok(named.name)
}

/// Fetches the first track page of a playlist reduced to track ids.
///
/// The `fields` filter keeps responses small while building the duplicate
/// index; continuation URLs returned by the API carry the filter forward.
pub async fn first_track_id_page(
    token: &str,
    playlist_id: &str,
) -> Result<Page<SlimPlaylistItem>, FetchError> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks?fields=items(track.id),next,total&limit={limit}",
        uri = &config::spotify_apiurl(),
        id = playlist_id,
        limit = TRACK_PAGE_LIMIT
    );
    let first = spotify::get_json::<Page<SlimPlaylistItem>>(token, &api_url).await?;
    Ok(first)
}

/// Returns a playlist with all track pages walked and attached.
///
/// The first track page comes embedded in the playlist response; the walk
/// continues from its continuation URL. `track_total` is set to the realized
/// count rather than the API-reported estimate, to tolerate concurrent edits
/// on the remote side. Entries whose track wrapper is null are dropped.
pub async fn fetch_full_playlist(token: &str, playlist_id: &str) -> Result<Playlist, FetchError> {
    let details = get_playlist_details(token, playlist_id).await?;
    let items: Vec<PlaylistItem> =
        spotify::collect_pages(details.tracks, &SessionFetcher { token }).await?;

    let tracks: Vec<_> = items.into_iter().filter_map(|item| item.track).collect();
    let track_total = tracks.len();

    Ok(Playlist {
        id: details.id,
        name: details.name,
        owner: details.owner,
        external_urls: details.external_urls,
        tracks,
        track_total,
    })
}

/// Collects fully aggregated playlists.
///
/// With a playlist id, returns a one-element collection containing that
/// playlist. Without one, enumerates the current user's playlist collection
/// and aggregates each playlist in turn.
///
/// The walk is fail-fast: the first remote error stops further aggregation.
/// The caller receives every playlist aggregated before the error together
/// with the error itself, and decides whether the partial result is usable.
pub async fn collect_playlists(
    token: &str,
    playlist_id: Option<&str>,
) -> (Vec<Playlist>, Option<FetchError>) {
    let mut playlists: Vec<Playlist> = Vec::new();

    if let Some(id) = playlist_id {
        return match fetch_full_playlist(token, id).await {
            Ok(playlist) => (vec![playlist], None),
            Err(e) => (playlists, Some(e)),
        };
    }

    let summaries = match list_playlists(token).await {
        Ok(summaries) => summaries,
        Err(e) => return (playlists, Some(e)),
    };

    for summary in summaries {
        match fetch_full_playlist(token, &summary.id).await {
            Ok(playlist) => playlists.push(playlist),
            Err(e) => return (playlists, Some(e)),
        }
    }

    (playlists, None)
}
