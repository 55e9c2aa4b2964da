use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One page of a paginated Spotify collection. `next` holds the full URL of
/// the following page and is `None` on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

/// The authenticated user, fetched once per session. Only the id takes part
/// in ownership comparisons; the display name is for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

/// Playlist as returned by the list endpoint: metadata only, no tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner: Owner,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
}

/// A track inside a playlist snapshot. `id` is absent for locally uploaded
/// or regionally unavailable tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub album: AlbumRef,
}

/// One entry of a playlist's track page. The wrapper can carry `null`
/// (removed content, episodes), so the track itself is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

/// Fully aggregated playlist: all track pages walked, `track_total` set to
/// the realized count rather than the API-reported estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: Owner,
    pub external_urls: ExternalUrls,
    pub tracks: Vec<Track>,
    pub track_total: usize,
}

/// Wire shape of `GET /playlists/{id}`: playlist metadata with the first
/// track page embedded.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistDetails {
    pub id: String,
    pub name: String,
    pub owner: Owner,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub tracks: Page<PlaylistItem>,
}

/// Track page entry reduced to the track id, used while building the
/// duplicate index so large libraries do not materialize full track objects.
#[derive(Debug, Clone, Deserialize)]
pub struct SlimPlaylistItem {
    pub track: Option<SlimTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlimTrack {
    pub id: Option<String>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub id: String,
    pub url: String,
}

#[derive(Tabled)]
pub struct DuplicateTableRow {
    pub name: String,
    pub artists: String,
    pub playlists: String,
    pub track_id: String,
}
