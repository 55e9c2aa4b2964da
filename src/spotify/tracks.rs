use crate::{config, spotify, spotify::FetchError, types::Track};

/// Retrieves the full metadata of a single track.
///
/// Used when resolving display details for duplicate report entries. Callers
/// that need the same track more than once should go through the memoizing
/// cache in [`crate::duplicates`] instead of calling this directly.
pub async fn get_track(token: &str, track_id: &str) -> Result<Track, FetchError> {
    let api_url = format!(
        "{uri}/tracks/{id}",
        uri = &config::spotify_apiurl(),
        id = track_id
    );
    let track = spotify::get_json::<Track>(token, &api_url).await?;
    Ok(track)
}
