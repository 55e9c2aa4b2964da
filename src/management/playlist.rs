use tokio::sync::Mutex;

use crate::{
    spotify::{self, FetchError},
    types::PlaylistSummary,
};

/// Produces the complete playlist summary collection when the cache needs
/// populating.
///
/// The API-backed implementation walks the live listing endpoint; tests
/// populate the cache from in-memory fakes.
pub trait SummaryFetcher {
    fn fetch_all(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Vec<PlaylistSummary>, FetchError>> + Send;
}

/// [`SummaryFetcher`] backed by `GET /me/playlists`.
pub struct ApiSummaryFetcher;

impl SummaryFetcher for ApiSummaryFetcher {
    async fn fetch_all(&self, token: &str) -> Result<Vec<PlaylistSummary>, FetchError> {
        spotify::playlists::list_playlists(token).await
    }
}

/// Process-lifetime cache of the current user's playlist collection.
///
/// Holds playlist summaries only, never track lists. The cache starts empty,
/// is populated on first access and replaced wholesale on a forced refresh;
/// nothing evicts it apart from process termination.
///
/// The collection is swapped as a complete snapshot under a mutex that is
/// held across the populate fetch, so a forced refresh cannot race with a
/// concurrent read and no reader ever observes a half-replaced collection.
pub struct PlaylistCache {
    playlists: Mutex<Option<Vec<PlaylistSummary>>>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self {
            playlists: Mutex::new(None),
        }
    }

    /// Returns the cached playlist collection, populating it through the
    /// fetcher when the cache is empty or `force_refresh` is set. Non-forcing
    /// reads of a populated cache perform no fetch. A failed populate leaves
    /// the cache as it was.
    pub async fn get_playlists<F>(
        &self,
        fetcher: &F,
        token: &str,
        force_refresh: bool,
    ) -> Result<Vec<PlaylistSummary>, FetchError>
    where
        F: SummaryFetcher,
    {
        let mut guard = self.playlists.lock().await;

        if !force_refresh {
            if let Some(cached) = guard.as_ref() {
                return Ok(cached.clone());
            }
        }

        let fresh = fetcher.fetch_all(token).await?;
        *guard = Some(fresh.clone());
        Ok(fresh)
    }
}

impl Default for PlaylistCache {
    fn default() -> Self {
        Self::new()
    }
}
