//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by splcli:
//! authentication, playlist and track retrieval, and the pagination walker
//! that turns cursor-based remote collections into complete in-memory
//! sequences. It abstracts away HTTP requests, OAuth flows and API quirks,
//! providing a clean Rust interface for the higher-level application logic.
//!
//! ## Core Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: browser launch, local callback server,
//!   token exchange and refresh.
//! - [`playlists`] - Playlist enumeration and full aggregation (all track
//!   pages walked).
//! - [`tracks`] - Single track metadata lookup.
//! - [`users`] - Current user profile, used for ownership comparison.
//!
//! ## Pagination
//!
//! Spotify list endpoints return pages of the shape
//! `{items: [...], next: <url or null>, total}`. The walker in this module
//! follows the opaque `next` continuation URL until a page reports none,
//! preserving item arrival order. An empty first page is a valid zero-length
//! result. Any failure aborts the walk and surfaces a [`FetchError`]
//! carrying the page index that had been reached, so callers can decide
//! whether partial data is usable.
//!
//! ## Error Handling
//!
//! Rate limiting (429 with `Retry-After`) and transient 502 responses are
//! retried inside the request helper; every other error is terminal for the
//! current operation and propagated to the caller.
//!
//! ## API Coverage
//!
//! - `GET /me` - current user profile
//! - `GET /me/playlists` - the user's playlist collection, paginated
//! - `GET /playlists/{id}` - playlist metadata with the first track page
//! - `GET /playlists/{id}/tracks` - track pages, optionally field-reduced
//! - `GET /tracks/{id}` - track metadata for duplicate reports
//! - `POST /api/token` - token exchange and refresh

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{types::Page, warning};

pub mod auth;
pub mod playlists;
pub mod tracks;
pub mod users;

/// Why a single remote request failed.
#[derive(Debug)]
pub enum FetchErrorKind {
    Http(reqwest::Error),
    Other(String),
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::Http(e) => write!(f, "{}", e),
            FetchErrorKind::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// A remote fetch failure, carrying the zero-based index of the page the
/// pagination walk had reached. For non-paginated lookups the index is 0.
#[derive(Debug)]
pub struct FetchError {
    pub page: usize,
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn remote(err: reqwest::Error) -> Self {
        Self {
            page: 0,
            kind: FetchErrorKind::Http(err),
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "remote fetch failed at page {}: {}", self.page, self.kind)
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::remote(err)
    }
}

/// Fetches a continuation page given its opaque `next` URL.
///
/// The session-backed implementation performs an authenticated GET; tests
/// drive the pagination walk with in-memory fakes.
pub trait PageFetcher<T> {
    fn next_page(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Page<T>, FetchErrorKind>> + Send;
}

/// [`PageFetcher`] backed by an authenticated API session.
pub struct SessionFetcher<'a> {
    pub token: &'a str,
}

impl<T: DeserializeOwned + Send> PageFetcher<T> for SessionFetcher<'_> {
    async fn next_page(&self, url: &str) -> Result<Page<T>, FetchErrorKind> {
        get_json(self.token, url).await.map_err(FetchErrorKind::Http)
    }
}

/// Walks a paginated collection to completion, starting from an already
/// fetched first page.
///
/// Follows each page's `next` continuation URL until a page reports none,
/// appending items in arrival order. An empty first page yields an empty
/// vector without any further fetch. A fetch failure aborts the walk; the
/// returned [`FetchError`] records the index of the page that failed.
pub async fn collect_pages<T, F>(first: Page<T>, fetcher: &F) -> Result<Vec<T>, FetchError>
where
    F: PageFetcher<T>,
{
    let mut items = first.items;
    let mut next = first.next;
    let mut page: usize = 0;

    while let Some(url) = next {
        page += 1;
        let fetched = fetcher
            .next_page(&url)
            .await
            .map_err(|kind| FetchError { page, kind })?;
        items.extend(fetched.items);
        next = fetched.next;
    }

    Ok(items)
}

/// Performs an authenticated GET request and deserializes the JSON response.
///
/// Retries 502 Bad Gateway responses after a 10 second delay and honors the
/// `Retry-After` header on 429 Too Many Requests. All other errors are
/// propagated immediately.
pub async fn get_json<T: DeserializeOwned>(token: &str, url: &str) -> Result<T, reqwest::Error> {
    let client = Client::new();

    loop {
        let response = client.get(url).bearer_auth(token).send().await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after <= 120 {
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            warning!(
                "Retry after has reached an abnormal high of {} seconds. Try your best tomorrow again.",
                retry_after
            );
        }

        let response = match response.error_for_status() {
            Ok(valid_response) => valid_response,
            Err(err) => {
                if let Some(status) = err.status() {
                    if status == StatusCode::BAD_GATEWAY {
                        sleep(Duration::from_secs(10)).await;
                        continue; // retry
                    }
                }
                return Err(err); // propagate other errors
            }
        };

        return response.json::<T>().await;
    }
}
