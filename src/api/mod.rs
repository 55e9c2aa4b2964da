//! HTTP endpoints for the local callback server.
//!
//! The server exists only for the duration of the OAuth flow. [`callback`]
//! receives the authorization code from Spotify and completes the PKCE token
//! exchange; [`health`] reports liveness for quick manual checks.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
