//! # CLI Module
//!
//! This module provides the command-line interface layer for splcli, a
//! Spotify API client for working with a personal playlist library. It
//! implements all user-facing commands and coordinates between the API
//! layer, the management layer and user interaction.
//!
//! ## Commands
//!
//! - [`auth`] - Initiates the Spotify OAuth authentication flow with PKCE
//! - [`list`] - Displays the current user's playlists as a table or JSON
//! - [`duplicates`] - Scans owned playlists for tracks appearing more than
//!   once
//! - [`export`] - Exports one or all playlists, fully aggregated, to a JSON
//!   or HTML artifact
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Tokens, Playlist Cache)
//!     ↓
//! API Layer (Spotify Integration, Pagination)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Every command is an async function running to completion on the calling
//! task, so the same operations can be driven one-shot from `main` or by an
//! interactive front end that awaits them off its rendering thread.
//!
//! ## Error Handling
//!
//! Remote errors abort the current command; the message goes to stderr and
//! the process exits non-zero. The one deliberate exception is metadata
//! resolution for individual duplicate entries, where a failing lookup only
//! skips that entry with a warning instead of discarding the whole report.

mod auth;
mod duplicates;
mod export;
mod list;

pub use auth::auth;
pub use duplicates::duplicates;
pub use export::export;
pub use list::list;
