mod auth;
mod playlist;

pub use auth::TokenManager;
pub use playlist::{ApiSummaryFetcher, PlaylistCache, SummaryFetcher};
