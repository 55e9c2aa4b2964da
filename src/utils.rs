use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::ArtistRef;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Flattens a track's artist list into a single comma-separated string.
pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a track duration in milliseconds as `H:MM:SS`.
///
/// Milliseconds are rounded up to whole seconds, so a 1ms track shows as
/// one second rather than zero.
pub fn format_duration(milliseconds: u64) -> String {
    let seconds = milliseconds.div_ceil(1000);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

/// Escapes the five HTML-significant characters for safe interpolation into
/// the report template.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds a unique export file name: UTC timestamp plus a random suffix, so
/// repeated exports into the same directory never collide.
pub fn export_file_name(extension: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();
    format!("playlist_export_{}_{}.{}", timestamp, suffix, extension)
}
