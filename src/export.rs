//! Playlist export pipeline.
//!
//! Serializes an aggregated playlist collection into a JSON dump or an HTML
//! report and writes it as a uniquely named artifact. The artifact is
//! materialized completely in memory, written to a temporary sibling file
//! and then renamed into place, so a partially written file is never
//! observable under the final name. Existing files are never overwritten.

use std::path::{Path, PathBuf};

use crate::{types::Playlist, utils};

#[derive(Debug)]
pub enum ExportError {
    /// Malformed data prevented the structured serialization.
    Serialize(serde_json::Error),
    /// The destination was not writable.
    Write(std::io::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Serialize(e) => write!(f, "cannot serialize playlists: {}", e),
            ExportError::Write(e) => write!(f, "cannot write export file: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialize(err)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Write(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Clap value parser for `--format`. Unrecognized values are rejected with
/// the accepted alternatives instead of falling through to a default.
pub fn parse_export_format(input: &str) -> Result<ExportFormat, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "html" => Ok(ExportFormat::Html),
        other => Err(format!(
            "invalid value '{}': expected one of 'json', 'html'",
            other
        )),
    }
}

/// Serializes the playlist collection for the structured export.
///
/// Deterministic for identical input; an empty collection produces a valid
/// empty-array document.
pub fn to_json(playlists: &[Playlist]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(playlists)?)
}

/// Renders the human-readable HTML report.
///
/// Pure function of the playlist data (plus the generation timestamp in the
/// footer). Every interpolated field is HTML-escaped; durations and artist
/// lists use the same derivations as the rest of the application.
pub fn to_html(playlists: &[Playlist]) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n<title>Playlist Export</title>\n");
    out.push_str(
        "<style>\nbody { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; margin-bottom: 2em; }\n\
         th, td { border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: left; }\n\
         th { background: #f0f0f0; }\n</style>\n",
    );
    out.push_str("</head>\n<body>\n<h1>Playlist Export</h1>\n");

    for playlist in playlists {
        out.push_str(&format!(
            "<h2><a href=\"{url}\">{name}</a></h2>\n<p>{owner} &middot; {count} tracks</p>\n",
            url = utils::escape_html(&playlist.external_urls.spotify),
            name = utils::escape_html(&playlist.name),
            owner = utils::escape_html(&playlist.owner.display_name),
            count = playlist.track_total
        ));

        out.push_str(
            "<table>\n<tr><th>#</th><th>Title</th><th>Artist(s)</th><th>Album</th><th>Duration</th></tr>\n",
        );
        for (i, track) in playlist.tracks.iter().enumerate() {
            out.push_str(&format!(
                "<tr><td>{index}</td><td>{title}</td><td>{artists}</td><td>{album}</td><td>{duration}</td></tr>\n",
                index = i + 1,
                title = utils::escape_html(&track.name),
                artists = utils::escape_html(&utils::join_artists(&track.artists)),
                album = utils::escape_html(&track.album.name),
                duration = utils::format_duration(track.duration_ms)
            ));
        }
        out.push_str("</table>\n");
    }

    out.push_str(&format!(
        "<footer><small>Generated {}</small></footer>\n</body>\n</html>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    out
}

/// Exports the playlist collection to a uniquely named artifact in `dir`.
///
/// Parent directories are created as needed. The content is written in one
/// pass to a temporary file and published with a rename; on any error before
/// the rename no file appears under the final name.
pub async fn export(
    playlists: &[Playlist],
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let content = match format {
        ExportFormat::Json => to_json(playlists)?,
        ExportFormat::Html => to_html(playlists),
    };

    async_fs::create_dir_all(dir).await?;

    let path = dir.join(utils::export_file_name(format.extension()));
    if path.exists() {
        return Err(ExportError::Write(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("refusing to overwrite {}", path.display()),
        )));
    }

    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));
    async_fs::write(&tmp_path, content).await?;
    async_fs::rename(&tmp_path, &path).await?;

    Ok(path)
}
