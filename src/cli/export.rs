use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    export::{self, ExportFormat},
    management::TokenManager,
    spotify, success, warning,
};

pub async fn export(
    playlist_id: Option<String>,
    format: ExportFormat,
    path: Option<PathBuf>,
    launch: bool,
) {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splcli auth\n Error: {}",
                e
            );
        }
    };
    let token = token_mgr.get_valid_token().await;

    let out_dir = match path {
        Some(dir) => dir,
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => error!("Cannot determine current directory: {}", e),
        },
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Collecting playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let (playlists, fetch_error) =
        spotify::playlists::collect_playlists(&token, playlist_id.as_deref()).await;
    pb.finish_and_clear();

    if let Some(e) = &fetch_error {
        if playlists.is_empty() {
            error!("Failed to collect playlists: {}", e);
        }
        warning!(
            "Aggregation stopped early: {}. Exporting the {} playlists collected so far.",
            e,
            playlists.len()
        );
    }

    let outpath = match export::export(&playlists, format, &out_dir).await {
        Ok(outpath) => outpath,
        Err(e) => error!("Export failed: {}", e),
    };

    success!("Export written to {}", outpath.display());

    if launch {
        if webbrowser::open(&outpath.display().to_string()).is_err() {
            warning!("Could not open {} automatically.", outpath.display());
        }
    }

    if fetch_error.is_some() {
        error!("Export is incomplete due to the fetch error above.");
    }
}
