use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    management::{ApiSummaryFetcher, PlaylistCache, TokenManager},
    types::PlaylistTableRow,
};

pub async fn list(playlist_cache: &PlaylistCache, json_output: bool) {
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

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let playlists = match playlist_cache
        .get_playlists(&ApiSummaryFetcher, &token, false)
        .await
    {
        Ok(playlists) => {
            pb.finish_and_clear();
            playlists
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists: {}", e);
        }
    };

    if json_output {
        match serde_json::to_string(&playlists) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize playlists: {}", e),
        }
        return;
    }

    let table_rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            name: p.name,
            owner: p.owner.display_name,
            id: p.id,
            url: p.external_urls.spotify,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
