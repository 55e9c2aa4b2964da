use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    duplicates::{self, MetadataCache},
    error,
    management::{ApiSummaryFetcher, PlaylistCache, TokenManager},
    spotify,
    types::DuplicateTableRow,
    warning,
};

pub async fn duplicates(playlist_cache: &PlaylistCache, verbose: bool, quiet: bool) {
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

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Scanning owned playlists for duplicates...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb
    };

    let current_user = match spotify::users::get_current_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch current user: {}", e);
        }
    };

    let playlists = match playlist_cache
        .get_playlists(&ApiSummaryFetcher, &token, false)
        .await
    {
        Ok(playlists) => playlists,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlists: {}", e);
        }
    };

    let owned = duplicates::filter_owned(&playlists, &current_user.id);

    let index = match duplicates::scan_playlists(&token, &owned).await {
        Ok(index) => {
            pb.finish_and_clear();
            index
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Duplicate scan aborted: {}", e);
        }
    };

    let duplicate_entries = index.duplicates();

    if quiet {
        return;
    }

    println!(
        "{}",
        render_stats(duplicate_entries.len(), owned.len())
    );

    if !verbose || duplicate_entries.is_empty() {
        return;
    }

    // one lookup per distinct track and playlist id, memoized
    let mut metadata = MetadataCache::new();
    let mut table_rows: Vec<DuplicateTableRow> = Vec::new();

    for (track_id, playlist_ids) in duplicate_entries {
        match duplicates::resolve_duplicate_row(&token, &mut metadata, track_id, playlist_ids).await
        {
            Ok(row) => table_rows.push(row),
            Err(e) => warning!("Could not resolve details for track {}: {}", track_id, e),
        }
    }

    let table = Table::new(table_rows);
    println!("{}", table);
}

/// Builds the one-line scan summary, coloring the duplicate count red when
/// duplicates were found and green otherwise.
fn render_stats(duplicate_count: usize, playlist_count: usize) -> String {
    let count = if duplicate_count > 0 {
        duplicate_count.to_string().red().bold().to_string()
    } else {
        "0".green().bold().to_string()
    };

    format!(
        "Found {} duplicate tracks across {} playlists",
        count, playlist_count
    )
}

#[cfg(test)]
mod tests {
    use super::render_stats;

    #[test]
    fn test_render_stats_mentions_counts() {
        let stats = render_stats(3, 12);
        assert!(stats.contains("duplicate tracks"));
        assert!(stats.contains("12 playlists"));
        assert!(stats.contains('3'));
    }

    #[test]
    fn test_render_stats_zero_duplicates() {
        let stats = render_stats(0, 5);
        assert!(stats.contains('0'));
        assert!(stats.contains("5 playlists"));
    }
}
