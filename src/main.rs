use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splcli::{
    cli, config, error,
    export::{ExportFormat, parse_export_format},
    management::PlaylistCache,
    types::PkceToken,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// List all playlists of the current user
    List(ListOptions),

    /// Find duplicate tracks across playlists owned by the current user
    Duplicates(DuplicatesOptions),

    /// Export all playlists (default) or a specific playlist
    Export(ExportOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Output the playlists in JSON format
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DuplicatesOptions {
    /// Also resolve and print track and playlist details
    #[clap(long, short = 'v')]
    pub verbose: bool,

    /// Suppress all console output
    #[clap(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Spotify playlist ID; exports all playlists when omitted
    #[clap(long)]
    pub id: Option<String>,

    /// Export format
    #[clap(long, default_value = "json", value_parser = parse_export_format)]
    pub format: ExportFormat,

    /// Output directory for the export file (defaults to the current directory)
    #[clap(long)]
    pub path: Option<PathBuf>,

    /// Open the export file automatically
    #[clap(long)]
    pub launch: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    // injectable process-lifetime state, shared by commands that read the
    // playlist collection
    let playlist_cache = PlaylistCache::new();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::List(opt) => cli::list(&playlist_cache, opt.json).await,
        Command::Duplicates(opt) => {
            cli::duplicates(&playlist_cache, opt.verbose, opt.quiet).await
        }
        Command::Export(opt) => cli::export(opt.id, opt.format, opt.path, opt.launch).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
