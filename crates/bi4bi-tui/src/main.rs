//! `bi4bi` — terminal configuration wizard for the report
//! rationalization suite.
//!
//! A three-screen flow: a landing page, a grid of supported BI tools,
//! and a credential form that tests connectivity against the backend and
//! persists the profile to a single-row CSV. `--page` and `--tool` seed
//! the deep-link channel, so `bi4bi --page configure --tool tableau`
//! opens the form directly.
//!
//! Logs are written to a file (default `/tmp/bi4bi.log`) to avoid
//! corrupting the terminal UI.

mod action;
mod app;
mod component;
mod event;
mod screens;
mod theme;
mod tui;
mod upload;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bi4bi_api::ReportsClient;
use bi4bi_config::CredentialStore;
use bi4bi_core::{BackPolicy, NavigationState, QueryChannel};

use crate::app::App;

/// Terminal wizard for connecting a BI reporting tool to the backend.
#[derive(Parser, Debug)]
#[command(name = "bi4bi", version, about)]
struct Cli {
    /// Backend base URL (e.g., http://localhost:8000)
    #[arg(short = 'b', long, env = "BI4BI_BACKEND_URL")]
    backend_url: Option<String>,

    /// Credential file location (overrides the config file)
    #[arg(long, env = "BI4BI_CREDENTIALS_PATH")]
    credentials_file: Option<PathBuf>,

    /// Start on a specific page (home, choose_tool, configure)
    #[arg(short = 'p', long)]
    page: Option<String>,

    /// Pre-select a tool by name or adapter key (implies the grid step)
    #[arg(short = 't', long)]
    tool: Option<String>,

    /// Log file path (defaults to /tmp/bi4bi.log)
    #[arg(long, default_value = "/tmp/bi4bi.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// File-only tracing. Logging to stdout or stderr would corrupt the TUI,
/// so everything goes to `log_file`. The returned guard must live until
/// exit or buffered lines are lost.
fn setup_tracing(log_file: &Path, verbosity: u8) -> WorkerGuard {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter =
        format!("bi4bi={level},bi4bi_core={level},bi4bi_api={level},bi4bi_config={level}");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let dir = log_file.parent().unwrap_or(Path::new("/tmp"));
    let name = log_file.file_name().unwrap_or(OsStr::new("bi4bi.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli.log_file, cli.verbose);

    let mut settings = bi4bi_config::load_settings_or_default();
    if let Some(ref url) = cli.backend_url {
        settings.backend_url.clone_from(url);
    }
    if let Some(ref path) = cli.credentials_file {
        settings.credentials_path.clone_from(path);
    }

    info!(
        backend = %settings.backend_url,
        credentials = %settings.credentials_path.display(),
        "starting bi4bi"
    );

    let base_url = settings
        .backend_url
        .parse()
        .wrap_err_with(|| format!("invalid backend URL: {}", settings.backend_url))?;
    let client = ReportsClient::new(
        base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    let store = CredentialStore::new(settings.credentials_path);

    let back_policy = if settings.clear_selection_on_back {
        BackPolicy::ClearSelection
    } else {
        BackPolicy::KeepSelection
    };
    let nav = NavigationState::new(back_policy);

    // CLI flags become the first deep-link request.
    let mut channel = QueryChannel::new();
    if cli.page.is_some() || cli.tool.is_some() {
        channel.request(cli.page.as_deref(), cli.tool.as_deref());
    }

    let mut app = App::new(nav, channel, store, client);
    app.run().await?;

    Ok(())
}
