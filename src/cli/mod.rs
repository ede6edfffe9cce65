//! Subcommand implementations for the `rag` binary.
//!
//! Each command prints German user-facing text to stdout. Failures talking to
//! the server are rendered as messages, not returned as errors, so the process
//! still exits 0; only local faults (config, files) bubble up through `anyhow`.

pub mod auto;
pub mod init;
pub mod mode;
pub mod save;
pub mod search;
pub mod start;
pub mod status;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::{ClientError, RaggadonClient};
use crate::config::RaggadonConfig;
use crate::mode::ModeStore;

/// Project used when the working directory has no usable final segment.
const FALLBACK_PROJECT: &str = "default";

/// Everything a command needs, resolved once at startup.
pub struct CliContext {
    pub config: RaggadonConfig,
    pub project: String,
    pub cwd: PathBuf,
    pub client: RaggadonClient,
    pub modes: ModeStore,
}

impl CliContext {
    pub fn new(config: RaggadonConfig, cwd: PathBuf) -> Result<Self> {
        let client = RaggadonClient::new(config.server.url.clone(), config.timeouts.to_timeouts())
            .context("failed to create Raggadon client")?;
        let modes = ModeStore::new(config.resolved_mode_file());
        let project = project_name(&cwd);

        tracing::debug!(project = %project, url = %config.server.url, "cli context ready");

        Ok(Self {
            config,
            project,
            cwd,
            client,
            modes,
        })
    }
}

/// The project is the last path segment of the working directory.
pub fn project_name(cwd: &Path) -> String {
    cwd.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_PROJECT.to_string())
}

/// User-facing text for a failed save or search.
pub fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::ServerUnavailable => "❌ Raggadon läuft nicht! Starte mit: rag start".into(),
        ClientError::Application(detail) => format!("❌ API Fehler: {detail}"),
        ClientError::NoDataYet => "ℹ️ Noch keine Statistiken für dieses Projekt vorhanden".into(),
        ClientError::Request(msg) => format!("❌ Fehler: {msg}"),
    }
}

/// First `max_chars` characters of `text`, with `...` appended if cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Spinner on stderr; hidden automatically when stderr is not a terminal.
pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
