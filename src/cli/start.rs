//! CLI `start` command — launch the server script in the background.
//!
//! The script is spawned detached and never waited on; use `rag status` to
//! see when the server is up.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Child, Command, Stdio};

use super::CliContext;

pub fn start(ctx: &CliContext) -> Result<()> {
    let script = ctx.config.resolved_start_script();
    println!("🚀 Starte Raggadon Server...");

    if !script.exists() {
        println!("❌ Server-Script nicht gefunden");
        println!("Erwarteter Pfad: {}", script.display());
        return Ok(());
    }

    let child = spawn_detached(&script)
        .with_context(|| format!("failed to launch {}", script.display()))?;
    tracing::info!(pid = child.id(), script = %script.display(), "server script launched");

    println!("✅ Server gestartet im Hintergrund");
    println!("   Status prüfen mit: rag status");
    Ok(())
}

/// Run `bash <script>` with no stdio, in its own process group on Unix so it
/// outlives the terminal's signals.
pub fn spawn_detached(script: &Path) -> std::io::Result<Child> {
    let mut cmd = Command::new("bash");
    cmd.arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    cmd.spawn()
}
