//! CLI `init` command — copy the CLAUDE.md template into the current project.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use super::CliContext;

/// File name written into the project directory.
pub const TARGET_FILE: &str = "CLAUDE.md";

#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
    TemplateMissing(PathBuf),
}

pub fn init(ctx: &CliContext) -> Result<()> {
    let template = ctx.config.resolved_template();

    match install_template(&template, &ctx.cwd)? {
        InitOutcome::Created(_) => {
            println!("✅ Raggadon integration added to {}", ctx.cwd.display());
            println!("📝 {TARGET_FILE} copied - Claude will now use Raggadon commands");
        }
        InitOutcome::AlreadyExists(path) => {
            println!("⚠️  {TARGET_FILE} already exists in this project");
            println!("   Left unchanged: {}", path.display());
        }
        InitOutcome::TemplateMissing(path) => {
            println!("❌ Template not found at {}", path.display());
        }
    }

    Ok(())
}

/// Copy `template` to `<target_dir>/CLAUDE.md`. An existing file is never
/// touched; the check and the create are one `create_new` open.
pub fn install_template(template: &Path, target_dir: &Path) -> Result<InitOutcome> {
    let target = target_dir.join(TARGET_FILE);

    if target.exists() {
        return Ok(InitOutcome::AlreadyExists(target));
    }
    if !template.is_file() {
        return Ok(InitOutcome::TemplateMissing(template.to_path_buf()));
    }

    let mut source = std::fs::File::open(template)
        .with_context(|| format!("failed to open template {}", template.display()))?;
    let mut dest = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Ok(InitOutcome::AlreadyExists(target));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to create {}", target.display()));
        }
    };
    std::io::copy(&mut source, &mut dest)
        .with_context(|| format!("failed to write {}", target.display()))?;

    tracing::info!(target = %target.display(), "template installed");
    Ok(InitOutcome::Created(target))
}
