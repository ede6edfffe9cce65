//! CLI `auto` command — save the interesting parts of a text automatically.

use anyhow::Result;

use super::{error_message, preview, CliContext};
use crate::autosave::{extract_key_info, is_worth_saving};
use crate::client::{ClientError, Role};
use crate::mode::Mode;

pub async fn auto(ctx: &CliContext, content: &str) -> Result<()> {
    if !is_worth_saving(content) {
        println!("ℹ️ Content nicht wichtig genug zum Speichern");
        return Ok(());
    }

    let snippets = extract_key_info(content);
    if snippets.is_empty() {
        println!("ℹ️ Keine Schlüsselinformationen gefunden");
        return Ok(());
    }

    let silent = ctx.modes.get_mode()?.mode() == Some(Mode::Silent);
    let mut saved = 0usize;
    let mut tokens = 0u64;

    for snippet in &snippets {
        match ctx.client.save(&ctx.project, Role::Assistant, snippet).await {
            Ok(receipt) => {
                saved += 1;
                tokens += receipt.tokens_used;
                if !silent {
                    println!("✅ Auto-saved: {}", preview(snippet, 50));
                }
            }
            Err(e @ ClientError::ServerUnavailable) => {
                println!("{}", error_message(&e));
                break;
            }
            Err(e) => println!("{}", error_message(&e)),
        }
    }

    println!(
        "💾 {saved}/{} Einträge für Projekt '{}' gespeichert ({tokens} Tokens)",
        snippets.len(),
        ctx.project
    );
    Ok(())
}
