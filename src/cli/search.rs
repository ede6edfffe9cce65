use anyhow::Result;

use super::{error_message, preview, CliContext};
use crate::client::SearchResult;

/// How many hits are printed. The server decides the order.
pub const MAX_DISPLAYED: usize = 5;
/// Characters of content shown per hit.
pub const PREVIEW_CHARS: usize = 150;

/// Search the current project and print the best hits.
pub async fn search(ctx: &CliContext, query: &str) -> Result<()> {
    println!("🔍 Suche nach '{query}' in Projekt '{}'...", ctx.project);

    match ctx.client.search(&ctx.project, query).await {
        Ok(results) => {
            for line in render_results(&results) {
                println!("{line}");
            }
        }
        Err(e) => println!("{}", error_message(&e)),
    }

    Ok(())
}

pub fn render_results(results: &[SearchResult]) -> Vec<String> {
    let mut lines = vec![format!("\n📚 {} Ergebnisse gefunden:\n", results.len())];

    for (i, result) in results.iter().take(MAX_DISPLAYED).enumerate() {
        let role = if result.role.is_empty() {
            String::new()
        } else {
            format!(" ({})", result.role)
        };
        lines.push(format!(
            "{}. [{:.2}]{} {}",
            i + 1,
            result.similarity,
            role,
            preview(&result.content, PREVIEW_CHARS),
        ));
        lines.push(String::new());
    }

    lines
}
