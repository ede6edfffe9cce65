//! CLI `status` command — server health, current mode and project statistics.

use anyhow::Result;

use super::{error_message, spinner, CliContext};
use crate::client::{ClientError, ProjectStats};
use crate::timestamp::format_timestamp;

/// Recent activities listed under the statistics.
const MAX_ACTIVITIES: usize = 3;

pub async fn status(ctx: &CliContext) -> Result<()> {
    let pb = spinner("Prüfe Server-Status...");
    let running = ctx.client.health_check().await;
    pb.finish_and_clear();

    if !running {
        println!("❌ Raggadon läuft nicht!");
        println!("🚀 Starte mit: rag start");
        return Ok(());
    }

    let mode = ctx.modes.get_mode()?;
    println!("✅ Raggadon läuft auf {}", ctx.client.base_url());
    println!("📁 Aktuelles Projekt: {}", ctx.project);
    println!("🔧 Modus: {mode}");
    println!();

    match ctx.client.project_stats(&ctx.project).await {
        Ok(stats) => {
            for line in render_stats(&stats) {
                println!("{line}");
            }
        }
        Err(e @ ClientError::NoDataYet) => println!("   {}", error_message(&e)),
        Err(e) => println!("{}", error_message(&e)),
    }

    Ok(())
}

pub fn render_stats(stats: &ProjectStats) -> Vec<String> {
    let mut lines = vec![
        "📊 Projekt-Statistiken:".to_string(),
        format!("   💾 Gespeicherte Einträge: {}", stats.total_memories),
        format!("   🔤 Tokens diesen Monat: {}", group_thousands(stats.monthly_tokens)),
        format!("   💰 Geschätzte Kosten: ${:.4}", stats.estimated_monthly_cost_usd),
        format!("   🤖 Embedding Model: {}", stats.model_name()),
        format!("   💵 Preis: ${:.2} pro 1K Tokens", stats.cost_per_1k_tokens),
    ];

    if stats.first_activity.is_some() {
        lines.push(format!(
            "   🕐 Erste Aktivität: {}",
            format_timestamp(stats.first_activity.as_deref())
        ));
    }
    if stats.last_activity.is_some() {
        lines.push(format!(
            "   🕐 Letzte Aktivität: {}",
            format_timestamp(stats.last_activity.as_deref())
        ));
    }

    if !stats.recent_activities.is_empty() {
        lines.push("\n📋 Letzte Aktivitäten:".to_string());
        for act in stats.recent_activities.iter().take(MAX_ACTIVITIES) {
            lines.push(format!("   • {}: {} Tokens", act.kind, act.tokens));
        }
    }

    lines
}

/// `1234567` → `1.234.567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
