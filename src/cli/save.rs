//! CLI `save` command — store a memory for the current project.

use anyhow::Result;

use super::status::group_thousands;
use super::{error_message, spinner, CliContext};
use crate::client::{ClientError, Role, SaveReceipt};

pub async fn save(ctx: &CliContext, content: &str) -> Result<()> {
    let pb = spinner("Speichere Information...");
    let result = ctx.client.save(&ctx.project, Role::User, content).await;
    pb.finish_and_clear();

    println!("{}", save_message(&ctx.project, &result));
    Ok(())
}

pub fn save_message(project: &str, result: &Result<SaveReceipt, ClientError>) -> String {
    match result {
        Ok(receipt) => {
            let mut msg = format!(
                "✅ Gespeichert für Projekt '{project}': {} Tokens",
                receipt.tokens_used
            );
            // Older servers leave out the monthly totals.
            if receipt.monthly_project_usage > 0 {
                msg.push_str(&format!(
                    "\n   📈 Diesen Monat: {} Tokens (~${:.4})",
                    group_thousands(receipt.monthly_project_usage),
                    receipt.estimated_cost_usd
                ));
            }
            msg
        }
        Err(e) => error_message(e),
    }
}
