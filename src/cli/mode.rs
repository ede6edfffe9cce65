//! CLI `mode` command — show or change the auto-save mode.

use anyhow::Result;

use super::CliContext;
use crate::mode::{Mode, ModeError};

/// `None` or `show` prints the current mode; anything else is a change request.
pub fn mode(ctx: &CliContext, requested: Option<&str>) -> Result<()> {
    let requested = match requested {
        Some(r) if !r.eq_ignore_ascii_case("show") => r,
        _ => {
            let current = ctx.modes.show_mode()?;
            println!("🔧 Aktueller Modus: {current}");
            return Ok(());
        }
    };

    match ctx.modes.set_mode(requested) {
        Ok(mode) => {
            for line in confirmation(mode) {
                println!("{line}");
            }
        }
        Err(ModeError::Invalid(value)) => {
            for line in invalid_mode_help(&value) {
                println!("{line}");
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub fn confirmation(mode: Mode) -> Vec<&'static str> {
    match mode {
        Mode::Active => vec!["✅ Active Mode aktiviert - Claude zeigt alle RAG-Speicherungen an"],
        Mode::Silent => vec![
            "✅ Silent Mode aktiviert - RAG arbeitet im Hintergrund",
            "   💡 Status sehen mit: rag status",
        ],
        Mode::Ask => vec!["✅ Ask Mode aktiviert - Frage vor jeder RAG-Operation"],
    }
}

pub fn invalid_mode_help(value: &str) -> Vec<String> {
    vec![
        format!("❌ Unbekannter Modus: {value}"),
        "\nVerfügbare Modi:".to_string(),
        "  rag mode active   # Claude zeigt alle RAG-Speicherungen an".to_string(),
        "  rag mode silent   # Arbeite im Hintergrund (Status mit \"rag status\")".to_string(),
        "  rag mode ask      # Frage vor jeder Operation".to_string(),
        "  rag mode show     # Zeige aktuellen Modus".to_string(),
    ]
}
