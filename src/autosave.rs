//! Heuristics for picking what to save from a chunk of conversation text.
//!
//! Used by `rag auto`: decide whether text mentions anything worth keeping,
//! then cut out the lines that carry it (definitions, notes, route handlers).

/// Words that mark text as worth saving. Matched case-insensitively.
const MARKERS: &[&str] = &[
    "class ",
    "def ",
    "function ",
    "api",
    "endpoint",
    "route",
    "database",
    "schema",
    "model",
    "config",
    "environment",
    "todo",
    "fixme",
    "important",
    "architecture",
    "struktur",
    "dependency",
    "requirement",
    "error",
    "bug",
    "issue",
];

const DEFINITION_KEYWORDS: &[&str] = &["class ", "def ", "function ", "const ", "interface "];
const NOTE_MARKERS: &[&str] = &["TODO", "FIXME", "IMPORTANT", "NOTE"];
const ROUTE_MARKERS: &[&str] = &["@app.", "@router.", "app.get", "app.post"];

/// Lines kept from a definition: the line itself and the two after it.
const DEFINITION_SPAN: usize = 3;
/// Lines kept from a route handler: the decorator plus four lines of body.
const ROUTE_SPAN: usize = 5;

pub fn is_worth_saving(text: &str) -> bool {
    let lower = text.to_lowercase();
    MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Pull out the snippets worth saving, in order of appearance, without duplicates.
pub fn extract_key_info(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let mut snippets: Vec<String> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let snippet = if DEFINITION_KEYWORDS.iter().any(|k| line.contains(k)) {
            window(&lines, i, DEFINITION_SPAN)
        } else if NOTE_MARKERS
            .iter()
            .any(|m| line.to_uppercase().contains(m))
        {
            line.trim().to_string()
        } else if ROUTE_MARKERS.iter().any(|m| line.contains(m)) {
            window(&lines, i, ROUTE_SPAN)
        } else {
            continue;
        };

        if !snippet.trim().is_empty() && !snippets.contains(&snippet) {
            snippets.push(snippet);
        }
    }

    snippets
}

fn window(lines: &[&str], start: usize, len: usize) -> String {
    let end = (start + len).min(lines.len());
    lines[start..end].join("\n")
}
