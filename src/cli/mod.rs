pub mod ask;
pub mod notes;

use anyhow::Result;

use notemind::config::NotemindConfig;
use notemind::notes::NoteStore;

/// Open the configured database for a one-shot command.
fn open_store(config: &NotemindConfig) -> Result<NoteStore> {
    let db_path = config.resolved_db_path();
    let conn = notemind::db::open_database(&db_path)?;
    Ok(NoteStore::new(conn))
}

/// Single-line preview for terminal listings.
fn preview(content: &str, max_chars: usize) -> String {
    let line = content.lines().next().unwrap_or_default();
    let mut out: String = line.chars().take(max_chars).collect();
    if line.chars().count() > max_chars || content.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}
