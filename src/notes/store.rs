//! Single-statement read and write paths over the `notes` table.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::types::{Note, NoteError};

const NOTE_COLUMNS: &str = "id, content, created_at, updated_at";

fn row_to_note(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        content: row.get(1)?,
        created_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

fn validate_content(content: &str) -> Result<(), NoteError> {
    if content.trim().is_empty() {
        return Err(NoteError::InvalidInput("content must not be empty".into()));
    }
    Ok(())
}

/// Insert a note and return its newly assigned id.
pub fn insert_note(conn: &Connection, content: &str) -> Result<i64, NoteError> {
    validate_content(content)?;
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO notes (content, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![content, now],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(note_id = id, content_len = content.len(), "note inserted");
    Ok(id)
}

/// All notes in ascending id order.
///
/// Databases from the first release allowed NULL content; those rows are
/// skipped here and by [`get_note`] and [`count_notes`].
pub fn list_notes(conn: &Connection) -> Result<Vec<Note>, NoteError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {NOTE_COLUMNS} FROM notes WHERE content IS NOT NULL ORDER BY id ASC"
    ))?;
    let notes = stmt
        .query_map([], row_to_note)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(notes)
}

pub fn get_note(conn: &Connection, id: i64) -> Result<Note, NoteError> {
    conn.query_row(
        &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND content IS NOT NULL"),
        params![id],
        row_to_note,
    )
    .optional()?
    .ok_or(NoteError::NotFound(id))
}

/// Replace a note's content in place, keeping its id.
pub fn update_note(conn: &Connection, id: i64, content: &str) -> Result<Note, NoteError> {
    validate_content(content)?;
    let now = chrono::Utc::now().to_rfc3339();
    let changed = conn.execute(
        "UPDATE notes SET content = ?1, updated_at = ?2 WHERE id = ?3",
        params![content, now, id],
    )?;
    if changed == 0 {
        return Err(NoteError::NotFound(id));
    }
    tracing::debug!(note_id = id, content_len = content.len(), "note updated");
    get_note(conn, id)
}

pub fn delete_note(conn: &Connection, id: i64) -> Result<(), NoteError> {
    let changed = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(NoteError::NotFound(id));
    }
    tracing::debug!(note_id = id, "note deleted");
    Ok(())
}

pub fn count_notes(conn: &Connection) -> Result<usize, NoteError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notes WHERE content IS NOT NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}
