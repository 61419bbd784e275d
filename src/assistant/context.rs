//! Context assembly: which notes go to the model, and how they are framed.
//!
//! Selection is a case-sensitive substring match of the query against each
//! note's content, falling back to every note when nothing matches. Selected
//! notes are rendered as `Note #<id>: <content>`, joined by a blank line, and
//! cut to a character cap with [`TRUNCATION_MARKER`] appended when cut.

use thiserror::Error;

use crate::notes::Note;

/// Appended after the cut text when the context exceeds the cap.
pub const TRUNCATION_MARKER: &str = "\n\n[context truncated]";

/// System instruction for question answering.
pub const ASK_INSTRUCTION: &str = "You answer questions using only the user's notes provided below. \
If the notes do not contain the information needed, say explicitly that the notes do not contain it \
instead of guessing. When possible, cite the notes you used by their id, e.g. \"Note #3\".";

/// System instruction for summarization.
pub const SUMMARY_INSTRUCTION: &str = "Concisely summarize the following notes.";

const NOTE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("invalid input: query must not be empty")]
    EmptyQuery,
}

/// How the notes in a context were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Only notes whose content contains the query.
    Matched,
    /// Nothing matched, so every note was used.
    Fallback,
    /// Every note, with no query involved (summaries).
    All,
}

/// A bounded context plus the instruction and user message built around it.
#[derive(Debug, Clone)]
pub struct AssembledContext {
    /// Formatted, possibly truncated notes block.
    pub context: String,
    pub system_instruction: String,
    /// Message sent in the user role.
    pub user_content: String,
    /// Ids of the selected notes, in context order. Includes notes cut by truncation.
    pub note_ids: Vec<i64>,
    pub selection: Selection,
    pub truncated: bool,
}

/// Result of assembling a context from the current notes.
#[derive(Debug, Clone)]
pub enum Assembly {
    /// There are no notes; the model must not be called.
    NothingToAnswerFrom,
    Ready(AssembledContext),
}

/// Trim `query`, rejecting empty or whitespace-only input.
pub fn validate_query(query: &str) -> Result<&str, ContextError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(ContextError::EmptyQuery);
    }
    Ok(trimmed)
}

/// Notes whose content contains `query` (case-sensitive), or all notes if none do.
pub fn select_candidates<'a>(query: &str, notes: &'a [Note]) -> (Vec<&'a Note>, Selection) {
    let matched: Vec<&Note> = notes.iter().filter(|n| n.content.contains(query)).collect();
    if matched.is_empty() {
        (notes.iter().collect(), Selection::Fallback)
    } else {
        (matched, Selection::Matched)
    }
}

/// Render notes as `Note #<id>: <content>` separated by a blank line.
pub fn format_notes(notes: &[&Note]) -> String {
    notes
        .iter()
        .map(|n| format!("Note #{}: {}", n.id, n.content))
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_MARKER`]
/// when anything was removed. Returns the text and whether it was cut.
pub fn bound_context(text: String, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        None => (text, false),
        Some((cut, _)) => {
            let mut bounded = String::with_capacity(cut + TRUNCATION_MARKER.len());
            bounded.push_str(&text[..cut]);
            bounded.push_str(TRUNCATION_MARKER);
            (bounded, true)
        }
    }
}

/// Build the question-answering context for `query` over `notes`.
///
/// `notes` is the full collection in storage order.
pub fn assemble_question_context(
    query: &str,
    notes: &[Note],
    max_chars: usize,
) -> Result<Assembly, ContextError> {
    let query = validate_query(query)?;
    if notes.is_empty() {
        return Ok(Assembly::NothingToAnswerFrom);
    }

    let (candidates, selection) = select_candidates(query, notes);
    let (context, truncated) = bound_context(format_notes(&candidates), max_chars);

    tracing::debug!(
        candidates = candidates.len(),
        total = notes.len(),
        ?selection,
        truncated,
        "assembled question context"
    );

    let user_content = format!("Notes:\n{context}\n\nQuestion: {query}");
    Ok(Assembly::Ready(AssembledContext {
        note_ids: candidates.iter().map(|n| n.id).collect(),
        context,
        system_instruction: ASK_INSTRUCTION.to_string(),
        user_content,
        selection,
        truncated,
    }))
}

/// Build the summarization context over every note, or `None` when there are none.
pub fn assemble_summary_context(notes: &[Note], max_chars: usize) -> Option<AssembledContext> {
    if notes.is_empty() {
        return None;
    }

    let all: Vec<&Note> = notes.iter().collect();
    let (context, truncated) = bound_context(format_notes(&all), max_chars);

    Some(AssembledContext {
        note_ids: all.iter().map(|n| n.id).collect(),
        user_content: context.clone(),
        context,
        system_instruction: SUMMARY_INSTRUCTION.to_string(),
        selection: Selection::All,
        truncated,
    })
}
