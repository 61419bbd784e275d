use anyhow::Result;

use notemind::config::NotemindConfig;

/// Add a note from the terminal.
pub async fn add(config: &NotemindConfig, content: &str) -> Result<()> {
    let store = super::open_store(config)?;
    let id = store.insert(content.to_string()).await?;
    println!("Added note #{id}");
    Ok(())
}

/// List all notes.
pub async fn list(config: &NotemindConfig, full: bool) -> Result<()> {
    let store = super::open_store(config)?;
    let notes = store.list().await?;

    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }

    println!("{} note(s)\n", notes.len());
    for note in &notes {
        if full {
            println!("  #{}", note.id);
            for line in note.content.lines() {
                println!("     {line}");
            }
            println!();
        } else {
            println!("  #{:<5} {}", note.id, super::preview(&note.content, 100));
        }
    }

    Ok(())
}

pub async fn edit(config: &NotemindConfig, id: i64, content: &str) -> Result<()> {
    let store = super::open_store(config)?;
    let note = store.update(id, content.to_string()).await?;
    println!("Updated note #{}", note.id);
    Ok(())
}

pub async fn delete(config: &NotemindConfig, id: i64) -> Result<()> {
    let store = super::open_store(config)?;
    store.delete(id).await?;
    println!("Deleted note #{id}");
    Ok(())
}
