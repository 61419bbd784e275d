use anyhow::Result;

use notemind::assistant::{self, AskOutcome, AssistantSettings};
use notemind::config::NotemindConfig;

/// Ask a question about the notes from the terminal.
pub async fn ask(config: &NotemindConfig, query: &str) -> Result<()> {
    let store = super::open_store(config)?;
    let llm = notemind::llm::create_provider(&config.llm)?;
    let settings = AssistantSettings::from_config(config);

    let outcome = assistant::ask(&store, llm.as_ref(), settings, query).await?;
    println!("{}", outcome.text());

    if let AskOutcome::Answered {
        note_ids,
        selection,
        truncated,
        ..
    } = &outcome
    {
        let ids: Vec<String> = note_ids.iter().map(|id| format!("#{id}")).collect();
        println!();
        println!("  context: {} ({:?})", ids.join(", "), selection);
        if *truncated {
            println!("  context was truncated to {} chars", settings.max_context_chars);
        }
    }

    Ok(())
}

pub async fn summarize(config: &NotemindConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let llm = notemind::llm::create_provider(&config.llm)?;
    let settings = AssistantSettings::from_config(config);

    let outcome = assistant::summarize(&store, llm.as_ref(), settings).await?;
    println!("{}", outcome.text());
    Ok(())
}
