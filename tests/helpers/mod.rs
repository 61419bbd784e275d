#![allow(dead_code)]

use async_trait::async_trait;
use notemind::db;
use notemind::llm::{AudioClip, CompletionProvider, CompletionRequest, LlmError};
use notemind::notes::NoteStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A store over a fresh in-memory database with schema and migrations applied.
pub fn test_store() -> NoteStore {
    NoteStore::new(db::open_memory_database().unwrap())
}

/// Insert each content in order and return the assigned ids.
pub async fn seed(store: &NoteStore, contents: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for content in contents {
        ids.push(store.insert(content.to_string()).await.unwrap());
    }
    ids
}

/// Completion provider that records every call and answers with a canned reply.
pub struct MockCompletion {
    reply: Option<String>,
    transcription: String,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
    transcribed: Mutex<Vec<AudioClip>>,
}

impl MockCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            transcription: "transcribed speech".to_string(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            transcribed: Mutex::new(Vec::new()),
        })
    }

    /// Every call fails with a 503 from the "service".
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            transcription: String::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            transcribed: Mutex::new(Vec::new()),
        })
    }

    /// Number of `complete` and `transcribe` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn transcribed_clips(&self) -> Vec<AudioClip> {
        self.transcribed.lock().unwrap().clone()
    }

    fn outage() -> LlmError {
        LlmError::Api {
            status: 503,
            body: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.reply.clone().ok_or_else(Self::outage)
    }

    async fn transcribe(&self, clip: AudioClip) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.transcribed.lock().unwrap().push(clip);
        match self.reply {
            Some(_) => Ok(self.transcription.clone()),
            None => Err(Self::outage()),
        }
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
