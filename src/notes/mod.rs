//! Note persistence.
//!
//! [`store`] holds the synchronous statements over a `rusqlite::Connection`;
//! [`NoteStore`] is the cloneable handle the async layers hold, running each
//! statement on the blocking pool behind a mutex.

pub mod store;
pub mod types;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub use types::{Note, NoteError};

#[derive(Clone)]
pub struct NoteStore {
    db: Arc<Mutex<Connection>>,
}

impl NoteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, NoteError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, NoteError> + Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let conn = db
                .lock()
                .map_err(|e| NoteError::Unavailable(format!("db lock poisoned: {e}")))?;
            f(&conn)
        })
        .await
        .map_err(|e| NoteError::Unavailable(format!("db task failed: {e}")))?
    }

    pub async fn insert(&self, content: String) -> Result<i64, NoteError> {
        self.with_conn(move |conn| store::insert_note(conn, &content))
            .await
    }

    pub async fn list(&self) -> Result<Vec<Note>, NoteError> {
        self.with_conn(store::list_notes).await
    }

    pub async fn get(&self, id: i64) -> Result<Note, NoteError> {
        self.with_conn(move |conn| store::get_note(conn, id)).await
    }

    pub async fn update(&self, id: i64, content: String) -> Result<Note, NoteError> {
        self.with_conn(move |conn| store::update_note(conn, id, &content))
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), NoteError> {
        self.with_conn(move |conn| store::delete_note(conn, id)).await
    }

    pub async fn count(&self) -> Result<usize, NoteError> {
        self.with_conn(store::count_notes).await
    }
}
