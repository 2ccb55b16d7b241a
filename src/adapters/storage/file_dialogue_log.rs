//! File-based Dialogue Log Adapter
//!
//! Stores each session's transcript as `{session_id}.json` in one directory:
//! a pretty-printed (2-space) JSON array of `{"role", "message"}` objects with
//! non-ASCII text left unescaped.
//!
//! Every save writes a sibling temp file and renames it over the log, so a
//! reader never sees a half-written transcript.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::counseling::History;
use crate::domain::foundation::SessionId;
use crate::ports::{DialogueLog, DialogueLogError};

/// File-based storage for session transcripts
#[derive(Debug, Clone)]
pub struct FileDialogueLog {
    base_path: PathBuf,
}

impl FileDialogueLog {
    /// Create a new dialogue log rooted at `base_path`
    ///
    /// The directory is created on first save.
    ///
    /// # Example
    /// ```ignore
    /// let log = FileDialogueLog::new("./dials");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the log file path for a session
    pub fn log_path(&self, session_id: &SessionId) -> PathBuf {
        self.base_path.join(format!("{}.json", session_id))
    }

    fn temp_path(&self, session_id: &SessionId) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", session_id))
    }

    /// Ensure directory exists
    async fn ensure_dir(&self) -> Result<(), DialogueLogError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DialogueLogError::IoError(e.to_string()))
    }
}

#[async_trait]
impl DialogueLog for FileDialogueLog {
    async fn save(&self, session_id: &SessionId, history: &History) -> Result<(), DialogueLogError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(history)
            .map_err(|e| DialogueLogError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_path(session_id);
        fs::write(&temp_path, json)
            .await
            .map_err(|e| DialogueLogError::IoError(e.to_string()))?;

        if let Err(e) = fs::rename(&temp_path, self.log_path(session_id)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(DialogueLogError::IoError(e.to_string()));
        }

        tracing::debug!(session_id = %session_id, turns = history.len(), "Dialogue log written");
        Ok(())
    }

    async fn load(&self, session_id: &SessionId) -> Result<History, DialogueLogError> {
        let file_path = self.log_path(session_id);

        let json = match fs::read_to_string(&file_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DialogueLogError::NotFound(session_id.clone()));
            }
            Err(e) => return Err(DialogueLogError::IoError(e.to_string())),
        };

        serde_json::from_str(&json).map_err(|e| DialogueLogError::DeserializationFailed(e.to_string()))
    }
}
