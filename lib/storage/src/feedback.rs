use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// One user rating of an answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackEntry {
    pub conversation_id: String,
    pub rating: i32,
    #[serde(default)]
    pub comments: String,
    pub timestamp: DateTime<Utc>,
    /// Original query, when the conversation was still known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Response that was rated, when the conversation was still known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<serde_json::Value>,
}

impl FeedbackEntry {
    pub fn new(conversation_id: impl Into<String>, rating: i32, comments: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            rating,
            comments: comments.into(),
            timestamp: Utc::now(),
            query: None,
            response: None,
        }
    }
}

/// Append-only feedback log, one JSON object per line
pub struct FeedbackLog {
    file: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FeedbackLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        Ok(Self {
            file: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry and flush it to the OS
    pub fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        let line = serde_json::to_vec(entry)?;
        let mut writer = self.file.lock();
        writer.write_all(&line)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Flush and fsync
    pub fn sync(&self) -> Result<()> {
        let mut writer = self.file.lock();
        writer.flush()?;
        writer.get_ref().sync_data()?;
        Ok(())
    }

    /// Every entry in the log, oldest first. Malformed lines are skipped.
    pub fn read_all(&self) -> Result<Vec<FeedbackEntry>> {
        // hold the writer lock so no half-written line is observed
        let _guard = self.file.lock();
        let reader = BufReader::new(File::open(&self.path)?);

        let mut entries = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<FeedbackEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!("Skipping malformed feedback line {}: {}", number + 1, e),
            }
        }
        Ok(entries)
    }
}
