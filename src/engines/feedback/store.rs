use crate::error::{DesignError, Result};
use crate::types::FeedbackRecord;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Append-only store of feedback records
pub trait FeedbackLog: Send + Sync {
    /// Durably append one record. Returns only once the write is complete.
    fn append(&self, record: &FeedbackRecord) -> Result<()>;

    /// All records in append order
    fn records(&self) -> Result<Vec<FeedbackRecord>>;

    /// The last `limit` records
    fn recent(&self, limit: usize) -> Result<Vec<FeedbackRecord>> {
        let mut records = self.records()?;
        let skip = records.len().saturating_sub(limit);
        Ok(records.split_off(skip))
    }

    /// Mean rating for `candidate_id`, 0.0 if it was never rated
    fn average_rating(&self, candidate_id: &str) -> Result<f64> {
        let ratings: Vec<f64> = self
            .records()?
            .into_iter()
            .filter(|r| r.candidate_id == candidate_id)
            .map(|r| r.rating)
            .collect();
        if ratings.is_empty() {
            return Ok(0.0);
        }
        Ok(ratings.iter().sum::<f64>() / ratings.len() as f64)
    }
}

/// JSON-lines file; every append opens, writes one line, syncs and closes
pub struct JsonlFeedbackLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlFeedbackLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackLog for JsonlFeedbackLog {
    fn append(&self, record: &FeedbackRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DesignError::FeedbackLog(format!("Failed to open {}: {}", self.path.display(), e))
            })?;
        file.write_all(line.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<FeedbackRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = std::fs::File::open(&self.path)?;
        let mut records = Vec::new();
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|e| {
                DesignError::FeedbackLog(format!(
                    "Corrupt record at {}:{}: {}",
                    self.path.display(),
                    i + 1,
                    e
                ))
            })?;
            records.push(record);
        }
        Ok(records)
    }
}

#[derive(Debug, Default)]
pub struct MemoryFeedbackLog {
    records: Mutex<Vec<FeedbackRecord>>,
}

impl MemoryFeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackLog for MemoryFeedbackLog {
    fn append(&self, record: &FeedbackRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    fn records(&self) -> Result<Vec<FeedbackRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}
