//! JSONL audit log reader - sequential reader for replay and audit

use crate::error::AuditLogError;
use crate::seal::SealedRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Sequential reader over the sorted JSONL files of an audit log
pub struct AuditLogReader {
    files: Vec<PathBuf>,
}

impl AuditLogReader {
    /// Create a new reader from the log directory
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, AuditLogError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let entry = entry?;
                let file_path = entry.path();
                if file_path.extension().map_or(false, |ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }

        files.sort();

        Ok(Self { files })
    }

    /// Read all sealed records from all files in order
    pub fn read_all(&self) -> Result<Vec<SealedRecord>, AuditLogError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let file = File::open(file_path)?;
            let reader = BufReader::new(file);

            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let sealed: SealedRecord = serde_json::from_str(&line)?;
                records.push(sealed);
            }
        }

        Ok(records)
    }

    /// Get the last sealed record (the chain head)
    pub fn last_record(&self) -> Result<Option<SealedRecord>, AuditLogError> {
        Ok(self.read_all()?.into_iter().last())
    }

    /// Count total records across all files
    pub fn count(&self) -> Result<usize, AuditLogError> {
        let mut count = 0;

        for file_path in &self.files {
            let file = File::open(file_path)?;
            let reader = BufReader::new(file);

            for line in reader.lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    count += 1;
                }
            }
        }

        Ok(count)
    }
}
