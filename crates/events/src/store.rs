//! JSONL audit log - append-only writer

use crate::error::AuditLogError;
use crate::reader::AuditLogReader;
use crate::seal::{SealedRecord, GENESIS_HASH};
use chrono::Utc;
use mintgate_ledger::AuditRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Append-only JSONL audit log with daily file rotation.
///
/// Holds the chain head (last sequence and hash) so each appended
/// record links to its predecessor.
pub struct AuditLog {
    base_path: PathBuf,
    current_file: Option<BufWriter<File>>,
    current_date: Option<String>,
    last_sequence: u64,
    last_hash: String,
}

impl AuditLog {
    /// Open (or create) an audit log directory, recovering the chain
    /// head from any records already on disk.
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self, AuditLogError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        let reader = AuditLogReader::from_directory(&base_path)?;
        let (last_sequence, last_hash) = match reader.last_record()? {
            Some(last) => (last.sequence, last.hash),
            None => (0, GENESIS_HASH.to_string()),
        };

        Ok(Self {
            base_path,
            current_file: None,
            current_date: None,
            last_sequence,
            last_hash,
        })
    }

    /// Seal and append every record of one operation, in order.
    ///
    /// Returns the sealed records. The chain head only advances after
    /// all writes succeeded.
    pub fn append_operation(
        &mut self,
        op_id: Uuid,
        records: &[AuditRecord],
    ) -> Result<Vec<SealedRecord>, AuditLogError> {
        let mut sealed_batch = Vec::with_capacity(records.len());

        let mut sequence = self.last_sequence;
        let mut prev_hash = self.last_hash.clone();

        for record in records {
            sequence += 1;
            let sealed = SealedRecord::seal(sequence, prev_hash, op_id, record.clone())?;
            prev_hash = sealed.hash.clone();
            sealed_batch.push(sealed);
        }

        for sealed in &sealed_batch {
            self.write_line(sealed)?;
        }

        if let Some(last) = sealed_batch.last() {
            self.last_sequence = last.sequence;
            self.last_hash = last.hash.clone();
        }

        debug!(
            op_id = %op_id,
            records = sealed_batch.len(),
            head = self.last_sequence,
            "audit records appended"
        );

        Ok(sealed_batch)
    }

    /// Sequence number of the newest sealed record (0 when empty)
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    fn write_line(&mut self, sealed: &SealedRecord) -> Result<(), AuditLogError> {
        let date = sealed.timestamp.format("%Y-%m-%d").to_string();

        // Rotate file if date changed
        if self.current_date.as_ref() != Some(&date) {
            self.rotate_file(&date)?;
        }

        if let Some(ref mut writer) = self.current_file {
            let json = serde_json::to_string(sealed)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        Ok(())
    }

    fn rotate_file(&mut self, date: &str) -> Result<(), AuditLogError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }

        let file_path = self.base_path.join(format!("{}.jsonl", date));
        let file = OpenOptions::new().create(true).append(true).open(&file_path)?;

        self.current_file = Some(BufWriter::new(file));
        self.current_date = Some(date.to_string());

        Ok(())
    }

    /// Path to the file records would land in right now
    pub fn today_file_path(&self) -> PathBuf {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.base_path.join(format!("{}.jsonl", date))
    }

    /// Flush and close the current file
    pub fn close(&mut self) -> Result<(), AuditLogError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }
        self.current_file = None;
        self.current_date = None;
        Ok(())
    }
}

impl Drop for AuditLog {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seal::verify_chain;
    use mintgate_core::{Amount, Principal};

    fn p(id: &str) -> Principal {
        Principal::new(id).unwrap()
    }

    #[test]
    fn test_append_and_verify() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        let op = Uuid::new_v4();
        log.append_operation(
            op,
            &[
                AuditRecord::minted(p("alice"), Amount::new(100)),
                AuditRecord::transferred_from_none(p("alice"), Amount::new(100)),
            ],
        )
        .unwrap();
        assert_eq!(log.last_sequence(), 2);

        let reader = AuditLogReader::from_directory(dir.path()).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].op_id, op);
        assert_eq!(records[1].prev_hash, records[0].hash);
        verify_chain(&records).unwrap();
    }

    #[test]
    fn test_chain_head_recovered_on_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut log = AuditLog::open(dir.path()).unwrap();
            log.append_operation(
                Uuid::new_v4(),
                &[AuditRecord::MintingFinished],
            )
            .unwrap();
        }

        let mut log = AuditLog::open(dir.path()).unwrap();
        assert_eq!(log.last_sequence(), 1);

        log.append_operation(
            Uuid::new_v4(),
            &[AuditRecord::approved(p("alice"), p("bob"), Amount::new(5))],
        )
        .unwrap();

        let reader = AuditLogReader::from_directory(dir.path()).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 2);
        verify_chain(&records).unwrap();
    }

    #[test]
    fn test_empty_operation_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AuditLog::open(dir.path()).unwrap();

        let sealed = log.append_operation(Uuid::new_v4(), &[]).unwrap();
        assert!(sealed.is_empty());
        assert_eq!(log.last_sequence(), 0);
    }
}
