//! Record sealing - hash chain over the audit log

use crate::error::AuditLogError;
use chrono::{DateTime, Utc};
use mintgate_ledger::AuditRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Sentinel prev_hash for the first sealed record
pub const GENESIS_HASH: &str = "GENESIS";

/// An audit record sealed into the hash chain.
///
/// Records emitted by one operation share an `op_id` and occupy
/// consecutive sequence numbers, preserving intra-operation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    /// Strictly increasing, starts at 1
    pub sequence: u64,

    /// Hash of the previous sealed record, or `GENESIS`
    pub prev_hash: String,

    /// SHA-256 over every other field
    pub hash: String,

    /// When the record was sealed
    pub timestamp: DateTime<Utc>,

    /// Groups the records of a single operation
    pub op_id: Uuid,

    /// The ledger's audit record
    pub record: AuditRecord,
}

impl SealedRecord {
    /// Seal a record onto the chain ending in (`sequence - 1`, `prev_hash`)
    pub fn seal(
        sequence: u64,
        prev_hash: String,
        op_id: Uuid,
        record: AuditRecord,
    ) -> Result<Self, AuditLogError> {
        let mut sealed = Self {
            sequence,
            prev_hash,
            hash: String::new(),
            timestamp: Utc::now(),
            op_id,
            record,
        };
        sealed.hash = calculate_record_hash(&sealed)?;
        Ok(sealed)
    }
}

/// Calculate the SHA-256 hash of a sealed record (excluding `hash` itself)
pub fn calculate_record_hash(sealed: &SealedRecord) -> Result<String, AuditLogError> {
    let mut hasher = Sha256::new();

    hasher.update(sealed.sequence.to_le_bytes());
    hasher.update(sealed.prev_hash.as_bytes());
    hasher.update(sealed.timestamp.to_rfc3339().as_bytes());
    hasher.update(sealed.op_id.as_bytes());

    // Field order in AuditRecord is fixed, so the JSON is deterministic
    hasher.update(serde_json::to_string(&sealed.record)?.as_bytes());

    Ok(hex::encode(hasher.finalize()))
}

/// Verify chain integrity over records in storage order
pub fn verify_chain(records: &[SealedRecord]) -> Result<(), AuditLogError> {
    let mut prev_hash = GENESIS_HASH.to_string();
    let mut expected_sequence = 1;

    for sealed in records {
        if sealed.prev_hash != prev_hash {
            return Err(AuditLogError::BrokenLink {
                sequence: sealed.sequence,
                expected: prev_hash,
                actual: sealed.prev_hash.clone(),
            });
        }

        let calculated = calculate_record_hash(sealed)?;
        if sealed.hash != calculated {
            return Err(AuditLogError::InvalidHash {
                sequence: sealed.sequence,
                expected: calculated,
                actual: sealed.hash.clone(),
            });
        }

        if sealed.sequence != expected_sequence {
            return Err(AuditLogError::InvalidSequence {
                expected: expected_sequence,
                actual: sealed.sequence,
            });
        }

        prev_hash = sealed.hash.clone();
        expected_sequence += 1;
    }

    Ok(())
}
