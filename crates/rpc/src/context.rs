//! Application context - wires everything together
//!
//! One context is the single writer over the ledger state. Mutations
//! flow: operation → audit append → snapshot persist. The ledger
//! itself guarantees all-or-nothing per operation; the context only
//! ever persists a state whose records were appended first.

use mintgate_core::{Principal, TokenMetadata};
use mintgate_events::{AuditLog, AuditLogError, SealedRecord};
use mintgate_ledger::{AuditRecord, TokenError, TokenLedger};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Errors surfaced by the context layer
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Audit log error: {0}")]
    Audit(#[from] AuditLogError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Ledger not initialized (run `init` first)")]
    NotInitialized,

    #[error("Ledger already initialized (owner: {0})")]
    AlreadyInitialized(Principal),
}

/// Application context - snapshot-backed ledger plus audit log
pub struct AppContext {
    ledger: Option<TokenLedger>,
    audit: AuditLog,
    snapshot_path: PathBuf,
    audit_path: PathBuf,
}

impl AppContext {
    /// Open a context over a data directory, loading any existing
    /// ledger snapshot and recovering the audit chain head.
    pub fn open(data_path: impl AsRef<Path>) -> Result<Self, ContextError> {
        let data_path = data_path.as_ref();
        let snapshot_path = data_path.join("ledger.json");
        let audit_path = data_path.join("audit");

        std::fs::create_dir_all(data_path)?;
        let audit = AuditLog::open(&audit_path)?;

        let ledger = if snapshot_path.exists() {
            let json = std::fs::read_to_string(&snapshot_path)?;
            Some(serde_json::from_str(&json)?)
        } else {
            None
        };

        Ok(Self {
            ledger,
            audit,
            snapshot_path,
            audit_path,
        })
    }

    /// Deploy the ledger with the calling principal as owner
    pub fn init(
        &mut self,
        metadata: TokenMetadata,
        deployer: Principal,
    ) -> Result<(), ContextError> {
        if let Some(ref ledger) = self.ledger {
            return Err(ContextError::AlreadyInitialized(ledger.owner().clone()));
        }

        info!(owner = %deployer, "ledger deployed");
        self.ledger = Some(TokenLedger::new(metadata, deployer));
        self.persist()?;
        Ok(())
    }

    /// Read-only access to the ledger
    pub fn ledger(&self) -> Result<&TokenLedger, ContextError> {
        self.ledger.as_ref().ok_or(ContextError::NotInitialized)
    }

    /// Execute one mutating operation: run it against the aggregate,
    /// append its records to the audit log, persist the snapshot.
    pub fn apply<F>(&mut self, operation: F) -> Result<Vec<SealedRecord>, ContextError>
    where
        F: FnOnce(&mut TokenLedger) -> Result<Vec<AuditRecord>, TokenError>,
    {
        let ledger = self.ledger.as_mut().ok_or(ContextError::NotInitialized)?;

        let records = operation(ledger)?;

        let op_id = Uuid::new_v4();
        let sealed = self.audit.append_operation(op_id, &records)?;
        self.persist()?;

        Ok(sealed)
    }

    /// True once `init` has run
    pub fn is_initialized(&self) -> bool {
        self.ledger.is_some()
    }

    /// Sequence number of the newest audit record
    pub fn last_sequence(&self) -> u64 {
        self.audit.last_sequence()
    }

    /// Directory holding the JSONL audit files
    pub fn audit_path(&self) -> &Path {
        &self.audit_path
    }

    fn persist(&self) -> Result<(), ContextError> {
        let ledger = self.ledger.as_ref().ok_or(ContextError::NotInitialized)?;
        let json = serde_json::to_string_pretty(ledger)?;
        std::fs::write(&self.snapshot_path, json)?;
        Ok(())
    }
}
