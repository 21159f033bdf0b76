//! Token ledger engine - the single owned aggregate
//!
//! All mutable state lives behind `TokenLedger`, which executes one
//! operation at a time with all-or-nothing effect. Every operation
//! runs its policy checks first, then computes every new value with
//! checked arithmetic, and only commits once nothing can fail. A
//! returned error therefore guarantees the aggregate is byte-identical
//! to before the call.

use crate::error::TokenError;
use crate::ownership::Ownership;
use crate::phase::MintingPhase;
use crate::policy;
use crate::record::AuditRecord;
use mintgate_core::{Amount, Principal, TokenMetadata};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// The token ledger aggregate.
///
/// # Invariants
/// - `sum(balances) == total_supply` in every reachable state
/// - `phase` latches Active → Finished exactly once
/// - exactly one owner at all times
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    ownership: Ownership,
    phase: MintingPhase,
    balances: HashMap<Principal, Amount>,
    allowances: HashMap<Principal, HashMap<Principal, Amount>>,
    total_supply: Amount,
    native_balance: Amount,
}

impl TokenLedger {
    /// Create a ledger with the deploying principal as owner, phase
    /// Active, zero supply and empty maps.
    pub fn new(metadata: TokenMetadata, deployer: Principal) -> Self {
        Self {
            metadata,
            ownership: Ownership::new(deployer),
            phase: MintingPhase::Active,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: Amount::ZERO,
            native_balance: Amount::ZERO,
        }
    }

    /// Deploy with an explicit attached native value. Construction
    /// rejects any attachment, like every other acceptance path.
    pub fn deploy(
        metadata: TokenMetadata,
        deployer: Principal,
        attached_value: Amount,
    ) -> Result<Self, TokenError> {
        if !attached_value.is_zero() {
            return Err(TokenError::ValueRejected);
        }
        Ok(Self::new(metadata, deployer))
    }

    // === Queries ===

    /// Static token descriptors
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Current administrative principal
    pub fn owner(&self) -> &Principal {
        self.ownership.owner()
    }

    /// Pending ownership nominee, if any
    pub fn pending_owner(&self) -> Option<&Principal> {
        self.ownership.pending()
    }

    /// Current minting phase
    pub fn phase(&self) -> MintingPhase {
        self.phase
    }

    /// True once `finish_minting` has succeeded
    pub fn minting_finished(&self) -> bool {
        !self.phase.is_active()
    }

    /// Balance of an account; absent accounts read as zero
    pub fn balance_of(&self, account: &Principal) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    /// Delegated spending limit from `owner` to `spender`
    pub fn allowance(&self, owner: &Principal, spender: &Principal) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Total minted supply
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// The entity's own holding of the environment's native value
    pub fn native_balance(&self) -> Amount {
        self.native_balance
    }

    // === Ledger & transfer engine ===

    /// Mint new supply to `to`. Owner-only, Active-only.
    ///
    /// The supply is credited before the recipient balance so that an
    /// overflowing mint aborts before any mutation; the recipient
    /// credit cannot overflow once the supply credit succeeded.
    pub fn mint(
        &mut self,
        caller: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        policy::require_owner(&self.ownership, caller)?;
        policy::require_active(self.phase, "mint")?;

        let new_supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(TokenError::ArithmeticOverflow { operation: "mint" })?;
        let new_balance = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TokenError::ArithmeticOverflow { operation: "mint" })?;

        self.total_supply = new_supply;
        self.balances.insert(to.clone(), new_balance);

        info!(to = %to, amount = %amount, supply = %self.total_supply, "minted");

        Ok(vec![
            AuditRecord::minted(to.clone(), amount),
            AuditRecord::transferred_from_none(to.clone(), amount),
        ])
    }

    /// Overwrite the allowance from the caller to `spender`.
    ///
    /// Legal in every phase; an allowance may exceed the caller's
    /// balance (checked at spend time, not here). Re-approving
    /// replaces the prior value, it never accumulates.
    pub fn approve(
        &mut self,
        caller: &Principal,
        spender: &Principal,
        amount: Amount,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        self.allowances
            .entry(caller.clone())
            .or_default()
            .insert(spender.clone(), amount);

        Ok(vec![AuditRecord::approved(
            caller.clone(),
            spender.clone(),
            amount,
        )])
    }

    /// Move value from the caller to `to`. Frozen while minting is
    /// Active so the total allocation is final before any token moves.
    pub fn transfer(
        &mut self,
        caller: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        policy::require_finished(self.phase, "transfer")?;

        self.move_balance(caller, to, amount)?;

        Ok(vec![AuditRecord::transferred(
            caller.clone(),
            to.clone(),
            amount,
        )])
    }

    /// Move value from `from` to `to` on the strength of an allowance
    /// granted to the caller. Allowance is checked before balance.
    pub fn transfer_from(
        &mut self,
        caller: &Principal,
        from: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        policy::require_finished(self.phase, "transfer_from")?;

        let allowance = self.allowance(from, caller);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                owner: from.clone(),
                spender: caller.clone(),
                allowance,
                requested: amount,
            });
        }
        let new_allowance =
            allowance
                .checked_sub(&amount)
                .ok_or(TokenError::ArithmeticUnderflow {
                    operation: "transfer_from",
                })?;

        self.move_balance(from, to, amount)?;

        self.allowances
            .entry(from.clone())
            .or_default()
            .insert(caller.clone(), new_allowance);

        Ok(vec![AuditRecord::transferred(
            from.clone(),
            to.clone(),
            amount,
        )])
    }

    /// Debit `from` and credit `to`, both checked. Commits only after
    /// both new values computed. Self-transfer is a legal no-op.
    fn move_balance(
        &mut self,
        from: &Principal,
        to: &Principal,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(TokenError::InsufficientBalance {
                account: from.clone(),
                balance: from_balance,
                requested: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let new_from = from_balance
            .checked_sub(&amount)
            .ok_or(TokenError::ArithmeticUnderflow {
                operation: "transfer",
            })?;
        let new_to = self
            .balance_of(to)
            .checked_add(&amount)
            .ok_or(TokenError::ArithmeticOverflow {
                operation: "transfer",
            })?;

        self.balances.insert(from.clone(), new_from);
        self.balances.insert(to.clone(), new_to);
        Ok(())
    }

    // === Minting phase controller ===

    /// Close the minting window. Owner-only; fails once Finished.
    pub fn finish_minting(&mut self, caller: &Principal) -> Result<Vec<AuditRecord>, TokenError> {
        policy::require_owner(&self.ownership, caller)?;
        policy::require_active(self.phase, "finish_minting")?;

        self.phase = MintingPhase::Finished;

        info!(supply = %self.total_supply, "minting finished");

        Ok(vec![AuditRecord::MintingFinished])
    }

    // === Ownership registry ===

    /// Nominate a successor owner. The owner is unchanged until the
    /// nominee claims.
    pub fn transfer_ownership(
        &mut self,
        caller: &Principal,
        candidate: Principal,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        self.ownership.transfer(caller, candidate)?;
        Ok(Vec::new())
    }

    /// Claim a pending nomination; only the nominee succeeds.
    pub fn claim_ownership(&mut self, caller: &Principal) -> Result<Vec<AuditRecord>, TokenError> {
        let previous = self.ownership.claim(caller)?;

        info!(previous = %previous, new = %caller, "ownership claimed");

        Ok(vec![AuditRecord::OwnershipTransferred {
            previous,
            new: caller.clone(),
        }])
    }

    // === Inbound-value guard ===

    /// The normal native-value acceptance path. Never accepts, even
    /// for a zero value carrying value metadata.
    pub fn receive_native(
        &mut self,
        _caller: &Principal,
        _value: Amount,
    ) -> Result<Vec<AuditRecord>, TokenError> {
        Err(TokenError::ValueRejected)
    }

    /// Model a value injection that bypasses the acceptance path
    /// entirely (the environment can force value in, e.g. through a
    /// self-destructing entity). Saturates rather than fails: the
    /// guard has no way to abort an out-of-band injection.
    pub fn inject_native_out_of_band(&mut self, value: Amount) {
        self.native_balance = self
            .native_balance
            .checked_add(&value)
            .unwrap_or(Amount::MAX);
    }

    /// Sweep the entire native-value holding to the owner. Owner-only.
    /// Returns the swept amount; the credit to the owner's external
    /// holding happens outside the ledger.
    pub fn reclaim_native_value(&mut self, caller: &Principal) -> Result<Amount, TokenError> {
        policy::require_owner(&self.ownership, caller)?;

        let swept = std::mem::take(&mut self.native_balance);

        info!(owner = %caller, amount = %swept, "native value swept");

        Ok(swept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> Principal {
        Principal::new(id).unwrap()
    }

    fn new_ledger() -> TokenLedger {
        TokenLedger::new(TokenMetadata::new("COTI-DIME", "CPS", 18), p("owner"))
    }

    fn supply_matches_balances(ledger: &TokenLedger) -> bool {
        let sum: u128 = [p("owner"), p("alice"), p("bob"), p("carol")]
            .iter()
            .map(|a| ledger.balance_of(a).value())
            .sum();
        sum == ledger.total_supply().value()
    }

    #[test]
    fn test_fresh_ledger() {
        let ledger = new_ledger();
        assert_eq!(ledger.owner(), &p("owner"));
        assert_eq!(ledger.pending_owner(), None);
        assert!(!ledger.minting_finished());
        assert!(ledger.total_supply().is_zero());
        assert!(ledger.balance_of(&p("alice")).is_zero());
        assert_eq!(ledger.metadata().symbol, "CPS");
        assert_eq!(ledger.metadata().decimals, 18);
    }

    #[test]
    fn test_deploy_rejects_attached_value() {
        let result = TokenLedger::deploy(
            TokenMetadata::new("COTI-DIME", "CPS", 18),
            p("owner"),
            Amount::new(1),
        );
        assert_eq!(result.unwrap_err(), TokenError::ValueRejected);
    }

    #[test]
    fn test_mint_credits_balance_and_supply() {
        let mut ledger = new_ledger();
        let records = ledger
            .mint(&p("owner"), &p("alice"), Amount::new(10_000_000))
            .unwrap();

        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(10_000_000));
        assert_eq!(ledger.total_supply(), Amount::new(10_000_000));
        assert!(supply_matches_balances(&ledger));

        // Minted first, then the companion Transferred with no source
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            AuditRecord::minted(p("alice"), Amount::new(10_000_000))
        );
        assert_eq!(
            records[1],
            AuditRecord::transferred_from_none(p("alice"), Amount::new(10_000_000))
        );
    }

    #[test]
    fn test_mint_is_accumulative_and_personal() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(1)).unwrap();
        ledger.mint(&p("owner"), &p("bob"), Amount::new(1)).unwrap();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(2)).unwrap();

        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(3));
        assert_eq!(ledger.balance_of(&p("bob")), Amount::new(1));
        assert_eq!(ledger.total_supply(), Amount::new(4));
    }

    #[test]
    fn test_mint_requires_owner() {
        let mut ledger = new_ledger();
        let result = ledger.mint(&p("alice"), &p("alice"), Amount::new(1));
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert!(ledger.total_supply().is_zero());
    }

    #[test]
    fn test_mint_after_finish_fails() {
        let mut ledger = new_ledger();
        ledger.finish_minting(&p("owner")).unwrap();

        let result = ledger.mint(&p("owner"), &p("alice"), Amount::new(1));
        assert!(matches!(result, Err(TokenError::InvalidState { .. })));
    }

    #[test]
    fn test_mint_overflow_leaves_state_untouched() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(10)).unwrap();

        let result = ledger.mint(&p("owner"), &p("bob"), Amount::MAX);
        assert!(matches!(
            result,
            Err(TokenError::ArithmeticOverflow { .. })
        ));
        assert_eq!(ledger.total_supply(), Amount::new(10));
        assert!(ledger.balance_of(&p("bob")).is_zero());
    }

    #[test]
    fn test_mint_zero_is_harmless() {
        let mut ledger = new_ledger();
        let records = ledger.mint(&p("owner"), &p("alice"), Amount::ZERO).unwrap();
        assert_eq!(records.len(), 2);
        assert!(ledger.total_supply().is_zero());
    }

    #[test]
    fn test_transfer_frozen_while_active() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(100)).unwrap();

        let result = ledger.transfer(&p("alice"), &p("bob"), Amount::new(1));
        assert!(matches!(result, Err(TokenError::InvalidState { .. })));
        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(100));
    }

    #[test]
    fn test_transfer_after_finish() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(100)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();

        let records = ledger.transfer(&p("alice"), &p("bob"), Amount::new(40)).unwrap();

        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(60));
        assert_eq!(ledger.balance_of(&p("bob")), Amount::new(40));
        assert!(supply_matches_balances(&ledger));
        assert_eq!(
            records,
            vec![AuditRecord::transferred(p("alice"), p("bob"), Amount::new(40))]
        );
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(10)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();

        let result = ledger.transfer(&p("alice"), &p("bob"), Amount::new(11));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(10));
        assert!(ledger.balance_of(&p("bob")).is_zero());
    }

    #[test]
    fn test_self_transfer_is_legal() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(10)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();

        ledger.transfer(&p("alice"), &p("alice"), Amount::new(10)).unwrap();
        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(10));
    }

    #[test]
    fn test_approve_overwrites() {
        let mut ledger = new_ledger();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(100)).unwrap();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(40)).unwrap();

        assert_eq!(ledger.allowance(&p("alice"), &p("bob")), Amount::new(40));
    }

    #[test]
    fn test_approve_legal_while_active_and_beyond_balance() {
        let mut ledger = new_ledger();
        // No balance, phase Active: approval still succeeds
        let records = ledger
            .approve(&p("alice"), &p("bob"), Amount::new(1_000_000))
            .unwrap();
        assert_eq!(
            records,
            vec![AuditRecord::approved(p("alice"), p("bob"), Amount::new(1_000_000))]
        );
    }

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(1000)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(500)).unwrap();

        ledger
            .transfer_from(&p("bob"), &p("alice"), &p("carol"), Amount::new(500))
            .unwrap();

        assert_eq!(ledger.balance_of(&p("carol")), Amount::new(500));
        assert_eq!(ledger.balance_of(&p("alice")), Amount::new(500));
        assert!(ledger.allowance(&p("alice"), &p("bob")).is_zero());
        assert!(supply_matches_balances(&ledger));
    }

    #[test]
    fn test_transfer_from_without_allowance() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(1000)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();

        let result = ledger.transfer_from(&p("alice"), &p("alice"), &p("carol"), Amount::new(1));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_transfer_from_frozen_while_active() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(1000)).unwrap();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(500)).unwrap();

        let result = ledger.transfer_from(&p("bob"), &p("alice"), &p("carol"), Amount::new(500));
        assert!(matches!(result, Err(TokenError::InvalidState { .. })));
    }

    #[test]
    fn test_transfer_from_allowance_checked_before_balance() {
        let mut ledger = new_ledger();
        ledger.finish_minting(&p("owner")).unwrap();
        // No allowance and no balance: allowance failure wins
        let result = ledger.transfer_from(&p("bob"), &p("alice"), &p("carol"), Amount::new(1));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { .. })
        ));
    }

    #[test]
    fn test_transfer_from_balance_failure_keeps_allowance() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(10)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(50)).unwrap();

        let result = ledger.transfer_from(&p("bob"), &p("alice"), &p("carol"), Amount::new(50));
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { .. })
        ));
        assert_eq!(ledger.allowance(&p("alice"), &p("bob")), Amount::new(50));
    }

    #[test]
    fn test_finish_minting_latches_once() {
        let mut ledger = new_ledger();
        let records = ledger.finish_minting(&p("owner")).unwrap();
        assert_eq!(records, vec![AuditRecord::MintingFinished]);
        assert!(ledger.minting_finished());

        let result = ledger.finish_minting(&p("owner"));
        assert!(matches!(result, Err(TokenError::InvalidState { .. })));
    }

    #[test]
    fn test_finish_minting_requires_owner() {
        let mut ledger = new_ledger();
        let result = ledger.finish_minting(&p("alice"));
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert!(!ledger.minting_finished());
    }

    #[test]
    fn test_two_step_ownership() {
        let mut ledger = new_ledger();
        ledger.transfer_ownership(&p("owner"), p("alice")).unwrap();

        assert_eq!(ledger.owner(), &p("owner"));
        assert_eq!(ledger.pending_owner(), Some(&p("alice")));

        assert!(ledger.claim_ownership(&p("bob")).is_err());

        let records = ledger.claim_ownership(&p("alice")).unwrap();
        assert_eq!(ledger.owner(), &p("alice"));
        assert_eq!(ledger.pending_owner(), None);
        assert_eq!(
            records,
            vec![AuditRecord::OwnershipTransferred {
                previous: p("owner"),
                new: p("alice"),
            }]
        );
    }

    #[test]
    fn test_new_owner_controls_minting() {
        let mut ledger = new_ledger();
        ledger.transfer_ownership(&p("owner"), p("alice")).unwrap();
        ledger.claim_ownership(&p("alice")).unwrap();

        assert!(ledger.mint(&p("owner"), &p("bob"), Amount::new(1)).is_err());
        ledger.mint(&p("alice"), &p("bob"), Amount::new(1)).unwrap();
    }

    #[test]
    fn test_receive_native_always_rejected() {
        let mut ledger = new_ledger();
        assert_eq!(
            ledger.receive_native(&p("alice"), Amount::new(100)),
            Err(TokenError::ValueRejected)
        );
        // Zero-value deposits carrying value metadata are rejected too
        assert_eq!(
            ledger.receive_native(&p("alice"), Amount::ZERO),
            Err(TokenError::ValueRejected)
        );
        assert!(ledger.native_balance().is_zero());
    }

    #[test]
    fn test_reclaim_sweeps_forced_value() {
        let mut ledger = new_ledger();
        ledger.inject_native_out_of_band(Amount::new(1_000));
        assert_eq!(ledger.native_balance(), Amount::new(1_000));

        let swept = ledger.reclaim_native_value(&p("owner")).unwrap();
        assert_eq!(swept, Amount::new(1_000));
        assert!(ledger.native_balance().is_zero());
    }

    #[test]
    fn test_reclaim_requires_owner() {
        let mut ledger = new_ledger();
        ledger.inject_native_out_of_band(Amount::new(1_000));

        let result = ledger.reclaim_native_value(&p("alice"));
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert_eq!(ledger.native_balance(), Amount::new(1_000));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut ledger = new_ledger();
        ledger.mint(&p("owner"), &p("alice"), Amount::new(100)).unwrap();
        ledger.approve(&p("alice"), &p("bob"), Amount::new(50)).unwrap();
        ledger.finish_minting(&p("owner")).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: TokenLedger = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.balance_of(&p("alice")), Amount::new(100));
        assert_eq!(restored.allowance(&p("alice"), &p("bob")), Amount::new(50));
        assert_eq!(restored.total_supply(), Amount::new(100));
        assert!(restored.minting_finished());
        assert_eq!(restored.owner(), &p("owner"));
    }
}
