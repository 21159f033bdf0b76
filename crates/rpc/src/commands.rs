//! CLI commands
//!
//! One function per external operation. Every mutating command takes
//! the explicit, already-authenticated caller principal.

use mintgate_core::{Amount, Principal, TokenMetadata};
use mintgate_ledger::TokenLedger;

use crate::context::AppContext;

/// Deploy the ledger with the caller as owner
pub fn init(
    ctx: &mut AppContext,
    caller: &Principal,
    name: &str,
    symbol: &str,
    decimals: u8,
) -> Result<(), anyhow::Error> {
    ctx.init(TokenMetadata::new(name, symbol, decimals), caller.clone())?;

    println!("✅ Deployed {} ({}) with owner {}", name, symbol, caller);
    Ok(())
}

/// Mint new supply to an account (owner-only, while minting is open)
pub fn mint(
    ctx: &mut AppContext,
    caller: &Principal,
    to: &Principal,
    amount: Amount,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.mint(caller, to, amount))?;

    let supply = ctx.ledger()?.total_supply();
    println!("✅ Minted {} to {} (supply: {})", amount, to, supply);
    Ok(())
}

/// Overwrite the allowance from the caller to a spender
pub fn approve(
    ctx: &mut AppContext,
    caller: &Principal,
    spender: &Principal,
    amount: Amount,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.approve(caller, spender, amount))?;

    println!("✅ Approved {} for {} from {}", amount, spender, caller);
    Ok(())
}

/// Transfer tokens from the caller to another account
pub fn transfer(
    ctx: &mut AppContext,
    caller: &Principal,
    to: &Principal,
    amount: Amount,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.transfer(caller, to, amount))?;

    println!("✅ Transferred {} from {} to {}", amount, caller, to);
    Ok(())
}

/// Spend an allowance: move tokens from `from` to `to`
pub fn transfer_from(
    ctx: &mut AppContext,
    caller: &Principal,
    from: &Principal,
    to: &Principal,
    amount: Amount,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.transfer_from(caller, from, to, amount))?;

    println!(
        "✅ Transferred {} from {} to {} (spender: {})",
        amount, from, to, caller
    );
    Ok(())
}

/// Close the minting window (owner-only, once)
pub fn finish_minting(ctx: &mut AppContext, caller: &Principal) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.finish_minting(caller))?;

    println!("✅ Minting finished; transfers are now open");
    Ok(())
}

/// Nominate a successor owner
pub fn transfer_ownership(
    ctx: &mut AppContext,
    caller: &Principal,
    candidate: &Principal,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.transfer_ownership(caller, candidate.clone()))?;

    println!("✅ Nominated {} as pending owner", candidate);
    Ok(())
}

/// Claim a pending ownership nomination
pub fn claim_ownership(ctx: &mut AppContext, caller: &Principal) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.claim_ownership(caller))?;

    println!("✅ Ownership claimed by {}", caller);
    Ok(())
}

/// Attempt a native-value deposit through the normal acceptance path.
/// Always refused; exists so operators can observe the guard.
pub fn deposit_value(
    ctx: &mut AppContext,
    caller: &Principal,
    value: Amount,
) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| ledger.receive_native(caller, value))?;
    Ok(())
}

/// Force native value into the entity, bypassing the acceptance path
/// (models a self-destructing sender the guard cannot block)
pub fn force_value(ctx: &mut AppContext, value: Amount) -> Result<(), anyhow::Error> {
    ctx.apply(|ledger| {
        ledger.inject_native_out_of_band(value);
        Ok(Vec::new())
    })?;

    let held = ctx.ledger()?.native_balance();
    println!("⚠️  Forced {} native value in (held: {})", value, held);
    Ok(())
}

/// Sweep the entire native-value holding to the owner
pub fn reclaim_value(ctx: &mut AppContext, caller: &Principal) -> Result<(), anyhow::Error> {
    let mut swept = Amount::ZERO;
    ctx.apply(|ledger| {
        swept = ledger.reclaim_native_value(caller)?;
        Ok(Vec::new())
    })?;

    println!("✅ Swept {} native value to {}", swept, caller);
    Ok(())
}

/// Show balance and allowance state for an account
pub fn balance(ctx: &AppContext, account: &Principal) -> Result<(), anyhow::Error> {
    let ledger = ctx.ledger()?;
    let balance = ledger.balance_of(account);

    match ledger.metadata().whole_units(balance) {
        Some(whole) => println!(
            "Balance for {}: {} base units ({} {})",
            account,
            balance,
            whole,
            ledger.metadata().symbol
        ),
        None => println!("Balance for {}: {} base units", account, balance),
    }
    Ok(())
}

/// Show the allowance one account granted another
pub fn allowance(
    ctx: &AppContext,
    owner: &Principal,
    spender: &Principal,
) -> Result<(), anyhow::Error> {
    let ledger = ctx.ledger()?;
    println!(
        "Allowance from {} to {}: {}",
        owner,
        spender,
        ledger.allowance(owner, spender)
    );
    Ok(())
}

/// Show token metadata and aggregate state
pub fn info(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let ledger = ctx.ledger()?;
    print_info(ledger);
    println!("Audit records: {}", ctx.last_sequence());
    Ok(())
}

fn print_info(ledger: &TokenLedger) {
    let meta = ledger.metadata();
    println!("{} ({}) - {} decimals", meta.name, meta.symbol, meta.decimals);
    println!("Owner:         {}", ledger.owner());
    match ledger.pending_owner() {
        Some(pending) => println!("Pending owner: {}", pending),
        None => println!("Pending owner: -"),
    }
    println!("Phase:         {}", ledger.phase());
    println!("Total supply:  {}", ledger.total_supply());
    println!("Native held:   {}", ledger.native_balance());
}

/// Verify the audit log hash chain
pub fn audit(ctx: &AppContext) -> Result<(), anyhow::Error> {
    use mintgate_events::{verify_chain, AuditLogReader};

    let reader = AuditLogReader::from_directory(ctx.audit_path())?;
    let records = reader.read_all()?;

    match verify_chain(&records) {
        Ok(()) => {
            println!("✅ Audit chain verified ({} records)", records.len());
            Ok(())
        }
        Err(e) => {
            println!("❌ Audit chain broken: {}", e);
            Err(e.into())
        }
    }
}
