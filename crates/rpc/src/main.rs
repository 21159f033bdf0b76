//! Mintgate CLI - Main entry point

use clap::{Parser, Subcommand};
use mintgate_core::{Amount, Principal};
use mintgate_rpc::{commands, AppContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mintgate")]
#[command(about = "Mintgate - Phase-gated token ledger", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the ledger; the caller becomes owner
    Init {
        /// Deploying principal (becomes owner)
        #[arg(long)]
        caller: Principal,
        /// Token name
        #[arg(long, default_value = "COTI-DIME")]
        name: String,
        /// Ticker symbol
        #[arg(long, default_value = "CPS")]
        symbol: String,
        /// Decimal places
        #[arg(long, default_value = "18")]
        decimals: u8,
    },

    /// Mint new supply to an account (owner-only, while minting is open)
    Mint {
        /// Calling principal
        #[arg(long)]
        caller: Principal,
        /// Recipient account
        to: Principal,
        /// Amount in base units
        amount: u128,
    },

    /// Set an allowance for a spender (overwrites any prior value)
    Approve {
        /// Calling principal (the granting account)
        #[arg(long)]
        caller: Principal,
        /// Spender account
        spender: Principal,
        /// Amount in base units
        amount: u128,
    },

    /// Transfer tokens to another account (after minting finished)
    Transfer {
        /// Calling principal (the source account)
        #[arg(long)]
        caller: Principal,
        /// Recipient account
        to: Principal,
        /// Amount in base units
        amount: u128,
    },

    /// Spend an allowance: move tokens between two other accounts
    TransferFrom {
        /// Calling principal (the spender)
        #[arg(long)]
        caller: Principal,
        /// Source account
        from: Principal,
        /// Recipient account
        to: Principal,
        /// Amount in base units
        amount: u128,
    },

    /// Close the minting window (owner-only, irreversible)
    FinishMinting {
        /// Calling principal
        #[arg(long)]
        caller: Principal,
    },

    /// Nominate a successor owner (two-step transfer, step one)
    TransferOwnership {
        /// Calling principal (must be owner)
        #[arg(long)]
        caller: Principal,
        /// Nominated successor
        candidate: Principal,
    },

    /// Claim a pending ownership nomination (step two)
    ClaimOwnership {
        /// Calling principal (must be the nominee)
        #[arg(long)]
        caller: Principal,
    },

    /// Attempt a native-value deposit (always refused by the guard)
    DepositValue {
        /// Calling principal
        #[arg(long)]
        caller: Principal,
        /// Attached native value
        value: u128,
    },

    /// Force native value in, bypassing the acceptance path
    ForceValue {
        /// Injected native value
        value: u128,
    },

    /// Sweep the entire native-value holding to the owner
    ReclaimValue {
        /// Calling principal (must be owner)
        #[arg(long)]
        caller: Principal,
    },

    /// Show an account balance
    Balance {
        /// Account to query
        account: Principal,
    },

    /// Show the allowance one account granted another
    Allowance {
        /// Granting account
        owner: Principal,
        /// Spender account
        spender: Principal,
    },

    /// Show token metadata and aggregate state
    Info,

    /// Verify the audit log hash chain
    Audit,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut ctx = AppContext::open(&cli.data)?;

    match cli.command {
        Commands::Init {
            caller,
            name,
            symbol,
            decimals,
        } => commands::init(&mut ctx, &caller, &name, &symbol, decimals)?,

        Commands::Mint { caller, to, amount } => {
            commands::mint(&mut ctx, &caller, &to, Amount::new(amount))?;
        }

        Commands::Approve {
            caller,
            spender,
            amount,
        } => commands::approve(&mut ctx, &caller, &spender, Amount::new(amount))?,

        Commands::Transfer { caller, to, amount } => {
            commands::transfer(&mut ctx, &caller, &to, Amount::new(amount))?;
        }

        Commands::TransferFrom {
            caller,
            from,
            to,
            amount,
        } => commands::transfer_from(&mut ctx, &caller, &from, &to, Amount::new(amount))?,

        Commands::FinishMinting { caller } => commands::finish_minting(&mut ctx, &caller)?,

        Commands::TransferOwnership { caller, candidate } => {
            commands::transfer_ownership(&mut ctx, &caller, &candidate)?;
        }

        Commands::ClaimOwnership { caller } => commands::claim_ownership(&mut ctx, &caller)?,

        Commands::DepositValue { caller, value } => {
            commands::deposit_value(&mut ctx, &caller, Amount::new(value))?;
        }

        Commands::ForceValue { value } => commands::force_value(&mut ctx, Amount::new(value))?,

        Commands::ReclaimValue { caller } => commands::reclaim_value(&mut ctx, &caller)?,

        Commands::Balance { account } => commands::balance(&ctx, &account)?,

        Commands::Allowance { owner, spender } => commands::allowance(&ctx, &owner, &spender)?,

        Commands::Info => commands::info(&ctx)?,

        Commands::Audit => commands::audit(&ctx)?,
    }

    Ok(())
}
