//! plasmaledger CLI
//!
//! Seeds a ledger from the settings' genesis members, optionally replays
//! admin operations, and prints member views, roots and proofs as JSON.
//! Nothing is persisted between runs.

mod ops;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use plasmaledger_ledger::Ledger;
use plasmaledger_merkle::{merkle_leaf, MerkleTree};
use plasmaledger_settings::{default_settings_path, Settings};

use crate::ops::Op;

/// plasmaledger - Merkle-committed earnings ledger
#[derive(Parser)]
#[command(name = "plasmaledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON) holding the genesis members
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    #[command(flatten)]
    Ledger(LedgerCommand),
}

/// Commands that run against the genesis ledger
#[derive(Subcommand)]
enum LedgerCommand {
    /// List active members
    Members,

    /// Show one member with its proof
    Member {
        /// Member address (40 hex digits, 0x optional)
        address: String,
    },

    /// Print the current root hash
    Root,

    /// Print the proof path for a member
    Proof {
        /// Member address (40 hex digits, 0x optional)
        address: String,
    },

    /// Check a member's proof against the root
    Verify {
        /// Member address (40 hex digits, 0x optional)
        address: String,
    },

    /// Apply operations in order, then print members and root
    Simulate {
        /// revenue:<amount> | add:<address>[:<name>] | remove:<address>
        #[arg(short, long = "op", required = true)]
        ops: Vec<Op>,
    },
}

#[derive(Serialize)]
struct LedgerReport {
    root: String,
    members: Vec<plasmaledger_core::MemberView>,
}

#[derive(Serialize)]
struct VerifyReport {
    address: String,
    earnings: String,
    root: String,
    valid: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.settings.clone().unwrap_or_else(default_settings_path);
    match cli.command {
        Commands::Init { force } => init_settings(&settings_path, force),
        Commands::Ledger(command) => run(command, &settings_path, cli.verbose),
    }
}

fn run(command: LedgerCommand, settings_path: &Path, verbose: bool) -> Result<()> {
    let settings = Settings::load_from(settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    let directive =
        plasmaledger_logging::filter_directive(Some(settings.logging.filter.as_str()), verbose);
    plasmaledger_logging::init_logging(&directive);

    let genesis = settings
        .ledger
        .genesis_records()
        .context("invalid genesis members")?;
    let mut ledger = Ledger::with_members(genesis).context("building genesis ledger")?;

    match command {
        LedgerCommand::Members => print_json(&ledger.get_members())?,
        LedgerCommand::Member { address } => print_json(&ledger.get_member(&address)?)?,
        LedgerCommand::Root => println!("{}", ledger.get_root_hash()),
        LedgerCommand::Proof { address } => print_json(&ledger.get_proof(&address)?)?,
        LedgerCommand::Verify { address } => {
            let report = verify(&ledger, &address)?;
            print_json(&report)?;
            if !report.valid {
                bail!("proof for {} does not match root {}", report.address, report.root);
            }
        }
        LedgerCommand::Simulate { ops } => {
            for op in &ops {
                op.apply(&mut ledger)
                    .with_context(|| format!("applying {}", op))?;
            }
            info!("Applied {} operations", ops.len());
            print_json(&LedgerReport {
                root: ledger.get_root_hash(),
                members: ledger.get_members(),
            })?;
        }
    }

    Ok(())
}

/// Recompute the member's leaf and fold its proof, as a verifier holding
/// only the root would.
fn verify(ledger: &Ledger, address: &str) -> Result<VerifyReport> {
    let record = ledger.record(address)?;
    let proof = ledger.get_proof(address)?;
    let valid = if record.earnings().bits() == 0 {
        // zero balances need no backing
        proof.is_empty()
    } else {
        MerkleTree::verify(&ledger.root(), &merkle_leaf(record), &proof)
    };

    Ok(VerifyReport {
        address: record.address().to_string(),
        earnings: record.earnings().to_string(),
        root: ledger.get_root_hash(),
        valid,
    })
}

/// Write default settings to `path`. Refuses to replace an existing file
/// unless `force` is set.
fn init_settings(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Settings::default()
        .save_to(path)
        .with_context(|| format!("writing settings to {}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
