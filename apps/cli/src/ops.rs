//! Admin operations given on the command line.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing::warn;

use plasmaledger_core::{parse_amount, BigUint, LedgerError};
use plasmaledger_ledger::Ledger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Revenue(BigUint),
    Add { address: String, name: Option<String> },
    Remove(String),
}

impl Op {
    pub fn apply(&self, ledger: &mut Ledger) -> Result<()> {
        match self {
            Op::Revenue(amount) => match ledger.add_revenue(amount) {
                Ok(split) => {
                    if split.drift() != 0 {
                        warn!(
                            "Revenue {} split as {} x {}, drift {}",
                            split.amount,
                            split.share,
                            split.recipients,
                            split.drift()
                        );
                    }
                    Ok(())
                }
                // dropped revenue is reported, not fatal
                Err(LedgerError::NoActiveMembers(_)) => Ok(()),
                Err(e) => Err(e.into()),
            },
            Op::Add { address, name } => {
                ledger.add_member(address, name.as_deref())?;
                Ok(())
            }
            Op::Remove(address) => Ok(ledger.remove_member(address)?),
        }
    }
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected <kind>:<args>, got {:?}", s))?;

        match kind {
            "revenue" => Ok(Op::Revenue(parse_amount(rest)?)),
            "add" => {
                let (address, name) = match rest.split_once(':') {
                    Some((address, name)) => (address, Some(name.to_string())),
                    None => (rest, None),
                };
                Ok(Op::Add {
                    address: address.to_string(),
                    name,
                })
            }
            "remove" => Ok(Op::Remove(rest.to_string())),
            other => Err(anyhow!("unknown operation {:?}", other)),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Revenue(amount) => write!(f, "revenue:{}", amount),
            Op::Add { address, name: Some(name) } => write!(f, "add:{}:{}", address, name),
            Op::Add { address, name: None } => write!(f, "add:{}", address),
            Op::Remove(address) => write!(f, "remove:{}", address),
        }
    }
}
