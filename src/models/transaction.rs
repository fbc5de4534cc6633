use anyhow::Result;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable ledger entry for one buy or sell. Append-only: a sell is a
/// new record, never an edit of a buy record.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct TransactionRecord {
    asset_id: String,
    kind: TransactionKind,
    quantity: Decimal,
    unit_price: Decimal,
    usd_amount: Decimal,
    timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TransactionKind {
    Buy,
    Sell,
}

impl TransactionKind {
    pub fn parse_str(s: &str) -> Result<TransactionKind> {
        match s {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            _ => Err(anyhow::anyhow!("Unknown transaction kind '{}'", s)),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Sell => "sell",
        }
    }
}
