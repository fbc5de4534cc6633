use std::collections::HashMap;

use anyhow::{Error, Result};
use chrono::{Local, Utc};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::{
    api::CoinGeckoApi,
    calc::{self, PortfolioSummary},
    db::store,
    models::{EquitySeries, Position, TransactionKind, TransactionRecord},
};

/// Result of one sell: cash credited to the balance and the gain locked
/// in against the position's cost basis.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct SaleOutcome {
    proceeds: Decimal,
    realized_gain: Decimal,
}

/// One owner's portfolio, tying the stores and the price API to the
/// valuation engine. Concurrent mutation of the same owner is not
/// supported; callers must serialize buys and sells per owner.
pub struct Portfolio {
    owner_id: String,
    pool: Pool<Sqlite>,
    api: CoinGeckoApi,
}

impl Portfolio {
    pub fn new(owner_id: String, pool: Pool<Sqlite>, api: CoinGeckoApi) -> Self {
        Self {
            owner_id,
            pool,
            api,
        }
    }

    pub fn api(&self) -> &CoinGeckoApi {
        &self.api
    }

    pub async fn balance(&self) -> Result<Decimal> {
        store::get_balance(&self.pool, &self.owner_id).await
    }

    pub async fn positions(&self) -> Result<Vec<Position>> {
        store::get_positions(&self.pool, &self.owner_id).await
    }

    /// Buys `quantity` units for `usd_spent` of simulated cash: reweights
    /// the cost basis, appends the ledger record and debits the balance
    /// in one database transaction.
    pub async fn buy(
        &self,
        asset_id: &str,
        quantity: Decimal,
        usd_spent: Decimal,
    ) -> Result<Position> {
        let balance = self.balance().await?;
        if usd_spent > balance {
            return Err(Error::msg(format!(
                "Insufficient balance: {} needed, {} available",
                usd_spent, balance
            )));
        }

        let prior = store::get_position(&self.pool, &self.owner_id, asset_id).await?;
        let updated = calc::accumulate(prior.as_ref(), asset_id, quantity, usd_spent)?;

        let unit_price = usd_spent / quantity;
        let record = TransactionRecord::new(
            asset_id.to_string(),
            TransactionKind::Buy,
            quantity,
            unit_price,
            usd_spent,
            Utc::now(),
        );

        let mut tx = self.pool.begin().await?;
        store::upsert_position(&self.owner_id, &updated, &mut tx).await?;
        store::record_transaction(&self.owner_id, &record, &mut tx).await?;
        store::adjust_balance(&self.owner_id, -usd_spent, &mut tx).await?;
        tx.commit().await?;

        Ok(updated)
    }

    /// Sells `quantity` units at the current market price. The cost basis
    /// is untouched; the position is deleted once empty. Proceeds are
    /// credited exactly once, as a single balance delta.
    pub async fn sell(&self, asset_id: &str, quantity: Decimal) -> Result<SaleOutcome> {
        if quantity <= Decimal::ZERO {
            return Err(Error::msg(format!(
                "Sell quantity must be positive, got {}",
                quantity
            )));
        }

        let position = store::get_position(&self.pool, &self.owner_id, asset_id)
            .await?
            .ok_or_else(|| Error::msg(format!("No position held in '{}'", asset_id)))?;

        if quantity > *position.quantity() {
            return Err(Error::msg(format!(
                "Cannot sell {} units of '{}': only {} held",
                quantity,
                asset_id,
                position.quantity()
            )));
        }

        let snapshot = self.api.get_prices(&[asset_id.to_string()]).await?;
        let price = *snapshot
            .get(asset_id)
            .ok_or_else(|| Error::msg(format!("No price available for '{}'", asset_id)))?
            .price();

        let proceeds = quantity * price;
        let realized_gain = (price - position.average_cost_basis()) * quantity;
        let remaining = position.quantity() - quantity;

        let record = TransactionRecord::new(
            asset_id.to_string(),
            TransactionKind::Sell,
            quantity,
            price,
            proceeds,
            Utc::now(),
        );

        let mut tx = self.pool.begin().await?;
        if remaining.is_zero() {
            store::delete_position(&self.owner_id, asset_id, &mut tx).await?;
        } else {
            let reduced =
                Position::new(asset_id.to_string(), remaining, *position.average_cost_basis());
            store::upsert_position(&self.owner_id, &reduced, &mut tx).await?;
        }
        store::record_transaction(&self.owner_id, &record, &mut tx).await?;
        store::adjust_balance(&self.owner_id, proceeds, &mut tx).await?;
        tx.commit().await?;

        Ok(SaleOutcome::new(proceeds, realized_gain))
    }

    /// Portfolio totals against a fresh price snapshot.
    pub async fn summary(&self) -> Result<PortfolioSummary> {
        let positions = self.positions().await?;
        let asset_ids: Vec<String> = positions
            .iter()
            .map(|position| position.asset_id().clone())
            .collect();
        let snapshot = self.api.get_prices(&asset_ids).await?;

        Ok(calc::aggregate(&positions, &snapshot)?)
    }

    /// Equity curve over the requested window. Windows of a day or less
    /// have no daily history and collapse to a single point at today's
    /// value.
    pub async fn equity_curve(&self, days: u32) -> Result<EquitySeries> {
        let positions = self.positions().await?;

        if days <= 1 {
            let asset_ids: Vec<String> = positions
                .iter()
                .map(|position| position.asset_id().clone())
                .collect();
            let snapshot = self.api.get_prices(&asset_ids).await?;
            return Ok(calc::snapshot_series(
                &positions,
                &snapshot,
                Local::now().date_naive(),
            ));
        }

        let mut histories = HashMap::new();
        for position in &positions {
            match self.api.get_market_chart(position.asset_id(), days).await {
                Ok(history) => {
                    histories.insert(position.asset_id().clone(), history);
                }
                Err(err) => {
                    eprintln!(
                        "Warning: Failed to fetch history for '{}': {}",
                        position.asset_id(),
                        err
                    );
                }
            }
        }

        Ok(calc::build_series(&positions, &histories))
    }

    pub async fn transactions(&self, page: i64, page_limit: i64) -> Result<Vec<TransactionRecord>> {
        store::get_transactions(&self.pool, &self.owner_id, page, page_limit).await
    }

    pub async fn transaction_count(&self) -> Result<i64> {
        store::transaction_count(&self.pool, &self.owner_id).await
    }
}
