use anyhow::{Context, Error, Result};
use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite};

use crate::models::{Position, TransactionRecord};

use super::utils::{
    decimal_to_f64, parse_decimal_from_row, parse_i64_from_row, parse_position, parse_transaction,
};

// Reads go through the pool; writes take an open sqlx transaction so the
// caller controls what commits together. Every call names its owner
// explicitly; there is no ambient signed-in user.

pub async fn create_user(
    connection: &Pool<Sqlite>,
    owner_id: &str,
    starting_balance: Decimal,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO users (owner_id, balance)
        VALUES (?, ?)
        "#,
    )
    .bind(owner_id)
    .bind(decimal_to_f64(starting_balance, "starting balance")?)
    .execute(connection)
    .await?;

    Ok(())
}

pub async fn get_balance(connection: &Pool<Sqlite>, owner_id: &str) -> Result<Decimal> {
    let row = sqlx::query(
        r#"
        SELECT balance FROM users
        WHERE owner_id = ?
        "#,
    )
    .bind(owner_id)
    .fetch_one(connection)
    .await
    .with_context(|| format!("No user profile for owner '{}'", owner_id))?;

    parse_decimal_from_row(&row, "balance")
}

/// Applies a signed delta in a single in-place update. The balance is
/// never read back and re-added, so sale proceeds cannot be credited
/// twice.
pub async fn adjust_balance(
    owner_id: &str,
    delta: Decimal,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE users SET balance = balance + ?
        WHERE owner_id = ?
        "#,
    )
    .bind(decimal_to_f64(delta, "balance delta")?)
    .bind(owner_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::msg(format!(
            "No user profile for owner '{}'",
            owner_id
        )));
    }

    Ok(())
}

pub async fn get_positions(connection: &Pool<Sqlite>, owner_id: &str) -> Result<Vec<Position>> {
    let rows = sqlx::query(
        r#"
        SELECT asset_id, quantity, average_cost_basis FROM positions
        WHERE owner_id = ?
        ORDER BY id
        "#,
    )
    .bind(owner_id)
    .fetch_all(connection)
    .await?;

    rows.iter().map(parse_position).collect()
}

pub async fn get_position(
    connection: &Pool<Sqlite>,
    owner_id: &str,
    asset_id: &str,
) -> Result<Option<Position>> {
    let row = sqlx::query(
        r#"
        SELECT asset_id, quantity, average_cost_basis FROM positions
        WHERE owner_id = ? AND asset_id = ?
        "#,
    )
    .bind(owner_id)
    .bind(asset_id)
    .fetch_optional(connection)
    .await?;

    row.as_ref().map(parse_position).transpose()
}

pub async fn upsert_position(
    owner_id: &str,
    position: &Position,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO positions (owner_id, asset_id, quantity, average_cost_basis)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(owner_id, asset_id) DO UPDATE SET
            quantity = excluded.quantity,
            average_cost_basis = excluded.average_cost_basis,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(owner_id)
    .bind(position.asset_id())
    .bind(decimal_to_f64(*position.quantity(), "quantity")?)
    .bind(decimal_to_f64(*position.average_cost_basis(), "cost basis")?)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn delete_position(
    owner_id: &str,
    asset_id: &str,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM positions
        WHERE owner_id = ? AND asset_id = ?
        "#,
    )
    .bind(owner_id)
    .bind(asset_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

pub async fn record_transaction(
    owner_id: &str,
    record: &TransactionRecord,
    tx: &mut sqlx::Transaction<'_, Sqlite>,
) -> Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO transactions
        (owner_id, asset_id, kind, quantity, unit_price, usd_amount, timestamp)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(owner_id)
    .bind(record.asset_id())
    .bind(record.kind().to_str())
    .bind(decimal_to_f64(*record.quantity(), "quantity")?)
    .bind(decimal_to_f64(*record.unit_price(), "unit price")?)
    .bind(decimal_to_f64(*record.usd_amount(), "usd amount")?)
    .bind(record.timestamp())
    .execute(&mut **tx)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Newest first; `page` starts at 1.
pub async fn get_transactions(
    connection: &Pool<Sqlite>,
    owner_id: &str,
    page: i64,
    page_limit: i64,
) -> Result<Vec<TransactionRecord>> {
    if page < 1 || page_limit < 1 {
        return Err(Error::msg(format!(
            "Invalid pagination: page {}, limit {}",
            page, page_limit
        )));
    }

    let rows = sqlx::query(
        r#"
        SELECT asset_id, kind, quantity, unit_price, usd_amount, timestamp
        FROM transactions
        WHERE owner_id = ?
        ORDER BY timestamp DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(owner_id)
    .bind(page_limit)
    .bind((page - 1) * page_limit)
    .fetch_all(connection)
    .await?;

    rows.iter().map(parse_transaction).collect()
}

pub async fn transaction_count(connection: &Pool<Sqlite>, owner_id: &str) -> Result<i64> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) AS count FROM transactions
        WHERE owner_id = ?
        "#,
    )
    .bind(owner_id)
    .fetch_one(connection)
    .await?;

    parse_i64_from_row(&row, "count")
}
