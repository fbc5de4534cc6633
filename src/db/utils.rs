use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::{Position, TransactionKind, TransactionRecord};

pub fn parse_i64_from_row(row: &SqliteRow, column: &str) -> Result<i64> {
    row.try_get::<i64, _>(column)
        .with_context(|| format!("Failed to parse i64 from column '{}'", column))
}

pub fn parse_string_from_row(row: &SqliteRow, column: &str) -> Result<String> {
    row.try_get::<String, _>(column)
        .with_context(|| format!("Failed to parse String from column '{}'", column))
}

pub fn parse_f64_from_row(row: &SqliteRow, column: &str) -> Result<f64> {
    let value: f64 = row
        .try_get(column)
        .with_context(|| format!("Failed to parse f64 from column '{}'", column))?;
    Ok(value)
}

pub fn parse_decimal_from_row(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let value = parse_f64_from_row(row, column)?;
    Decimal::from_f64(value)
        .with_context(|| format!("Failed to convert f64 to Decimal for column '{}'", column))
}

pub fn parse_datetime_from_row(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    row.try_get::<DateTime<Utc>, _>(column)
        .with_context(|| format!("Failed to parse DateTime from column '{}'", column))
}

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> Result<f64> {
    value
        .round_dp(8)
        .to_f64()
        .with_context(|| format!("Failed to convert {} '{}' to f64", field_name, value))
}

/// Storage-boundary validation: rows with negative quantities or costs
/// never become typed records.
pub fn parse_position(row: &SqliteRow) -> Result<Position> {
    let asset_id = parse_string_from_row(row, "asset_id")?;
    let quantity = parse_decimal_from_row(row, "quantity")?;
    let average_cost_basis = parse_decimal_from_row(row, "average_cost_basis")?;

    if quantity < Decimal::ZERO || average_cost_basis < Decimal::ZERO {
        return Err(anyhow::anyhow!(
            "Corrupt position row for asset '{}': negative quantity or cost basis",
            asset_id
        ));
    }

    Ok(Position::new(asset_id, quantity, average_cost_basis))
}

pub fn parse_transaction(row: &SqliteRow) -> Result<TransactionRecord> {
    let asset_id = parse_string_from_row(row, "asset_id")?;
    let kind = TransactionKind::parse_str(&parse_string_from_row(row, "kind")?)?;
    let quantity = parse_decimal_from_row(row, "quantity")?;
    let unit_price = parse_decimal_from_row(row, "unit_price")?;
    let usd_amount = parse_decimal_from_row(row, "usd_amount")?;
    let timestamp = parse_datetime_from_row(row, "timestamp")?;

    Ok(TransactionRecord::new(
        asset_id, kind, quantity, unit_price, usd_amount, timestamp,
    ))
}
