use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{EquityPoint, EquitySeries, Position, PricePoint, PriceSnapshot};

/// Merges per-asset daily price histories into a single equity curve.
///
/// Each history sample contributes `quantity * price` under its calendar-day
/// key; days are summed across assets. An asset with no sample for a day
/// another asset does have simply contributes nothing for that day. Output
/// is sorted ascending by date and is a pure function of its inputs.
pub fn build_series(
    positions: &[Position],
    histories: &HashMap<String, Vec<PricePoint>>,
) -> EquitySeries {
    let mut merged: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for position in positions {
        let Some(history) = histories.get(position.asset_id()) else {
            continue;
        };
        for point in history {
            *merged.entry(*point.date()).or_insert(Decimal::ZERO) +=
                position.quantity() * point.price();
        }
    }

    merged
        .into_iter()
        .map(|(date, total_value)| EquityPoint::new(date, total_value))
        .collect()
}

/// Degenerate single-day curve for windows with no history available:
/// one point at `today` worth the portfolio's current value. Positions
/// missing from the snapshot contribute zero, as in aggregation.
pub fn snapshot_series(
    positions: &[Position],
    prices: &PriceSnapshot,
    today: NaiveDate,
) -> EquitySeries {
    let total_value = positions
        .iter()
        .map(|position| match prices.get(position.asset_id()) {
            Some(asset_price) => position.quantity() * asset_price.price(),
            None => Decimal::ZERO,
        })
        .sum();

    vec![EquityPoint::new(today, total_value)]
}
