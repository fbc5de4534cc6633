use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Position, PriceSnapshot};

use super::{CalcError, valuate};

/// Portfolio-level totals folded from per-position valuations.
///
/// Positions absent from the snapshot are valued at zero and their asset
/// ids listed in `missing_prices`, so callers can tell "no price data"
/// apart from "priced at zero".
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct PortfolioSummary {
    total_invested: Decimal,
    total_current_value: Decimal,
    total_unrealized_gain: Decimal,
    /// `None` when nothing was invested.
    total_unrealized_gain_percent: Option<Decimal>,
    change_24h_usd: Decimal,
    change_24h_percent: Decimal,
    missing_prices: Vec<String>,
}

/// Folds all positions into portfolio totals for one price snapshot.
/// The fold is commutative over positions; ordering carries no meaning.
pub fn aggregate(
    positions: &[Position],
    prices: &PriceSnapshot,
) -> Result<PortfolioSummary, CalcError> {
    let mut total_invested = Decimal::ZERO;
    let mut total_current_value = Decimal::ZERO;
    let mut change_24h_usd = Decimal::ZERO;
    let mut missing_prices = Vec::new();

    for position in positions {
        total_invested += position.invested();

        match prices.get(position.asset_id()) {
            Some(asset_price) => {
                let valuation = valuate(position, *asset_price.price())?;
                total_current_value += valuation.current_value();
                // The published 24h swing applies to the asset's current
                // value, not to its cost basis.
                change_24h_usd +=
                    valuation.current_value() * (asset_price.change_24h_percent() / dec!(100));
            }
            None => missing_prices.push(position.asset_id().clone()),
        }
    }

    let total_unrealized_gain = total_current_value - total_invested;
    let total_unrealized_gain_percent = if total_invested.is_zero() {
        None
    } else {
        Some(total_unrealized_gain / total_invested * dec!(100))
    };
    let change_24h_percent = if total_current_value.is_zero() {
        Decimal::ZERO
    } else {
        change_24h_usd / total_current_value * dec!(100)
    };

    Ok(PortfolioSummary::new(
        total_invested,
        total_current_value,
        total_unrealized_gain,
        total_unrealized_gain_percent,
        change_24h_usd,
        change_24h_percent,
        missing_prices,
    ))
}
