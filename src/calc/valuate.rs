use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Position;

use super::CalcError;

/// Per-position metrics for one price snapshot.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Valuation {
    current_value: Decimal,
    unrealized_gain: Decimal,
    /// `None` when the cost basis is zero: the percent has no defined
    /// value and must never leak into sums as NaN or infinity.
    unrealized_gain_percent: Option<Decimal>,
}

/// Percent change of `current_price` against `cost_basis`.
pub fn gain_percent(current_price: Decimal, cost_basis: Decimal) -> Result<Decimal, CalcError> {
    if cost_basis.is_zero() {
        return Err(CalcError::DivisionByZero);
    }
    Ok((current_price - cost_basis) / cost_basis * dec!(100))
}

/// Computes current value and unrealized gain for a single position.
pub fn valuate(position: &Position, current_price: Decimal) -> Result<Valuation, CalcError> {
    if current_price < Decimal::ZERO {
        return Err(CalcError::InvalidInput(format!(
            "current price must not be negative, got {}",
            current_price
        )));
    }

    let current_value = position.quantity() * current_price;
    let unrealized_gain = current_value - position.invested();
    let unrealized_gain_percent =
        gain_percent(current_price, *position.average_cost_basis()).ok();

    Ok(Valuation::new(
        current_value,
        unrealized_gain,
        unrealized_gain_percent,
    ))
}
