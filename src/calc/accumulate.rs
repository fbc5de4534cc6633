use rust_decimal::Decimal;

use crate::models::Position;

use super::CalcError;

/// Folds one buy into a position, recomputing the weighted-average cost
/// basis. `prior` is `None` on the first buy of an asset.
///
/// Sells never pass through here: they only reduce the held quantity and
/// leave the cost basis untouched. Realized gain is computed at sell time
/// and logged as a transaction, not stored on the position.
pub fn accumulate(
    prior: Option<&Position>,
    asset_id: &str,
    added_quantity: Decimal,
    added_usd_spent: Decimal,
) -> Result<Position, CalcError> {
    if added_quantity <= Decimal::ZERO {
        return Err(CalcError::InvalidInput(format!(
            "added quantity must be positive, got {}",
            added_quantity
        )));
    }
    if added_usd_spent < Decimal::ZERO {
        return Err(CalcError::InvalidInput(format!(
            "added USD spent must not be negative, got {}",
            added_usd_spent
        )));
    }

    match prior {
        None => Ok(Position::new(
            asset_id.to_string(),
            added_quantity,
            added_usd_spent / added_quantity,
        )),
        Some(prior) => {
            let new_quantity = prior.quantity() + added_quantity;
            let new_average_cost_basis =
                (prior.average_cost_basis() * prior.quantity() + added_usd_spent) / new_quantity;

            Ok(Position::new(
                prior.asset_id().clone(),
                new_quantity,
                new_average_cost_basis,
            ))
        }
    }
}
