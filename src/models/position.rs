use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single held asset: total units and the weighted-average USD price
/// paid per unit across all buys. Sells reduce `quantity` only; the
/// cost basis never changes on a sell.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct Position {
    asset_id: String,
    quantity: Decimal,
    average_cost_basis: Decimal,
}

impl Position {
    /// Total USD spent on the units still held.
    pub fn invested(&self) -> Decimal {
        self.quantity * self.average_cost_basis
    }

    /// A position with no units left is closed and may be removed.
    pub fn is_closed(&self) -> bool {
        self.quantity.is_zero()
    }
}
