use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total portfolio value on one calendar day.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct EquityPoint {
    date: NaiveDate,
    total_value: Decimal,
}

/// Chart-ready equity curve: one point per distinct calendar day,
/// sorted ascending by date.
pub type EquitySeries = Vec<EquityPoint>;
