use std::collections::HashMap;

use chrono::NaiveDate;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current market price of one asset and its published 24h percent change.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct AssetPrice {
    price: Decimal,
    change_24h_percent: Decimal,
}

/// One point-in-time read of market prices for a set of assets.
/// Valid for exactly one aggregation pass; replaced wholesale on refresh,
/// never mutated in place. Absent assets are the signal for missing data.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PriceSnapshot {
    prices: HashMap<String, AssetPrice>,
}

impl PriceSnapshot {
    pub fn new(prices: HashMap<String, AssetPrice>) -> Self {
        Self { prices }
    }

    pub fn get(&self, asset_id: &str) -> Option<&AssetPrice> {
        self.prices.get(asset_id)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

/// One daily sample of an asset's historical price.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct PricePoint {
    date: NaiveDate,
    price: Decimal,
}
