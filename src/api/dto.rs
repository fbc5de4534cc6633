use derive_getters::Getters;
use rust_decimal::Decimal;
use serde::Deserialize;

/// One entry of `/simple/price?vs_currencies=usd&include_24hr_change=true`.
/// Both fields can be absent for thinly traded coins.
#[derive(Clone, Copy, Debug, Deserialize, Getters)]
pub struct SimplePriceDto {
    usd: Option<Decimal>,
    usd_24h_change: Option<Decimal>,
}

impl SimplePriceDto {
    #[cfg(test)]
    pub fn new(usd: Option<Decimal>, usd_24h_change: Option<Decimal>) -> Self {
        Self {
            usd,
            usd_24h_change,
        }
    }
}

/// Response of `/coins/{id}/market_chart`. Prices are
/// `[timestamp_ms, price]` pairs, one per day plus a trailing
/// same-day sample for the current moment.
#[derive(Clone, Debug, Deserialize, Getters)]
pub struct MarketChartDto {
    prices: Vec<(i64, Decimal)>,
}

impl MarketChartDto {
    #[cfg(test)]
    pub fn new(prices: Vec<(i64, Decimal)>) -> Self {
        Self { prices }
    }
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct SearchResponseDto {
    coins: Vec<CoinSearchDto>,
}

#[derive(Clone, Debug, Deserialize, Getters)]
pub struct CoinSearchDto {
    id: String,
    name: String,
    symbol: String,
    market_cap_rank: Option<i64>,
}
