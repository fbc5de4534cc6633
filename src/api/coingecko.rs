use std::collections::HashMap;

use anyhow::{Context, Error, Result};
use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::models::{AssetPrice, PricePoint, PriceSnapshot};

use super::dto::{CoinSearchDto, MarketChartDto, SearchResponseDto, SimplePriceDto};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko public API client. The demo key is optional; without it the
/// unauthenticated rate limits apply.
#[derive(Clone, Debug)]
pub struct CoinGeckoApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var("COINGECKO_API_KEY").ok())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let mut url = format!("{}{}", self.base_url, endpoint);
        if let Some(api_key) = &self.api_key {
            url.push_str(&format!("&x_cg_demo_api_key={}", api_key));
        }

        let res = self.client.get(&url).send().await?;
        if !res.status().is_success() {
            return Err(Error::msg(format!("Request failed: {}", res.status())));
        }

        Ok(res.json::<T>().await?)
    }

    /// Current USD prices with 24h change for a set of coin ids. The
    /// response may cover only a subset of the requested ids; absence is
    /// the signal for missing data, never an error.
    pub async fn get_prices(&self, asset_ids: &[String]) -> Result<PriceSnapshot> {
        if asset_ids.is_empty() {
            return Ok(PriceSnapshot::default());
        }

        let endpoint = format!(
            "/simple/price?ids={}&vs_currencies=usd&include_24hr_change=true",
            asset_ids.join(",")
        );
        let data: HashMap<String, SimplePriceDto> = self
            .get_json(&endpoint)
            .await
            .with_context(|| "Failed to fetch coin prices")?;

        Ok(snapshot_from_dtos(data))
    }

    /// Daily price history over the last `days` days, one point per
    /// calendar day.
    pub async fn get_market_chart(&self, asset_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let endpoint = format!(
            "/coins/{}/market_chart?vs_currency=usd&days={}&interval=daily",
            asset_id, days
        );
        let data: MarketChartDto = self
            .get_json(&endpoint)
            .await
            .with_context(|| format!("Failed to fetch market chart for '{}'", asset_id))?;

        points_from_chart(&data)
    }

    /// Search coins by name or symbol.
    pub async fn search(&self, query: &str) -> Result<Vec<CoinSearchDto>> {
        let endpoint = format!("/search?query={}", query);
        let data: SearchResponseDto = self
            .get_json(&endpoint)
            .await
            .with_context(|| format!("Failed to search coins for '{}'", query))?;

        Ok(data.coins().clone())
    }
}

impl Default for CoinGeckoApi {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Entries without a USD price are dropped; a missing 24h change is read
/// as zero movement.
pub(crate) fn snapshot_from_dtos(data: HashMap<String, SimplePriceDto>) -> PriceSnapshot {
    let mut prices = HashMap::new();
    for (asset_id, dto) in data {
        let Some(price) = *dto.usd() else {
            continue;
        };
        let change = (*dto.usd_24h_change()).unwrap_or(Decimal::ZERO);
        prices.insert(asset_id, AssetPrice::new(price, change));
    }

    PriceSnapshot::new(prices)
}

/// Normalizes millisecond timestamps to calendar days. CoinGecko appends
/// a same-day sample for the current moment; later samples replace
/// earlier ones so each day appears once.
pub(crate) fn points_from_chart(data: &MarketChartDto) -> Result<Vec<PricePoint>> {
    let mut points: Vec<PricePoint> = Vec::new();

    for (timestamp_ms, price) in data.prices() {
        let date = DateTime::from_timestamp_millis(*timestamp_ms)
            .with_context(|| format!("Invalid market chart timestamp {}", timestamp_ms))?
            .date_naive();

        match points.last_mut() {
            Some(last) if *last.date() == date => *last = PricePoint::new(date, *price),
            _ => points.push(PricePoint::new(date, *price)),
        }
    }

    Ok(points)
}
