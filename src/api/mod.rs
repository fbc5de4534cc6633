pub mod coingecko;
pub mod dto;

pub use coingecko::CoinGeckoApi;
