mod coingecko;
mod series;
