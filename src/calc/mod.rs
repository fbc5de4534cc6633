pub mod accumulate;
pub mod aggregate;
pub mod series;
pub mod valuate;

pub use accumulate::accumulate;
pub use aggregate::{PortfolioSummary, aggregate};
pub use series::{build_series, snapshot_series};
pub use valuate::{Valuation, gain_percent, valuate};

use thiserror::Error;

/// Failures surfaced by the valuation engine. The engine never retries
/// or recovers; callers render "data unavailable" instead of a wrong
/// number.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CalcError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("percentage undefined for a zero denominator")]
    DivisionByZero,
}
