pub mod portfolio;

pub use portfolio::{Portfolio, SaleOutcome};
