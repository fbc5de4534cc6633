pub mod equity;
pub mod position;
pub mod price;
pub mod transaction;

pub use equity::{EquityPoint, EquitySeries};
pub use position::Position;
pub use price::{AssetPrice, PricePoint, PriceSnapshot};
pub use transaction::{TransactionKind, TransactionRecord};
