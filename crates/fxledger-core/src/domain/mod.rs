//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated, uppercase currency symbol |
//! | [`CurrencyRecord`] | Currency reference data stored in the registry |
//! | [`PriceQuotation`] | Buy/sell price observed at a Unix timestamp |
//! | [`TimeWindow`] | Half-open `[start, end)` interval of Unix seconds |

mod models;
mod symbol;
mod window;

pub use models::{CurrencyRecord, PriceQuotation};
pub use symbol::Symbol;
pub use window::TimeWindow;
