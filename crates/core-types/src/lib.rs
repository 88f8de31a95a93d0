pub mod enums;
pub mod error;
pub mod filter;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CurrencyMode, FilterDimension, PriceType};
pub use error::CoreError;
pub use filter::FilterState;
pub use structs::{CanonicalRow, PriceSet, RawRecord};
