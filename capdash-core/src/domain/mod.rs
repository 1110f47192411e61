//! Domain types shared by both pipelines.

pub mod company;
pub mod comparison;
pub mod series;

pub use company::CompanyRecord;
pub use comparison::{Allocation, ComparisonResult};
pub use series::{CapPoint, MarketCapSeries, PriceHistory, PricePoint};
