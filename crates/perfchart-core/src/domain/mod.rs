//! # Domain Models
//!
//! Wire and aligned types for the crypto vs. 60/40 comparison.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observation`] | One day's price and cumulative return for an asset |
//! | [`AssetSeries`] | Chronological observations for one asset |
//! | [`PerformanceSnapshot`] | Both raw series as returned by the backend |
//! | [`CombinedPoint`] | Both assets at one aligned index |
//! | [`CombinedSeries`] | Aligned sequence for plotting and summaries |
//! | [`Timeframe`] | Reporting window token (`1M`, `6M`, `1Y`, `ALL`) |
//! | [`AssetsInfo`] | Display metadata for both assets |
//!
//! Upstream observations are decoded leniently. Locally constructed ones go
//! through [`Observation::new`], which rejects non-finite values and
//! non-positive prices.

mod combined;
mod models;
mod timeframe;

pub use combined::{CombinedPoint, CombinedSeries};
pub(crate) use models::format_calendar_date;
pub use models::{AssetDescriptor, AssetSeries, AssetsInfo, Observation, PerformanceSnapshot};
pub use timeframe::Timeframe;
