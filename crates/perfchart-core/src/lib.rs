//! # Perfchart Core
//!
//! Alignment engine and fetch state machine behind the crypto vs. 60/40
//! return comparison.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Data sources (REST backend, offline demo) |
//! | [`align`] | Positional join of the two raw series |
//! | [`config`] | Backend url and timeout settings |
//! | [`controller`] | Fetch state machine with last-request-wins guard |
//! | [`data_source`] | Data source trait and errors |
//! | [`domain`] | Observations, combined points, timeframes |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`stats`] | Headline return extraction |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use perfchart_core::{BackendAdapter, BackendConfig, FetchController, StateView};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = BackendAdapter::new(BackendConfig::from_env()?);
//!     let mut controller = FetchController::new(Arc::new(source));
//!
//!     let pending = controller.start();
//!     controller.run(pending).await;
//!
//!     if let StateView::Chart { summary, .. } = controller.state().view() {
//!         println!("crypto: {:?}", summary.crypto_return);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Presentation   │  (perfchart-cli)
//! └────────┬────────┘
//!          │ select / retry
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ FetchController │────▶│ SeriesAligner    │
//! │  (FetchMachine) │     │ StatsExtractor   │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Data Source     │────▶│ HTTP Client      │
//! │ (Adapter Trait) │     │ (reqwest/canned) │
//! └─────────────────┘     └──────────────────┘
//! ```

pub mod adapters;
pub mod align;
pub mod config;
pub mod controller;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod stats;

pub use adapters::{BackendAdapter, DemoAdapter};

pub use align::{align, date_mismatches, AlignmentReport, DateMismatch};

pub use config::BackendConfig;

pub use controller::{
    Completion, FetchController, FetchMachine, FetchState, FetchStatus, PendingFetch,
    RequestTag, Resolution, StateView,
};

pub use data_source::{DataSource, SourceError, SourceErrorKind};

pub use domain::{
    AssetDescriptor, AssetSeries, AssetsInfo, CombinedPoint, CombinedSeries, Observation,
    PerformanceSnapshot, Timeframe,
};

pub use error::ValidationError;

pub use http_client::{
    CannedHttpClient, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use stats::{summarize, ReturnSummary};
