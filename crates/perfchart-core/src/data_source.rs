//! Data source trait and error types.
//!
//! A [`DataSource`] exposes the two read endpoints the comparison view needs:
//!
//! | Endpoint | Response | Description |
//! |----------|----------|-------------|
//! | Assets info | [`AssetsInfo`] | Names and descriptions for display |
//! | Performance | [`PerformanceSnapshot`] | Both raw series for a [`Timeframe`] |
//!
//! Sources own no client-side state; staleness and alignment are handled by
//! the [`FetchController`](crate::FetchController).

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{AssetsInfo, PerformanceSnapshot, Timeframe};

/// Adapter-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Request failed in transport or the upstream answered non-2xx.
    Network,
    /// Response body did not match the documented JSON contract.
    Decode,
}

/// Structured source error surfaced to the fetch state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    status: Option<u16>,
}

impl SourceError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    pub fn status(status: u16, url: &str) -> Self {
        Self {
            kind: SourceErrorKind::Network,
            message: format!("upstream returned status {status} for {url}"),
            status: Some(status),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Decode,
            message: message.into(),
            status: None,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status when the failure was a non-2xx answer.
    pub const fn http_status(&self) -> Option<u16> {
        self.status
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::Network => "source.network",
            SourceErrorKind::Decode => "source.decode",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Source adapter contract.
///
/// Implementations must be `Send + Sync`: the controller shares one source
/// across every in-flight request.
pub trait DataSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetches display metadata for both assets.
    fn assets_info<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<AssetsInfo, SourceError>> + Send + 'a>>;

    /// Fetches both raw series for `timeframe`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] with [`SourceErrorKind::Network`] when the
    /// request fails or the upstream answers non-2xx, and
    /// [`SourceErrorKind::Decode`] when the body is not the documented shape.
    fn performance<'a>(
        &'a self,
        timeframe: Timeframe,
    ) -> Pin<Box<dyn Future<Output = Result<PerformanceSnapshot, SourceError>> + Send + 'a>>;
}
