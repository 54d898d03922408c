//! Timeframe fetch orchestration with last-request-wins semantics.
//!
//! [`FetchMachine`] holds the only mutable view state and performs every
//! transition; it does no I/O and can be driven directly in tests.
//! [`FetchController`] pairs it with a [`DataSource`] and hands out
//! [`PendingFetch`] futures that the caller awaits on its own event loop
//! (inline, `tokio::spawn`, or a `JoinSet`) and feeds back through
//! [`FetchController::complete`].
//!
//! ```text
//!            select / retry
//!   Idle ───────────────────▶ Loading ──ok──▶ Ready
//!                               ▲   └──err──▶ Error
//!                               └── select / retry from any state
//! ```
//!
//! Every request carries a [`RequestTag`] with a sequence number. A
//! completion is applied only if its sequence is the latest issued, so a slow
//! answer for an abandoned timeframe can never overwrite a newer one.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::align::{align, AlignmentReport};
use crate::data_source::{DataSource, SourceError};
use crate::stats::{summarize, ReturnSummary};
use crate::{AssetsInfo, CombinedSeries, PerformanceSnapshot, Timeframe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Idle,
    Loading,
    Ready,
    Error,
}

/// View state owned by the fetch machine and read by presentation.
///
/// The combined series survives `Loading` so the previous chart can stay on
/// screen, and is cleared on `Error` so a failure never shows another
/// timeframe's data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchState {
    timeframe: Timeframe,
    status: FetchStatus,
    combined_series: Option<CombinedSeries>,
    error_message: Option<String>,
}

impl FetchState {
    fn idle(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            status: FetchStatus::Idle,
            combined_series: None,
            error_message: None,
        }
    }

    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    pub const fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn combined_series(&self) -> Option<&CombinedSeries> {
        self.combined_series.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn summary(&self) -> ReturnSummary {
        self.combined_series
            .as_ref()
            .map(summarize)
            .unwrap_or_default()
    }

    /// Classify the state for rendering.
    pub fn view(&self) -> StateView<'_> {
        match self.status {
            FetchStatus::Idle => StateView::Idle,
            FetchStatus::Loading => StateView::Loading {
                previous: self.combined_series.as_ref(),
            },
            FetchStatus::Error => StateView::Failed {
                message: self.error_message.as_deref().unwrap_or("request failed"),
            },
            FetchStatus::Ready => match &self.combined_series {
                Some(series) if !series.is_empty() => StateView::Chart {
                    series,
                    summary: summarize(series),
                },
                _ => StateView::NoData,
            },
        }
    }
}

/// What presentation should show for a [`FetchState`].
#[derive(Debug, Clone, PartialEq)]
pub enum StateView<'a> {
    Idle,
    Loading {
        previous: Option<&'a CombinedSeries>,
    },
    /// Ready, but alignment produced no points.
    NoData,
    Chart {
        series: &'a CombinedSeries,
        summary: ReturnSummary,
    },
    Failed {
        message: &'a str,
    },
}

/// Identity of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RequestTag {
    seq: u64,
    timeframe: Timeframe,
}

impl RequestTag {
    pub const fn seq(self) -> u64 {
        self.seq
    }

    pub const fn timeframe(self) -> Timeframe {
        self.timeframe
    }
}

/// Outcome of feeding a completion to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(FetchStatus),
    /// A newer request was issued after this one.
    Discarded { stale: RequestTag, latest: RequestTag },
    /// No request has been issued with this tag.
    Unknown(RequestTag),
}

impl Resolution {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Pure transition logic for the comparison view.
#[derive(Debug, Clone)]
pub struct FetchMachine {
    state: FetchState,
    latest: Option<RequestTag>,
    next_seq: u64,
}

impl Default for FetchMachine {
    fn default() -> Self {
        Self::new(Timeframe::default())
    }
}

impl FetchMachine {
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            state: FetchState::idle(timeframe),
            latest: None,
            next_seq: 1,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn latest(&self) -> Option<RequestTag> {
        self.latest
    }

    /// Select `timeframe` and issue a request for it, superseding any other.
    pub fn select(&mut self, timeframe: Timeframe) -> RequestTag {
        self.state.timeframe = timeframe;
        self.issue()
    }

    /// Re-issue the request for the current timeframe.
    pub fn retry(&mut self) -> RequestTag {
        self.issue()
    }

    pub fn is_current(&self, tag: RequestTag) -> bool {
        self.latest == Some(tag)
    }

    pub fn resolve(
        &mut self,
        tag: RequestTag,
        result: Result<PerformanceSnapshot, SourceError>,
    ) -> Resolution {
        let Some(latest) = self.latest else {
            return Resolution::Unknown(tag);
        };
        if tag.seq >= self.next_seq {
            return Resolution::Unknown(tag);
        }
        if tag != latest {
            return Resolution::Discarded { stale: tag, latest };
        }

        match result.and_then(|snapshot| check_echo(tag, snapshot)) {
            Ok(snapshot) => {
                let report =
                    AlignmentReport::new(&snapshot.crypto_data, &snapshot.traditional_data);
                if report.mismatched_dates > 0 {
                    warn!(
                        timeframe = %tag.timeframe,
                        mismatched = report.mismatched_dates,
                        first = ?report.first_mismatch,
                        "positional join paired observations from different dates"
                    );
                }
                let series = align(&snapshot.crypto_data, &snapshot.traditional_data);
                debug!(
                    timeframe = %tag.timeframe,
                    points = series.len(),
                    dropped_crypto = report.dropped_crypto,
                    dropped_traditional = report.dropped_traditional,
                    "aligned performance series"
                );
                self.state.combined_series = Some(series);
                self.state.error_message = None;
                self.state.status = FetchStatus::Ready;
            }
            Err(error) => {
                self.state.combined_series = None;
                self.state.error_message = Some(error.to_string());
                self.state.status = FetchStatus::Error;
            }
        }

        Resolution::Applied(self.state.status)
    }

    fn issue(&mut self) -> RequestTag {
        let tag = RequestTag {
            seq: self.next_seq,
            timeframe: self.state.timeframe,
        };
        self.next_seq += 1;
        self.latest = Some(tag);
        self.state.status = FetchStatus::Loading;
        self.state.error_message = None;
        tag
    }
}

fn check_echo(
    tag: RequestTag,
    snapshot: PerformanceSnapshot,
) -> Result<PerformanceSnapshot, SourceError> {
    match snapshot.timeframe {
        Some(echoed) if echoed != tag.timeframe => Err(SourceError::decode(format!(
            "backend answered for {echoed} while {} was requested",
            tag.timeframe
        ))),
        _ => Ok(snapshot),
    }
}

type SnapshotFuture =
    Pin<Box<dyn Future<Output = Result<PerformanceSnapshot, SourceError>> + Send>>;

/// An issued request that has not been awaited yet.
#[must_use = "a pending fetch does nothing until awaited and completed"]
pub struct PendingFetch {
    tag: RequestTag,
    future: SnapshotFuture,
}

impl PendingFetch {
    pub fn tag(&self) -> RequestTag {
        self.tag
    }

    /// Drive the request to completion.
    pub async fn wait(self) -> Completion {
        Completion {
            tag: self.tag,
            result: self.future.await,
        }
    }
}

impl std::fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFetch")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// A finished request, ready to be fed back to the controller.
#[derive(Debug)]
pub struct Completion {
    pub tag: RequestTag,
    pub result: Result<PerformanceSnapshot, SourceError>,
}

/// Issues tagged requests against a [`DataSource`] and applies their results.
pub struct FetchController {
    source: Arc<dyn DataSource>,
    machine: FetchMachine,
}

impl FetchController {
    /// Idle controller on the default `1Y` timeframe.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self::with_timeframe(source, Timeframe::default())
    }

    pub fn with_timeframe(source: Arc<dyn DataSource>, timeframe: Timeframe) -> Self {
        Self {
            source,
            machine: FetchMachine::new(timeframe),
        }
    }

    pub fn state(&self) -> &FetchState {
        self.machine.state()
    }

    pub fn summary(&self) -> ReturnSummary {
        self.machine.state().summary()
    }

    /// Auto-select the initial timeframe, leaving `Idle`.
    pub fn start(&mut self) -> PendingFetch {
        let timeframe = self.machine.state().timeframe();
        self.select_timeframe(timeframe)
    }

    pub fn select_timeframe(&mut self, timeframe: Timeframe) -> PendingFetch {
        let tag = self.machine.select(timeframe);
        self.dispatch(tag)
    }

    pub fn retry(&mut self) -> PendingFetch {
        let tag = self.machine.retry();
        self.dispatch(tag)
    }

    pub fn complete(&mut self, completion: Completion) -> Resolution {
        let Completion { tag, result } = completion;
        let failure = result.as_ref().err().map(ToString::to_string);
        let resolution = self.machine.resolve(tag, result);

        match resolution {
            Resolution::Applied(FetchStatus::Error) => warn!(
                seq = tag.seq,
                timeframe = %tag.timeframe,
                error = failure.as_deref().unwrap_or("backend echoed another timeframe"),
                "performance fetch failed"
            ),
            Resolution::Applied(status) => info!(
                seq = tag.seq,
                timeframe = %tag.timeframe,
                status = ?status,
                points = self.state().combined_series().map_or(0, CombinedSeries::len),
                "performance fetch applied"
            ),
            Resolution::Discarded { stale, latest } => warn!(
                stale_seq = stale.seq,
                stale_timeframe = %stale.timeframe,
                latest_seq = latest.seq,
                latest_timeframe = %latest.timeframe,
                "discarding stale performance response"
            ),
            Resolution::Unknown(tag) => warn!(seq = tag.seq, "completion for unknown request"),
        }

        resolution
    }

    /// Await `pending` inline and apply it.
    pub async fn run(&mut self, pending: PendingFetch) -> Resolution {
        let completion = pending.wait().await;
        self.complete(completion)
    }

    /// Asset names and descriptions for display; does not touch fetch state.
    pub async fn load_assets_info(&self) -> Result<AssetsInfo, SourceError> {
        self.source.assets_info().await
    }

    fn dispatch(&self, tag: RequestTag) -> PendingFetch {
        debug!(
            source = self.source.name(),
            seq = tag.seq,
            timeframe = %tag.timeframe,
            "issuing performance request"
        );
        let source = Arc::clone(&self.source);
        PendingFetch {
            tag,
            future: Box::pin(async move { source.performance(tag.timeframe).await }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Observation;

    fn obs(date: &str, normalized_return: f64) -> Observation {
        Observation::new(date, normalized_return, 100.0).expect("valid observation")
    }

    fn snapshot(returns: &[f64]) -> PerformanceSnapshot {
        let series: Vec<Observation> = returns
            .iter()
            .enumerate()
            .map(|(i, r)| obs(&format!("2024-01-{:02}", i + 1), *r))
            .collect();
        PerformanceSnapshot::new(series.clone(), series)
    }

    #[test]
    fn starts_idle_on_one_year() {
        let machine = FetchMachine::default();
        assert_eq!(machine.state().status(), FetchStatus::Idle);
        assert_eq!(machine.state().timeframe(), Timeframe::OneYear);
        assert_eq!(machine.state().view(), StateView::Idle);
        assert_eq!(machine.latest(), None);
    }

    #[test]
    fn select_enters_loading_and_clears_error() {
        let mut machine = FetchMachine::default();
        let tag = machine.select(Timeframe::All);
        machine.resolve(tag, Err(SourceError::network("down")));
        assert_eq!(machine.state().status(), FetchStatus::Error);

        machine.select(Timeframe::OneMonth);
        assert_eq!(machine.state().status(), FetchStatus::Loading);
        assert_eq!(machine.state().error_message(), None);
        assert_eq!(machine.state().timeframe(), Timeframe::OneMonth);
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut machine = FetchMachine::default();
        let first = machine.select(Timeframe::OneYear);
        let second = machine.retry();
        assert!(second.seq() > first.seq());
        assert_eq!(second.timeframe(), Timeframe::OneYear);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut machine = FetchMachine::default();
        let old = machine.select(Timeframe::OneYear);
        let new = machine.select(Timeframe::OneMonth);

        let resolution = machine.resolve(old, Ok(snapshot(&[1.0, 2.0])));

        assert_eq!(
            resolution,
            Resolution::Discarded {
                stale: old,
                latest: new
            }
        );
        assert_eq!(machine.state().status(), FetchStatus::Loading);
        assert!(machine.state().combined_series().is_none());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut machine = FetchMachine::default();
        let forged = RequestTag {
            seq: 99,
            timeframe: Timeframe::OneYear,
        };
        assert_eq!(
            machine.resolve(forged, Ok(snapshot(&[1.0]))),
            Resolution::Unknown(forged)
        );

        machine.select(Timeframe::OneYear);
        assert_eq!(
            machine.resolve(forged, Ok(snapshot(&[1.0]))),
            Resolution::Unknown(forged)
        );
    }

    #[test]
    fn loading_keeps_previous_series_and_error_clears_it() {
        let mut machine = FetchMachine::default();
        let tag = machine.select(Timeframe::OneYear);
        machine.resolve(tag, Ok(snapshot(&[1.0, 3.0])));
        assert_eq!(machine.state().summary().crypto_return, Some(3.0));

        let tag = machine.select(Timeframe::All);
        assert!(matches!(
            machine.state().view(),
            StateView::Loading { previous: Some(series) } if series.len() == 2
        ));

        machine.resolve(tag, Err(SourceError::status(500, "/api/performance/ALL")));
        assert!(machine.state().combined_series().is_none());
        assert_eq!(machine.state().summary(), ReturnSummary::default());
        assert!(matches!(
            machine.state().view(),
            StateView::Failed { message } if message.contains("500")
        ));
    }

    #[test]
    fn empty_alignment_is_no_data_not_error() {
        let mut machine = FetchMachine::default();
        let tag = machine.select(Timeframe::OneMonth);
        let resolution = machine.resolve(tag, Ok(snapshot(&[])));

        assert_eq!(resolution, Resolution::Applied(FetchStatus::Ready));
        assert_eq!(machine.state().view(), StateView::NoData);
    }

    #[test]
    fn mismatched_echo_becomes_error() {
        let mut machine = FetchMachine::default();
        let tag = machine.select(Timeframe::OneMonth);
        let resolution = machine.resolve(tag, Ok(snapshot(&[1.0]).with_timeframe(Timeframe::All)));

        assert_eq!(resolution, Resolution::Applied(FetchStatus::Error));
        assert!(machine
            .state()
            .error_message()
            .is_some_and(|message| message.contains("ALL")));
    }
}
