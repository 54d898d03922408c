use serde::Serialize;

use crate::CombinedSeries;

/// Headline cumulative returns for the active timeframe.
///
/// `None` means "no data yet"; callers hide the figure instead of printing NaN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReturnSummary {
    pub crypto_return: Option<f64>,
    pub traditional_return: Option<f64>,
}

/// Latest aligned point's returns, or `None` for both on an empty series.
pub fn summarize(series: &CombinedSeries) -> ReturnSummary {
    match series.last() {
        Some(point) => ReturnSummary {
            crypto_return: Some(point.crypto),
            traditional_return: Some(point.traditional),
        },
        None => ReturnSummary::default(),
    }
}
