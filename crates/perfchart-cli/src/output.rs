use std::io::{self, Write};

use perfchart_core::{
    summarize, AssetsInfo, CombinedPoint, FetchState, FetchStatus, ReturnSummary, StateView,
    Timeframe,
};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Rendering options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub rows: usize,
}

/// `summary` and `points` always belong to `timeframe`; a series kept from an
/// earlier window while loading is reported under `previous`.
#[derive(Debug, Serialize)]
struct StateOutput<'a> {
    timeframe: Timeframe,
    status: FetchStatus,
    summary: ReturnSummary,
    points: &'a [CombinedPoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    previous: Option<PreviousOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assets: Option<&'a AssetsInfo>,
}

#[derive(Debug, Serialize)]
struct PreviousOutput<'a> {
    summary: ReturnSummary,
    points: &'a [CombinedPoint],
}

impl<'a> StateOutput<'a> {
    fn new(state: &'a FetchState, assets: Option<&'a AssetsInfo>) -> Self {
        let mut output = Self {
            timeframe: state.timeframe(),
            status: state.status(),
            summary: ReturnSummary::default(),
            points: &[],
            previous: None,
            error: state.error_message(),
            assets,
        };
        match state.view() {
            StateView::Chart { series, summary } => {
                output.summary = summary;
                output.points = series.points();
            }
            StateView::Loading {
                previous: Some(series),
            } if !series.is_empty() => {
                output.previous = Some(PreviousOutput {
                    summary: summarize(series),
                    points: series.points(),
                });
            }
            _ => {}
        }
        output
    }
}

pub fn render_state(
    state: &FetchState,
    assets: Option<&AssetsInfo>,
    options: RenderOptions,
) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match options.format {
        OutputFormat::Json => {
            write_json(&mut stdout, &StateOutput::new(state, assets), options.pretty)?;
        }
        OutputFormat::Table => {
            for line in state_lines(state, assets, options.rows) {
                writeln!(stdout, "{line}")?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}

pub fn render_assets(info: &AssetsInfo, options: RenderOptions) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    match options.format {
        OutputFormat::Json => write_json(&mut stdout, info, options.pretty)?,
        OutputFormat::Table => {
            for (label, asset) in [("crypto", &info.crypto), ("traditional", &info.traditional)] {
                let symbol = asset
                    .symbol
                    .as_deref()
                    .map(|s| format!(" ({s})"))
                    .unwrap_or_default();
                writeln!(stdout, "{label:<12} {}{symbol}", asset.name)?;
                if !asset.description.is_empty() {
                    writeln!(stdout, "{:<12} {}", "", asset.description)?;
                }
            }
        }
    }
    stdout.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn state_lines(state: &FetchState, assets: Option<&AssetsInfo>, rows: usize) -> Vec<String> {
    let (crypto_label, traditional_label) = labels(assets);
    let header = format!("[{}]", state.timeframe());

    match state.view() {
        StateView::Idle => vec![format!("{header} idle")],
        StateView::Loading { previous } => {
            let mut lines = vec![format!("{header} loading...")];
            if let Some(series) = previous.filter(|series| !series.is_empty()) {
                lines.push(format!("{header} showing previous data ({} points)", series.len()));
            }
            lines
        }
        StateView::NoData => vec![format!("{header} no data for this timeframe")],
        StateView::Failed { message } => vec![
            format!("{header} error: {message}"),
            String::from("type 'r' to retry, or pick another timeframe"),
        ],
        StateView::Chart { series, summary } => {
            let mut lines = vec![format!(
                "{header} {crypto_label}: {}   {traditional_label}: {}",
                format_return(summary.crypto_return),
                format_return(summary.traditional_return),
            )];
            lines.push(format!(
                "{:<12} {:>10} {:>10} {:>14} {:>12}",
                "date", "crypto", "60/40", "crypto price", "60/40 price"
            ));
            let skip = series.len().saturating_sub(rows);
            lines.extend(series.iter().skip(skip).map(|point| {
                format!(
                    "{:<12} {:>10} {:>10} {:>14.2} {:>12.2}",
                    point.date,
                    format_return(Some(point.crypto)),
                    format_return(Some(point.traditional)),
                    point.crypto_price,
                    point.traditional_price,
                )
            }));
            lines
        }
    }
}

fn labels(assets: Option<&AssetsInfo>) -> (&str, &str) {
    match assets {
        Some(info) => (info.crypto.name.as_str(), info.traditional.name.as_str()),
        None => ("Crypto", "60/40"),
    }
}

/// Signed percentage with two decimals; missing values render as `n/a`.
fn format_return(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value:+.2}%"),
        _ => String::from("n/a"),
    }
}
