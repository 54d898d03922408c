use std::io;
use std::sync::Arc;

use perfchart_core::{Completion, DataSource, FetchController, Timeframe};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::show::labels_or_warn;
use crate::cli::WatchArgs;
use crate::error::CliError;
use crate::output::{self, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Select(Timeframe),
    Retry,
    Quit,
    Blank,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let token = line.trim();
    match token.to_ascii_lowercase().as_str() {
        "" => Input::Blank,
        "r" | "retry" => Input::Retry,
        "q" | "quit" | "exit" => Input::Quit,
        _ => token
            .parse::<Timeframe>()
            .map_or(Input::Unknown, Input::Select),
    }
}

/// Drive the controller from stdin until `quit` or end of input.
///
/// Requests run on a `JoinSet` so new selections are accepted while older
/// ones are still in flight. At end of input the remaining requests are
/// drained so the final selection is still rendered.
pub async fn run(
    args: &WatchArgs,
    source: Arc<dyn DataSource>,
    options: RenderOptions,
) -> Result<(), CliError> {
    let mut controller = FetchController::with_timeframe(source, args.timeframe);
    let assets = labels_or_warn(controller.load_assets_info().await);

    let mut in_flight: JoinSet<Completion> = JoinSet::new();
    in_flight.spawn(controller.start().wait());
    output::render_state(controller.state(), assets.as_ref(), options)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    debug!(in_flight = in_flight.len(), "stdin closed, draining requests");
                    input_open = false;
                    continue;
                };
                let pending = match parse_input(&line) {
                    Input::Select(timeframe) => controller.select_timeframe(timeframe),
                    Input::Retry => controller.retry(),
                    Input::Quit => break,
                    Input::Blank => continue,
                    Input::Unknown => {
                        eprintln!(
                            "unrecognized input {:?}; expected 1M, 6M, 1Y, ALL, r or q",
                            line.trim()
                        );
                        continue;
                    }
                };
                in_flight.spawn(pending.wait());
                output::render_state(controller.state(), assets.as_ref(), options)?;
            }
            Some(joined) = in_flight.join_next() => {
                let completion = match joined {
                    Ok(completion) => completion,
                    Err(error) => {
                        warn!(error = %error, "performance request task aborted");
                        return Err(CliError::Io(io::Error::other(error)));
                    }
                };
                if controller.complete(completion).is_applied() {
                    output::render_state(controller.state(), assets.as_ref(), options)?;
                }
            }
            else => break,
        }
    }

    Ok(())
}
