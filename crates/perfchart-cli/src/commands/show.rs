use std::sync::Arc;

use perfchart_core::{AssetsInfo, DataSource, FetchController, FetchStatus};
use tracing::warn;

use crate::cli::ShowArgs;
use crate::error::CliError;
use crate::output::{self, RenderOptions};

pub async fn run(
    args: &ShowArgs,
    source: Arc<dyn DataSource>,
    options: RenderOptions,
) -> Result<(), CliError> {
    let mut controller = FetchController::with_timeframe(source, args.timeframe);

    let pending = controller.start();
    let (completion, assets) = tokio::join!(pending.wait(), controller.load_assets_info());
    controller.complete(completion);

    let assets = labels_or_warn(assets);
    output::render_state(controller.state(), assets.as_ref(), options)?;

    let state = controller.state();
    if state.status() == FetchStatus::Error {
        return Err(CliError::FetchFailed {
            timeframe: state.timeframe(),
            message: state.error_message().unwrap_or_default().to_owned(),
        });
    }
    Ok(())
}

/// Asset names only decorate the output; a failure falls back to generic labels.
pub(super) fn labels_or_warn(
    result: Result<AssetsInfo, perfchart_core::SourceError>,
) -> Option<AssetsInfo> {
    result
        .map_err(|error| warn!(error = %error, "assets info unavailable"))
        .ok()
}
