use std::sync::Arc;

use perfchart_core::{DataSource, FetchController};

use crate::error::CliError;
use crate::output::{self, RenderOptions};

pub async fn run(source: Arc<dyn DataSource>, options: RenderOptions) -> Result<(), CliError> {
    let controller = FetchController::new(source);
    let info = controller.load_assets_info().await?;
    output::render_assets(&info, options)
}
