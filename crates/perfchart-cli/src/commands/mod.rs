mod assets;
mod show;
mod watch;

use std::sync::Arc;
use std::time::Duration;

use perfchart_core::{BackendAdapter, BackendConfig, DataSource, DemoAdapter};
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::RenderOptions;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    let source = build_source(cli)?;
    let options = RenderOptions {
        format: cli.format,
        pretty: cli.pretty,
        rows: cli.rows,
    };

    match &cli.command {
        Command::Show(args) => show::run(args, source, options).await,
        Command::Assets => assets::run(source, options).await,
        Command::Watch(args) => watch::run(args, source, options).await,
    }
}

/// Demo data when `--demo` is set, otherwise the backend configured from the
/// environment with command-line overrides applied on top.
fn build_source(cli: &Cli) -> Result<Arc<dyn DataSource>, CliError> {
    if cli.demo {
        debug!(latency_ms = cli.demo_latency_ms, "using demo data source");
        let adapter =
            DemoAdapter::default().with_latency(Duration::from_millis(cli.demo_latency_ms));
        return Ok(Arc::new(adapter));
    }

    let config = backend_config(
        BackendConfig::from_env()?,
        cli.backend_url.as_deref(),
        cli.timeout_ms,
    )?;
    debug!(
        base_url = %config.base_url,
        timeout_ms = config.timeout_ms,
        "using backend data source"
    );
    Ok(Arc::new(BackendAdapter::new(config)))
}

fn backend_config(
    mut config: BackendConfig,
    backend_url: Option<&str>,
    timeout_ms: Option<u64>,
) -> Result<BackendConfig, CliError> {
    if let Some(url) = backend_url {
        config = config.with_base_url(url);
    }
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    Ok(config.validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfchart_core::ValidationError;

    #[test]
    fn overrides_replace_environment_values() {
        let config = backend_config(
            BackendConfig::default(),
            Some("https://perf.example.com/"),
            Some(750),
        )
        .expect("valid overrides");

        assert_eq!(config.base_url, "https://perf.example.com");
        assert_eq!(config.timeout_ms, 750);
    }

    #[test]
    fn invalid_override_is_a_validation_error() {
        let error = backend_config(BackendConfig::default(), Some("ftp://perf"), None)
            .expect_err("scheme must be rejected");

        assert!(matches!(
            error,
            CliError::Validation(ValidationError::InvalidBackendUrl { .. })
        ));
        assert_eq!(error.exit_code(), 2);
    }
}
