use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::BackendConfig;
use crate::data_source::{DataSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{AssetsInfo, PerformanceSnapshot, Timeframe};

/// REST adapter for the performance backend.
#[derive(Clone)]
pub struct BackendAdapter {
    http_client: Arc<dyn HttpClient>,
    config: BackendConfig,
}

impl BackendAdapter {
    /// Adapter talking to `config.base_url` over reqwest.
    pub fn new(config: BackendConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: BackendConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn assets_info_url(&self) -> String {
        format!("{}/api/assets/info", self.config.base_url)
    }

    pub fn performance_url(&self, timeframe: Timeframe) -> String {
        format!("{}/api/performance/{}", self.config.base_url, timeframe)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, SourceError> {
        let started = Instant::now();
        let request = HttpRequest::get(url.as_str())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                SourceError::network(format!(
                    "request to {url} timed out after {} ms",
                    self.config.timeout_ms
                ))
            } else {
                SourceError::network(format!("request to {url} failed: {}", error.message()))
            }
        })?;

        debug!(
            url = %url,
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "backend responded"
        );

        if !response.is_success() {
            return Err(SourceError::status(response.status, &url));
        }

        serde_json::from_str(&response.body)
            .map_err(|error| SourceError::decode(format!("malformed body from {url}: {error}")))
    }
}

impl DataSource for BackendAdapter {
    fn name(&self) -> &'static str {
        "backend"
    }

    fn assets_info<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<AssetsInfo, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.get_json(self.assets_info_url()).await })
    }

    fn performance<'a>(
        &'a self,
        timeframe: Timeframe,
    ) -> Pin<Box<dyn Future<Output = Result<PerformanceSnapshot, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.get_json(self.performance_url(timeframe)).await })
    }
}
