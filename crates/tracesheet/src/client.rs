use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use tracesheet_core::model::{Trace, TracesResponse};
use tracesheet_core::time::lookback_hours;

#[derive(Debug, Deserialize)]
struct ServicesResponse {
    data: Vec<String>,
}

pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
}

impl QueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One GET against the trace search endpoint. Single attempt: any
    /// transport error, non-2xx status or non-JSON body aborts the run.
    pub async fn fetch_traces(
        &self,
        service: &str,
        lookback: Duration,
        limit: usize,
    ) -> anyhow::Result<Vec<Trace>> {
        let url = format!("{}/api/traces", self.base_url);
        let hours = format!("{}h", lookback_hours(lookback));
        let limit = limit.to_string();
        tracing::debug!(%url, service, lookback = %hours, %limit, "querying trace search");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("service", service),
                ("loopback", hours.as_str()),
                ("prettyPrint", "true"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .context("query trace search endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "trace search request failed with status {}",
                response.status()
            );
        }

        let body: TracesResponse = response
            .json()
            .await
            .context("decode trace search response")?;
        tracing::info!(records = body.data.len(), "fetched traces");
        Ok(body.data)
    }

    pub async fn list_services(&self) -> anyhow::Result<Vec<String>> {
        let url = format!("{}/api/services", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("query services endpoint")?;

        if !response.status().is_success() {
            anyhow::bail!("services request failed with status {}", response.status());
        }

        let body: ServicesResponse = response
            .json()
            .await
            .context("decode services response")?;
        Ok(body.data)
    }
}
