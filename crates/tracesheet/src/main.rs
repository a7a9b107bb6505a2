mod client;
mod output;
mod telemetry;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracesheet_core::config::Config;
use tracesheet_core::extract::extract_records;
use tracesheet_core::time::parse_duration_str;

use crate::client::QueryClient;
use crate::output::{print_summary, write_records};
use crate::telemetry::init_cli_tracing;

#[derive(Parser, Debug)]
#[command(name = "tracesheet")]
#[command(about = "Export message-pipeline timing records from Jaeger traces to CSV")]
struct Cli {
    /// Output CSV path
    output: Option<PathBuf>,

    /// Service whose traces are fetched
    #[arg(long)]
    service: Option<String>,

    /// How far back to search, e.g. 5h or 90m
    #[arg(long)]
    lookback: Option<String>,

    /// Maximum number of traces returned by the backend
    #[arg(long)]
    limit: Option<usize>,

    /// Base URL of the tracing backend's query service
    #[arg(long)]
    url: Option<String>,

    /// HTTP request timeout, e.g. 30s
    #[arg(long)]
    timeout: Option<String>,

    /// List service names known to the backend and exit
    #[arg(long)]
    list_services: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_cli_tracing();

    let mut cfg = Config::load().context("load config")?;
    apply_cli(&mut cfg, &cli)?;

    let client = QueryClient::new(&cfg.query_url, cfg.request_timeout)?;

    if cli.list_services {
        for service in client.list_services().await? {
            println!("{service}");
        }
        return Ok(());
    }

    let traces = client
        .fetch_traces(&cfg.service, cfg.lookback, cfg.limit)
        .await?;
    let records = extract_records(&traces);
    write_records(&records, &cfg.output)?;
    print_summary(records.len(), traces.len(), &cfg.output);

    Ok(())
}

fn apply_cli(cfg: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if let Some(v) = &cli.output {
        cfg.output = v.clone();
    }
    if let Some(v) = &cli.service {
        cfg.service = v.clone();
    }
    if let Some(v) = &cli.lookback {
        cfg.lookback = parse_duration_str(v)?;
    }
    if let Some(v) = cli.limit {
        cfg.limit = v;
    }
    if let Some(v) = &cli.url {
        cfg.query_url = v.clone();
    }
    if let Some(v) = &cli.timeout {
        cfg.request_timeout = parse_duration_str(v)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn bare_cli() -> Cli {
        Cli {
            output: None,
            service: None,
            lookback: None,
            limit: None,
            url: None,
            timeout: None,
            list_services: false,
        }
    }

    #[test]
    fn flags_override_config() {
        let mut cfg = Config::default();
        let cli = Cli {
            output: Some(PathBuf::from("out.csv")),
            service: Some("producer".to_string()),
            lookback: Some("2h".to_string()),
            limit: Some(10),
            url: Some("http://jaeger:16686".to_string()),
            timeout: Some("5s".to_string()),
            list_services: false,
        };

        apply_cli(&mut cfg, &cli).unwrap();

        assert_eq!(cfg.output, PathBuf::from("out.csv"));
        assert_eq!(cfg.service, "producer");
        assert_eq!(cfg.lookback, Duration::from_secs(7_200));
        assert_eq!(cfg.limit, 10);
        assert_eq!(cfg.query_url, "http://jaeger:16686");
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn absent_flags_keep_config() {
        let mut cfg = Config::default();
        apply_cli(&mut cfg, &bare_cli()).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn bad_lookback_flag_is_rejected() {
        let mut cfg = Config::default();
        let cli = Cli {
            lookback: Some("yesterday".to_string()),
            ..bare_cli()
        };
        assert!(apply_cli(&mut cfg, &cli).is_err());
    }
}
