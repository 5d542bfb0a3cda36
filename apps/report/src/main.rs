use anyhow::{Context, Result};
use dotenv::dotenv;
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pingdom_cell::{PingdomClient, Resolution, ResultsQuery};
use shared_config::PingdomConfig;

const USAGE: &str = "usage: pingdom-report [CHECK_ID] [RESOLUTION] [LIMIT]";

struct ReportArgs {
    check_id: Option<String>,
    resolution: Resolution,
    limit: Option<u32>,
}

fn parse_args(args: &[String]) -> Result<ReportArgs> {
    if args.len() > 3 {
        anyhow::bail!(USAGE);
    }

    let resolution = match args.get(1) {
        Some(raw) => raw.parse::<Resolution>()?,
        None => Resolution::default(),
    };
    let limit = args
        .get(2)
        .map(|raw| raw.parse::<u32>().with_context(|| format!("invalid limit '{}'", raw)))
        .transpose()?;

    Ok(ReportArgs {
        check_id: args.first().cloned(),
        resolution,
        limit,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = PingdomConfig::from_env();
    if !config.is_configured() {
        warn!("Running with incomplete credentials; Pingdom will likely reject requests");
    }

    let client = PingdomClient::new(&config).context("failed to create Pingdom client")?;
    info!("Querying Pingdom at {}", client.base_url());

    let mut report = json!({
        "checks": client.get_checks().await.context("failed to fetch checks")?,
        "probes": client.get_probes().await.context("failed to fetch probes")?,
    });

    if let Some(check_id) = &args.check_id {
        let mut query = ResultsQuery::default();
        if let Some(limit) = args.limit {
            query = query.with_limit(limit);
        }

        let results = client
            .get_results(check_id, &query)
            .await
            .with_context(|| format!("failed to fetch results for check {}", check_id))?;
        let summary = client
            .get_performance_summary(check_id, args.resolution)
            .await
            .with_context(|| format!("failed to fetch performance summary for check {}", check_id))?;

        report["check"] = json!({
            "id": check_id,
            "results": results,
            "summary": {
                "resolution": args.resolution,
                "buckets": summary,
            },
        });
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
