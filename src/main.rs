use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stock_dashboard::config::AppConfig;
use stock_dashboard::data::fetch::{Endpoints, HttpFetcher};
use stock_dashboard::presentation::render::{render_prediction_error, render_text};
use stock_dashboard::{AnalysisOrchestrator, DashboardEvent, EventBus};

#[derive(Parser, Debug)]
#[command(name = "stock_dashboard", about = "Technical, fundamental and AI prediction dashboard")]
struct Cli {
    /// Symbol to analyze (defaults to `default_symbol` from the config)
    symbol: Option<String>,

    /// Also request the multi-model prediction
    #[arg(long)]
    predict: bool,

    /// Print models as JSON instead of text
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the API base URL of the selected environment
    #[arg(long)]
    base_url: Option<String>,

    /// development | production
    #[arg(long)]
    env: Option<String>,
}

fn print_events(rx: &mut broadcast::Receiver<DashboardEvent>, json: bool) {
    while let Ok(event) = rx.try_recv() {
        match event {
            DashboardEvent::ModelReady(model) => {
                if json {
                    match serde_json::to_string_pretty(&model) {
                        Ok(text) => println!("{}", text),
                        Err(e) => warn!("Failed to serialize model: {}", e),
                    }
                } else {
                    println!("{}", render_text(&model));
                }
            }
            DashboardEvent::AnalysisFailed { symbol, reason } => {
                eprintln!("❌ Error analyzing {}: {}", symbol, reason);
            }
            DashboardEvent::PredictionFailed { symbol, reason } => {
                eprintln!("{}", render_prediction_error(&symbol, &reason));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        AppConfig::load_from(&cli.config)?
    } else {
        AppConfig::default()
    };
    let config = config
        .apply_env_overrides()?
        .with_overrides(cli.env.as_deref(), cli.base_url.as_deref())?;

    // Setup Logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Stock Dashboard...");
    if !cli.config.exists() {
        warn!("{} not found - using built-in defaults", cli.config.display());
    }

    let base_url = config.api_base_url()?;
    info!("API_BASE_URL: {} ({:?})", base_url, config.environment);

    let fetcher = HttpFetcher::new(config.api.timeout())?;
    let bus = EventBus::new(config.event_bus_capacity);
    let mut rx = bus.subscribe();

    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(fetcher),
        Endpoints::new(base_url)?,
        Arc::new(bus.clone()),
    );

    let symbol = cli.symbol.unwrap_or_else(|| config.default_symbol.clone());
    let analysis = orchestrator.analyze(&symbol).await;
    print_events(&mut rx, cli.json);
    analysis?;

    if cli.predict || config.auto_predict {
        // Failure is already rendered inline; the dashboard itself stands.
        let _ = orchestrator.request_prediction().await;
        print_events(&mut rx, cli.json);
    }

    Ok(())
}
