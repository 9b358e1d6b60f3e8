mod app;
mod hierarchy;
mod layout;
mod notion;
mod store;
mod util;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::{AppConfig, NotionCirclesApp};
use crate::notion::{Credential, DEFAULT_API_BASE, GatewayConfig, HttpTransport, NotionGateway};
use crate::store::{JsonFileStore, default_state_path};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Notion integration secret used when the form leaves the key empty.
    #[arg(long, env = "NOTION_KEY", hide_env_values = true, global = true)]
    notion_key: Option<String>,

    #[arg(long, default_value = DEFAULT_API_BASE, global = true)]
    api_base: String,

    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Records requested per database query page.
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::value_parser!(u32).range(1..=100),
        global = true
    )]
    page_size: u32,

    /// Where the form fields are remembered between runs.
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Log as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch one Notion page and print it as JSON.
    Page { page_id: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let transport = HttpTransport::new(Duration::from_secs(args.timeout_secs))?;
    let gateway = Arc::new(NotionGateway::new(
        GatewayConfig {
            api_base: args.api_base.clone(),
            page_size: args.page_size,
        },
        Arc::new(transport),
    ));

    match args.command {
        Some(Command::Page { page_id }) => {
            print_page(&gateway, &page_id, args.notion_key.as_deref())
        }
        None => run_viewer(gateway, args.notion_key, args.state_file),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

fn print_page(gateway: &NotionGateway, page_id: &str, notion_key: Option<&str>) -> Result<()> {
    let page = Credential::resolve("", notion_key)
        .and_then(|credential| gateway.fetch_page(page_id, &credential));

    match page {
        Ok(page) => {
            println!("{}", serde_json::to_string_pretty(&page)?);
            Ok(())
        }
        Err(error) => {
            println!("{}", serde_json::to_string_pretty(&error.payload())?);
            bail!("page lookup failed with status {}", error.status_code())
        }
    }
}

fn run_viewer(
    gateway: Arc<NotionGateway>,
    notion_key: Option<String>,
    state_file: Option<PathBuf>,
) -> Result<()> {
    let store = JsonFileStore::open(state_file.unwrap_or_else(default_state_path));
    info!(path = %store.path().display(), "using session state file");

    let config = AppConfig {
        gateway,
        fallback_credential: notion_key,
        store: Box::new(store),
    };
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1240.0, 780.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Notion Circles",
        options,
        Box::new(move |cc| Ok(Box::new(NotionCirclesApp::new(cc, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
