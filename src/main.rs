use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use folio::application::PortfolioContent;
use folio::infrastructure::{
    AppConfig, CliArgs, ConfigSource, ContentApiClient, EmailClient, FormatProbe, HeadDocument,
    HttpImageFetcher, HttpImageFetcherConfig, StorageManager, ViewportTracker,
};
use folio::presentation::{AppContext, Diagnostics, Ports};

const VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 800.0;

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    diagnostics: Diagnostics,
    head: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<PortfolioContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<ContactReport>,
}

#[derive(Serialize)]
struct ContactReport {
    sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    field_errors: Vec<String>,
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, CliArgs, ConfigSource)> {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    let storage = StorageManager::resolve(args.config.as_deref())?;
    let (mut config, source) = storage.load()?;
    config.merge_with_args(&args);

    Ok((config, args, source))
}

fn create_app(config: &AppConfig) -> Result<(AppContext, Arc<HeadDocument>)> {
    let fetcher = HttpImageFetcher::new(&HttpImageFetcherConfig {
        base_url: config.assets.base_url.clone(),
        timeout: config.assets.timeout(),
        user_agent: config.assets.user_agent.clone(),
    })?;
    let document = Arc::new(HeadDocument::new());

    let ports = Ports {
        fetcher: Arc::new(fetcher),
        document: document.clone(),
        formats: Arc::new(FormatProbe::from_config(
            config.assets.supported_formats.as_deref(),
        )),
        visibility: Arc::new(ViewportTracker::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)),
        content: Arc::new(ContentApiClient::new(config.content.api_base_url.clone())?),
        contact: Arc::new(EmailClient::new(&config.contact)?),
    };

    Ok((AppContext::new(config, ports), document))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, args, source) = load_config()?;
    init_logging(&config)?;
    if let ConfigSource::Defaults { reason } = &source {
        warn!(reason = %reason, "Configuration file is malformed, running with defaults");
    }

    info!(version = folio::VERSION, base_url = %config.assets.base_url, "Starting Folio");

    let (app, document) = create_app(&config)?;
    app.start().await;

    for route in &args.routes {
        match app.navigate(route) {
            Some(prefetch) => prefetch.await?,
            None => warn!(route = %route, "Nothing to prefetch for route"),
        }
    }

    let content = if args.content {
        Some(app.load_content().await)
    } else {
        None
    };

    let contact = match args.contact_form() {
        Some(form) => Some(match app.send_contact(&form).await {
            Ok(()) => ContactReport {
                sent: true,
                error: None,
                field_errors: Vec::new(),
            },
            Err(e) => ContactReport {
                sent: false,
                field_errors: e.field_errors().iter().map(ToString::to_string).collect(),
                error: Some(e.to_string()),
            },
        }),
        None => None,
    };

    let report = Report {
        diagnostics: app.diagnostics(),
        head: document.render_head(),
        content,
        contact,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
