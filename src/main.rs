use clap::Parser;
use orgdesk::core::config::{EnvOverrides, OrgdeskConfig, load_config, resolve};
use orgdesk::core::deep_link;
use orgdesk::core::i18n::Language;
use orgdesk::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "orgdesk", about = "Terminal client for company, department and user management")]
struct Args {
    /// Backend base URL, e.g. http://localhost:8080
    #[arg(long)]
    base_url: Option<String>,

    /// Interface language
    #[arg(short, long, value_enum)]
    lang: Option<Language>,

    /// Deep link to open, e.g. orgdesk://reset-password?token=...
    link: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to orgdesk.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("orgdesk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {}", e);
        OrgdeskConfig::default()
    });
    let config = resolve(
        &file_config,
        &EnvOverrides::from_env(),
        args.base_url.as_deref(),
        args.lang,
    );

    let link = args.link.as_deref().and_then(|raw| {
        let parsed = deep_link::parse(raw, &config.link_prefixes);
        if parsed.is_none() {
            log::warn!("Ignoring unrecognized link: {}", raw);
        }
        parsed
    });

    log::info!(
        "orgdesk starting up: api={}, language={:?}",
        config.base_url,
        config.language
    );

    tui::run(config, link)
}
