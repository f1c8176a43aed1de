use anyhow::{Context, Result};
use clap::Parser;
use gobarber::app::App;
use gobarber::cli::{print_error, Cli};
use gobarber::config::Config;
use gobarber::styles::init_theme;
use gobarber::tui::install_panic_hook;
use gobarber::utils::{get_config_path, get_log_dir};

const LOG_FILE: &str = "gobarber.log";

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging directory
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout belongs to the TUI, so logs only go to the file
    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    if cli.execute()? {
        return Ok(());
    }

    install_panic_hook();

    let config_path = get_config_path();
    let config = Config::load_or_create(&config_path).context("Failed to load configuration")?;
    let no_color = cli.no_colors || std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    init_theme(config.theme_with_no_color(no_color));

    let mut app = App::new(config, config_path)?;
    app.run()
}
