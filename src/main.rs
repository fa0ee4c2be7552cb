//! quitstat - Track smoke-free time, money saved and health milestones

use clap::Parser;
use quitstat::{
    cli::{Cli, Command, parse_now},
    commands::{Report, ReportContext, render_report},
    error::Result,
    live_monitor::LiveMonitor,
    output::get_formatter,
    profile_loader::ProfileLoader,
    timezone::TimezoneConfig,
};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --verbose flag should override RUST_LOG.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("quitstat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quitstat=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let timezone = TimezoneConfig::from_cli(cli.timezone.as_deref(), cli.utc)?;
    info!(
        "Using timezone: {} ({})",
        timezone.display_name(),
        timezone.source
    );

    let loader = ProfileLoader::new(cli.profile.clone())?;
    let command = cli.command();

    match command {
        Command::Watch(args) => {
            if cli.now.is_some() {
                info!("Ignoring --now in watch mode; the live view follows the clock");
            }
            info!("Starting live monitoring mode");
            let monitor = LiveMonitor::new(
                loader,
                timezone,
                cli.json,
                args.interval.map(Duration::from_secs),
            );
            monitor.run().await?;
        }
        other => {
            if let Some(report) = Report::from_command(&other) {
                let now = parse_now(cli.now.as_deref())?;
                let loaded = loader.load().await?;
                info!("Loaded profile from {}", loaded.path.display());

                let context = ReportContext::new(loaded.profile, loaded.usage, now, timezone);
                let formatter = get_formatter(cli.json);
                println!("{}", render_report(report, &context, formatter.as_ref()));
            }
        }
    }

    Ok(())
}
