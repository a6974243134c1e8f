use anyhow::Result;
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::Mutex;

use hydrobot::core::Config;
use hydrobot::features::get_bot_version;
use hydrobot::features::messages::MessageCatalog;
use hydrobot::features::notifications::{DesktopNotifier, LogNotifier, NotificationSink};
use hydrobot::features::reminders::{channels, ReminderScheduler};
use hydrobot::frontend::ConsoleFrontend;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting HydroBot v{}...", get_bot_version());

    let catalog = Arc::new(MessageCatalog::load(&config.catalog_paths));

    let sink: Arc<dyn NotificationSink> = if config.desktop_notifications {
        Arc::new(DesktopNotifier::new())
    } else {
        info!("Desktop notifications disabled, alerts go to the log");
        Arc::new(LogNotifier)
    };

    let (frontend_link, scheduler_link) = channels();

    // Start the reminder scheduler
    let scheduler = ReminderScheduler::new(config.intervals, catalog, sink);
    tokio::spawn(async move {
        scheduler.run(scheduler_link).await;
    });

    let frontend = ConsoleFrontend::new(config.confirmation_keyword.clone());
    let input = BufReader::new(tokio::io::stdin());
    let output = Arc::new(Mutex::new(tokio::io::stdout()));
    frontend.run(frontend_link, input, output).await?;

    info!("HydroBot shutting down");
    Ok(())
}
