//! dashboard-bridge watcher entry point.
//!
//! Connects to the notification channel and logs every job-change
//! notification. Stands in for the dashboard UI as a channel consumer.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use dashboard_bridge::auth::CookieStore;
use dashboard_bridge::config::BridgeConfig;
use dashboard_bridge::domain::EventBus;
use dashboard_bridge::ws::bridge::JobsBridge;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = BridgeConfig::from_env().context("loading bridge configuration")?;
    tracing::info!(url = %config.channel_url(), "starting dashboard-bridge");

    // Build the local event bus and cookie store
    let bus = EventBus::new(config.event_bus_capacity);
    let cookies = Arc::new(CookieStore::new(config.cookies.clone()));

    let mut notifications = bus.subscribe();
    let (bridge, mut task) = JobsBridge::connect(&config, cookies, bus);

    if let Some(project) = config.watch_project {
        bridge.listen_jobs(project);
        tracing::info!(%project, "listening for job changes");
    }

    loop {
        tokio::select! {
            notification = notifications.recv() => match notification {
                Ok(notification) => {
                    tracing::info!(payload = %notification.payload, "jobs changed");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "watcher lagged behind the event bus");
                }
                Err(RecvError::Closed) => {
                    (&mut task).await.context("connection task aborted")??;
                    break;
                }
            },
            result = &mut task => {
                result.context("connection task aborted")??;
                break;
            }
        }
    }

    Ok(())
}
