//! Effect simulator entry point.
//!
//! Boots the effect runtime, runs a scripted session against it and prints
//! every published event to stdout as one JSON object per line.
mod config;
mod dirs;
mod scenario;

use anyhow::Result;
use effect_runtime::{Runtime, RuntimeHandle, Topic};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::SimConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    setup_logging(&config)?;

    let runtime = Runtime::builder()
        .config(config.resolve_runtime()?)
        .world(config.resolve_world(scenario::demo_world)?)
        .build();
    let handle = runtime.handle();

    let printers: Vec<_> = Topic::ALL
        .into_iter()
        .map(|topic| spawn_printer(&handle, topic))
        .collect();

    scenario::run(&handle).await?;
    drop(handle);

    let expired = runtime.shutdown().await?;
    tracing::info!("Runtime shut down, {} instances expired at exit", expired);

    for printer in printers {
        printer.await?;
    }

    Ok(())
}

/// Prints every event on `topic` until the bus closes.
fn spawn_printer(handle: &RuntimeHandle, topic: Topic) -> JoinHandle<()> {
    let mut rx = handle.subscribe(topic);
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(error) => tracing::warn!(?topic, %error, "Failed to encode event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(?topic, skipped, "Event printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Setup logging to a session file
fn setup_logging(config: &SimConfig) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let log_dir = config.log_dir.clone().unwrap_or_else(dirs::log_dir);

    // Create session ID if not provided
    let session_id = config.session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir.join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "effect-sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // stdout carries the JSON event stream, so logs go to the file only
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/effect-sim.log", session_log_dir.display());

    Ok(())
}
