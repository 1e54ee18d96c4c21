//! Replays identity notifications through a session watcher.
//!
//! Each stdin line is one JSON `IdentityStatus`, for example
//! `{"status":"signed_in","uid":"u1","email":"admin@gehu.ac.in","providers":["password"]}`
//! or `{"status":"signed_out"}`. After mount and after every notification
//! the reconciled session state and gate decision are printed to stdout as
//! one JSON line. An optional first argument is a navigation query string
//! carrying the demo override.

mod config;

use campus_gallery_platform_access::{
    ChannelIdentityProvider, DemoOverride, IdentityStatus, SessionState, SessionWatcher,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ProbeConfig, demo_pairs};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ProbeConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let demo = std::env::args()
        .nth(1)
        .and_then(|query| DemoOverride::from_query(demo_pairs(&query)));

    let provider = ChannelIdentityProvider::new();
    let mut watcher = SessionWatcher::mount(&provider, Arc::new(config.access), demo);
    print_state(watcher.state());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<IdentityStatus>(&line) {
            Ok(status) => {
                provider.publish(status);
                if let Some(state) = watcher.next().await {
                    print_state(state);
                }
            }
            Err(e) => tracing::warn!(error = %e, "Skipping malformed notification"),
        }
    }

    drop(provider);
    if watcher.next().await.is_none() {
        tracing::info!("Identity provider closed");
    }
}

fn print_state(state: &SessionState) {
    let line = serde_json::json!({
        "session": state,
        "gate": state.gate(),
    });
    println!("{line}");
}
