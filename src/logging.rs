//! # Structured Logging Module
//!
//! Environment-aware console logging using the tracing ecosystem.
//!
//! This module provides:
//! - Console logging with environment-based log levels
//! - Optional JSON output (`MUONRECO_LOG_FORMAT=json`) for batch jobs
//! - Category targets matching the framework message-logger categories
//! - Domain-specific structured logging macros

use std::io::IsTerminal;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Message-logger categories used as `tracing` targets
pub mod categories {
    pub const STANDALONE_MUON_PRODUCER: &str = "Muon|RecoMuon|StandAloneMuonProducer";
    pub const STANDALONE_TRAJECTORY_BUILDER: &str = "Muon|RecoMuon|StandAloneTrajectoryBuilder";
    pub const MUON_TRACK_LOADER: &str = "Muon|RecoMuon|MuonTrackLoader";
    pub const GEM_TRACK_MATCH: &str = "GEMTrackMatch";
}

/// Initialize console logging; safe to call more than once
pub fn init_structured_logging() {
    TRACING_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let log_level = get_log_level(&environment);
        let json_output = std::env::var("MUONRECO_LOG_FORMAT")
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let use_ansi = IsTerminal::is_terminal(&std::io::stdout()) && !json_output;

        let console_layer = if json_output {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(use_ansi)
                .with_filter(EnvFilter::new(&log_level))
                .boxed()
        };

        let subscriber = tracing_subscriber::registry().with(console_layer);

        if subscriber.try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        } else {
            tracing::info!(
                environment = %environment,
                log_level = %log_level,
                json_output = json_output,
                "Structured logging initialized"
            );
        }
    });
}

fn get_environment() -> String {
    std::env::var("MUONRECO_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Explicit `LOG_LEVEL`/`RUST_LOG` win over environment defaults
fn get_log_level(environment: &str) -> String {
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        return level.to_lowercase();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        return level.to_lowercase();
    }

    default_log_level(environment).to_string()
}

fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log configuration operations
#[macro_export]
macro_rules! log_config {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "{}", $operation
        );
    };
}

/// Log reconstruction operations under the stand-alone producer category
#[macro_export]
macro_rules! log_reconstruction {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            target: $crate::logging::categories::STANDALONE_MUON_PRODUCER,
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "🔧 {}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            target: $crate::logging::categories::STANDALONE_MUON_PRODUCER,
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "🔧 {}", $operation
        );
    };
}

/// Log GEM geometry and matching operations under the GEMTrackMatch category
#[macro_export]
macro_rules! log_geometry {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            target: $crate::logging::categories::GEM_TRACK_MATCH,
            operation = %$operation,
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "📐 {}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            target: $crate::logging::categories::GEM_TRACK_MATCH,
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %chrono::Utc::now().to_rfc3339(),
            "📐 {}", $operation
        );
    };
}
