//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use companion_observe::tracing_setup::{init_tracing, TracingOptions};
//!
//! // Warnings and above, human-readable
//! init_tracing(&TracingOptions::default()).unwrap();
//! ```

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::sync::OnceLock;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// How the global subscriber should be set up.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Filter used when `RUST_LOG` is unset (e.g. "warn", "info,companion=debug").
    pub default_filter: String,
    /// Bridge spans to OpenTelemetry with a stdout exporter.
    pub enable_otel: bool,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            default_filter: "warn".to_string(),
            enable_otel: false,
            json: false,
        }
    }
}

impl TracingOptions {
    /// Map CLI verbosity flags to a default filter.
    ///
    /// `--quiet` wins over `-v`; one `-v` enables debug output for the
    /// workspace crates, two or more enable everything.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        let default_filter = match verbose {
            _ if quiet => "error",
            0 => "warn",
            1 => "info,companion_core=debug,companion_infra=debug,companion_api=debug",
            _ => "trace",
        };
        Self {
            default_filter: default_filter.to_string(),
            ..Self::default()
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// - Always installs a structured `fmt` layer writing to stderr, so
///   `--json` command output on stdout stays machine-readable.
/// - When `enable_otel` is set, additionally bridges tracing spans to
///   OpenTelemetry using a stdout exporter.
/// - `RUST_LOG`, when set, takes precedence over `default_filter`.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_filter))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);
    let fmt_layer = if options.json {
        fmt_layer.json().boxed()
    } else {
        fmt_layer.boxed()
    };

    if options.enable_otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("companion");
        let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Safe to call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
