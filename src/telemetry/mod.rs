mod config;
mod shutdown;

pub use config::TelemetryConfig;
pub use shutdown::TelemetryGuard;

use crate::error::{Result, SwaggerValidationError};
use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::{WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "swagger_validation=info";

/// Install the global tracing subscriber; `verbose` raises the default level to debug
pub fn init_telemetry(verbose: bool) -> TelemetryGuard {
    let config = TelemetryConfig::from_env();

    if config.enabled {
        match init_with_otel(&config, verbose) {
            Ok(provider) => return TelemetryGuard::new(Some(provider)),
            Err(e) => {
                eprintln!(
                    "Failed to initialize OpenTelemetry: {}. Falling back to local logging only.",
                    e
                );
            }
        }
    }

    init_fmt_only(verbose);
    TelemetryGuard::default()
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("swagger_validation=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    })
}

fn init_with_otel(config: &TelemetryConfig, verbose: bool) -> Result<SdkTracerProvider> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .map_err(|e| telemetry_error(format!("Failed to build HTTP client: {}", e)))?;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_http_client(client)
        .with_endpoint(&config.endpoint)
        .with_protocol(opentelemetry_otlp::Protocol::HttpBinary)
        .with_timeout(std::time::Duration::from_secs(5))
        .with_headers(config.headers.clone())
        .build()
        .map_err(|e| telemetry_error(format!("Failed to build OTLP exporter: {}", e)))?;

    let resource = opentelemetry_sdk::Resource::builder_empty()
        .with_service_name(config.service_name.clone())
        .with_attributes([KeyValue::new("service.version", env!("CARGO_PKG_VERSION"))])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer("swagger-validation");
    opentelemetry::global::set_tracer_provider(provider.clone());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(fmt_layer)
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    tracing::debug!("OpenTelemetry initialized with endpoint: {}", config.endpoint);
    Ok(provider)
}

fn init_fmt_only(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

fn telemetry_error(message: String) -> SwaggerValidationError {
    SwaggerValidationError::Telemetry(message)
}
