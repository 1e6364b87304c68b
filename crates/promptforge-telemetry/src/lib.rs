//! Logging and trace export for PromptForge
//!
//! Log lines always go to stdout through `tracing-subscriber`. When the
//! configuration names an OTLP exporter, spans are exported as well.

use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_semantic_conventions::resource as semconv;
use promptforge_config::TelemetryConfig;
use promptforge_config::telemetry::{ExportProtocol, ExporterConfig};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Guard that flushes and shuts down span export on drop
pub struct TelemetryGuard {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shutdown tracer provider: {e}");
        }
    }
}

/// Log line encoding on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Initialize logging and optional trace export
///
/// `log_filter` uses `EnvFilter` syntax (e.g. `info,promptforge_ollama=debug`)
/// and falls back to `info` when it does not parse. The returned guard must be
/// held for the lifetime of the application.
///
/// # Errors
///
/// Returns an error if the OTLP exporter cannot be built
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str, format: LogFormat) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = match format {
        LogFormat::Text => tracing_subscriber::fmt::layer().with_target(true).boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .flatten_event(true)
            .boxed(),
    };

    let tracer_provider = match config.and_then(|c| c.exporter.as_ref().map(|e| (c, e))) {
        Some((telemetry_config, exporter_config)) => Some(init_tracer(telemetry_config, exporter_config)?),
        None => None,
    };

    let otel_layer = tracer_provider.as_ref().map(|provider| {
        global::set_tracer_provider(provider.clone());
        tracing_opentelemetry::layer().with_tracer(provider.tracer("promptforge"))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    if let Some(exporter) = config.and_then(|c| c.exporter.as_ref()) {
        tracing::info!(endpoint = %exporter.endpoint, protocol = ?exporter.protocol, "exporting traces over OTLP");
    }

    Ok(TelemetryGuard { tracer_provider })
}

fn init_tracer(config: &TelemetryConfig, exporter_config: &ExporterConfig) -> anyhow::Result<SdkTracerProvider> {
    let exporter = build_span_exporter(exporter_config)?;

    let sampling_rate = config.tracing.as_ref().map_or(1.0, |t| t.sampling_rate);

    Ok(SdkTracerProvider::builder()
        .with_resource(build_resource(config))
        .with_sampler(Sampler::ParentBased(Box::new(sampler_for(sampling_rate))))
        .with_batch_exporter(exporter)
        .build())
}

/// Root-span sampler for a rate in `0.0..=1.0`; out-of-range rates clamp
fn sampler_for(rate: f64) -> Sampler {
    if rate >= 1.0 {
        Sampler::AlwaysOn
    } else if rate <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(rate)
    }
}

fn build_span_exporter(config: &ExporterConfig) -> anyhow::Result<opentelemetry_otlp::SpanExporter> {
    use opentelemetry_otlp::SpanExporter;

    let exporter = match config.protocol {
        ExportProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build gRPC span exporter: {e}"))?,
        ExportProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(config.endpoint.as_str())
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build HTTP span exporter: {e}"))?,
    };

    Ok(exporter)
}

fn build_resource(config: &TelemetryConfig) -> Resource {
    let service_name = match config.service_name.trim() {
        "" => "promptforge",
        name => name,
    };

    let attrs = [
        KeyValue::new(semconv::SERVICE_NAME, service_name.to_owned()),
        KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ]
    .into_iter()
    .chain(
        config
            .resource_attributes
            .iter()
            .map(|(key, value)| KeyValue::new(key.clone(), value.clone())),
    );

    Resource::builder().with_attributes(attrs).build()
}
