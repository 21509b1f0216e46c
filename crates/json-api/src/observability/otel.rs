//! OTLP span export.

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::TracingConfig;

use super::ObservabilityError;

fn resource(tracing: &TracingConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(tracing.service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", tracing.service_version.clone()),
            KeyValue::new("deployment.environment.name", tracing.environment.clone()),
        ])
        .build()
}

/// Root spans are sampled by ratio. Child spans follow their parent's decision.
fn sampler(tracing: &TracingConfig) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(tracing.sample_ratio)))
}

pub(super) fn build_tracer_provider(
    tracing: &TracingConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(tracing.endpoint.clone())
        .with_timeout(tracing.export_timeout)
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(tracing))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(tracing))
        .with_batch_exporter(exporter)
        .build())
}
