use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, runtime, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

/// Identity stamped onto every exported span as resource attributes.
pub struct ServiceIdentity<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub environment: &'a str,
}

fn build_resource(identity: &ServiceIdentity<'_>) -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", identity.name.to_string()),
        KeyValue::new("service.version", identity.version.to_string()),
        KeyValue::new("deployment.environment", identity.environment.to_string()),
    ])
}

/// Install the global subscriber: env-filter, OTLP export layer, JSON fmt
/// layer. Fails if the OTLP pipeline cannot be built; the caller decides
/// whether to abort startup.
pub fn init_tracing(
    identity: &ServiceIdentity<'_>,
    log_level: &str,
    otlp_endpoint: &str,
) -> Result<(), AppError> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let otlp_exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(otlp_endpoint);

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(otlp_exporter)
        .with_trace_config(sdktrace::config().with_resource(build_resource(identity)))
        .install_batch(runtime::Tokio)
        .map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to initialize OTLP tracer at '{}': {}",
                otlp_endpoint,
                e
            ))
        })?;

    let telemetry = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(telemetry)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{Key, Value};

    #[test]
    fn resource_carries_the_full_service_identity() {
        let resource = build_resource(&ServiceIdentity {
            name: "registration-service",
            version: "1.0.0",
            environment: "dev",
        });

        assert_eq!(
            resource.get(Key::from_static_str("service.name")),
            Some(Value::from("registration-service"))
        );
        assert_eq!(
            resource.get(Key::from_static_str("service.version")),
            Some(Value::from("1.0.0"))
        );
        assert_eq!(
            resource.get(Key::from_static_str("deployment.environment")),
            Some(Value::from("dev"))
        );
    }
}
