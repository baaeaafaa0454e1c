//! Logging and metrics setup

use crate::config::{LogSettings, MetricsSettings};
use crate::error::NodeError;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(settings: &LogSettings) -> Result<(), NodeError> {
    let level = Level::from_str(&settings.level)
        .map_err(|e| NodeError::Telemetry(format!("log level {:?}: {}", settings.level, e)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    installed.map_err(|e| NodeError::Telemetry(e.to_string()))
}

/// Start the Prometheus exporter if an address is configured.
///
/// Must be called from inside the tokio runtime.
pub fn install_metrics(settings: &MetricsSettings) -> Result<(), NodeError> {
    let Some(addr) = settings.listen else {
        return Ok(());
    };

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| NodeError::Telemetry(e.to_string()))?;

    info!("Metrics exporter listening on {}", addr);
    Ok(())
}
