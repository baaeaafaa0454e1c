//! Node wiring: receive task, frame slot and dispatcher over one link

use crate::config::{DispatchSettings, NodeConfig};
use crate::dispatcher::Dispatcher;
use crate::error::NodeError;
use crate::receiver::receive_frames;
use crate::slot::FrameSlot;
use crate::transmit::Transmitter;
use std::sync::Arc;
use std::time::Duration;
use thermo_acquisition::{AcquisitionEngine, AdcDriver, EngineSettings, SimulatedAdc};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, warn};

/// Serve commands on `transport` until the peer closes it
pub async fn serve<T, D>(
    transport: T,
    driver: D,
    dispatch: &DispatchSettings,
    acquisition: EngineSettings,
) -> Result<(), NodeError>
where
    T: AsyncRead + AsyncWrite + Send + 'static,
    D: AdcDriver,
{
    let (reader, writer) = tokio::io::split(transport);
    let slot = Arc::new(FrameSlot::new());

    let receiver = tokio::spawn(receive_frames(reader, slot.clone()));

    let tx = Transmitter::new(writer, Duration::from_millis(dispatch.transmit_timeout_ms));
    let engine = AcquisitionEngine::new(driver, acquisition);
    let mut dispatcher = Dispatcher::new(tx, engine);
    dispatcher.run(&slot).await;

    if slot.replaced() > 0 {
        warn!("{} frames were replaced before dispatch", slot.replaced());
    }

    receiver
        .await
        .map_err(|e| NodeError::Link(format!("receive task failed: {}", e)))?
}

/// Open the configured serial port and serve it with the simulated converter
pub async fn run(config: NodeConfig) -> Result<(), NodeError> {
    let port = config.link.open()?;
    warn!("Using simulated converter; readings are synthetic");
    let adc = SimulatedAdc::new(config.adc.clone());

    info!("Serving thermocouple commands on {}", config.link.device);
    serve(port, adc, &config.dispatch, config.acquisition.clone()).await
}
