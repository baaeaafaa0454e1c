//! Thermocouple Node
//!
//! Serves framed read commands on a serial link: a receive task assembles
//! frames and hands them to the dispatcher, which answers ACK/NAK and sends
//! the averaged reading for recognized commands.

mod config;
mod dispatcher;
mod error;
mod node;
mod receiver;
mod slot;
mod telemetry;
mod transmit;

pub use config::{DispatchSettings, LogSettings, MetricsSettings, NodeConfig, DEFAULT_CONFIG_PATH};
pub use dispatcher::{Dispatcher, Outcome};
pub use error::NodeError;
pub use node::{run, serve};
pub use receiver::receive_frames;
pub use slot::FrameSlot;
pub use telemetry::{init_logging, install_metrics};
pub use transmit::Transmitter;
