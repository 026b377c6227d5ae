//! Infrastructure layer - platform adapters, configuration and sinks

pub mod config;
pub mod messaging;
pub mod platform;
pub mod printer;

pub use config::BridgeConfig;
pub use messaging::{ChannelEventPublisher, JsonLinesPublisher};
pub use platform::{InProcessBinder, InProcessBroadcasts, RecordingLauncher, probe_device};
pub use printer::{PrinterCall, SimulatedPrinter};
