//! Application layer - connection lifecycle, command façade and event relay

pub mod bridge;
pub mod connection;
pub mod printer;
pub mod scan;

pub use bridge::PrinterBridge;
pub use connection::{ConnectionManager, ConnectionSettings};
pub use printer::PrinterFacade;
pub use scan::EventRelay;
