pub mod manager;

pub use manager::{ConnectionManager, ConnectionSettings, DEFAULT_RECONNECT_DELAY};
