//! Domain layer - printer bridge vocabulary with no runtime dependencies
//!
//! This crate contains:
//! - The vendor status catalog (StatusCode, messages, bands)
//! - The bridge error taxonomy
//! - Caller-supplied records (TextStyle, ScanOptions) and native formats
//! - Connection state and service identity resolution
//! - Trait seams implemented by the platform (PrinterService, ServiceBinder,
//!   ScannerLauncher, BroadcastRegistrar, EventPublisher)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Status codes are static data, not logic
//! - Testable in isolation

pub mod connection;
pub mod error;
pub mod event;
pub mod format;
pub mod printer;
pub mod scan;
pub mod status;

// Re-export commonly used types
pub use connection::{ConnectionState, DeviceProfile, IdentityTable, ServiceIdentity};
pub use error::{BridgeError, ErrorReply, Result};
pub use event::{ScanEvent, ScanSource};
pub use format::{BarcodeTextPosition, BitmapType, LcdOpt, PrintAlign, PrintTextFormat, TextStyle};
pub use printer::{Bitmap, PrinterService};
pub use scan::ScanOptions;
pub use status::{StatusBand, StatusCode};
