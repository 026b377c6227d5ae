mod binder;
mod identity;
mod state;

pub use binder::{BroadcastRegistrar, ServiceBinder, ServiceCallbacks};
pub use identity::{DEFAULT_PREFIX, DeviceProfile, IdentityOverride, IdentityTable, ServiceIdentity};
pub use state::ConnectionState;
