use serde::{Deserialize, Serialize};

/// Lifecycle of the binding to the printer service
///
/// `Unbound -> Binding -> Bound -> (Disconnected -> Binding ...)`, with
/// `Released` as the terminal state after teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No bind request issued yet
    Unbound,
    /// Bind request issued, waiting for the connected callback
    Binding,
    /// Service handle available
    Bound,
    /// Connection lost, a reconnect is scheduled
    Disconnected,
    /// Torn down; no further binding
    Released,
}

impl ConnectionState {
    /// Check if state allows issuing a bind request
    pub fn can_bind(&self) -> bool {
        matches!(self, Self::Unbound | Self::Disconnected)
    }

    /// Check if a service handle is available
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound)
    }

    /// Check if the manager was torn down
    pub fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }

    /// Transition to binding state
    pub fn to_binding(&self) -> Result<Self, &'static str> {
        match self {
            Self::Unbound | Self::Disconnected => Ok(Self::Binding),
            _ => Err("Can only bind from Unbound or Disconnected state"),
        }
    }

    /// Transition to bound state
    ///
    /// The platform may reconnect on its own after a loss, so a connected
    /// callback is accepted from `Disconnected` as well as `Binding`.
    pub fn to_bound(&self) -> Result<Self, &'static str> {
        match self {
            Self::Binding | Self::Disconnected | Self::Bound => Ok(Self::Bound),
            _ => Err("Can only complete binding from Binding or Disconnected state"),
        }
    }

    /// Transition to disconnected state
    pub fn to_disconnected(&self) -> Result<Self, &'static str> {
        match self {
            Self::Released => Err("Cannot disconnect a released connection"),
            _ => Ok(Self::Disconnected),
        }
    }

    /// Transition to the terminal released state
    pub fn to_released(&self) -> Self {
        Self::Released
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Unbound
    }
}
