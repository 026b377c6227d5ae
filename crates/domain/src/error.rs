use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::StatusCode;

/// Errors surfaced to callers of the printer bridge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// No printer service is bound; the call never reached the service.
    #[error("Printer service not bind")]
    ServiceNotBound,

    /// A platform capability required by the call is unavailable.
    #[error("Feature not support")]
    FeatureNotSupported,

    /// The printer service answered with a non-success status code.
    #[error("{message}")]
    VendorStatus { code: i32, message: String },

    #[error("Params error: {0}")]
    InvalidArgument(String),

    #[error("Invalid payload: {0}")]
    Decode(String),
}

impl BridgeError {
    /// Build a vendor failure, resolving its message through the catalog.
    pub fn vendor(code: i32) -> Self {
        Self::VendorStatus {
            code,
            message: StatusCode(code).message().to_string(),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ServiceNotBound => StatusCode::SDK_SERVICE_NOT_BIND.code(),
            Self::FeatureNotSupported => StatusCode::SDK_FEATURE_NOT_SUPPORT.code(),
            Self::VendorStatus { code, .. } => *code,
            Self::InvalidArgument(_) => StatusCode::SDK_PARAM_ERR.code(),
            Self::Decode(_) => StatusCode::SDK_UNKNOWN_ERR.code(),
        }
    }

    pub fn reply(&self) -> ErrorReply {
        ErrorReply {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Structured `(code, message)` pair handed to the scripting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub code: i32,
    pub message: String,
}

impl From<BridgeError> for ErrorReply {
    fn from(err: BridgeError) -> Self {
        err.reply()
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
