//! Vendor status catalog
//!
//! Every call into the printer service answers with a signed status code.
//! Codes are organised in disjoint bands:
//! - `0`: success
//! - `-1000..=-1099`: generic SDK codes (including the two bridge-local codes)
//! - `-1100..=-1199`: device connection codes
//! - `-1200` and below: printer hardware codes (`PRN_BASE_ERR` minus an offset)
//!
//! The table is kept in lock-step with the vendor SDK. Unknown codes resolve
//! to [`UNKNOWN_MESSAGE`] instead of failing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message returned for any code missing from the catalog.
pub const UNKNOWN_MESSAGE: &str = "unknown error";

/// Signed status code as returned by the printer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub i32);

impl StatusCode {
    // ==================== Generic SDK ====================
    pub const SDK_OK: StatusCode = StatusCode(0);
    pub const SDK_BASE_ERR: StatusCode = StatusCode(-1000);
    pub const SDK_SENT_ERR: StatusCode = StatusCode(-1001);
    pub const SDK_PARAM_ERR: StatusCode = StatusCode(-1002);
    pub const SDK_TIMEOUT: StatusCode = StatusCode(-1003);
    pub const SDK_RECV_ERR: StatusCode = StatusCode(-1004);
    pub const SDK_UNKNOWN_ERR: StatusCode = StatusCode(-1005);
    pub const SDK_CMD_ERR: StatusCode = StatusCode(-1006);
    pub const SDK_UNKNOWN_CMD: StatusCode = StatusCode(-1015);
    /// Bridge-local: an optional platform capability could not be invoked.
    pub const SDK_FEATURE_NOT_SUPPORT: StatusCode = StatusCode(-1099);
    /// Bridge-local: no printer service is bound.
    pub const SDK_SERVICE_NOT_BIND: StatusCode = StatusCode(-1098);

    // ==================== Device connection ====================
    pub const DEVICE_NOT_CONNECT: StatusCode = StatusCode(-1100);
    pub const DEVICE_DISCONNECT: StatusCode = StatusCode(-1101);
    pub const DEVICE_CONNECTED: StatusCode = StatusCode(-1102);
    pub const DEVICE_CONN_ERR: StatusCode = StatusCode(-1103);
    pub const DEVICE_NOT_SUPPORT: StatusCode = StatusCode(-1104);
    pub const DEVICE_NOT_FOUND: StatusCode = StatusCode(-1105);
    pub const DEVICE_OPEN_ERR: StatusCode = StatusCode(-1106);
    pub const DEVICE_NO_PERMISSION: StatusCode = StatusCode(-1107);

    // ==================== Printer hardware ====================
    pub const PRN_BASE_ERR: StatusCode = StatusCode(-1200);
    pub const PRN_COVER_OPEN: StatusCode = StatusCode(-1200 - 1);
    pub const PRN_PARAM_ERR: StatusCode = StatusCode(-1200 - 2);
    pub const PRN_NO_PAPER: StatusCode = StatusCode(-1200 - 3);
    pub const PRN_OVERHEAT: StatusCode = StatusCode(-1200 - 4);
    pub const PRN_UNKNOWN_ERR: StatusCode = StatusCode(-1200 - 5);
    pub const PRN_PRINTING: StatusCode = StatusCode(-1200 - 6);
    pub const PRN_NO_NFC: StatusCode = StatusCode(-1200 - 7);
    pub const PRN_NFC_NO_PAPER: StatusCode = StatusCode(-1200 - 8);
    pub const PRN_LOW_BATTERY: StatusCode = StatusCode(-1200 - 9);
    pub const PRN_LBL_LOCATE_ERR: StatusCode = StatusCode(-1200 - 90);
    pub const PRN_LBL_DETECT_ERR: StatusCode = StatusCode(-1200 - 91);
    pub const PRN_LBL_NO_DETECT: StatusCode = StatusCode(-1200 - 92);

    /// Every code with a dedicated catalog entry.
    pub const CATALOG: &'static [StatusCode] = &[
        Self::SDK_OK,
        Self::SDK_SERVICE_NOT_BIND,
        Self::SDK_SENT_ERR,
        Self::SDK_PARAM_ERR,
        Self::SDK_TIMEOUT,
        Self::SDK_RECV_ERR,
        Self::SDK_CMD_ERR,
        Self::SDK_UNKNOWN_CMD,
        Self::SDK_FEATURE_NOT_SUPPORT,
        Self::DEVICE_NOT_CONNECT,
        Self::DEVICE_DISCONNECT,
        Self::DEVICE_CONNECTED,
        Self::DEVICE_CONN_ERR,
        Self::DEVICE_NOT_SUPPORT,
        Self::DEVICE_NOT_FOUND,
        Self::DEVICE_OPEN_ERR,
        Self::DEVICE_NO_PERMISSION,
        Self::PRN_COVER_OPEN,
        Self::PRN_PARAM_ERR,
        Self::PRN_NO_PAPER,
        Self::PRN_OVERHEAT,
        Self::PRN_UNKNOWN_ERR,
        Self::PRN_PRINTING,
        Self::PRN_NO_NFC,
        Self::PRN_NFC_NO_PAPER,
        Self::PRN_LOW_BATTERY,
        Self::PRN_LBL_LOCATE_ERR,
        Self::PRN_LBL_DETECT_ERR,
        Self::PRN_LBL_NO_DETECT,
    ];

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SDK_OK
    }

    /// Human readable message; never fails.
    pub fn message(self) -> &'static str {
        message(self.0)
    }

    pub fn band(self) -> StatusBand {
        StatusBand::of(self.0)
    }

    /// True for codes strictly inside the printer hardware status band
    /// (`-1300 < code < -1200`). These are reportable status values for the
    /// status query rather than failures.
    pub fn is_printer_status(self) -> bool {
        self.0 < Self::PRN_BASE_ERR.0 && self.0 > -1300
    }
}

impl From<i32> for StatusCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<StatusCode> for i32 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric band a status code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    Success,
    Sdk,
    Device,
    Printer,
    Unknown,
}

impl StatusBand {
    pub fn of(code: i32) -> Self {
        match code {
            0 => Self::Success,
            -1099..=-1000 => Self::Sdk,
            -1199..=-1100 => Self::Device,
            c if c <= -1200 && c >= -1200 - 92 => Self::Printer,
            _ => Self::Unknown,
        }
    }
}

/// Resolve a status code to its catalog message.
pub fn message(code: i32) -> &'static str {
    match StatusCode(code) {
        StatusCode::SDK_OK => "Success",
        StatusCode::SDK_SERVICE_NOT_BIND => "Printer service not bind",
        StatusCode::SDK_SENT_ERR => "Send error",
        StatusCode::SDK_PARAM_ERR => "Params error",
        StatusCode::SDK_TIMEOUT => "Timeout",
        StatusCode::SDK_RECV_ERR => "Receive error",
        StatusCode::SDK_CMD_ERR => "Cmd error",
        StatusCode::SDK_UNKNOWN_CMD => "Unknown cmd",
        StatusCode::SDK_FEATURE_NOT_SUPPORT => "Feature not support",
        StatusCode::DEVICE_NOT_CONNECT => "Device not connected",
        StatusCode::DEVICE_DISCONNECT => "Device disconnected",
        StatusCode::DEVICE_CONNECTED => "Device connected",
        StatusCode::DEVICE_CONN_ERR => "Device connect error",
        StatusCode::DEVICE_NOT_SUPPORT => "Device not support",
        StatusCode::DEVICE_NOT_FOUND => "Device not found",
        StatusCode::DEVICE_OPEN_ERR => "Device open error",
        StatusCode::DEVICE_NO_PERMISSION => "No permission",
        StatusCode::PRN_COVER_OPEN => "Printer cover open",
        StatusCode::PRN_PARAM_ERR => "Printer params error",
        StatusCode::PRN_NO_PAPER => "Printer no paper",
        StatusCode::PRN_OVERHEAT => "Printer overheat",
        StatusCode::PRN_UNKNOWN_ERR => "Printer unknown error",
        StatusCode::PRN_PRINTING => "Printer is printing",
        StatusCode::PRN_NO_NFC => "Printer no NFC",
        StatusCode::PRN_NFC_NO_PAPER => "Printer NFC no paper",
        StatusCode::PRN_LOW_BATTERY => "Printer low battery",
        StatusCode::PRN_LBL_LOCATE_ERR => "Printer label locate error",
        StatusCode::PRN_LBL_DETECT_ERR => "Printer label detect error",
        StatusCode::PRN_LBL_NO_DETECT => "Printer label not detected",
        _ => UNKNOWN_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_message() {
        assert_eq!(message(0), "Success");
        assert!(StatusCode::SDK_OK.is_success());
    }

    #[test]
    fn test_every_catalog_entry_has_a_dedicated_message() {
        for code in StatusCode::CATALOG {
            let msg = code.message();
            assert!(!msg.is_empty());
            assert_ne!(msg, UNKNOWN_MESSAGE, "code {} fell back", code);
        }
    }

    #[test]
    fn test_catalog_messages_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in StatusCode::CATALOG {
            assert!(seen.insert(code.message()), "duplicate message for {}", code);
        }
    }

    #[test]
    fn test_unmapped_codes_fall_back() {
        for code in [1, 42, -1, -999, -1005, -1050, -1150, -1210, -1299, -1300, i32::MIN, i32::MAX] {
            assert_eq!(message(code), UNKNOWN_MESSAGE);
        }
    }

    #[test]
    fn test_every_code_in_the_bands_resolves_to_some_message() {
        for code in -1300..=0 {
            assert!(!message(code).is_empty());
        }
    }

    #[test]
    fn test_printer_status_band_is_exclusive() {
        assert!(!StatusCode(-1200).is_printer_status());
        assert!(!StatusCode(-1300).is_printer_status());
        assert!(StatusCode(-1201).is_printer_status());
        assert!(StatusCode(-1299).is_printer_status());
        assert!(!StatusCode(0).is_printer_status());
    }

    #[test]
    fn test_bands() {
        assert_eq!(StatusCode::SDK_OK.band(), StatusBand::Success);
        assert_eq!(StatusCode::SDK_TIMEOUT.band(), StatusBand::Sdk);
        assert_eq!(StatusCode::SDK_SERVICE_NOT_BIND.band(), StatusBand::Sdk);
        assert_eq!(StatusCode::DEVICE_NO_PERMISSION.band(), StatusBand::Device);
        assert_eq!(StatusCode::PRN_LBL_NO_DETECT.band(), StatusBand::Printer);
        assert_eq!(StatusCode(-1400).band(), StatusBand::Unknown);
        assert_eq!(StatusCode(7).band(), StatusBand::Unknown);
    }
}
