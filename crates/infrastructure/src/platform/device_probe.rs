use std::process::Command;

use domain::connection::DeviceProfile;
use tracing::debug;

const SDK_PROP: &str = "ro.build.version.sdk";
const SOC_PROP: &str = "ro.soc.model";

/// Reads the device profile from Android system properties via `getprop`.
///
/// Off-device the command is missing and both fields stay unknown, which
/// resolves to the default service identity.
pub fn probe_device() -> DeviceProfile {
    DeviceProfile {
        sdk_int: read_prop(SDK_PROP).as_deref().and_then(parse_sdk_int),
        soc_model: read_prop(SOC_PROP),
    }
}

fn read_prop(name: &str) -> Option<String> {
    let output = match Command::new("getprop").arg(name).output() {
        Ok(output) if output.status.success() => output,
        Ok(_) => return None,
        Err(e) => {
            debug!(prop = name, error = %e, "getprop unavailable");
            return None;
        }
    };
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

pub fn parse_sdk_int(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
