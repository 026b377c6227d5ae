use serde::{Deserialize, Serialize};

/// Vendor package prefix used when no override matches.
pub const DEFAULT_PREFIX: &str = "net.nyx";

/// Package and action naming the printer service to bind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub package: String,
    pub action: String,
}

impl ServiceIdentity {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            package: format!("{prefix}.printerservice"),
            action: format!("{prefix}.printerservice.IPrinterService"),
        }
    }
}

/// Hardware and OS facts the identity rules are keyed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// OS API level
    pub sdk_int: Option<u32>,
    /// `ro.soc.model` system property
    pub soc_model: Option<String>,
}

/// One hardware exception: when every present field matches the device,
/// bind using `prefix` instead of the default vendor prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityOverride {
    #[serde(default)]
    pub sdk_int: Option<u32>,
    #[serde(default)]
    pub soc_model: Option<String>,
    pub prefix: String,
}

impl IdentityOverride {
    pub fn matches(&self, profile: &DeviceProfile) -> bool {
        let sdk_ok = match self.sdk_int {
            Some(sdk) => profile.sdk_int == Some(sdk),
            None => true,
        };
        let soc_ok = match &self.soc_model {
            Some(model) => profile.soc_model.as_deref() == Some(model.as_str()),
            None => true,
        };
        sdk_ok && soc_ok
    }
}

/// Ordered override table evaluated once per bind request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityTable {
    pub default_prefix: String,
    #[serde(default)]
    pub overrides: Vec<IdentityOverride>,
}

impl IdentityTable {
    pub fn new(default_prefix: impl Into<String>, overrides: Vec<IdentityOverride>) -> Self {
        Self {
            default_prefix: default_prefix.into(),
            overrides,
        }
    }

    /// Known hardware exceptions shipped with the bridge.
    pub fn builtin_overrides() -> Vec<IdentityOverride> {
        vec![IdentityOverride {
            sdk_int: Some(33),
            soc_model: Some("SC9863A".to_string()),
            prefix: "com.incar".to_string(),
        }]
    }

    /// First matching rule wins; falls back to the default prefix.
    pub fn resolve(&self, profile: &DeviceProfile) -> ServiceIdentity {
        let prefix = self
            .overrides
            .iter()
            .find(|rule| rule.matches(profile))
            .map(|rule| rule.prefix.as_str())
            .unwrap_or(&self.default_prefix);
        ServiceIdentity::from_prefix(prefix)
    }
}

impl Default for IdentityTable {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, Self::builtin_overrides())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(sdk: u32, soc: &str) -> DeviceProfile {
        DeviceProfile {
            sdk_int: Some(sdk),
            soc_model: Some(soc.to_string()),
        }
    }

    #[test]
    fn test_default_identity() {
        let identity = IdentityTable::default().resolve(&profile(30, "MT6762"));
        assert_eq!(identity.package, "net.nyx.printerservice");
        assert_eq!(identity.action, "net.nyx.printerservice.IPrinterService");
    }

    #[test]
    fn test_builtin_hardware_exception() {
        let identity = IdentityTable::default().resolve(&profile(33, "SC9863A"));
        assert_eq!(identity.package, "com.incar.printerservice");
        assert_eq!(identity.action, "com.incar.printerservice.IPrinterService");
    }

    #[test]
    fn test_exception_requires_every_field() {
        let table = IdentityTable::default();
        assert_eq!(
            table.resolve(&profile(32, "SC9863A")).package,
            "net.nyx.printerservice"
        );
        assert_eq!(
            table.resolve(&profile(33, "SC9832E")).package,
            "net.nyx.printerservice"
        );
        assert_eq!(
            table.resolve(&DeviceProfile::default()).package,
            "net.nyx.printerservice"
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = IdentityTable::new(
            DEFAULT_PREFIX,
            vec![
                IdentityOverride {
                    sdk_int: None,
                    soc_model: Some("RK3566".into()),
                    prefix: "com.first".into(),
                },
                IdentityOverride {
                    sdk_int: Some(31),
                    soc_model: None,
                    prefix: "com.second".into(),
                },
            ],
        );
        assert_eq!(
            table.resolve(&profile(31, "RK3566")).package,
            "com.first.printerservice"
        );
        assert_eq!(
            table.resolve(&profile(31, "MT6762")).package,
            "com.second.printerservice"
        );
    }
}
