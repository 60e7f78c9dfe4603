//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every table is keyed by canonical header name and keeps file order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::header::{Delimiters, HeaderData};
use crate::registry::nickname::NicknameTree;

/// User configuration for a header registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Type hint token per header (`Date`, `List,`, `List;`, `Policies`, `Value`).
    #[serde(alias = "headerClasses")]
    pub header_classes: IndexMap<String, String>,

    /// Nickname overrides, flat or nested.
    pub nicknames: NicknameTree,

    /// Safe value overrides.
    pub safe: IndexMap<String, HeaderData>,

    /// Delimiter overrides.
    pub delimiters: IndexMap<String, Delimiters>,

    /// Build nickname accessors.
    #[serde(alias = "setupNicknames")]
    pub setup_nicknames: bool,

    /// Rebuild the registry from its seed after every write.
    #[serde(alias = "resetAfterApply")]
    pub reset_after_apply: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            header_classes: IndexMap::new(),
            nicknames: NicknameTree::new(),
            safe: IndexMap::new(),
            delimiters: IndexMap::new(),
            setup_nicknames: true,
            reset_after_apply: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert!(config.setup_nicknames);
        assert!(!config.reset_after_apply);
        assert!(config.header_classes.is_empty());
    }

    #[test]
    fn test_minimal_config() {
        let config: RegistryConfig = toml::from_str("resetAfterApply = true").unwrap();
        assert!(config.reset_after_apply);
        assert!(config.setup_nicknames);
    }

    #[test]
    fn test_full_config() {
        let config: RegistryConfig = toml::from_str(
            r#"
            setup_nicknames = false

            [header_classes]
            X-Trace = "List;"

            [nicknames]
            trace = "X-Trace"

            [nicknames.cors]
            origin = "Access-Control-Allow-Origin"

            [safe]
            X-Frame-Options = "DENY"

            [safe.Content-Security-Policy]
            default-src = ["'none'"]
            img-src = "'self'"

            [delimiters.X-Trace]
            list = " | "
            "#,
        )
        .unwrap();

        assert!(!config.setup_nicknames);
        assert_eq!(config.header_classes["X-Trace"], "List;");
        assert_eq!(config.nicknames.resolve_path("cors.origin"), Some("Access-Control-Allow-Origin"));
        assert_eq!(config.safe["X-Frame-Options"], HeaderData::from("DENY"));
        assert_eq!(
            config.safe["Content-Security-Policy"],
            HeaderData::directives([("default-src", ["'none'"]), ("img-src", ["'self'"])])
        );
        assert_eq!(config.delimiters["X-Trace"].list.as_deref(), Some(" | "));
    }
}
