//! Error types for amplience-config

use std::fmt;

/// Result type for amplience-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// The configuration layer a decode failure originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,
    Site(String),
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Global => write!(f, "global config"),
            ConfigScope::Site(site) => write!(f, "config for site '{site}'"),
        }
    }
}

/// The site configuration rule that was violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRule {
    /// Neither `hub_id` nor a non-empty `hubs` list was given.
    NoHubTarget,
    /// Both `hub_id` and a non-empty `hubs` list were given.
    ConflictingHubTargets,
    /// A hub entry without a `name`.
    UnnamedHub { index: usize },
    /// Two hub entries share the same `name`.
    DuplicateHub { name: String },
    /// A hub entry without a `hub_id`.
    MissingHubId { name: String },
}

impl fmt::Display for SiteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteRule::NoHubTarget => write!(f, "either hub_id or hubs must be set"),
            SiteRule::ConflictingHubTargets => {
                write!(f, "hub_id and hubs are mutually exclusive")
            }
            SiteRule::UnnamedHub { index } => write!(f, "hub at position {index} has no name"),
            SiteRule::DuplicateHub { name } => {
                write!(f, "hub '{name}' is declared more than once")
            }
            SiteRule::MissingHubId { name } => write!(f, "hub '{name}' has no hub_id"),
        }
    }
}

/// Errors that can occur while ingesting or resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A raw config map had a field of an incompatible shape
    #[error("Failed to decode {scope}: {source}")]
    Decode {
        scope: ConfigScope,
        #[source]
        source: serde_json::Error,
    },

    /// A site config violated the hub target rules
    #[error("Invalid config for site '{site}': {rule}")]
    InvalidSiteConfig { site: String, rule: SiteRule },

    /// No config was registered for the site
    #[error("No config found for site '{site}'")]
    SiteNotFound { site: String },

    /// A multi-hub site has no hub named after the component
    #[error("No hub config found for component '{component}' in site '{site}'")]
    HubNotFound { component: String, site: String },

    /// The TOML layer manifest could not be parsed
    #[error("Failed to parse layer manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),
}
