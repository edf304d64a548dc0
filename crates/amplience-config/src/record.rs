//! Configuration records decoded from the host's raw maps
//!
//! The host hands over untyped, string-keyed maps. They are decoded into
//! loosely typed raw structs first and then validated into records:
//!
//! - [`GlobalRecord`] - fallback credentials for every site
//! - [`SiteRecord`] - per-site credentials plus exactly one [`HubTarget`]
//! - [`HubRecord`] - one named hub of a multi-hub site

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ConfigScope, Error, Result, SiteRule};
use crate::layer::{first_present, non_empty};

/// An untyped configuration map as supplied by the host.
pub type RawConfig = Map<String, Value>;

/// Client credentials carried by every layer.
///
/// `None` means the layer does not set the value and it is inherited
/// from the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Credentials {
    /// Create credentials, treating empty strings as unset.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: non_empty(Some(client_id.into())),
            client_secret: non_empty(Some(client_secret.into())),
        }
    }

    /// Merge `higher` on top of `self`, field by field.
    pub fn overlay(&self, higher: &Credentials) -> Credentials {
        Credentials {
            client_id: first_present([higher.client_id.as_ref(), self.client_id.as_ref()])
                .cloned(),
            client_secret: first_present([
                higher.client_secret.as_ref(),
                self.client_secret.as_ref(),
            ])
            .cloned(),
        }
    }
}

/// Global defaults. Only credentials are taken from this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalRecord {
    pub credentials: Credentials,
}

impl GlobalRecord {
    /// Decode the global layer from a raw map.
    ///
    /// A `hub_id` or `hubs` entry is accepted but ignored, hubs are
    /// always a per-site concern.
    pub fn decode(raw: &RawConfig) -> Result<Self> {
        let layer = RawLayer::decode(ConfigScope::Global, raw)?;
        Ok(Self {
            credentials: layer.credentials(),
        })
    }
}

/// The hub(s) a site deploys to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HubTarget {
    /// A single hub addressed through the unaliased provider.
    Single { hub_id: String },
    /// Several named hubs, kept in declaration order. Never empty.
    Multi { hubs: Vec<HubRecord> },
}

impl HubTarget {
    /// Check the target against the hub rules for `site`.
    ///
    /// A single hub needs a hub id. A hub list must be non-empty and every
    /// hub needs a unique name and a hub id. Hubs are checked in order, so
    /// the first offending hub is the one reported.
    pub fn validate(&self, site: &str) -> Result<()> {
        let hubs = match self {
            HubTarget::Single { hub_id } if hub_id.is_empty() => {
                return Err(invalid(site, SiteRule::NoHubTarget));
            }
            HubTarget::Single { .. } => return Ok(()),
            HubTarget::Multi { hubs } if hubs.is_empty() => {
                return Err(invalid(site, SiteRule::NoHubTarget));
            }
            HubTarget::Multi { hubs } => hubs,
        };

        let mut seen = HashSet::new();
        for (index, hub) in hubs.iter().enumerate() {
            if hub.name.is_empty() {
                return Err(invalid(site, SiteRule::UnnamedHub { index }));
            }
            let name = hub.name.clone();
            if !seen.insert(hub.name.as_str()) {
                return Err(invalid(site, SiteRule::DuplicateHub { name }));
            }
            if hub.hub_id.is_empty() {
                return Err(invalid(site, SiteRule::MissingHubId { name }));
            }
        }
        Ok(())
    }
}

/// One named hub of a multi-hub site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubRecord {
    /// Provider alias, also matched against component names
    pub name: String,
    pub credentials: Credentials,
    pub hub_id: String,
}

/// Per-site configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    pub credentials: Credentials,
    pub target: HubTarget,
}

impl SiteRecord {
    /// Decode and validate a site layer from a raw map.
    ///
    /// Exactly one of `hub_id` and a non-empty `hubs` list must be set.
    /// Every hub needs a unique `name` and a `hub_id`.
    pub fn decode(site: &str, raw: &RawConfig) -> Result<Self> {
        let layer = RawLayer::decode(ConfigScope::Site(site.to_string()), raw)?;
        let credentials = layer.credentials();
        let hub_id = non_empty(layer.hub_id);
        let hubs = layer.hubs.unwrap_or_default();

        let target = match (hub_id, hubs.is_empty()) {
            (Some(_), false) => return Err(invalid(site, SiteRule::ConflictingHubTargets)),
            (None, true) => return Err(invalid(site, SiteRule::NoHubTarget)),
            (Some(hub_id), true) => HubTarget::Single { hub_id },
            (None, false) => HubTarget::Multi {
                hubs: hubs.into_iter().map(RawHub::into_record).collect(),
            },
        };
        target.validate(site)?;

        Ok(Self {
            credentials,
            target,
        })
    }
}

fn invalid(site: &str, rule: SiteRule) -> Error {
    Error::InvalidSiteConfig {
        site: site.to_string(),
        rule,
    }
}

/// Shape shared by the global and site maps before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLayer {
    client_id: Option<String>,
    client_secret: Option<String>,
    hub_id: Option<String>,
    hubs: Option<Vec<RawHub>>,
}

impl RawLayer {
    fn decode(scope: ConfigScope, raw: &RawConfig) -> Result<Self> {
        serde_json::from_value(Value::Object(raw.clone()))
            .map_err(|source| Error::Decode { scope, source })
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            client_id: non_empty(self.client_id.clone()),
            client_secret: non_empty(self.client_secret.clone()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHub {
    name: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    hub_id: Option<String>,
}

impl RawHub {
    fn into_record(self) -> HubRecord {
        HubRecord {
            name: non_empty(self.name).unwrap_or_default(),
            credentials: Credentials {
                client_id: non_empty(self.client_id),
                client_secret: non_empty(self.client_secret),
            },
            hub_id: non_empty(self.hub_id).unwrap_or_default(),
        }
    }
}
