//! Effective configuration produced by resolution
//!
//! These values are derived on every request and never stored.

use crate::error::{Error, Result};
use crate::record::{Credentials, HubRecord, HubTarget};

/// The merged configuration for a site: global credentials overlaid with
/// the site's own, plus the site's hub target.
///
/// Only built through [`EffectiveConfig::new`], so the target always
/// satisfies the hub rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    site: String,
    credentials: Credentials,
    target: HubTarget,
}

/// Fully resolved values for one provider instance.
///
/// Unresolved credentials are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubCredentials {
    /// Provider alias; `None` for the unaliased single-hub provider
    pub alias: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub hub_id: String,
}

/// Component-scoped resolution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    pub effective: EffectiveConfig,
    /// Values that apply to the component
    pub credentials: HubCredentials,
    /// The hub matched by component name; `None` for single-hub sites
    pub selected_hub: Option<HubRecord>,
}

impl EffectiveConfig {
    /// Build an effective config, rejecting targets that break the hub rules.
    pub fn new(
        site: impl Into<String>,
        credentials: Credentials,
        target: HubTarget,
    ) -> Result<Self> {
        let site = site.into();
        target.validate(&site)?;
        Ok(Self {
            site,
            credentials,
            target,
        })
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Merged global and site credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn target(&self) -> &HubTarget {
        &self.target
    }

    /// Check if this site deploys to several named hubs
    pub fn is_multi_hub(&self) -> bool {
        matches!(self.target, HubTarget::Multi { .. })
    }

    /// Resolved values for every provider instance of the site, in
    /// declaration order.
    pub fn provider_credentials(&self) -> Vec<HubCredentials> {
        match &self.target {
            HubTarget::Single { hub_id } => vec![self.single_hub(hub_id)],
            HubTarget::Multi { hubs } => hubs.iter().map(|hub| self.for_hub(hub)).collect(),
        }
    }

    /// Resolved values that apply to `component`.
    pub fn component_credentials(&self, component: &str) -> Result<HubCredentials> {
        self.select_component(component).map(|(credentials, _)| credentials)
    }

    /// Resolved values for `component` together with the hub they came from.
    ///
    /// Single-hub sites have no hub to select and pair their values with
    /// `None`. Multi-hub sites match the hub name exactly (case-sensitive).
    pub fn select_component(
        &self,
        component: &str,
    ) -> Result<(HubCredentials, Option<&HubRecord>)> {
        match &self.target {
            HubTarget::Single { hub_id } => Ok((self.single_hub(hub_id), None)),
            HubTarget::Multi { hubs } => {
                let hub = self.find_hub(hubs, component)?;
                Ok((self.for_hub(hub), Some(hub)))
            }
        }
    }

    fn find_hub<'a>(&self, hubs: &'a [HubRecord], component: &str) -> Result<&'a HubRecord> {
        hubs.iter()
            .find(|hub| hub.name == component)
            .ok_or_else(|| Error::HubNotFound {
                component: component.to_string(),
                site: self.site.clone(),
            })
    }

    fn single_hub(&self, hub_id: &str) -> HubCredentials {
        HubCredentials {
            alias: None,
            client_id: self.credentials.client_id.clone().unwrap_or_default(),
            client_secret: self.credentials.client_secret.clone().unwrap_or_default(),
            hub_id: hub_id.to_string(),
        }
    }

    fn for_hub(&self, hub: &HubRecord) -> HubCredentials {
        let merged = self.credentials.overlay(&hub.credentials);
        HubCredentials {
            alias: Some(hub.name.clone()),
            client_id: merged.client_id.unwrap_or_default(),
            client_secret: merged.client_secret.unwrap_or_default(),
            hub_id: hub.hub_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteRule;

    fn hub(name: &str, client_id: &str, hub_id: &str) -> HubRecord {
        HubRecord {
            name: name.to_string(),
            credentials: Credentials::new(client_id, ""),
            hub_id: hub_id.to_string(),
        }
    }

    fn multi() -> EffectiveConfig {
        EffectiveConfig::new(
            "site",
            Credentials::new("site-id", "site-secret"),
            HubTarget::Multi {
                hubs: vec![hub("a", "", "ha"), hub("b", "b-id", "hb")],
            },
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_empty_hub_list() {
        let err = EffectiveConfig::new(
            "site",
            Credentials::default(),
            HubTarget::Multi { hubs: vec![] },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidSiteConfig { ref site, rule: SiteRule::NoHubTarget } if site == "site"
        ));
    }

    #[test]
    fn new_rejects_duplicate_hub_names() {
        let err = EffectiveConfig::new(
            "site",
            Credentials::default(),
            HubTarget::Multi {
                hubs: vec![hub("a", "", "h1"), hub("a", "", "h2")],
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::InvalidSiteConfig {
                rule: SiteRule::DuplicateHub { .. },
                ..
            }
        ));
    }

    #[test]
    fn accessors_expose_validated_parts() {
        let effective = multi();

        assert_eq!(effective.site(), "site");
        assert_eq!(effective.credentials(), &Credentials::new("site-id", "site-secret"));
        assert!(effective.is_multi_hub());
        assert!(matches!(effective.target(), HubTarget::Multi { hubs } if hubs.len() == 2));
    }

    #[test]
    fn select_component_pairs_credentials_with_hub() {
        let effective = multi();

        let (credentials, hub) = effective.select_component("b").unwrap();

        assert_eq!(hub.map(|h| h.name.as_str()), Some("b"));
        assert_eq!(
            credentials,
            HubCredentials {
                alias: Some("b".to_string()),
                client_id: "b-id".to_string(),
                client_secret: "site-secret".to_string(),
                hub_id: "hb".to_string(),
            }
        );
        assert_eq!(effective.component_credentials("b").unwrap(), credentials);
    }

    #[test]
    fn select_component_on_single_hub_has_no_hub() {
        let effective = EffectiveConfig::new(
            "site",
            Credentials::new("c", "s"),
            HubTarget::Single {
                hub_id: "h".to_string(),
            },
        )
        .unwrap();

        let (credentials, hub) = effective.select_component("anything").unwrap();

        assert!(hub.is_none());
        assert_eq!(credentials.alias, None);
        assert_eq!(credentials.hub_id, "h");
    }

    #[test]
    fn select_component_miss_names_component_and_site() {
        let err = multi().select_component("c").unwrap_err();

        assert!(matches!(
            err,
            Error::HubNotFound { ref component, ref site } if component == "c" && site == "site"
        ));
    }
}
