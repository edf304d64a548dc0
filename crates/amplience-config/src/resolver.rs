//! Configuration resolution with layered merge
//!
//! The `ConfigResolver` stores the raw layers pushed by the host and merges
//! them on demand. Nothing resolved is cached; every call recomputes the
//! effective configuration from the stored layers.

use std::collections::HashMap;

use crate::effective::{ComponentConfig, EffectiveConfig};
use crate::error::{Error, Result};
use crate::record::{GlobalRecord, RawConfig, SiteRecord};

/// Holds the global and per-site layers and resolves them per request.
///
/// Layers, lowest to highest precedence:
/// 1. Global defaults (credentials only)
/// 2. Site config (credentials plus the hub target)
/// 3. Hub config (multi-hub sites, selected by component name)
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    global: Option<GlobalRecord>,
    sites: HashMap<String, SiteRecord>,
    enabled: bool,
}

impl ConfigResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and store the global layer.
    pub fn set_global(&mut self, raw: &RawConfig) -> Result<()> {
        let record = GlobalRecord::decode(raw)?;
        tracing::debug!(
            has_client_id = record.credentials.client_id.is_some(),
            has_client_secret = record.credentials.client_secret.is_some(),
            "Stored global config"
        );
        self.global = Some(record);
        self.enabled = true;
        Ok(())
    }

    /// Decode, validate and store the layer for `site`.
    ///
    /// Replaces any earlier layer for the same site. An invalid layer is
    /// rejected and leaves the stored state untouched.
    pub fn set_site(&mut self, site: &str, raw: &RawConfig) -> Result<()> {
        let record = SiteRecord::decode(site, raw)?;
        let replaced = self.sites.insert(site.to_string(), record).is_some();
        tracing::debug!(site, replaced, "Stored site config");
        self.enabled = true;
        Ok(())
    }

    /// Check if any layer has been stored
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a layer exists for `site`
    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains_key(site)
    }

    /// Names of all configured sites, sorted
    pub fn site_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sites.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge the global and site layers for `site`.
    ///
    /// Global supplies credential defaults only; the site's own values win
    /// field by field and the hub target comes from the site alone.
    pub fn resolve(&self, site: &str) -> Result<EffectiveConfig> {
        let record = self.sites.get(site).ok_or_else(|| Error::SiteNotFound {
            site: site.to_string(),
        })?;

        let credentials = match &self.global {
            Some(global) => global.credentials.overlay(&record.credentials),
            None => record.credentials.clone(),
        };

        let effective = EffectiveConfig::new(site, credentials, record.target.clone())?;
        tracing::debug!(site, multi_hub = effective.is_multi_hub(), "Resolved site config");
        Ok(effective)
    }

    /// Resolve `site` and narrow it to the hub serving `component`.
    pub fn resolve_for_component(&self, site: &str, component: &str) -> Result<ComponentConfig> {
        let effective = self.resolve(site)?;
        let (credentials, selected_hub) = effective.select_component(component)?;
        let selected_hub = selected_hub.cloned();
        tracing::debug!(
            site,
            component,
            hub = selected_hub.as_ref().map(|hub| hub.name.as_str()),
            "Resolved component config"
        );

        Ok(ComponentConfig {
            effective,
            credentials,
            selected_hub,
        })
    }
}
