//! TOML layer manifest
//!
//! Hosts that keep their configuration in a file rather than passing maps
//! around can describe every layer in one document:
//!
//! ```toml
//! [global]
//! client_id = "shared-client"
//!
//! [sites.uk]
//! client_secret = "uk-secret"
//! hub_id = "uk-hub"
//!
//! [[sites.eu.hubs]]
//! name = "content"
//! hub_id = "eu-content"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;
use crate::record::RawConfig;
use crate::resolver::ConfigResolver;

/// Raw layers read from a TOML document, not yet validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayerManifest {
    /// Global defaults layer
    pub global: Option<RawConfig>,

    /// Site layers keyed by site name
    pub sites: BTreeMap<String, RawConfig>,
}

impl LayerManifest {
    /// Parse a manifest from TOML content
    ///
    /// Only the document structure is checked here. Field shapes and hub
    /// rules are validated when the layers are applied to a resolver.
    ///
    /// # Example
    ///
    /// ```
    /// use amplience_config::LayerManifest;
    ///
    /// let manifest = LayerManifest::parse(r#"
    /// [sites.uk]
    /// hub_id = "uk-hub"
    /// "#).unwrap();
    ///
    /// assert!(manifest.global.is_none());
    /// assert!(manifest.sites.contains_key("uk"));
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: LayerManifest = toml::from_str(content)?;
        Ok(manifest)
    }

    /// Push every layer into `resolver`, global first, then sites by name.
    ///
    /// All or nothing: if any layer is rejected, `resolver` is left exactly
    /// as it was before the call.
    pub fn apply(&self, resolver: &mut ConfigResolver) -> Result<()> {
        let mut staged = resolver.clone();
        if let Some(global) = &self.global {
            staged.set_global(global)?;
        }
        for (site, raw) in &self.sites {
            staged.set_site(site, raw)?;
        }
        *resolver = staged;
        tracing::debug!(sites = self.sites.len(), "Applied layer manifest");
        Ok(())
    }
}
