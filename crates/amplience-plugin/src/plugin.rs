//! The plugin as seen by the composition host
//!
//! The host drives every plugin through [`HostPlugin`]: it configures the
//! plugin, pushes raw config layers, checks whether the plugin is enabled,
//! and then asks for Terraform fragments per site and component.

use amplience_config::{ConfigResolver, LayerManifest, RawConfig};
use amplience_render::{
    ComponentFragment, DEFAULT_PROVIDER_VERSION, PROVIDER_NAME, VersionConstraint,
    render_component_variables, render_provider_declaration, render_resource_block,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Trait implemented by plugins registered with the composition host
pub trait HostPlugin {
    /// Returns the plugin's identifier (e.g., "amplience")
    fn identifier(&self) -> &str;

    /// Whether any configuration was given. The host skips disabled plugins.
    fn is_enabled(&self) -> bool;

    /// Set the deployment environment and, if non-empty, the provider version.
    fn configure(&mut self, environment: &str, provider_version: &str) -> Result<()>;

    /// Store the global config layer.
    fn set_global_config(&mut self, data: &RawConfig) -> Result<()>;

    /// Store the config layer for `site`.
    fn set_site_config(&mut self, site: &str, data: &RawConfig) -> Result<()>;

    /// Render the `required_providers` entry for `site`.
    fn render_terraform_providers(&self, site: &str) -> Result<String>;

    /// Render the provider blocks for `site`.
    fn render_terraform_resources(&self, site: &str) -> Result<String>;

    /// Render the variables and provider mapping for `component` of `site`.
    fn render_terraform_component(&self, site: &str, component: &str)
    -> Result<ComponentFragment>;
}

/// Host-supplied plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Deployment environment, e.g. "test" or "production"
    pub environment: Option<String>,

    /// Terraform provider version, pinned with `~>`
    pub provider_version: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            environment: None,
            provider_version: DEFAULT_PROVIDER_VERSION.to_string(),
        }
    }
}

/// Amplience plugin: resolves layered site config and renders it.
///
/// Setup methods take `&mut self` and rendering takes `&self`, so a host
/// sharing one instance across threads must put it behind a lock.
#[derive(Debug, Default)]
pub struct AmpliencePlugin {
    settings: PluginSettings,
    resolver: ConfigResolver,
}

impl AmpliencePlugin {
    /// Create a plugin with default settings and no configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plugin with the given settings.
    ///
    /// Fails if the provider version is not `major.minor[.patch]`.
    pub fn with_settings(settings: PluginSettings) -> Result<Self> {
        VersionConstraint::pessimistic(&settings.provider_version).map_err(Error::Render)?;
        Ok(Self {
            settings,
            resolver: ConfigResolver::new(),
        })
    }

    /// Current settings
    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// The underlying resolver
    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    /// Push every layer of a TOML manifest, global first.
    pub fn apply_manifest(&mut self, manifest: &LayerManifest) -> Result<()> {
        manifest.apply(&mut self.resolver)?;
        Ok(())
    }
}

impl HostPlugin for AmpliencePlugin {
    fn identifier(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_enabled(&self) -> bool {
        self.resolver.is_enabled()
    }

    fn configure(&mut self, environment: &str, provider_version: &str) -> Result<()> {
        if !provider_version.is_empty() {
            VersionConstraint::pessimistic(provider_version).map_err(Error::Render)?;
            self.settings.provider_version = provider_version.to_string();
        }
        self.settings.environment = Some(environment.to_string()).filter(|e| !e.is_empty());
        tracing::debug!(
            environment,
            provider_version = %self.settings.provider_version,
            "Configured plugin"
        );
        Ok(())
    }

    fn set_global_config(&mut self, data: &RawConfig) -> Result<()> {
        self.resolver.set_global(data)?;
        Ok(())
    }

    fn set_site_config(&mut self, site: &str, data: &RawConfig) -> Result<()> {
        self.resolver.set_site(site, data)?;
        Ok(())
    }

    fn render_terraform_providers(&self, site: &str) -> Result<String> {
        // Only configured sites get the provider
        self.resolver.resolve(site)?;
        Ok(render_provider_declaration(&self.settings.provider_version)?)
    }

    fn render_terraform_resources(&self, site: &str) -> Result<String> {
        let config = self.resolver.resolve(site)?;
        Ok(render_resource_block(&config))
    }

    fn render_terraform_component(
        &self,
        site: &str,
        component: &str,
    ) -> Result<ComponentFragment> {
        let config = self.resolver.resolve(site)?;
        Ok(render_component_variables(&config, component)?)
    }
}
