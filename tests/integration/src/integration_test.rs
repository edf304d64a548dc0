//! End-to-end tests for the adapter
//!
//! These tests exercise the complete flow the host drives:
//! layer manifest -> plugin setup -> resolution -> rendered fragments.

use amplience_config::{Error as ConfigError, LayerManifest, SiteRule};
use amplience_plugin::{AmpliencePlugin, HostPlugin, PluginSettings};
use pretty_assertions::assert_eq;

const SINGLE_HUB: &str = include_str!("../../../test-fixtures/layers/single-hub.toml");
const MULTI_HUB: &str = include_str!("../../../test-fixtures/layers/multi-hub.toml");
const INVALID_SITE: &str = include_str!("../../../test-fixtures/layers/invalid-site.toml");

fn load(content: &str) -> AmpliencePlugin {
    let manifest = LayerManifest::parse(content).unwrap();
    let mut plugin = AmpliencePlugin::new();
    plugin.apply_manifest(&manifest).unwrap();
    plugin
}

#[test]
fn test_single_hub_sites_render_with_inherited_credentials() {
    let mut plugin = load(SINGLE_HUB);
    plugin.configure("production", "0.5.1").unwrap();

    assert!(plugin.is_enabled());
    assert_eq!(plugin.resolver().site_names(), vec!["uk", "us"]);

    assert_eq!(
        plugin.render_terraform_providers("uk").unwrap(),
        "amplience = {\n  source  = \"labd/amplience\"\n  version = \"~> 0.5.1\"\n}\n"
    );

    assert_eq!(
        plugin.render_terraform_resources("uk").unwrap(),
        r#"provider "amplience" {
  client_id     = "global-client"
  client_secret = "uk-secret"
  hub_id        = "uk-hub"
}
"#
    );

    let us = plugin.render_terraform_component("us", "checkout").unwrap();
    assert_eq!(
        us.variables,
        r#"amplience_client_id     = "global-client"
amplience_client_secret = "global-secret"
amplience_hub_id        = "us-hub"
"#
    );
    assert!(us.providers.is_empty());
}

#[test]
fn test_multi_hub_site_renders_every_hub_and_one_component() {
    let plugin = load(MULTI_HUB);

    assert_eq!(
        plugin.render_terraform_resources("eu").unwrap(),
        r#"provider "amplience" {
  alias         = "content"
  client_id     = "global-client"
  client_secret = "eu-secret"
  hub_id        = "eu-content"
}

provider "amplience" {
  alias         = "media"
  client_id     = "media-client"
  client_secret = "media-secret"
  hub_id        = "eu-media"
}
"#
    );

    let content = plugin.render_terraform_component("eu", "content").unwrap();
    assert_eq!(
        content.variables,
        r#"amplience_client_id     = "global-client"
amplience_client_secret = "eu-secret"
amplience_hub_id        = "eu-content"
"#
    );
    assert_eq!(content.providers, vec!["amplience = amplience.content"]);

    let err = plugin.render_terraform_component("eu", "search").unwrap_err();
    assert!(matches!(
        err.config_error(),
        Some(ConfigError::HubNotFound { component, site }) if component == "search" && site == "eu"
    ));
}

#[test]
fn test_invalid_site_in_manifest_is_rejected() {
    let manifest = LayerManifest::parse(INVALID_SITE).unwrap();
    let mut plugin = AmpliencePlugin::new();

    let err = plugin.apply_manifest(&manifest).unwrap_err();

    assert!(matches!(
        err.config_error(),
        Some(ConfigError::InvalidSiteConfig { site, rule: SiteRule::ConflictingHubTargets }) if site == "broken"
    ));
    assert!(!plugin.is_enabled());
    assert!(plugin.resolver().site_names().is_empty());
    assert!(plugin.render_terraform_resources("a_good").is_err());
}

#[test]
fn test_plugin_settings_flow_into_declaration() {
    let settings = PluginSettings {
        environment: Some("test".to_string()),
        provider_version: "0.4".to_string(),
    };
    let mut plugin = AmpliencePlugin::with_settings(settings).unwrap();
    plugin
        .apply_manifest(&LayerManifest::parse(SINGLE_HUB).unwrap())
        .unwrap();

    let text = plugin.render_terraform_providers("us").unwrap();
    assert!(text.contains(r#"version = "~> 0.4""#), "got:\n{text}");
}

#[test]
fn test_unknown_site_produces_no_output() {
    let plugin = load(MULTI_HUB);

    assert!(plugin.render_terraform_providers("uk").is_err());
    assert!(plugin.render_terraform_resources("uk").is_err());
    assert!(plugin.render_terraform_component("uk", "content").is_err());
}
