//! Terraform fragments for a resolved site
//!
//! Every fragment is built in two steps: the resolved configuration is
//! turned into a list of [`Block`]s, then the blocks go through the one
//! formatter in [`crate::block`].

use amplience_config::{EffectiveConfig, HubCredentials};
use serde::Serialize;

use crate::block::{Block, render_blocks};
use crate::error::Result;
use crate::version::VersionConstraint;

/// Terraform provider name, also the variable namespace
pub const PROVIDER_NAME: &str = "amplience";

/// Registry source of the Terraform provider
pub const PROVIDER_SOURCE: &str = "labd/amplience";

/// Provider version used until the host configures another one
pub const DEFAULT_PROVIDER_VERSION: &str = "0.3.7";

/// Variables and provider mapping for one component.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ComponentFragment {
    /// `amplience_*` variable assignments passed to the component module
    pub variables: String,
    /// Provider mappings such as `amplience = amplience.content`
    pub providers: Vec<String>,
}

/// Render the `required_providers` entry for the provider.
///
/// ```
/// use amplience_render::render_provider_declaration;
///
/// let text = render_provider_declaration("0.3.7").unwrap();
/// assert!(text.contains(r#"version = "~> 0.3.7""#));
/// ```
pub fn render_provider_declaration(provider_version: &str) -> Result<String> {
    let constraint = VersionConstraint::pessimistic(provider_version)?;
    Ok(declaration_block(&constraint).render())
}

/// Render one provider block per hub of the site.
///
/// Multi-hub sites get one aliased block per hub, in declaration order.
pub fn render_resource_block(config: &EffectiveConfig) -> String {
    render_blocks(&resource_blocks(config))
}

/// Render the variables for `component` and the provider mapping it needs.
///
/// Multi-hub sites use only the hub named after the component and fail
/// with `HubNotFound` when there is none.
pub fn render_component_variables(
    config: &EffectiveConfig,
    component: &str,
) -> Result<ComponentFragment> {
    let credentials = config.component_credentials(component)?;
    tracing::debug!(
        site = config.site(),
        component,
        hub = credentials.alias.as_deref(),
        "Rendering component variables"
    );

    let providers = credentials
        .alias
        .iter()
        .map(|alias| format!("{PROVIDER_NAME} = {PROVIDER_NAME}.{alias}"))
        .collect();

    Ok(ComponentFragment {
        variables: variable_block(&credentials).render(),
        providers,
    })
}

fn declaration_block(constraint: &VersionConstraint) -> Block {
    Block::wrapped(format!("{PROVIDER_NAME} ="))
        .assign("source", PROVIDER_SOURCE)
        .assign("version", constraint.to_string())
}

/// The provider blocks for a site, one per provider instance.
pub fn resource_blocks(config: &EffectiveConfig) -> Vec<Block> {
    config
        .provider_credentials()
        .iter()
        .map(provider_block)
        .collect()
}

fn provider_block(credentials: &HubCredentials) -> Block {
    let mut block = Block::wrapped(format!("provider \"{PROVIDER_NAME}\""));
    if let Some(alias) = &credentials.alias {
        block = block.assign("alias", alias);
    }
    block
        .assign("client_id", &credentials.client_id)
        .assign("client_secret", &credentials.client_secret)
        .assign("hub_id", &credentials.hub_id)
}

fn variable_block(credentials: &HubCredentials) -> Block {
    Block::bare()
        .assign(format!("{PROVIDER_NAME}_client_id"), &credentials.client_id)
        .assign(
            format!("{PROVIDER_NAME}_client_secret"),
            &credentials.client_secret,
        )
        .assign(format!("{PROVIDER_NAME}_hub_id"), &credentials.hub_id)
}
