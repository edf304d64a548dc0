//! Terraform fragment rendering for the Amplience Terraform adapter.
//!
//! All functions here are pure: they take an [`EffectiveConfig`] from
//! `amplience-config` and return text.
//!
//! - [`render_provider_declaration`] - the `required_providers` entry
//! - [`render_resource_block`] - `provider "amplience"` blocks for a site
//! - [`render_component_variables`] - variables and provider mapping for a component
//!
//! [`EffectiveConfig`]: amplience_config::EffectiveConfig

pub mod block;
pub mod error;
pub mod fragments;
pub mod version;

pub use block::{Assignment, Block, quote, render_blocks};
pub use error::{Error, Result};
pub use fragments::{
    ComponentFragment, DEFAULT_PROVIDER_VERSION, PROVIDER_NAME, PROVIDER_SOURCE,
    render_component_variables, render_provider_declaration, render_resource_block,
    resource_blocks,
};
pub use version::VersionConstraint;
