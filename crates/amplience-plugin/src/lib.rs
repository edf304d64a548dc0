//! Host plugin facade for the Amplience Terraform adapter.
//!
//! [`AmpliencePlugin`] wires the layered resolver from `amplience-config`
//! to the fragment renderer from `amplience-render` behind the
//! [`HostPlugin`] trait the composition host calls.
//!
//! # Example
//!
//! ```
//! use amplience_plugin::{AmpliencePlugin, HostPlugin};
//! use serde_json::json;
//!
//! let mut plugin = AmpliencePlugin::new();
//! plugin
//!     .set_site_config("uk", json!({"client_id": "c", "client_secret": "s", "hub_id": "h"}).as_object().unwrap())
//!     .unwrap();
//!
//! assert!(plugin.is_enabled());
//! let resources = plugin.render_terraform_resources("uk").unwrap();
//! assert!(resources.starts_with(r#"provider "amplience" {"#));
//! ```

pub mod error;
pub mod logging;
pub mod plugin;

pub use error::{Error, Result};
pub use plugin::{AmpliencePlugin, HostPlugin, PluginSettings};

pub use amplience_config::{LayerManifest, RawConfig};
pub use amplience_render::ComponentFragment;
