//! Layered configuration resolution for the Amplience Terraform adapter.
//!
//! The host pushes one optional global layer and one layer per site. On
//! every request the layers are merged into an [`EffectiveConfig`]:
//!
//! ```text
//!   global (credentials)  ->  site (credentials + hub target)  ->  hub (by component)
//! ```
//!
//! A site targets either a single hub (`hub_id`) or several named hubs
//! (`hubs`), never both. The rule is enforced when the site layer is
//! decoded, so a stored [`SiteRecord`] is always valid.
//!
//! # Example
//!
//! ```
//! use amplience_config::ConfigResolver;
//! use serde_json::json;
//!
//! let mut resolver = ConfigResolver::new();
//! resolver.set_global(json!({"client_id": "g"}).as_object().unwrap()).unwrap();
//! resolver
//!     .set_site("uk", json!({"client_secret": "s", "hub_id": "h"}).as_object().unwrap())
//!     .unwrap();
//!
//! let effective = resolver.resolve("uk").unwrap();
//! assert_eq!(effective.credentials().client_id.as_deref(), Some("g"));
//! ```

pub mod effective;
pub mod error;
pub mod layer;
pub mod manifest;
pub mod record;
pub mod resolver;

pub use effective::{ComponentConfig, EffectiveConfig, HubCredentials};
pub use error::{ConfigScope, Error, Result, SiteRule};
pub use manifest::LayerManifest;
pub use record::{Credentials, GlobalRecord, HubRecord, HubTarget, RawConfig, SiteRecord};
pub use resolver::ConfigResolver;
