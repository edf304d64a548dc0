//! Precedence rules shared by every configuration layer
//!
//! Layers are global, site and hub. An empty string in any layer means
//! "not set" and is normalized to `None` at decode time, so the only
//! precedence rule left is: the highest layer holding a value wins.

/// Return the first present value from layers ordered highest precedence first.
///
/// # Example
///
/// ```
/// use amplience_config::layer::first_present;
///
/// let hub = None;
/// let site = Some("site-secret");
/// let global = Some("global-secret");
///
/// assert_eq!(first_present([hub, site, global]), Some("site-secret"));
/// ```
pub fn first_present<T, I>(layers: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    layers.into_iter().flatten().next()
}

/// Treat an empty string as unset.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
