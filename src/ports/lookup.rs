// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup capability consumed by the placeholder resolver.
//!
//! The resolver never owns or mutates the data it reads from; it only needs a
//! way to ask "what is the value bound to this name?". Anything that can
//! answer that question implements [`Lookup`].

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Read-only "get value for key" capability.
///
/// # Examples
///
/// ```rust
/// use envaware::ports::Lookup;
/// use std::collections::HashMap;
///
/// let mut map = HashMap::new();
/// map.insert("home".to_string(), "/home/app".to_string());
///
/// assert_eq!(map.lookup("home").as_deref(), Some("/home/app"));
/// assert_eq!(map.lookup("missing"), None);
/// ```
pub trait Lookup {
    /// Returns the value bound to `key`, or `None` when there is none.
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<T: Lookup + ?Sized> Lookup for &T {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(key)
    }
}

impl Lookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

impl Lookup for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_str()))
    }
}

/// Adapts a closure into a [`Lookup`].
///
/// # Examples
///
/// ```rust
/// use envaware::ports::{FnLookup, Lookup};
///
/// let lookup = FnLookup(|key: &str| (key == "answer").then(|| "42".to_string()));
/// assert_eq!(lookup.lookup("answer").as_deref(), Some("42"));
/// ```
pub struct FnLookup<F>(pub F);

impl<F> Lookup for FnLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        (self.0)(key).map(Cow::Owned)
    }
}

/// Consults several lookups in order; the first one that knows a key wins.
///
/// # Examples
///
/// ```rust
/// use envaware::ports::{Layered, Lookup};
/// use std::collections::HashMap;
///
/// let mut top = HashMap::new();
/// top.insert("k".to_string(), "top".to_string());
/// let mut bottom = HashMap::new();
/// bottom.insert("k".to_string(), "bottom".to_string());
/// bottom.insert("only.bottom".to_string(), "b".to_string());
///
/// let layered = Layered::new().layer(&top).layer(&bottom);
/// assert_eq!(layered.lookup("k").as_deref(), Some("top"));
/// assert_eq!(layered.lookup("only.bottom").as_deref(), Some("b"));
/// ```
#[derive(Default)]
pub struct Layered<'a> {
    layers: Vec<&'a dyn Lookup>,
}

impl<'a> Layered<'a> {
    /// Creates an empty layered lookup.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends a lower-precedence layer.
    pub fn layer(mut self, lookup: &'a dyn Lookup) -> Self {
        self.layers.push(lookup);
        self
    }
}

impl Lookup for Layered<'_> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, str>> {
        self.layers.iter().find_map(|layer| layer.lookup(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btreemap_lookup() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), "1".to_string());
        assert_eq!(map.lookup("a").as_deref(), Some("1"));
        assert!(map.lookup("b").is_none());
    }

    #[test]
    fn test_reference_lookup() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "1".to_string());
        let by_ref: &dyn Lookup = &map;
        assert_eq!((&by_ref).lookup("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_fn_lookup_owned_values() {
        let lookup = FnLookup(|key: &str| Some(key.to_uppercase()));
        assert_eq!(lookup.lookup("abc").as_deref(), Some("ABC"));
    }

    #[test]
    fn test_empty_layered_lookup() {
        let layered = Layered::new();
        assert!(layered.lookup("anything").is_none());
    }

    #[test]
    fn test_layered_skips_missing_layers() {
        let empty: HashMap<String, String> = HashMap::new();
        let mut second = HashMap::new();
        second.insert("k".to_string(), "v".to_string());

        let layered = Layered::new().layer(&empty).layer(&second);
        assert_eq!(layered.lookup("k").as_deref(), Some("v"));
    }
}
