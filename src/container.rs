//! # Container Module
//!
//! Middleware instances are resolved through a [`DependencyResolver`] by
//! class identifier. Resolution happens once per route at discovery time,
//! so every route receives its own instance from the resolver.
//!
//! [`Container`] is a small factory-based resolver. Applications with their
//! own dependency container implement [`DependencyResolver`] for it instead.

use anyhow::anyhow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Resolves instances by identifier.
pub trait DependencyResolver<T> {
    /// Pre-check for an entry. `None` means the resolver offers no pre-check
    /// and [`resolve`](DependencyResolver::resolve) decides.
    fn has_entry(&self, _id: &str) -> Option<bool> {
        None
    }

    fn resolve(&self, id: &str) -> anyhow::Result<T>;
}

impl<T, R: DependencyResolver<T> + ?Sized> DependencyResolver<T> for &R {
    fn has_entry(&self, id: &str) -> Option<bool> {
        (**self).has_entry(id)
    }

    fn resolve(&self, id: &str) -> anyhow::Result<T> {
        (**self).resolve(id)
    }
}

type Factory<T> = Arc<dyn Fn() -> anyhow::Result<T> + Send + Sync>;

/// Factory-based [`DependencyResolver`].
pub struct Container<T> {
    factories: HashMap<String, Factory<T>>,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Container {
            factories: HashMap::new(),
        }
    }
}

impl<T> Clone for Container<T> {
    fn clone(&self) -> Self {
        Container {
            factories: self.factories.clone(),
        }
    }
}

impl<T> fmt::Debug for Container<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("Container").field("entries", &ids).finish()
    }
}

impl<T> Container<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to a factory invoked on every resolution.
    pub fn bind<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(id = %id, "Container binding registered");
        self.factories.insert(id, Arc::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T: Clone + Send + Sync + 'static> Container<T> {
    /// Bind `id` to a shared value, cloned on every resolution.
    pub fn instance(&mut self, id: impl Into<String>, value: T) -> &mut Self {
        self.bind(id, move || Ok(value.clone()))
    }
}

impl<T> DependencyResolver<T> for Container<T> {
    fn has_entry(&self, id: &str) -> Option<bool> {
        Some(self.contains(id))
    }

    fn resolve(&self, id: &str) -> anyhow::Result<T> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| anyhow!("no container entry for '{id}'"))?;
        factory()
    }
}
