use std::collections::HashMap;
use std::sync::Arc;

use videoshop_core::{DomainError, DomainResult};

use crate::category::{NewRelease, PriceCategory, Regular};

/// Registry mapping a category identifier to its shared strategy instance.
///
/// Built once at process start (seed loaders call [`CategoryRegistry::register`]
/// for any extra categories), then handed around read-only — typically as an
/// `Arc<CategoryRegistry>`. Unknown identifiers fail at resolution time with
/// [`DomainError::UnknownCategory`], so a movie can never be created against
/// a category that does not exist.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: HashMap<String, Arc<dyn PriceCategory>>,
}

impl CategoryRegistry {
    /// An empty registry. Callers register every category themselves.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in categories, keyed by their
    /// display names.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Regular.name(), Arc::new(Regular));
        registry.register(NewRelease.name(), Arc::new(NewRelease));
        registry
    }

    /// Register a category under `id`. Re-registering an id replaces the
    /// previous instance.
    pub fn register(&mut self, id: impl Into<String>, category: Arc<dyn PriceCategory>) {
        self.categories.insert(id.into(), category);
    }

    /// Resolve `id` to its shared strategy instance.
    pub fn resolve(&self, id: &str) -> DomainResult<Arc<dyn PriceCategory>> {
        self.categories
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::unknown_category(id))
    }

    /// Registered identifiers, for diagnostics.
    pub fn ids(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }
}
