//! Handler registry: marker name to handler.
//!
//! A registry is populated once through [`HandlerRegistryBuilder`] and is
//! read-only afterwards. Several registries can coexist; the orchestrator
//! receives one by reference.

use rustc_hash::{FxHashMap, FxHashSet};

use super::handler::MarkerHandler;
use super::handlers;

/// Lookup table of class marker handlers.
pub struct HandlerRegistry {
    /// Handlers in registration order.
    handlers: Vec<Box<dyn MarkerHandler>>,
    /// Marker name to index in `handlers`.
    index: FxHashMap<&'static str, usize>,
}

impl HandlerRegistry {
    /// Registry containing every built-in handler.
    pub fn new() -> Self {
        Self::builder().with_builtins().build()
    }

    /// Registry without any handler.
    pub fn empty() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Handler registered for a marker name.
    pub fn lookup(&self, marker: &str) -> Option<&dyn MarkerHandler> {
        self.index.get(marker).map(|&i| self.handlers[i].as_ref())
    }

    /// Handlers for the given markers, highest priority first.
    ///
    /// Equal priorities keep registration order. Unknown markers are skipped.
    pub fn select(&self, markers: &[String]) -> Vec<&dyn MarkerHandler> {
        let mut indices: Vec<usize> = markers
            .iter()
            .filter_map(|m| self.index.get(m.as_str()).copied())
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let mut selected: Vec<&dyn MarkerHandler> =
            indices.into_iter().map(|i| self.handlers[i].as_ref()).collect();
        selected.sort_by(|a, b| b.meta().priority.cmp(&a.meta().priority));
        selected
    }

    /// All handlers, highest priority first.
    pub fn handlers(&self) -> Vec<&dyn MarkerHandler> {
        let mut all: Vec<&dyn MarkerHandler> = self.handlers.iter().map(|h| h.as_ref()).collect();
        all.sort_by(|a, b| b.meta().priority.cmp(&a.meta().priority));
        all
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(|h| h.meta().marker))
            .finish()
    }
}

/// Collects handlers before freezing them into a [`HandlerRegistry`].
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: Vec<Box<dyn MarkerHandler>>,
    disabled: FxHashSet<String>,
}

impl HandlerRegistryBuilder {
    /// Register every built-in handler.
    pub fn with_builtins(mut self) -> Self {
        for handler in handlers::all_handlers() {
            self = self.register(handler);
        }
        self
    }

    /// Register a handler. A handler for an already registered marker
    /// replaces it in place.
    pub fn register(mut self, handler: Box<dyn MarkerHandler>) -> Self {
        let marker = handler.meta().marker;
        match self.handlers.iter().position(|h| h.meta().marker == marker) {
            Some(i) => self.handlers[i] = handler,
            None => self.handlers.push(handler),
        }
        self
    }

    /// Leave a marker out of the built registry.
    pub fn disable(mut self, marker: impl Into<String>) -> Self {
        self.disabled.insert(marker.into());
        self
    }

    pub fn build(self) -> HandlerRegistry {
        let disabled = self.disabled;
        let handlers: Vec<Box<dyn MarkerHandler>> = self
            .handlers
            .into_iter()
            .filter(|h| !disabled.contains(h.meta().marker))
            .collect();
        let index = handlers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.meta().marker, i))
            .collect();

        HandlerRegistry { handlers, index }
    }
}
