//! Producer Registry - type tag → producer lookup.
//!
//! Each registry is an owned value; there is no global registry. Lookup is an
//! exact string match: no wildcards, no fallback between tags. Registering a
//! tag twice replaces the earlier producer.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::dispatch::RenderContext;

// =============================================================================
// Producer
// =============================================================================

/// A producer turns a render context into an output.
///
/// Stored behind `Rc` so lookups hand out cheap clones and the dispatcher can
/// keep calling a producer while the caller holds on to it too.
pub type Producer<O> = Rc<dyn Fn(&RenderContext<'_, O>) -> O>;

// =============================================================================
// Registry
// =============================================================================

/// Mapping from type tag to [`Producer`], generic over the output type.
pub struct Registry<O> {
    producers: HashMap<String, Producer<O>>,
}

/// Create an empty registry.
pub fn create_registry<O>() -> Registry<O> {
    Registry::new()
}

impl<O> Registry<O> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            producers: HashMap::new(),
        }
    }

    /// Register a producer for `tag`, replacing any previous one.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        producer: impl Fn(&RenderContext<'_, O>) -> O + 'static,
    ) {
        self.register_shared(tag, Rc::new(producer));
    }

    /// Register an already shared producer.
    ///
    /// Lets one producer serve several tags without re-allocating it.
    pub fn register_shared(&mut self, tag: impl Into<String>, producer: Producer<O>) {
        let tag = tag.into();
        if self.producers.insert(tag.clone(), producer).is_some() {
            tracing::trace!(%tag, "producer replaced");
        }
    }

    /// Look up the producer for `tag`.
    pub fn get(&self, tag: &str) -> Option<Producer<O>> {
        self.producers.get(tag).cloned()
    }

    /// Whether a producer is registered for `tag`.
    pub fn has(&self, tag: &str) -> bool {
        self.producers.contains_key(tag)
    }

    /// Number of registered tags.
    pub fn len(&self) -> usize {
        self.producers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.producers.is_empty()
    }

    /// Registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.producers.keys().map(String::as_str)
    }
}

impl<O> Default for Registry<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> fmt::Debug for Registry<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("Registry").field("tags", &tags).finish()
    }
}
