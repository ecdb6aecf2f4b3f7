//! Dispatcher - classify a value, find its producer, hand it a render context.
//!
//! The dispatcher never walks `data` itself. Producers decide what a
//! container's children are and call [`RenderContext::render`] for each one,
//! which re-enters [`dispatch`] with the same configuration:
//!
//! ```text
//! dispatch(data) → classify → registry.get(tag) → producer(ctx)
//!                                                    │
//!                            ctx.render(child) ◄─────┘ → dispatch(child) → …
//! ```
//!
//! When no producer is registered for a tag, the optional fallback receives the
//! tag and the raw value; without one the result is `None`. A missing producer
//! is an expected outcome, not an error.
//!
//! There is no depth limit and no cycle detection. A producer that renders a
//! value back into itself recurses until the stack runs out.

use std::fmt;
use std::rc::Rc;

use crate::infer::classify;
use crate::path::path_depth;
use crate::types::Size;
use crate::value::Value;

use super::registry::Registry;

// =============================================================================
// Configuration
// =============================================================================

/// Handler for values whose tag has no producer. Receives `(tag, data)`.
pub type Fallback<O> = Rc<dyn Fn(&str, &Value) -> O>;

/// Everything a dispatch needs besides the value itself.
///
/// Cloning is cheap: the registry and fallback are shared. Once a registry is
/// inside a config it can no longer be mutated, so every dispatch in one
/// render tree sees the same producers.
pub struct DispatchConfig<O> {
    registry: Rc<Registry<O>>,
    fallback: Option<Fallback<O>>,
}

impl<O> DispatchConfig<O> {
    pub fn new(registry: impl Into<Rc<Registry<O>>>) -> Self {
        Self {
            registry: registry.into(),
            fallback: None,
        }
    }

    /// Set the handler for tags without a producer.
    pub fn with_fallback(mut self, fallback: impl Fn(&str, &Value) -> O + 'static) -> Self {
        self.fallback = Some(Rc::new(fallback));
        self
    }

    pub fn registry(&self) -> &Registry<O> {
        &self.registry
    }

    pub fn fallback(&self) -> Option<&Fallback<O>> {
        self.fallback.as_ref()
    }

    /// Dispatch `data` against this configuration.
    pub fn dispatch(&self, data: &Value, size: Size, path: &str) -> Option<O> {
        dispatch(data, size, path, self)
    }
}

impl<O> Clone for DispatchConfig<O> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            fallback: self.fallback.clone(),
        }
    }
}

impl<O> fmt::Debug for DispatchConfig<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchConfig")
            .field("registry", &self.registry)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Recursive render callback handed to producers.
///
/// Owns a clone of the configuration it was created from, so a producer may
/// keep it past the end of its own invocation.
pub struct Renderer<O> {
    config: DispatchConfig<O>,
}

impl<O> Renderer<O> {
    /// Dispatch a child value with the captured configuration.
    pub fn render(&self, data: &Value, size: Size, path: &str) -> Option<O> {
        dispatch(data, size, path, &self.config)
    }

    pub fn config(&self) -> &DispatchConfig<O> {
        &self.config
    }
}

impl<O> Clone for Renderer<O> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
        }
    }
}

impl<O> fmt::Debug for Renderer<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").field("config", &self.config).finish()
    }
}

// =============================================================================
// Render Context
// =============================================================================

/// Per-dispatch bundle passed to a producer.
pub struct RenderContext<'a, O> {
    /// The value being rendered.
    pub data: &'a Value,
    /// Area available to the producer.
    pub size: Size,
    /// Structural path of `data`.
    pub path: &'a str,
    /// `path_depth(path)`, always >= 1.
    pub depth: usize,
    /// Callback for rendering children.
    pub renderer: Renderer<O>,
}

impl<'a, O> RenderContext<'a, O> {
    pub fn new(data: &'a Value, size: Size, path: &'a str, config: &DispatchConfig<O>) -> Self {
        Self {
            data,
            size,
            path,
            depth: path_depth(path),
            renderer: Renderer {
                config: config.clone(),
            },
        }
    }

    /// Render a child value through the same registry and fallback.
    pub fn render(&self, data: &Value, size: Size, path: &str) -> Option<O> {
        self.renderer.render(data, size, path)
    }

    /// Type tag of `data`.
    pub fn tag(&self) -> &'a str {
        classify(self.data)
    }
}

impl<O> fmt::Debug for RenderContext<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("data", self.data)
            .field("size", &self.size)
            .field("path", &self.path)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Render `data` with the producer registered for its type tag.
///
/// Returns the producer's output unchanged, the fallback's output when no
/// producer matches, or `None` when neither exists. Panics raised by producers
/// propagate to the caller.
pub fn dispatch<O>(data: &Value, size: Size, path: &str, config: &DispatchConfig<O>) -> Option<O> {
    let tag = classify(data);

    let Some(producer) = config.registry.get(tag) else {
        tracing::trace!(tag, path, fallback = config.fallback.is_some(), "no producer");
        return config.fallback.as_ref().map(|fallback| fallback(tag, data));
    };

    tracing::trace!(tag, path, "dispatch");
    let ctx = RenderContext::new(data, size, path, config);
    Some(producer(&ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use crate::engine::registry::create_registry;
    use crate::path::append_index;

    fn size(width: f32, height: f32) -> Size {
        Size::new(width, height)
    }

    #[test]
    fn test_dispatches_by_type() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let mut registry = create_registry::<String>();
        registry.register("string", move |ctx| {
            counter.set(counter.get() + 1);
            format!("string:{}", ctx.data)
        });

        let config = DispatchConfig::new(registry);
        let result = dispatch(&Value::from("hello"), size(100.0, 50.0), "root", &config);

        assert_eq!(result.as_deref(), Some("string:hello"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_passes_context() {
        let mut registry = create_registry::<(Value, Size, String, usize)>();
        registry.register("number", |ctx| {
            (ctx.data.clone(), ctx.size, ctx.path.to_string(), ctx.depth)
        });

        let config = DispatchConfig::new(registry);
        let result = dispatch(&Value::from(42), size(200.0, 100.0), "data.value", &config);

        assert_eq!(
            result,
            Some((Value::from(42), size(200.0, 100.0), "data.value".to_string(), 2))
        );
    }

    #[test]
    fn test_missing_producer_without_fallback() {
        let config = DispatchConfig::new(create_registry::<String>());
        let result = dispatch(&Value::from("hello"), size(100.0, 50.0), "root", &config);
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_producer_uses_fallback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();

        let config = DispatchConfig::new(create_registry::<String>()).with_fallback(
            move |tag, data| {
                log.borrow_mut().push((tag.to_string(), data.clone()));
                format!("fallback:{tag}:{data}")
            },
        );
        let result = dispatch(&Value::from("hello"), size(100.0, 50.0), "root", &config);

        assert_eq!(result.as_deref(), Some("fallback:string:hello"));
        assert_eq!(*seen.borrow(), vec![("string".to_string(), Value::from("hello"))]);
    }

    #[test]
    fn test_fallback_not_called_when_producer_exists() {
        let fallback_calls = Rc::new(Cell::new(0));
        let counter = fallback_calls.clone();

        let mut registry = create_registry::<String>();
        registry.register("boolean", |ctx| format!("bool:{}", ctx.data));
        let config = DispatchConfig::new(registry).with_fallback(move |_, _| {
            counter.set(counter.get() + 1);
            String::new()
        });

        let result = config.dispatch(&Value::from(true), Size::ZERO, "flag");
        assert_eq!(result.as_deref(), Some("bool:true"));
        assert_eq!(fallback_calls.get(), 0);
    }

    #[test]
    fn test_custom_kind_dispatch() {
        let mut registry = create_registry::<String>();
        registry.register("my-type", |ctx| {
            let inner = ctx.data.as_custom().and_then(|k| k.inner()).cloned();
            format!("custom:{}", inner.unwrap_or_default())
        });
        registry.register("object", |_| "object".to_string());

        let value = Value::tagged("my-type", Value::from(123));
        let config = DispatchConfig::new(registry);

        assert_eq!(
            config.dispatch(&value, size(100.0, 50.0), "root").as_deref(),
            Some("custom:123")
        );
    }

    #[test]
    fn test_render_callback_outlives_producer() {
        let captured: Rc<RefCell<Option<Renderer<String>>>> = Rc::new(RefCell::new(None));
        let slot = captured.clone();

        let mut registry = create_registry::<String>();
        registry.register("array", move |ctx| {
            *slot.borrow_mut() = Some(ctx.renderer.clone());
            "array-result".to_string()
        });
        registry.register("string", |_| "string-result".to_string());

        let config = DispatchConfig::new(registry);
        let result = config.dispatch(&Value::array([1, 2, 3]), size(100.0, 50.0), "root");
        assert_eq!(result.as_deref(), Some("array-result"));

        let renderer = captured.borrow_mut().take().unwrap();
        let child = renderer.render(&Value::from("child"), size(50.0, 25.0), "root[0]");
        assert_eq!(child.as_deref(), Some("string-result"));
    }

    #[test]
    fn test_depth_from_path() {
        let mut registry = create_registry::<usize>();
        registry.register("string", |ctx| ctx.depth);
        let config = DispatchConfig::new(registry);

        assert_eq!(config.dispatch(&Value::from("a"), Size::ZERO, "root"), Some(1));
        assert_eq!(config.dispatch(&Value::from("b"), Size::ZERO, "root.child"), Some(2));
        assert_eq!(config.dispatch(&Value::from("c"), Size::ZERO, "a.b.c.d"), Some(4));
        assert_eq!(config.dispatch(&Value::from("d"), Size::ZERO, ""), Some(1));
    }

    #[test]
    fn test_recursive_dispatch() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let mut registry = create_registry::<String>();
        let array_log = log.clone();
        registry.register("array", move |ctx| {
            array_log
                .borrow_mut()
                .push(("array", ctx.path.to_string(), ctx.depth));
            let items = ctx.data.as_array().unwrap_or_default();
            let child_size = Size::new(ctx.size.width, ctx.size.height / items.len().max(1) as f32);
            let children: Vec<String> = items
                .iter()
                .enumerate()
                .filter_map(|(i, item)| ctx.render(item, child_size, &append_index(ctx.path, i)))
                .collect();
            format!("[{}]", children.join(","))
        });
        let number_log = log.clone();
        registry.register("number", move |ctx| {
            number_log
                .borrow_mut()
                .push(("number", ctx.path.to_string(), ctx.depth));
            ctx.data.to_string()
        });

        let config = DispatchConfig::new(registry);
        let result = config.dispatch(&Value::array([10, 20]), size(100.0, 50.0), "root");

        assert_eq!(result.as_deref(), Some("[10,20]"));
        assert_eq!(
            *log.borrow(),
            vec![
                ("array", "root".to_string(), 1),
                ("number", "root[0]".to_string(), 1),
                ("number", "root[1]".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_nested_miss_reaches_fallback() {
        let mut registry = create_registry::<String>();
        registry.register("object", |ctx| {
            let map = ctx.data.as_object().cloned().unwrap_or_default();
            map.iter()
                .filter_map(|(key, value)| {
                    ctx.render(value, ctx.size, &format!("{}.{key}", ctx.path))
                })
                .collect::<Vec<_>>()
                .join(" ")
        });
        let config = DispatchConfig::new(registry).with_fallback(|tag, _| format!("?{tag}"));

        let value = Value::object([("a", Value::from(1)), ("b", Value::Null)]);
        assert_eq!(config.dispatch(&value, Size::ZERO, "root").as_deref(), Some("?number ?null"));
    }

    #[test]
    fn test_children_share_configuration() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();

        let mut registry = create_registry::<()>();
        registry.register("array", move |ctx| {
            log.borrow_mut().push(ctx.renderer.config().registry() as *const Registry<()>);
            for item in ctx.data.as_array().unwrap_or_default() {
                ctx.render(item, ctx.size, ctx.path);
            }
        });

        let config = DispatchConfig::new(registry);
        let nested = Value::array([Value::array([Value::Array(vec![])])]);
        config.dispatch(&nested, Size::ZERO, "root");

        let expected = config.registry() as *const Registry<()>;
        assert_eq!(seen.borrow().len(), 3);
        assert!(seen.borrow().iter().all(|&ptr| std::ptr::eq(ptr, expected)));
    }

    #[test]
    fn test_producer_output_returned_unchanged() {
        let mut registry = create_registry::<Result<String, String>>();
        registry.register("null", |ctx| Err(format!("cannot render {}", ctx.path)));
        let config = DispatchConfig::new(registry);

        assert_eq!(
            config.dispatch(&Value::Null, Size::ZERO, "root.missing"),
            Some(Err("cannot render root.missing".to_string()))
        );
    }

    #[test]
    #[should_panic(expected = "leaf exploded")]
    fn test_producer_panic_propagates() {
        let mut registry = create_registry::<()>();
        registry.register("array", |ctx| {
            for item in ctx.data.as_array().unwrap_or_default() {
                ctx.render(item, ctx.size, ctx.path);
            }
        });
        registry.register("boolean", |_| panic!("leaf exploded"));

        let config = DispatchConfig::new(registry);
        config.dispatch(&Value::array([true]), Size::ZERO, "root");
    }

    #[test]
    fn test_context_tag() {
        let mut registry = create_registry::<String>();
        registry.register("point", |ctx| ctx.tag().to_string());
        let config = DispatchConfig::new(registry);

        let value = Value::tagged("point", Value::array([1, 2]));
        assert_eq!(config.dispatch(&value, Size::ZERO, "p").as_deref(), Some("point"));
    }
}
