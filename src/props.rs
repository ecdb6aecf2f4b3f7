//! Dynamic values - props that are either given or computed on demand.
//!
//! A producer building props for its output often accepts "a value, or a
//! function that produces the value". [`DynamicValue`] captures both; the
//! getter may be asynchronous. [`resolve`] turns either form into a concrete
//! value: a static value is returned as-is, a getter is called once with the
//! resolve context and awaited once. No retries, no timeout.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};

use crate::value::{Function, Value};

/// Named inputs handed to getters.
pub type ResolveContext = HashMap<String, Value>;

/// Getter form of a [`DynamicValue`].
pub type Getter<T> = Rc<dyn Fn(&ResolveContext) -> LocalBoxFuture<'static, T>>;

// =============================================================================
// Dynamic Value
// =============================================================================

/// A value that is either known up front or produced by a getter.
pub enum DynamicValue<T> {
    /// Known value.
    Static(T),
    /// Called with the resolve context each time the value is resolved.
    Getter(Getter<T>),
}

impl<T: 'static> DynamicValue<T> {
    /// Wrap an async getter.
    pub fn getter<F, Fut>(f: F) -> Self
    where
        F: Fn(&ResolveContext) -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
    {
        DynamicValue::Getter(Rc::new(move |ctx: &ResolveContext| f(ctx).boxed_local()))
    }

    /// Wrap a synchronous getter.
    pub fn computed(f: impl Fn(&ResolveContext) -> T + 'static) -> Self {
        DynamicValue::Getter(Rc::new(move |ctx: &ResolveContext| {
            future::ready(f(ctx)).boxed_local()
        }))
    }
}

impl<T> DynamicValue<T> {
    /// Whether resolving this value calls a getter.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, DynamicValue::Getter(_))
    }
}

impl<T: Clone> DynamicValue<T> {
    /// Resolve to a concrete value. See [`resolve`].
    pub async fn resolve(&self, context: Option<&ResolveContext>) -> T {
        match self {
            DynamicValue::Static(value) => value.clone(),
            DynamicValue::Getter(getter) => match context {
                Some(ctx) => getter(ctx).await,
                None => getter(&ResolveContext::new()).await,
            },
        }
    }
}

impl<T: Clone> Clone for DynamicValue<T> {
    fn clone(&self) -> Self {
        match self {
            DynamicValue::Static(value) => DynamicValue::Static(value.clone()),
            DynamicValue::Getter(getter) => DynamicValue::Getter(Rc::clone(getter)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            DynamicValue::Getter(_) => f.write_str("Getter"),
        }
    }
}

impl<T: Default> Default for DynamicValue<T> {
    fn default() -> Self {
        DynamicValue::Static(T::default())
    }
}

impl<T> From<T> for DynamicValue<T> {
    fn from(value: T) -> Self {
        DynamicValue::Static(value)
    }
}

impl From<Function> for DynamicValue<Value> {
    /// A callable runtime value becomes a getter receiving the context as a
    /// single object argument.
    fn from(function: Function) -> Self {
        DynamicValue::computed(move |ctx| {
            let arg = Value::object(ctx.iter().map(|(k, v)| (k.clone(), v.clone())));
            function.call(&[arg])
        })
    }
}

// =============================================================================
// Free functions
// =============================================================================

/// Resolve a dynamic value, using an empty context when none is given.
pub async fn resolve<T: Clone>(value: &DynamicValue<T>, context: Option<&ResolveContext>) -> T {
    value.resolve(context).await
}

/// Whether a runtime value is callable, i.e. would be treated as a getter.
pub fn is_dynamic(value: &Value) -> bool {
    value.is_function()
}
