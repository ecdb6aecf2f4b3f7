//! Dispatch engine - producer registry and recursive dispatch.
//!
//! - Registry: type tag → producer, owned by the caller
//! - Dispatch: classify, look up, build a [`RenderContext`], invoke
//!
//! # Example
//!
//! ```
//! use splay::{DispatchConfig, Size, Value, create_registry, dispatch};
//!
//! let mut registry = create_registry::<String>();
//! registry.register("string", |ctx| format!("string:{}", ctx.data));
//!
//! let config = DispatchConfig::new(registry);
//! let out = dispatch(&Value::from("hello"), Size::new(100.0, 50.0), "root", &config);
//! assert_eq!(out.as_deref(), Some("string:hello"));
//! ```

mod dispatch;
mod registry;

pub use dispatch::*;
pub use registry::*;
