//! # splay
//!
//! Type-dispatched rendering of dynamic values.
//!
//! A caller registers one producer per type tag. Dispatching a value
//! classifies it, looks up the producer for its tag, and calls it with a
//! render context: the value, its area, its structural path, and a callback
//! for rendering children through the same registry.
//!
//! ## Architecture
//!
//! ```text
//! Value → classify → Registry::get(tag) → producer(RenderContext) → O
//!                                              │
//!                        ctx.render(child) ◄───┘ (recursive dispatch)
//! ```
//!
//! The output type `O` is whatever the producers return; splay never inspects it.
//!
//! ## Modules
//!
//! - [`value`] - Runtime values and the custom [`Kind`] marker
//! - [`infer`] - Type tag classification
//! - [`path`] - Structural path strings
//! - [`engine`] - Producer registry and dispatcher
//! - [`layout`] - Grid, list and split child geometry (Taffy)
//! - [`props`] - Static-or-computed prop values
//! - [`term`] - Outline producers and terminal output

pub mod engine;
pub mod infer;
pub mod layout;
pub mod path;
pub mod props;
pub mod term;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    DispatchConfig, Fallback, Producer, Registry, RenderContext, Renderer, create_registry,
    dispatch,
};

pub use infer::{BUILTIN_TAGS, classify, is_builtin};

pub use layout::{
    DEFAULT_SPLIT_RATIO, LayoutError, LayoutItem, SplitLayout, grid_layout, list_layout,
    split_layout,
};

pub use path::{append_index, append_key, path_depth, path_label};

pub use props::{DynamicValue, ResolveContext, is_dynamic, resolve};

pub use value::{Function, Kind, Map, Tagged, Value};
