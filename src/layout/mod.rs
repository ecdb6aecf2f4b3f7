//! Layout Module
//!
//! Child geometry helpers for producers, computed with
//! [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! The dispatcher never calls these. A producer that renders children picks an
//! arrangement, gets one box per child, and passes each box's size to
//! [`RenderContext::render`](crate::RenderContext::render).
//!
//! # Example
//!
//! ```
//! use splay::layout::list_layout;
//! use splay::Size;
//!
//! let items = list_layout(Size::new(80.0, 24.0), 3, 1.0).unwrap();
//! assert_eq!(items[2].pos.y, 2.0);
//! assert_eq!(items[2].size.width, 80.0);
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::{grid_layout, list_layout, split_layout};
pub use types::*;
