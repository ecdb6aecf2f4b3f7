//! Terminal Module
//!
//! A ready-made producer set that renders any value tree as an indented
//! outline, and a crossterm writer for the result.
//!
//! # Example
//!
//! ```
//! use splay::term::{OutlineOptions, render_outline, write_outline};
//! use splay::{Size, Value};
//!
//! let value = Value::object([("name", "splay")]);
//! let lines = render_outline(&value, Size::new(80.0, 24.0), "root");
//!
//! let mut out = Vec::new();
//! let options = OutlineOptions { color: false, ..Default::default() };
//! write_outline(&mut out, &lines, &options).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "root: [object]\n  name: splay\n");
//! ```

mod outline;
mod output;
mod text;

pub use outline::*;
pub use output::*;
pub use text::*;
