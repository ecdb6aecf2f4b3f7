//! Outline producers - render a value tree as indented, styled text lines.
//!
//! Every built-in tag has a producer. Scalars become one line; arrays and
//! objects emit a header line and then render each child through
//! [`RenderContext::render`], so nested containers go back through dispatch.
//!
//! Child areas come from the layout helpers:
//! - array: the container height is shared by a [`list_layout`] of its items
//! - object: keys take the left column of a [`split_layout`], values render
//!   in the right column

use std::rc::Rc;

use crate::engine::{DispatchConfig, Registry, RenderContext, create_registry};
use crate::infer;
use crate::layout::{DEFAULT_SPLIT_RATIO, list_layout, split_layout};
use crate::path::{append_index, append_key, path_label};
use crate::types::{Attr, Size};
use crate::value::Value;

use super::text::{string_width, truncate_text};

// =============================================================================
// Output types
// =============================================================================

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Nesting level in the outline: 1 for the rendered value, one more per
    /// enclosing container.
    pub depth: usize,
    /// Object key or `[index]` under the parent, the last path segment at the
    /// root.
    pub label: String,
    pub text: String,
    pub attrs: Attr,
}

impl Line {
    pub fn new(
        depth: usize,
        label: impl Into<String>,
        text: impl Into<String>,
        attrs: Attr,
    ) -> Self {
        Self {
            depth,
            label: label.into(),
            text: text.into(),
            attrs,
        }
    }
}

pub type Outline = Vec<Line>;

/// Presentation settings for [`write_outline`](super::write_outline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Spaces per depth level.
    pub indent: usize,
    /// Emit terminal styling.
    pub color: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            color: true,
        }
    }
}

// =============================================================================
// Producers
// =============================================================================

/// Cells left for the text after `label: `.
fn text_budget(width: f32, label: &str) -> usize {
    (width.max(0.0).round() as usize).saturating_sub(string_width(label) + 2)
}

/// The value itself as one line at level 1, labelled by its last path
/// segment. The enclosing container relabels and nests it.
fn value_line(ctx: &RenderContext<'_, Outline>, attrs: Attr) -> Line {
    let label = path_label(ctx.path);
    let text = truncate_text(&ctx.data.to_string(), text_budget(ctx.size.width, label));
    Line::new(1, label, text, attrs)
}

/// Give `line` a new label, re-fitting its text to `width`.
fn relabel(line: &mut Line, label: &str, width: f32) {
    if line.label != label {
        line.text = truncate_text(&line.text, text_budget(width, label));
        line.label = label.to_string();
    }
}

/// Render one child under `label`, one level below the container's line.
fn render_child(
    ctx: &RenderContext<'_, Outline>,
    child: &Value,
    size: Size,
    path: &str,
    label: &str,
) -> Outline {
    let mut lines = ctx.render(child, size, path).unwrap_or_default();
    if let Some(first) = lines.first_mut() {
        relabel(first, label, size.width);
    }
    for line in &mut lines {
        line.depth += 1;
    }
    lines
}

/// Split `area` into `count` equal-height rows.
fn child_sizes(area: Size, count: usize) -> Vec<Size> {
    let row_height = area.height / count.max(1) as f32;
    match list_layout(area, count, row_height) {
        Ok(items) => items.into_iter().map(|item| item.size).collect(),
        Err(err) => {
            tracing::warn!(%err, "child layout failed, reusing parent area");
            vec![area; count]
        }
    }
}

fn array_producer(ctx: &RenderContext<'_, Outline>) -> Outline {
    let items = ctx.data.as_array().unwrap_or_default();
    let mut lines = vec![value_line(ctx, Attr::BOLD)];

    let sizes = child_sizes(ctx.size, items.len());
    for (index, (item, size)) in items.iter().zip(sizes).enumerate() {
        let path = append_index(ctx.path, index);
        lines.extend(render_child(ctx, item, size, &path, &format!("[{index}]")));
    }
    lines
}

fn object_producer(ctx: &RenderContext<'_, Outline>) -> Outline {
    let Some(map) = ctx.data.as_object() else {
        return vec![value_line(ctx, Attr::BOLD)];
    };
    let mut lines = vec![value_line(ctx, Attr::BOLD)];

    let values_area = match split_layout(ctx.size, DEFAULT_SPLIT_RATIO) {
        Ok(split) => split.right,
        Err(err) => {
            tracing::warn!(%err, path = ctx.path, "split layout failed");
            ctx.size
        }
    };

    for ((key, value), size) in map.iter().zip(child_sizes(values_area, map.len())) {
        lines.extend(render_child(ctx, value, size, &append_key(ctx.path, key), key));
    }
    lines
}

/// Producers for every built-in tag.
pub fn outline_registry() -> Registry<Outline> {
    let mut registry = create_registry();

    let plain = Rc::new(|ctx: &RenderContext<'_, Outline>| vec![value_line(ctx, Attr::NONE)]);
    for tag in [infer::STRING, infer::NUMBER, infer::BOOLEAN, infer::DATE] {
        registry.register_shared(tag, plain.clone());
    }

    let empty = Rc::new(|ctx: &RenderContext<'_, Outline>| vec![value_line(ctx, Attr::DIM)]);
    registry.register_shared(infer::NULL, empty.clone());
    registry.register_shared(infer::UNDEFINED, empty);

    registry.register(infer::FUNCTION, |ctx| vec![value_line(ctx, Attr::ITALIC)]);
    registry.register(infer::ARRAY, array_producer);
    registry.register(infer::OBJECT, object_producer);
    registry
}

/// [`outline_registry`] plus a fallback for custom kinds.
///
/// Fallback lines read `<kind>`, followed by the wrapped value when the
/// kind exposes one. They carry no label until placed by a container or by
/// [`render_outline`].
pub fn outline_config() -> DispatchConfig<Outline> {
    DispatchConfig::new(outline_registry()).with_fallback(|tag, data| {
        let text = match data.as_custom().and_then(|kind| kind.inner()) {
            Some(inner) => format!("<{tag}> {inner}"),
            None => format!("<{tag}>"),
        };
        vec![Line::new(1, "", text, Attr::ITALIC)]
    })
}

/// Render `value` at `root` with [`outline_config`].
pub fn render_outline(value: &Value, size: Size, root: &str) -> Outline {
    let mut lines = outline_config().dispatch(value, size, root).unwrap_or_default();
    if let Some(first) = lines.first_mut().filter(|line| line.label.is_empty()) {
        relabel(first, path_label(root), size.width);
    }
    lines
}
