//! Taffy Bridge - child geometry for producers.
//!
//! Producers that render children need a size for each child. The helpers
//! here describe the arrangement as a small flexbox tree, let Taffy solve it,
//! and read the boxes back:
//!
//! - grid: a column of fixed-height rows, each row `cols` equal-width cells
//! - list: a column of full-width, fixed-height items
//! - split: a row with two children sharing the width by ratio
//!
//! Rounding is disabled so fractional cells (`width / 3`) come back exact.

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection, NodeId,
    Size as TaffySize, Style, TaffyTree,
};

use crate::types::{Position, Size};

use super::types::{LayoutError, LayoutItem, SplitLayout};

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Tree without pixel snapping.
fn new_tree() -> TaffyTree<()> {
    let mut tree = TaffyTree::new();
    tree.disable_rounding();
    tree
}

/// A box that keeps its declared size (no shrinking).
fn fixed_box(width: TaffyDimension, height: TaffyDimension) -> Style {
    Style {
        display: Display::Flex,
        flex_shrink: 0.0,
        size: TaffySize { width, height },
        ..Default::default()
    }
}

/// Column container spanning the container width, growing with its content.
fn column_root(container: Size) -> Style {
    Style {
        flex_direction: FlexDirection::Column,
        ..fixed_box(TaffyDimension::Length(container.width), TaffyDimension::Auto)
    }
}

/// Width fixed by the container, height unbounded.
fn column_space(container: Size) -> TaffySize<AvailableSpace> {
    TaffySize {
        width: AvailableSpace::Definite(container.width),
        height: AvailableSpace::MaxContent,
    }
}

fn available(container: Size) -> TaffySize<AvailableSpace> {
    TaffySize {
        width: AvailableSpace::Definite(container.width),
        height: AvailableSpace::Definite(container.height),
    }
}

fn to_size(size: TaffySize<f32>) -> Size {
    Size::new(size.width, size.height)
}

/// Negative and NaN lengths are rejected; Taffy would clamp them to zero.
fn check_length(length: f32) -> Result<(), LayoutError> {
    if length >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidLength(length))
    }
}

// =============================================================================
// LAYOUTS
// =============================================================================

/// Lay out `count` items in rows of `cols` equal-width cells.
///
/// Item `i` lands at column `i % cols`, row `i / cols`. Each cell is
/// `container.width / cols` wide and `row_height` tall; the container height
/// does not constrain the grid. A negative width or row height is
/// [`LayoutError::InvalidLength`].
pub fn grid_layout(
    container: Size,
    count: usize,
    cols: usize,
    row_height: f32,
) -> Result<Vec<LayoutItem>, LayoutError> {
    if cols == 0 {
        return Err(LayoutError::ZeroColumns);
    }
    check_length(container.width)?;
    check_length(row_height)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut tree = new_tree();
    let cell_width = TaffyDimension::Percent(1.0 / cols as f32);

    // (row, cell) pairs in item order; cell locations are row-relative
    let mut cells: Vec<(NodeId, NodeId)> = Vec::with_capacity(count);
    let mut rows: Vec<NodeId> = Vec::with_capacity(count.div_ceil(cols));

    for start in (0..count).step_by(cols) {
        let end = (start + cols).min(count);
        let row_cells = (start..end)
            .map(|_| tree.new_leaf(fixed_box(cell_width, TaffyDimension::Percent(1.0))))
            .collect::<Result<Vec<_>, _>>()?;

        let row_style = Style {
            flex_direction: FlexDirection::Row,
            ..fixed_box(TaffyDimension::Percent(1.0), TaffyDimension::Length(row_height))
        };
        let row = tree.new_with_children(row_style, &row_cells)?;

        cells.extend(row_cells.into_iter().map(|cell| (row, cell)));
        rows.push(row);
    }

    let root = tree.new_with_children(column_root(container), &rows)?;
    tree.compute_layout(root, column_space(container))?;

    tracing::debug!(count, cols, rows = rows.len(), "grid layout");

    cells
        .into_iter()
        .enumerate()
        .map(|(index, (row, cell))| {
            let row_layout = tree.layout(row)?;
            let cell_layout = tree.layout(cell)?;
            Ok(LayoutItem {
                index,
                pos: Position::new(
                    row_layout.location.x + cell_layout.location.x,
                    row_layout.location.y + cell_layout.location.y,
                ),
                size: to_size(cell_layout.size),
            })
        })
        .collect()
}

/// Stack `count` full-width items of `item_height` top to bottom.
///
/// A negative width or item height is [`LayoutError::InvalidLength`].
pub fn list_layout(
    container: Size,
    count: usize,
    item_height: f32,
) -> Result<Vec<LayoutItem>, LayoutError> {
    check_length(container.width)?;
    check_length(item_height)?;
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut tree = new_tree();
    let items = (0..count)
        .map(|_| {
            tree.new_leaf(fixed_box(
                TaffyDimension::Percent(1.0),
                TaffyDimension::Length(item_height),
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let root = tree.new_with_children(column_root(container), &items)?;
    tree.compute_layout(root, column_space(container))?;

    tracing::debug!(count, item_height, "list layout");

    items
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let layout = tree.layout(node)?;
            Ok(LayoutItem {
                index,
                pos: Position::new(layout.location.x, layout.location.y),
                size: to_size(layout.size),
            })
        })
        .collect()
}

/// Split the container horizontally: `ratio` of the width on the left, the
/// rest on the right. Both halves keep the full height.
pub fn split_layout(container: Size, ratio: f32) -> Result<SplitLayout, LayoutError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(LayoutError::InvalidRatio(ratio));
    }
    check_length(container.width)?;
    check_length(container.height)?;

    let mut tree = new_tree();
    let left = tree.new_leaf(fixed_box(
        TaffyDimension::Percent(ratio),
        TaffyDimension::Percent(1.0),
    ))?;
    let right = tree.new_leaf(fixed_box(
        TaffyDimension::Percent(1.0 - ratio),
        TaffyDimension::Percent(1.0),
    ))?;

    let root_style = Style {
        flex_direction: FlexDirection::Row,
        ..fixed_box(
            TaffyDimension::Length(container.width),
            TaffyDimension::Length(container.height),
        )
    };
    let root = tree.new_with_children(root_style, &[left, right])?;
    tree.compute_layout(root, available(container))?;

    let split = SplitLayout {
        left: to_size(tree.layout(left)?.size),
        right: to_size(tree.layout(right)?.size),
    };
    tracing::debug!(ratio, left = split.left.width, right = split.right.width, "split layout");
    Ok(split)
}
