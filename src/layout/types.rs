//! Layout output types.

use crate::types::{Position, Size};

/// Split ratio used when a caller has no preference: 30% left, 70% right.
pub const DEFAULT_SPLIT_RATIO: f32 = 0.3;

/// One laid out child: its index in the input sequence, its offset inside
/// the container, and its size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    pub index: usize,
    pub pos: Position,
    pub size: Size,
}

/// The two halves of a horizontal split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitLayout {
    pub left: Size,
    pub right: Size,
}

/// Reasons a layout cannot be computed.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("grid layout needs at least one column")]
    ZeroColumns,

    #[error("split ratio must be within 0..=1, got {0}")]
    InvalidRatio(f32),

    #[error("layout lengths must be non-negative, got {0}")]
    InvalidLength(f32),

    #[error("layout engine failed: {0}")]
    Engine(#[from] taffy::TaffyError),
}
