//! Structural paths.
//!
//! A path locates a value inside the structure being rendered, e.g.
//! `root.items[2].name`. Object keys add a dot segment, array indices add a
//! bracket suffix to the current segment. Depth counts dot segments only:
//!
//! ```text
//! root              → 1
//! root.items        → 2
//! root.items[2]     → 2
//! root.items[2].id  → 3
//! ```

/// Path of the element at `index` inside the array at `parent`.
pub fn append_index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Path of the field `key` inside the object at `parent`.
///
/// An empty parent still gets the separator (`""` + `"root"` → `".root"`),
/// so depth stays consistent with the number of keys appended.
pub fn append_key(parent: &str, key: &str) -> String {
    format!("{parent}.{key}")
}

/// Nesting depth of a path: the number of dot-separated segments.
///
/// Always at least 1, the empty path included.
pub fn path_depth(path: &str) -> usize {
    path.split('.').count()
}

/// Last segment of a path, for display.
///
/// `root.items[2]` → `[2]`, `root.name` → `name`, `root` → `root`.
pub fn path_label(path: &str) -> &str {
    let segment = path.rsplit('.').next().unwrap_or(path);
    match segment.rfind('[') {
        Some(0) | None => segment,
        Some(bracket) => &segment[bracket..],
    }
}
