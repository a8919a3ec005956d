//! Addressing widgets inside an owned tree.
//!
//! Parents own their children, so widgets are located by a [`WidgetPath`]:
//! the child indexes from the root down to the widget. A path is paired with
//! the [`WidgetId`] it resolved to so that callers can detect a path gone
//! stale after the tree changed.

use horizon_trellis_render::Point;

use super::base::WidgetId;
use super::traits::Widget;

/// Child indexes from the root to a widget. The empty path is the root.
pub type WidgetPath = Vec<usize>;

/// Resolve `path` to a widget.
pub fn resolve<'a>(root: &'a dyn Widget, path: &[usize]) -> Option<&'a dyn Widget> {
    let mut current = root;
    for &index in path {
        current = current.child_at(index)?;
    }
    Some(current)
}

/// Resolve `path` to a mutable widget.
pub fn resolve_mut<'a>(root: &'a mut dyn Widget, path: &[usize]) -> Option<&'a mut dyn Widget> {
    let mut current = root;
    for &index in path {
        current = current.child_at_mut(index)?;
    }
    Some(current)
}

/// Ids of every widget along `path`, root first.
pub fn id_chain(root: &dyn Widget, path: &[usize]) -> Option<Vec<WidgetId>> {
    let mut ids = Vec::with_capacity(path.len() + 1);
    let mut current = root;
    ids.push(current.id());
    for &index in path {
        current = current.child_at(index)?;
        ids.push(current.id());
    }
    Some(ids)
}

/// Parent-relative origins of the widgets along `path`, excluding the root.
pub fn origin_chain(root: &dyn Widget, path: &[usize]) -> Option<Vec<Point>> {
    let mut origins = Vec::with_capacity(path.len());
    let mut current = root;
    for &index in path {
        current = current.child_at(index)?;
        origins.push(current.geometry().origin);
    }
    Some(origins)
}

/// Depth-first search for the widget with `id`.
pub fn find_path(root: &dyn Widget, id: WidgetId) -> Option<WidgetPath> {
    if root.id() == id {
        return Some(Vec::new());
    }
    for index in 0..root.child_count() {
        if let Some(child) = root.child_at(index)
            && let Some(mut rest) = find_path(child, id)
        {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

/// Re-resolve a remembered `(path, id)` pair.
///
/// Returns the path unchanged if it still leads to `id`; otherwise searches
/// the tree for `id`.
pub fn revalidate(root: &dyn Widget, path: &[usize], id: WidgetId) -> Option<WidgetPath> {
    match resolve(root, path) {
        Some(widget) if widget.id() == id => Some(path.to_vec()),
        _ => find_path(root, id),
    }
}

/// Deepest visible widget under `pos` (root-local coordinates).
///
/// Children are tested top-most first (reverse paint order).
pub fn hit_test(root: &dyn Widget, pos: Point) -> Option<WidgetPath> {
    if !root.is_visible() || !root.contains_point(pos) {
        return None;
    }

    let mut path = Vec::new();
    let mut current = root;
    let mut local = pos;
    'descend: loop {
        for index in (0..current.child_count()).rev() {
            let Some(child) = current.child_at(index) else {
                continue;
            };
            if child.is_visible() && child.geometry().contains(local) {
                local = child.widget_base().map_from_parent(local);
                path.push(index);
                current = child;
                continue 'descend;
            }
        }
        return Some(path);
    }
}

/// Map a root-local point into the coordinates of the widget at `path`.
pub fn map_to_path(root: &dyn Widget, path: &[usize], pos: Point) -> Option<Point> {
    let origins = origin_chain(root, path)?;
    Some(origins.iter().fold(pos, |p, origin| p - *origin))
}

/// Visit every widget in pre-order with its path.
pub fn visit<F>(root: &dyn Widget, f: &mut F)
where
    F: FnMut(&dyn Widget, &[usize]),
{
    fn walk<F>(widget: &dyn Widget, path: &mut Vec<usize>, f: &mut F)
    where
        F: FnMut(&dyn Widget, &[usize]),
    {
        f(widget, path);
        for index in 0..widget.child_count() {
            if let Some(child) = widget.child_at(index) {
                path.push(index);
                walk(child, path, f);
                path.pop();
            }
        }
    }

    let mut path = Vec::new();
    walk(root, &mut path, f);
}
