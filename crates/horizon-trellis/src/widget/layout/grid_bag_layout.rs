//! Constraint-based grid layout.
//!
//! Each item carries a [`CellConstraint`] naming its cell (or flowing into
//! the next free one), how many columns and rows it spans, how strongly its
//! column and row grow into extra space, and how it sits inside its cell.
//!
//! The solver works one axis at a time:
//!
//! 1. Every track (column or row) gets the largest preferred and minimum
//!    extent of the single-span items in it; spanning items then widen the
//!    tracks they cover evenly if those are too small.
//! 2. Extra space is shared by grow weight. A shortage shrinks tracks toward
//!    their minimum in proportion to how much each can give.
//!
//! # Example
//!
//! ```
//! use horizon_trellis::widget::layout::{CellConstraint, GridBagLayout, Layout, LayoutItem};
//! use horizon_trellis::widget::SizeHint;
//! use horizon_trellis_render::Rect;
//!
//! let layout = GridBagLayout::new().with_spacing(0.0, 0.0);
//! let label = LayoutItem::new(SizeHint::from_dimensions(50.0, 20.0))
//!     .with_constraint(CellConstraint::at(0, 0));
//! let field = LayoutItem::new(SizeHint::from_dimensions(100.0, 20.0))
//!     .with_constraint(CellConstraint::at(1, 0).grow(1.0, 0.0).fill_x());
//!
//! let rects = layout.calculate(&[label, field], Rect::new(0.0, 0.0, 300.0, 20.0));
//! assert_eq!(rects[1], Rect::new(50.0, 0.0, 250.0, 20.0));
//! ```

use std::collections::HashSet;

use horizon_trellis_core::logging::targets;
use horizon_trellis_render::{Rect, Size};

use super::{Alignment, ContentMargins, DEFAULT_SPACING, Layout, LayoutItem};
use crate::widget::geometry::SizeHint;

/// Placement of one item in a [`GridBagLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellConstraint {
    /// Explicit `(column, row)`; `None` flows into the next free cell.
    pub cell: Option<(usize, usize)>,
    /// Columns spanned (at least 1).
    pub column_span: usize,
    /// Rows spanned (at least 1).
    pub row_span: usize,
    /// Share of extra width given to this item's columns.
    pub grow_x: f32,
    /// Share of extra height given to this item's rows.
    pub grow_y: f32,
    /// Horizontal placement in the cell; `Stretch` fills it.
    pub align_x: Alignment,
    /// Vertical placement in the cell; `Stretch` fills it.
    pub align_y: Alignment,
}

impl Default for CellConstraint {
    fn default() -> Self {
        Self {
            cell: None,
            column_span: 1,
            row_span: 1,
            grow_x: 0.0,
            grow_y: 0.0,
            align_x: Alignment::Start,
            align_y: Alignment::Center,
        }
    }
}

impl CellConstraint {
    /// Flow into the next free cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Place at `column`, `row`.
    pub fn at(column: usize, row: usize) -> Self {
        Self {
            cell: Some((column, row)),
            ..Self::default()
        }
    }

    /// Span `columns` by `rows` cells.
    pub fn span(mut self, columns: usize, rows: usize) -> Self {
        self.column_span = columns.max(1);
        self.row_span = rows.max(1);
        self
    }

    /// Set grow weights.
    pub fn grow(mut self, x: f32, y: f32) -> Self {
        self.grow_x = x.max(0.0);
        self.grow_y = y.max(0.0);
        self
    }

    /// Set the alignment inside the cell.
    pub fn align(mut self, x: Alignment, y: Alignment) -> Self {
        self.align_x = x;
        self.align_y = y;
        self
    }

    /// Fill the cell horizontally.
    pub fn fill_x(mut self) -> Self {
        self.align_x = Alignment::Stretch;
        self
    }

    /// Fill the cell vertically.
    pub fn fill_y(mut self) -> Self {
        self.align_y = Alignment::Stretch;
        self
    }

    /// Fill the cell in both directions.
    pub fn fill(self) -> Self {
        self.fill_x().fill_y()
    }
}

/// A constraint-based grid layout.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBagLayout {
    margins: ContentMargins,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    wrap_after: Option<usize>,
    column_grow: Vec<f32>,
    row_grow: Vec<f32>,
}

impl Default for GridBagLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// An item resolved to grid coordinates.
#[derive(Debug, Clone, Copy)]
struct Placement {
    index: usize,
    column: usize,
    row: usize,
    constraint: CellConstraint,
    hint: SizeHint,
}

/// Extents of the tracks along one axis.
#[derive(Debug, Clone, Default)]
struct Tracks {
    preferred: Vec<f32>,
    minimum: Vec<f32>,
    grow: Vec<f32>,
}

impl Tracks {
    fn new(count: usize) -> Self {
        Self {
            preferred: vec![0.0; count],
            minimum: vec![0.0; count],
            grow: vec![0.0; count],
        }
    }

    fn total(values: &[f32], spacing: f32) -> f32 {
        values.iter().sum::<f32>() + spacing * values.len().saturating_sub(1) as f32
    }

    /// Final sizes for `available` space.
    fn solve(&self, available: f32, spacing: f32) -> Vec<f32> {
        let mut sizes = self.preferred.clone();
        let preferred_total = Self::total(&self.preferred, spacing);
        let delta = available - preferred_total;

        if delta > 0.0 {
            let weight: f32 = self.grow.iter().sum();
            if weight > 0.0 {
                for (size, grow) in sizes.iter_mut().zip(&self.grow) {
                    *size += delta * grow / weight;
                }
            }
        } else if delta < 0.0 {
            let slack: Vec<f32> = self
                .preferred
                .iter()
                .zip(&self.minimum)
                .map(|(p, m)| (p - m).max(0.0))
                .collect();
            let total_slack: f32 = slack.iter().sum();
            if total_slack > 0.0 {
                let shrink = (-delta).min(total_slack);
                for (size, give) in sizes.iter_mut().zip(&slack) {
                    *size -= shrink * give / total_slack;
                }
            }
        }
        sizes
    }

    /// Start offsets of each track.
    fn offsets(sizes: &[f32], start: f32, spacing: f32) -> Vec<f32> {
        let mut offsets = Vec::with_capacity(sizes.len());
        let mut pos = start;
        for size in sizes {
            offsets.push(pos);
            pos += size + spacing;
        }
        offsets
    }
}

impl GridBagLayout {
    /// Create a grid layout with default spacing.
    pub fn new() -> Self {
        Self {
            margins: ContentMargins::default(),
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            wrap_after: None,
            column_grow: Vec::new(),
            row_grow: Vec::new(),
        }
    }

    /// Set the gaps between columns and rows.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    /// Set the content margins.
    pub fn with_margins(mut self, margins: ContentMargins) -> Self {
        self.margins = margins;
        self
    }

    /// Flowing items start a new row after `columns` columns.
    pub fn with_wrap_after(mut self, columns: usize) -> Self {
        self.wrap_after = Some(columns.max(1));
        self
    }

    /// Grow weight of a whole column, combined with item weights by maximum.
    pub fn set_column_grow(&mut self, column: usize, weight: f32) {
        if self.column_grow.len() <= column {
            self.column_grow.resize(column + 1, 0.0);
        }
        self.column_grow[column] = weight.max(0.0);
    }

    /// Grow weight of a whole row, combined with item weights by maximum.
    pub fn set_row_grow(&mut self, row: usize, weight: f32) {
        if self.row_grow.len() <= row {
            self.row_grow.resize(row + 1, 0.0);
        }
        self.row_grow[row] = weight.max(0.0);
    }

    /// Assign grid cells to visible items.
    fn place(&self, items: &[LayoutItem]) -> Vec<Placement> {
        let mut occupied: HashSet<(usize, usize)> = HashSet::new();
        let mut placements = Vec::new();
        let (mut cursor_col, mut cursor_row) = (0usize, 0usize);

        for (index, item) in items.iter().enumerate().filter(|(_, item)| item.visible) {
            let constraint = item.constraint.unwrap_or_default();
            let (column, row) = match constraint.cell {
                Some(cell) => cell,
                None => {
                    loop {
                        if let Some(wrap) = self.wrap_after
                            && cursor_col + constraint.column_span > wrap
                            && cursor_col > 0
                        {
                            cursor_col = 0;
                            cursor_row += 1;
                        }
                        let free = (0..constraint.column_span).all(|dc| {
                            (0..constraint.row_span)
                                .all(|dr| !occupied.contains(&(cursor_col + dc, cursor_row + dr)))
                        });
                        if free {
                            break;
                        }
                        cursor_col += 1;
                    }
                    (cursor_col, cursor_row)
                }
            };

            for dc in 0..constraint.column_span {
                for dr in 0..constraint.row_span {
                    if !occupied.insert((column + dc, row + dr)) {
                        tracing::debug!(
                            target: targets::LAYOUT,
                            column = column + dc,
                            row = row + dr,
                            "grid cell used by more than one item"
                        );
                    }
                }
            }
            if constraint.cell.is_none() {
                cursor_col = column + constraint.column_span;
            }

            placements.push(Placement {
                index,
                column,
                row,
                constraint,
                hint: item.hint,
            });
        }
        placements
    }

    fn tracks(&self, placements: &[Placement], horizontal: bool) -> Tracks {
        let axis = |p: &Placement| {
            if horizontal {
                (
                    p.column,
                    p.constraint.column_span,
                    p.hint.preferred.width,
                    p.hint.effective_minimum().width,
                    p.constraint.grow_x,
                )
            } else {
                (
                    p.row,
                    p.constraint.row_span,
                    p.hint.preferred.height,
                    p.hint.effective_minimum().height,
                    p.constraint.grow_y,
                )
            }
        };
        let spacing = if horizontal {
            self.horizontal_spacing
        } else {
            self.vertical_spacing
        };
        let overrides = if horizontal {
            &self.column_grow
        } else {
            &self.row_grow
        };

        let count = placements
            .iter()
            .map(|p| {
                let (start, span, ..) = axis(p);
                start + span
            })
            .max()
            .unwrap_or(0);
        let mut tracks = Tracks::new(count);

        for p in placements {
            let (start, span, preferred, minimum, grow) = axis(p);
            for track in start..start + span {
                tracks.grow[track] = tracks.grow[track].max(grow);
            }
            if span == 1 {
                tracks.preferred[start] = tracks.preferred[start].max(preferred);
                tracks.minimum[start] = tracks.minimum[start].max(minimum);
            }
        }

        // Spanning items widen their tracks evenly when they don't fit.
        for p in placements {
            let (start, span, preferred, minimum, _) = axis(p);
            if span < 2 {
                continue;
            }
            let range = start..start + span;
            let gaps = spacing * (span - 1) as f32;
            let current: f32 = tracks.preferred[range.clone()].iter().sum::<f32>() + gaps;
            if preferred > current {
                let add = (preferred - current) / span as f32;
                tracks.preferred[range.clone()].iter_mut().for_each(|v| *v += add);
            }
            let current_min: f32 = tracks.minimum[range.clone()].iter().sum::<f32>() + gaps;
            if minimum > current_min {
                let add = (minimum - current_min) / span as f32;
                tracks.minimum[range].iter_mut().for_each(|v| *v += add);
            }
        }

        for (track, weight) in overrides.iter().enumerate().take(count) {
            tracks.grow[track] = tracks.grow[track].max(*weight);
        }
        tracks
    }

    fn place_in_cell(extent: f32, cell: f32, align: Alignment, hint_min: f32, hint_max: f32) -> (f32, f32) {
        let size = match align {
            Alignment::Stretch => cell.clamp(hint_min.min(cell), hint_max.max(hint_min)),
            _ => extent.min(cell).max(0.0),
        };
        (align.offset(cell, size), size)
    }
}

impl Layout for GridBagLayout {
    fn size_hint(&self, items: &[LayoutItem]) -> SizeHint {
        let placements = self.place(items);
        let columns = self.tracks(&placements, true);
        let rows = self.tracks(&placements, false);

        let preferred = Size::new(
            Tracks::total(&columns.preferred, self.horizontal_spacing),
            Tracks::total(&rows.preferred, self.vertical_spacing),
        );
        let minimum = Size::new(
            Tracks::total(&columns.minimum, self.horizontal_spacing),
            Tracks::total(&rows.minimum, self.vertical_spacing),
        );
        SizeHint::new(self.margins.expand(preferred)).with_minimum(self.margins.expand(minimum))
    }

    fn calculate(&self, items: &[LayoutItem], rect: Rect) -> Vec<Rect> {
        let mut rects = vec![Rect::ZERO; items.len()];
        let content = self.margins.apply(rect);
        let placements = self.place(items);
        if placements.is_empty() {
            return rects;
        }

        let column_sizes = self
            .tracks(&placements, true)
            .solve(content.width(), self.horizontal_spacing);
        let row_sizes = self
            .tracks(&placements, false)
            .solve(content.height(), self.vertical_spacing);
        let column_x = Tracks::offsets(&column_sizes, content.left(), self.horizontal_spacing);
        let row_y = Tracks::offsets(&row_sizes, content.top(), self.vertical_spacing);

        for p in &placements {
            let c = p.constraint;
            let cell_width = Tracks::total(&column_sizes[p.column..p.column + c.column_span], self.horizontal_spacing);
            let cell_height = Tracks::total(&row_sizes[p.row..p.row + c.row_span], self.vertical_spacing);

            let min = p.hint.effective_minimum();
            let max = p.hint.effective_maximum();
            let (dx, width) = Self::place_in_cell(p.hint.preferred.width, cell_width, c.align_x, min.width, max.width);
            let (dy, height) =
                Self::place_in_cell(p.hint.preferred.height, cell_height, c.align_y, min.height, max.height);

            rects[p.index] = Rect::new(column_x[p.column] + dx, row_y[p.row] + dy, width, height);
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(width: f32, height: f32, constraint: CellConstraint) -> LayoutItem {
        LayoutItem::new(SizeHint::from_dimensions(width, height)).with_constraint(constraint)
    }

    #[test]
    fn test_form_grid() {
        let layout = GridBagLayout::new().with_spacing(10.0, 5.0);
        let items = [
            item(50.0, 20.0, CellConstraint::at(0, 0)),
            item(100.0, 20.0, CellConstraint::at(1, 0).grow(1.0, 0.0).fill_x()),
            item(70.0, 30.0, CellConstraint::at(0, 1)),
            item(100.0, 20.0, CellConstraint::at(1, 1).grow(1.0, 0.0).fill_x()),
        ];

        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 300.0, 100.0));
        // Column 0 is as wide as its widest item.
        assert_eq!(rects[1], Rect::new(80.0, 0.0, 220.0, 20.0));
        // Row 1 starts after row 0 (20) plus spacing; items are centered vertically.
        assert_eq!(rects[2], Rect::new(0.0, 25.0, 70.0, 30.0));
        assert_eq!(rects[3].top(), 30.0);
    }

    #[test]
    fn test_auto_flow_wraps() {
        let layout = GridBagLayout::new().with_spacing(0.0, 0.0).with_wrap_after(2);
        let items: Vec<_> = (0..3)
            .map(|_| item(10.0, 10.0, CellConstraint::new()))
            .collect();

        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(rects[1].origin, horizon_trellis_render::Point::new(10.0, 0.0));
        assert_eq!(rects[2].origin, horizon_trellis_render::Point::new(0.0, 10.0));
    }

    #[test]
    fn test_span_widens_columns() {
        let layout = GridBagLayout::new().with_spacing(0.0, 0.0);
        let items = [
            item(10.0, 10.0, CellConstraint::at(0, 0)),
            item(10.0, 10.0, CellConstraint::at(1, 0)),
            item(60.0, 10.0, CellConstraint::at(0, 1).span(2, 1)),
        ];
        let hint = layout.size_hint(&items);
        assert_eq!(hint.preferred, Size::new(60.0, 20.0));

        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 60.0, 20.0));
        assert_eq!(rects[1].left(), 30.0);
    }

    #[test]
    fn test_shrinks_toward_minimum() {
        let layout = GridBagLayout::new().with_spacing(0.0, 0.0);
        let shrinkable = LayoutItem::new(
            SizeHint::from_dimensions(100.0, 10.0).with_minimum(Size::new(20.0, 10.0)),
        )
        .with_constraint(CellConstraint::at(0, 0).fill_x());
        let fixed = LayoutItem::new(SizeHint::fixed(Size::new(50.0, 10.0)))
            .with_constraint(CellConstraint::at(1, 0));

        let rects = layout.calculate(&[shrinkable, fixed], Rect::new(0.0, 0.0, 110.0, 10.0));
        assert_eq!(rects[0].width(), 60.0);
        assert_eq!(rects[1], Rect::new(60.0, 0.0, 50.0, 10.0));
    }

    #[test]
    fn test_column_grow_override() {
        let mut layout = GridBagLayout::new().with_spacing(0.0, 0.0);
        layout.set_column_grow(0, 1.0);
        let items = [
            item(10.0, 10.0, CellConstraint::at(0, 0)),
            item(10.0, 10.0, CellConstraint::at(1, 0)),
        ];
        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 100.0, 10.0));
        assert_eq!(rects[1].left(), 90.0);
    }
}
