//! Flow layout for wrapping horizontal arrangement.
//!
//! `FlowLayout` places items left to right at their preferred size and
//! starts a new row when the next item would overflow the available width.

use horizon_trellis_render::{Rect, Size};

use super::{Alignment, ContentMargins, DEFAULT_SPACING, Layout, LayoutItem};
use crate::widget::geometry::SizeHint;

/// A flow layout that wraps items horizontally.
///
/// Items in a row are vertically centered on the row's tallest item. The
/// row alignment controls where a row that doesn't fill the width sits;
/// `Stretch` spreads the leftover space between items.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLayout {
    margins: ContentMargins,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    alignment: Alignment,
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// One placed item: index, width, height.
type RowEntry = (usize, f32, f32);

impl FlowLayout {
    /// Create a new flow layout with default spacing and no margins.
    pub fn new() -> Self {
        Self {
            margins: ContentMargins::default(),
            horizontal_spacing: DEFAULT_SPACING,
            vertical_spacing: DEFAULT_SPACING,
            alignment: Alignment::Start,
        }
    }

    /// Set both spacings.
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

    /// Set the row alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Horizontal spacing between items in a row.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Vertical spacing between rows.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Alignment of incomplete rows.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Content margins.
    pub fn margins(&self) -> ContentMargins {
        self.margins
    }

    /// Break visible items into rows for `width`.
    fn rows(&self, items: &[LayoutItem], width: f32) -> Vec<Vec<RowEntry>> {
        let mut rows: Vec<Vec<RowEntry>> = Vec::new();
        let mut row: Vec<RowEntry> = Vec::new();
        let mut x = 0.0;

        for (index, item) in items.iter().enumerate().filter(|(_, item)| item.visible) {
            let size = item.hint.preferred;
            let width_needed = if row.is_empty() {
                size.width
            } else {
                x + self.horizontal_spacing + size.width
            };

            if !row.is_empty() && width_needed > width {
                rows.push(std::mem::take(&mut row));
                x = size.width;
            } else {
                x = width_needed;
            }
            row.push((index, size.width.min(width.max(0.0)), size.height));
        }
        if !row.is_empty() {
            rows.push(row);
        }
        rows
    }

    fn rows_height(&self, rows: &[Vec<RowEntry>]) -> f32 {
        let content: f32 = rows
            .iter()
            .map(|row| row.iter().map(|(_, _, h)| *h).fold(0.0, f32::max))
            .sum();
        content + self.vertical_spacing * rows.len().saturating_sub(1) as f32
    }
}

impl Layout for FlowLayout {
    fn size_hint(&self, items: &[LayoutItem]) -> SizeHint {
        let visible = items.iter().filter(|item| item.visible);

        let mut total_width: f32 = 0.0;
        let mut max_height: f32 = 0.0;
        let mut min_width: f32 = 0.0;
        let mut min_height: f32 = 0.0;
        let mut count = 0;
        for item in visible {
            total_width += item.hint.preferred.width;
            max_height = max_height.max(item.hint.preferred.height);
            let min = item.hint.effective_minimum();
            min_width = min_width.max(min.width);
            min_height = min_height.max(min.height);
            count += 1;
        }
        if count > 1 {
            total_width += self.horizontal_spacing * (count - 1) as f32;
        }

        // Preferred is everything on one row; minimum is the widest item.
        SizeHint::new(self.margins.expand(Size::new(total_width, max_height)))
            .with_minimum(self.margins.expand(Size::new(min_width, min_height)))
    }

    fn calculate(&self, items: &[LayoutItem], rect: Rect) -> Vec<Rect> {
        let mut rects = vec![Rect::ZERO; items.len()];
        let content = self.margins.apply(rect);
        if content.width() <= 0.0 {
            return rects;
        }

        let mut y = content.top();
        for row in self.rows(items, content.width()) {
            let row_height = row.iter().map(|(_, _, h)| *h).fold(0.0, f32::max);
            let used: f32 = row.iter().map(|(_, w, _)| *w).sum::<f32>()
                + self.horizontal_spacing * row.len().saturating_sub(1) as f32;
            let extra = (content.width() - used).max(0.0);

            let gap = if self.alignment == Alignment::Stretch && row.len() > 1 {
                self.horizontal_spacing + extra / (row.len() - 1) as f32
            } else {
                self.horizontal_spacing
            };

            let mut x = content.left() + self.alignment.offset(content.width(), used);
            for (index, width, height) in row {
                let item_y = y + (row_height - height) / 2.0;
                rects[index] = Rect::new(x, item_y, width, height);
                x += width + gap;
            }
            y += row_height + self.vertical_spacing;
        }
        rects
    }

    fn height_for_width(&self, items: &[LayoutItem], width: f32) -> Option<f32> {
        let content_width = width - self.margins.horizontal();
        let rows = self.rows(items, content_width);
        Some(self.rows_height(&rows) + self.margins.vertical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(width: f32, height: f32) -> LayoutItem {
        LayoutItem::new(SizeHint::from_dimensions(width, height))
    }

    #[test]
    fn test_single_row_when_it_fits() {
        let layout = FlowLayout::new().with_spacing(10.0, 5.0);
        let items = [item(40.0, 20.0), item(40.0, 30.0)];

        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(rects[0], Rect::new(0.0, 5.0, 40.0, 20.0));
        assert_eq!(rects[1], Rect::new(50.0, 0.0, 40.0, 30.0));
    }

    #[test]
    fn test_wraps_and_reports_height() {
        let layout = FlowLayout::new()
            .with_spacing(10.0, 5.0)
            .with_margins(ContentMargins::uniform(2.0));
        let items = [item(40.0, 20.0), item(40.0, 20.0), item(40.0, 20.0)];

        // 2 + 40 + 10 + 40 = 92 fits in 100 - 4; the third wraps.
        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(rects[2], Rect::new(2.0, 27.0, 40.0, 20.0));
        assert_eq!(layout.height_for_width(&items, 100.0), Some(49.0));
    }

    #[test]
    fn test_hidden_items_take_no_space() {
        let layout = FlowLayout::new().with_spacing(0.0, 0.0);
        let items = [item(40.0, 20.0), item(40.0, 20.0).with_visible(false), item(40.0, 20.0)];

        let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(rects[1], Rect::ZERO);
        assert_eq!(rects[2].left(), 40.0);
    }

    #[test]
    fn test_alignment() {
        let items = [item(40.0, 20.0), item(40.0, 20.0)];
        let area = Rect::new(0.0, 0.0, 100.0, 20.0);

        let centered = FlowLayout::new()
            .with_spacing(0.0, 0.0)
            .with_alignment(Alignment::Center)
            .calculate(&items, area);
        assert_eq!(centered[0].left(), 10.0);

        let stretched = FlowLayout::new()
            .with_spacing(0.0, 0.0)
            .with_alignment(Alignment::Stretch)
            .calculate(&items, area);
        assert_eq!(stretched[1].right(), 100.0);
    }

    #[test]
    fn test_size_hint() {
        let layout = FlowLayout::new().with_spacing(10.0, 5.0);
        let hint = layout.size_hint(&[item(40.0, 20.0), item(30.0, 25.0)]);
        assert_eq!(hint.preferred, Size::new(80.0, 25.0));
    }
}
