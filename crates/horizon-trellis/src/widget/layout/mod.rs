//! Layout strategies for container widgets.
//!
//! A container describes its children as [`LayoutItem`]s and asks a
//! [`Layout`] for their rectangles. The strategy never sees the widgets
//! themselves, so any algorithm that maps hints to rectangles can be used
//! behind the same interface.
//!
//! # Available Layouts
//!
//! - [`FlowLayout`]: left-to-right with wrapping
//! - [`GridBagLayout`]: constraint-based grid with spans and grow weights
//!
//! # Example
//!
//! ```
//! use horizon_trellis::widget::layout::{FlowLayout, Layout, LayoutItem};
//! use horizon_trellis::widget::SizeHint;
//! use horizon_trellis_render::Rect;
//!
//! let layout = FlowLayout::new().with_spacing(4.0, 4.0);
//! let items = vec![
//!     LayoutItem::new(SizeHint::from_dimensions(60.0, 20.0)),
//!     LayoutItem::new(SizeHint::from_dimensions(60.0, 20.0)),
//! ];
//!
//! // Too narrow for both on one row.
//! let rects = layout.calculate(&items, Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(rects[1].top(), 24.0);
//! ```

mod flow_layout;
mod grid_bag_layout;

use std::fmt;

use horizon_trellis_render::{Rect, Size};

use super::geometry::{SizeHint, SizePolicyPair};

pub use flow_layout::FlowLayout;
pub use grid_bag_layout::{CellConstraint, GridBagLayout};

/// Default spacing between items in layouts (in pixels).
pub const DEFAULT_SPACING: f32 = 6.0;

/// Margins around a layout's content area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMargins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl ContentMargins {
    /// Create new content margins.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same margin on all sides.
    pub fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Same horizontal and vertical margins.
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Shrink `rect` by the margins.
    pub fn apply(&self, rect: Rect) -> Rect {
        rect.inset(self.left, self.top, self.right, self.bottom)
    }

    /// Grow `size` by the margins.
    pub fn expand(&self, size: Size) -> Size {
        Size::new(size.width + self.horizontal(), size.height + self.vertical())
    }
}

/// Placement of an item within the space a layout gives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Align at the start (left/top).
    #[default]
    Start,
    /// Center.
    Center,
    /// Align at the end (right/bottom).
    End,
    /// Fill the available space.
    Stretch,
}

impl Alignment {
    /// Offset of an extent `used` placed in `available` space.
    pub fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Alignment::Start | Alignment::Stretch => 0.0,
            Alignment::Center => ((available - used) / 2.0).max(0.0),
            Alignment::End => (available - used).max(0.0),
        }
    }
}

/// What a layout knows about one child.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutItem {
    /// The child's size hint.
    pub hint: SizeHint,
    /// The child's size policy.
    pub policy: SizePolicyPair,
    /// Hidden items take no space and get an empty rectangle.
    pub visible: bool,
    /// Placement constraint, read by constraint-based layouts.
    pub constraint: Option<CellConstraint>,
}

impl LayoutItem {
    /// A visible item with default policy and no constraint.
    pub fn new(hint: SizeHint) -> Self {
        Self {
            hint,
            policy: SizePolicyPair::default(),
            visible: true,
            constraint: None,
        }
    }

    /// Set the size policy.
    pub fn with_policy(mut self, policy: SizePolicyPair) -> Self {
        self.policy = policy;
        self
    }

    /// Set the placement constraint.
    pub fn with_constraint(mut self, constraint: CellConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Set visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// A strategy that assigns rectangles to items.
///
/// Implementations must return exactly one rectangle per item, in item
/// order, positioned inside `rect`. Hidden items get [`Rect::ZERO`].
pub trait Layout: Send + Sync + fmt::Debug {
    /// Combined size hint of the items, margins included.
    fn size_hint(&self, items: &[LayoutItem]) -> SizeHint;

    /// Rectangles for `items` within `rect`.
    fn calculate(&self, items: &[LayoutItem], rect: Rect) -> Vec<Rect>;

    /// Height needed at `width`, for layouts whose height depends on width.
    fn height_for_width(&self, _items: &[LayoutItem], _width: f32) -> Option<f32> {
        None
    }
}
