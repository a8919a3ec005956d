//! Size hints and size policies for layout negotiation.
//!
//! Widgets report a [`SizeHint`] and a [`SizePolicyPair`]; layout strategies
//! read both to decide how much space each child gets.

use horizon_trellis_render::Size;

/// How a widget behaves along one axis when space is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizePolicy {
    /// Always the size hint.
    Fixed,
    /// The size hint is the minimum; the widget may grow.
    Minimum,
    /// The size hint is the maximum; the widget may shrink.
    Maximum,
    /// The size hint is preferred; the widget may grow or shrink.
    #[default]
    Preferred,
    /// The widget wants as much space as it can get.
    Expanding,
}

impl SizePolicy {
    /// Returns true if the policy allows the widget to grow.
    #[inline]
    pub fn can_grow(self) -> bool {
        !matches!(self, Self::Fixed | Self::Maximum)
    }

    /// Returns true if the policy allows the widget to shrink.
    #[inline]
    pub fn can_shrink(self) -> bool {
        !matches!(self, Self::Fixed | Self::Minimum)
    }

    /// Returns true if the widget actively wants more space.
    #[inline]
    pub fn wants_to_grow(self) -> bool {
        matches!(self, Self::Expanding)
    }
}

/// Horizontal and vertical size policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePolicyPair {
    /// Horizontal size policy.
    pub horizontal: SizePolicy,
    /// Vertical size policy.
    pub vertical: SizePolicy,
}

impl SizePolicyPair {
    /// Create a new size policy pair.
    pub fn new(horizontal: SizePolicy, vertical: SizePolicy) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// The same policy on both axes.
    pub fn uniform(policy: SizePolicy) -> Self {
        Self::new(policy, policy)
    }

    /// Fixed on both axes.
    pub fn fixed() -> Self {
        Self::uniform(SizePolicy::Fixed)
    }

    /// Preferred on both axes (the default).
    pub fn preferred() -> Self {
        Self::uniform(SizePolicy::Preferred)
    }

    /// Expanding on both axes.
    pub fn expanding() -> Self {
        Self::uniform(SizePolicy::Expanding)
    }
}

/// Preferred, minimum, and maximum sizes reported by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    /// The size the widget displays best at.
    pub preferred: Size,
    /// The smallest acceptable size, if any.
    pub minimum: Option<Size>,
    /// The largest useful size, if any.
    pub maximum: Option<Size>,
}

impl SizeHint {
    /// A hint with only a preferred size.
    pub fn new(preferred: Size) -> Self {
        Self {
            preferred,
            minimum: None,
            maximum: None,
        }
    }

    /// A hint from preferred width and height.
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(Size::new(width, height))
    }

    /// A fixed hint (preferred = minimum = maximum).
    pub fn fixed(size: Size) -> Self {
        Self {
            preferred: size,
            minimum: Some(size),
            maximum: Some(size),
        }
    }

    /// Set the minimum size.
    pub fn with_minimum(mut self, minimum: Size) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Set the maximum size.
    pub fn with_maximum(mut self, maximum: Size) -> Self {
        self.maximum = Some(maximum);
        self
    }

    /// The minimum, or zero.
    pub fn effective_minimum(&self) -> Size {
        self.minimum.unwrap_or(Size::ZERO)
    }

    /// The maximum, or an unbounded size.
    pub fn effective_maximum(&self) -> Size {
        self.maximum.unwrap_or(Size::new(f32::MAX, f32::MAX))
    }

    /// Clamp `size` into the minimum/maximum bounds.
    pub fn constrain(&self, size: Size) -> Size {
        let min = self.effective_minimum();
        let max = self.effective_maximum();
        Size::new(
            size.width.clamp(min.width, max.width.max(min.width)),
            size.height.clamp(min.height, max.height.max(min.height)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_flags() {
        assert!(!SizePolicy::Fixed.can_grow());
        assert!(SizePolicy::Preferred.can_grow());
        assert!(SizePolicy::Expanding.wants_to_grow());
        assert!(!SizePolicy::Minimum.can_shrink());
    }

    #[test]
    fn test_constrain() {
        let hint = SizeHint::from_dimensions(50.0, 20.0)
            .with_minimum(Size::new(10.0, 10.0))
            .with_maximum(Size::new(100.0, 30.0));
        assert_eq!(hint.constrain(Size::new(5.0, 50.0)), Size::new(10.0, 30.0));
        assert_eq!(SizeHint::fixed(Size::new(4.0, 4.0)).constrain(Size::ZERO), Size::new(4.0, 4.0));
    }
}
