//! Printable snapshots of a widget tree.
//!
//! Widgets borrow their children, so the tree is first captured into an
//! owned [`WidgetSnapshot`] and then formatted with
//! [`TreeDebug`](horizon_trellis_core::TreeDebug).

use horizon_trellis_core::{TreeDebug, TreeFormatOptions, TreeNode};

use super::traits::Widget;

/// An owned copy of the debug-relevant state of a widget subtree.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot {
    name: String,
    class: &'static str,
    id: String,
    properties: Vec<(&'static str, String)>,
    children: Vec<WidgetSnapshot>,
}

impl WidgetSnapshot {
    /// Capture `root` and all of its descendants.
    pub fn capture(root: &dyn Widget) -> Self {
        let base = root.widget_base();
        let geometry = base.geometry();
        let properties = vec![
            (
                "geometry",
                format!(
                    "{}x{} @ ({}, {})",
                    geometry.width(),
                    geometry.height(),
                    geometry.left(),
                    geometry.top()
                ),
            ),
            ("visible", base.is_visible().to_string()),
            ("enabled", base.is_enabled().to_string()),
            ("focused", base.has_focus().to_string()),
        ];
        let children = (0..root.child_count())
            .filter_map(|index| root.child_at(index))
            .map(Self::capture)
            .collect();

        Self {
            name: base.name().to_string(),
            class: base.class(),
            id: base.id().to_string(),
            properties,
            children,
        }
    }

    /// The captured children.
    pub fn children(&self) -> &[WidgetSnapshot] {
        &self.children
    }

    /// Format the snapshot with `options`.
    pub fn format(&self, options: TreeFormatOptions) -> String {
        TreeDebug::with_options(options).format(self)
    }
}

impl TreeNode for WidgetSnapshot {
    fn node_name(&self) -> String {
        self.name.clone()
    }

    fn node_type(&self) -> &'static str {
        self.class
    }

    fn node_id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn node_properties(&self) -> Vec<(&'static str, String)> {
        self.properties.clone()
    }

    fn node_children(&self) -> Vec<&Self> {
        self.children.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::UiContext;
    use crate::widget::widgets::{Label, Panel, PushButton};
    use horizon_trellis_core::TreeStyle;

    #[test]
    fn test_capture_and_format() {
        let ctx = UiContext::headless();
        let mut panel = Panel::new(&ctx);
        panel.widget_base_mut().set_name("form");
        panel.add_child(Box::new(Label::new(&ctx, "Name")));
        let mut ok = PushButton::new(&ctx, "OK");
        ok.widget_base_mut().set_name("ok");
        panel.add_child(Box::new(ok));

        let snapshot = WidgetSnapshot::capture(&panel);
        assert_eq!(snapshot.children().len(), 2);

        let text = snapshot.format(TreeFormatOptions {
            style: TreeStyle::Ascii,
            show_ids: false,
            ..TreeFormatOptions::default()
        });
        assert_eq!(text, "form (Panel)\n+-- (unnamed) (Label)\n`-- ok (Button)\n");
    }
}
