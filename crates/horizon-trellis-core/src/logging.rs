//! Logging and debugging facilities for Horizon Trellis.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - A generic tree formatter used to dump widget hierarchies
//! - Performance spans for timing layout and paint passes
//!
//! # Tracing Integration
//!
//! Horizon Trellis uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_trellis=debug")
//!         .init();
//! }
//! ```

use std::fmt::Write as FmtWrite;

/// Span names used throughout Horizon Trellis for tracing.
pub mod span_names {
    /// Layout pass over a widget subtree.
    pub const LAYOUT: &str = "horizon_trellis::layout";
    /// Paint pass over a widget subtree.
    pub const PAINT: &str = "horizon_trellis::paint";
    /// Delivery of one input event.
    pub const DISPATCH: &str = "horizon_trellis::dispatch";
    /// List view delegate rebuild.
    pub const REBUILD: &str = "horizon_trellis::rebuild";
}

/// Tracing targets for each subsystem.
pub mod targets {
    /// Core crate.
    pub const CORE: &str = "horizon_trellis_core";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_trellis_core::signal";
    /// Configuration loading.
    pub const CONFIG: &str = "horizon_trellis_core::config";
    /// Item models.
    pub const MODEL: &str = "horizon_trellis::model";
    /// Selection models.
    pub const SELECTION: &str = "horizon_trellis::selection";
    /// Widgets.
    pub const WIDGET: &str = "horizon_trellis::widget";
    /// Event dispatch and focus.
    pub const DISPATCH: &str = "horizon_trellis::dispatch";
    /// Layout strategies.
    pub const LAYOUT: &str = "horizon_trellis::layout";
    /// Styles and skins.
    pub const STYLE: &str = "horizon_trellis_style";
    /// Performance spans.
    pub const PERF: &str = "horizon_trellis::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show node properties.
    pub show_properties: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_properties: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_properties: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_properties: false,
            ..Default::default()
        }
    }
}

/// A node that can be printed by [`TreeDebug`].
pub trait TreeNode {
    /// Display name of the node.
    fn node_name(&self) -> String;

    /// Short type name of the node.
    fn node_type(&self) -> &'static str;

    /// Identifier printed when [`TreeFormatOptions::show_ids`] is set.
    fn node_id(&self) -> Option<String> {
        None
    }

    /// Key/value pairs printed when [`TreeFormatOptions::show_properties`] is set.
    fn node_properties(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Children in display order.
    fn node_children(&self) -> Vec<&Self>;
}

/// Formats any [`TreeNode`] hierarchy as an indented tree.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a formatter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the tree rooted at `root`.
    pub fn format<N: TreeNode + ?Sized>(&self, root: &N) -> String {
        let mut output = String::new();
        self.format_into(root, 0, true, &mut output);
        output
    }

    fn format_into<N: TreeNode + ?Sized>(
        &self,
        node: &N,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        output.push_str(&self.build_prefix(depth, is_last));

        let name = node.node_name();
        output.push_str(if name.is_empty() { "(unnamed)" } else { &name });

        if self.options.show_ids
            && let Some(id) = node.node_id()
        {
            let _ = write!(output, " [{id}]");
        }
        if self.options.show_types {
            let _ = write!(output, " ({})", node.node_type());
        }
        output.push('\n');

        if self.options.show_properties {
            let prop_prefix = self.build_property_prefix(depth);
            for (key, value) in node.node_properties() {
                let _ = writeln!(output, "{prop_prefix}  .{key} = {value}");
            }
        }

        let children = node.node_children();
        let child_count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.format_into(child, depth + 1, i + 1 == child_count, output);
        }
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }

    fn build_property_prefix(&self, depth: usize) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };

        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        name: &'static str,
        children: Vec<Node>,
    }

    impl Node {
        fn leaf(name: &'static str) -> Self {
            Self {
                name,
                children: Vec::new(),
            }
        }
    }

    impl TreeNode for Node {
        fn node_name(&self) -> String {
            self.name.to_string()
        }

        fn node_type(&self) -> &'static str {
            "Node"
        }

        fn node_id(&self) -> Option<String> {
            Some(self.name.len().to_string())
        }

        fn node_properties(&self) -> Vec<(&'static str, String)> {
            vec![("children", self.children.len().to_string())]
        }

        fn node_children(&self) -> Vec<&Self> {
            self.children.iter().collect()
        }
    }

    fn sample() -> Node {
        Node {
            name: "window",
            children: vec![
                Node {
                    name: "panel",
                    children: vec![Node::leaf("button")],
                },
                Node::leaf("list"),
            ],
        }
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let output = TreeDebug::new().format(&sample());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("window"));
        assert!(lines[1].starts_with("\u{251c}\u{2500}\u{2500} panel"));
        assert!(lines[3].starts_with("\u{2514}\u{2500}\u{2500} list"));
        assert!(output.contains("(Node)"));
    }

    #[test]
    fn test_tree_format_minimal() {
        let output = TreeDebug::with_options(TreeFormatOptions::minimal()).format(&sample());
        assert!(output.contains("button"));
        assert!(!output.contains("Node"));
        assert!(!output.contains('['));
    }

    #[test]
    fn test_tree_format_max_depth_and_properties() {
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            max_depth: Some(1),
            ..TreeFormatOptions::detailed()
        };
        let output = TreeDebug::with_options(options).format(&sample());

        assert!(!output.contains("button"));
        assert!(output.contains("+-- panel"));
        assert!(output.contains(".children = 2"));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
