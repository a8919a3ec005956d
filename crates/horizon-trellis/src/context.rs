//! The explicit UI context handed to widgets at construction.
//!
//! A [`UiContext`] bundles the style provider, the font metrics, the
//! toolkit configuration and the timer registry. Widgets take what they need from it when they are
//! created; nothing is looked up through process-wide state.

use std::fmt;
use std::sync::Arc;

use horizon_trellis_core::{TimerManager, ToolkitConfig};
use horizon_trellis_render::{FixedMetrics, FontMetrics};
use horizon_trellis_style::{Skin, Style};

/// Shared services for widget construction.
///
/// Cloning a context is cheap; all fields are reference counted.
///
/// # Example
///
/// ```
/// use horizon_trellis::UiContext;
/// use horizon_trellis::widgets::PushButton;
///
/// let ctx = UiContext::headless();
/// let button = PushButton::new(&ctx, "OK");
/// assert_eq!(button.text(), "OK");
/// ```
#[derive(Clone)]
pub struct UiContext {
    skin: Arc<Skin>,
    metrics: Arc<dyn FontMetrics>,
    config: Arc<ToolkitConfig>,
    timers: Arc<TimerManager>,
}

impl UiContext {
    /// Create a context from its parts.
    pub fn new(skin: Arc<Skin>, metrics: Arc<dyn FontMetrics>, config: ToolkitConfig) -> Self {
        Self {
            skin,
            metrics,
            config: Arc::new(config),
            timers: Arc::new(TimerManager::new()),
        }
    }

    /// A context with the light skin, fixed-advance metrics and default
    /// configuration. Suitable for tests and tooling.
    pub fn headless() -> Self {
        Self::new(
            Arc::new(Skin::light()),
            Arc::new(FixedMetrics::default()),
            ToolkitConfig::default(),
        )
    }

    /// Replace the skin used for widgets created from this context.
    pub fn with_skin(mut self, skin: Arc<Skin>) -> Self {
        self.skin = skin;
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ToolkitConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// The style provider.
    pub fn skin(&self) -> &Arc<Skin> {
        &self.skin
    }

    /// Font measurement.
    pub fn metrics(&self) -> &Arc<dyn FontMetrics> {
        &self.metrics
    }

    /// Toolkit configuration.
    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// The timers advanced by [`Ui::update`](crate::Ui::update).
    pub fn timers(&self) -> &Arc<TimerManager> {
        &self.timers
    }

    /// The shared style for a widget class.
    pub fn style_for(&self, class: &str) -> Arc<Style> {
        self.skin.style_for(class)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::headless()
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("skin", &self.skin.name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(UiContext: Send, Sync);
