//! ListView widget for displaying items from a model.
//!
//! A [`ListView`] shows one delegate per model row, stacked vertically in a
//! scrollable viewport with a vertical [`ScrollBar`] on the right edge. Row
//! appearance comes entirely from the [`ItemRenderer`]; the view only
//! positions the delegate widgets, tells them when their row is selected,
//! and turns presses into selection changes according to its
//! [`SelectionMode`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_trellis::UiContext;
//! use horizon_trellis::model::{ListModel, ModelIndex, SelectionMode};
//! use horizon_trellis::widgets::ListView;
//!
//! let ctx = UiContext::headless();
//! let model = Arc::new(ListModel::new(vec!["Apple", "Banana", "Cherry"]));
//!
//! let mut list = ListView::new(&ctx)
//!     .with_model(model.clone())
//!     .with_selection_mode(SelectionMode::Extended);
//!
//! list.double_clicked.connect(|index| println!("open row {}", index.row()));
//!
//! list.select_row(1).unwrap();
//! assert!(list.selection().contains(ModelIndex::new(1)));
//!
//! model.push("Damson");
//! assert_eq!(list.delegate_count(), 4);
//! ```
//!
//! # Model changes
//!
//! Every change notification from the model discards all delegates and
//! builds new ones. A notification that arrives while the view is busy
//! with its rows (for example, a renderer that edits the model) is
//! recorded and applied at the next layout pass.
//!
//! The selection is not pruned when the model shrinks. Indexes past the end
//! stay in the selection; they simply have no delegate to mark.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use horizon_trellis_core::logging::{span_names, targets};
use horizon_trellis_core::{ConnectionGuard, PerfSpan, Signal};
use horizon_trellis_render::{Point, Rect, Size};
use horizon_trellis_style::class;

use super::scroll_bar::{Orientation, ScrollBar};
use crate::context::UiContext;
use crate::model::{
    DefaultItemRenderer, ItemDelegate, ItemModel, ItemRenderer, ModelError, ModelIndex, Selection,
    SelectionMode, SelectionModel,
};
use crate::widget::{
    FocusPolicy, Key, KeyPressEvent, MouseButton, MouseDoubleClickEvent, MousePressEvent, PaintContext,
    SizeHint, SizePolicy, SizePolicyPair, WheelEvent, Widget, WidgetBase, WidgetEvent, paint_tree,
};

/// Delegates and the selection they currently show.
struct ListRows {
    model: Option<Arc<dyn ItemModel>>,
    renderer: Arc<dyn ItemRenderer>,
    delegates: Vec<Box<dyn ItemDelegate>>,
    /// The last selection applied to the delegates.
    selection: Selection,
}

impl ListRows {
    fn rebuild(&mut self) {
        let _span = PerfSpan::new(span_names::REBUILD);
        self.delegates.clear();
        let Some(model) = self.model.clone() else {
            return;
        };
        let rows = model.row_count();
        self.delegates.reserve(rows);
        for row in 0..rows {
            let index = ModelIndex::new(row);
            let mut delegate = self.renderer.create_delegate(index, model.as_ref());
            delegate.set_selected(self.selection.contains(index));
            self.delegates.push(delegate);
        }
        tracing::debug!(target: targets::WIDGET, rows, "list rebuilt");
    }

    fn apply_selection(&mut self, old: &Selection, new: &Selection) {
        for index in old.iter().filter(|index| !new.contains(*index)) {
            if let Some(delegate) = self.delegates.get_mut(index.row()) {
                delegate.set_selected(false);
            }
        }
        for index in new.iter().filter(|index| !old.contains(*index)) {
            if let Some(delegate) = self.delegates.get_mut(index.row()) {
                delegate.set_selected(true);
            }
        }
        self.selection = new.clone();
    }

    fn remark_all(&mut self, selection: &Selection) {
        for delegate in &mut self.delegates {
            let selected = selection.contains(delegate.index());
            delegate.set_selected(selected);
        }
        self.selection = selection.clone();
    }
}

/// State reachable from model and selection slots.
struct ListShared {
    rows: Mutex<ListRows>,
    rebuild_pending: AtomicBool,
    selection_pending: AtomicBool,
    layout_dirty: AtomicBool,
}

impl ListShared {
    fn on_model_changed(&self) {
        match self.rows.try_lock() {
            Some(mut rows) => {
                rows.rebuild();
                self.layout_dirty.store(true, Ordering::Release);
            }
            None => {
                tracing::debug!(target: targets::WIDGET, "model changed during row update, deferring rebuild");
                self.rebuild_pending.store(true, Ordering::Release);
            }
        }
    }

    fn on_selection_changed(&self, old: &Selection, new: &Selection) {
        match self.rows.try_lock() {
            Some(mut rows) => {
                rows.apply_selection(old, new);
                self.layout_dirty.store(true, Ordering::Release);
            }
            None => self.selection_pending.store(true, Ordering::Release),
        }
    }
}

/// A scrollable, selectable list of model rows.
///
/// # Signals
///
/// - `double_clicked(ModelIndex)`: a row was double-clicked
/// - `current_changed(Option<ModelIndex>)`: the keyboard cursor row changed
pub struct ListView {
    base: WidgetBase,
    selection: SelectionModel,
    selection_mode: SelectionMode,
    shared: Arc<ListShared>,
    scroll_bar: ScrollBar,
    scroll_offset: Arc<AtomicI32>,
    current: Option<ModelIndex>,
    row_spacing: f32,

    model_connection: Option<ConnectionGuard>,
    _selection_connection: ConnectionGuard,
    _scroll_connection: ConnectionGuard,

    /// Emitted with the row under the cursor on a double click.
    pub double_clicked: Signal<ModelIndex>,
    /// Emitted when the current row changes.
    pub current_changed: Signal<Option<ModelIndex>>,
}

impl ListView {
    /// Create an empty list view using the default renderer.
    pub fn new(ctx: &UiContext) -> Self {
        let mut base = WidgetBase::new(ctx, class::LIST_VIEW);
        base.set_focus_policy(FocusPolicy::StrongFocus);
        base.set_size_policy(SizePolicyPair::new(SizePolicy::Expanding, SizePolicy::Expanding));

        let shared = Arc::new(ListShared {
            rows: Mutex::new(ListRows {
                model: None,
                renderer: Arc::new(DefaultItemRenderer::new(ctx)),
                delegates: Vec::new(),
                selection: Selection::EMPTY,
            }),
            rebuild_pending: AtomicBool::new(false),
            selection_pending: AtomicBool::new(false),
            layout_dirty: AtomicBool::new(false),
        });

        let selection = SelectionModel::new();
        let weak: Weak<ListShared> = Arc::downgrade(&shared);
        let selection_connection = selection.selection_changed.connect_scoped(move |(old, new)| {
            if let Some(shared) = weak.upgrade() {
                shared.on_selection_changed(old, new);
            }
        });

        let mut scroll_bar = ScrollBar::new(ctx, Orientation::Vertical);
        scroll_bar.widget_base_mut().set_name("list scroll bar");
        let scroll_offset = Arc::new(AtomicI32::new(scroll_bar.value()));
        let offset = scroll_offset.clone();
        let scroll_connection = scroll_bar.value_changed.connect_scoped(move |value| {
            offset.store(*value, Ordering::Release);
        });

        Self {
            base,
            selection,
            selection_mode: SelectionMode::default(),
            shared,
            scroll_bar,
            scroll_offset,
            current: None,
            row_spacing: ctx.config().list_row_spacing,
            model_connection: None,
            _selection_connection: selection_connection,
            _scroll_connection: scroll_connection,
            double_clicked: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    /// Builder: show `model`.
    pub fn with_model(mut self, model: Arc<dyn ItemModel>) -> Self {
        self.set_model(model);
        self
    }

    /// Builder: create rows with `renderer`.
    pub fn with_renderer(mut self, renderer: impl ItemRenderer + 'static) -> Self {
        self.set_renderer(renderer);
        self
    }

    /// Builder: set the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.set_selection_mode(mode);
        self
    }

    // =========================================================================
    // Model and renderer
    // =========================================================================

    /// The model, if one is set.
    pub fn model(&self) -> Option<Arc<dyn ItemModel>> {
        self.shared.rows.lock().model.clone()
    }

    /// Show `model`, replacing any previous one.
    ///
    /// The selection is cleared and the rows are rebuilt.
    pub fn set_model(&mut self, model: Arc<dyn ItemModel>) {
        let weak = Arc::downgrade(&self.shared);
        // Dropping the old guard disconnects from the previous model.
        self.model_connection = Some(model.signals().changed.connect_scoped(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.on_model_changed();
            }
        }));

        self.shared.rows.lock().model = Some(model);
        self.selection.clear_selection();
        self.set_current(None);
        self.scroll_bar.set_value(0);
        self.shared.on_model_changed();
        self.base.invalidate_layout();
    }

    /// Create rows with `renderer` from now on. Existing rows are rebuilt.
    pub fn set_renderer(&mut self, renderer: impl ItemRenderer + 'static) {
        self.shared.rows.lock().renderer = Arc::new(renderer);
        self.shared.on_model_changed();
        self.base.invalidate_layout();
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// How presses change the selection.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Set how presses change the selection.
    ///
    /// Changing the mode clears the selection and the current row; setting
    /// the same mode again leaves both alone.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.selection_mode == mode {
            return;
        }
        tracing::debug!(target: targets::SELECTION, list = %self.base.id(), ?mode, "selection mode changed");
        self.selection_mode = mode;
        self.selection.clear_selection();
        self.set_current(None);
    }

    /// The selection model.
    pub fn selection_model(&self) -> &SelectionModel {
        &self.selection
    }

    /// The selection model, mutably. Changes are reflected in the rows.
    pub fn selection_model_mut(&mut self) -> &mut SelectionModel {
        &mut self.selection
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        self.selection.selection()
    }

    /// Replace the selection with `row` alone.
    pub fn select_row(&mut self, row: usize) -> Result<(), ModelError> {
        let index = self.checked_index(row)?;
        self.selection.replace(Some(index));
        self.set_current(Some(index));
        self.base.update();
        Ok(())
    }

    /// The row the keyboard cursor is on.
    pub fn current_index(&self) -> Option<ModelIndex> {
        self.current
    }

    fn set_current(&mut self, index: Option<ModelIndex>) {
        if self.current != index {
            self.current = index;
            self.current_changed.emit(index);
        }
    }

    fn checked_index(&self, row: usize) -> Result<ModelIndex, ModelError> {
        let rows = self.shared.rows.lock();
        let model = rows.model.as_ref().ok_or(ModelError::NoModel)?;
        model.index(row).ok_or(ModelError::RowOutOfRange {
            row,
            row_count: model.row_count(),
        })
    }

    fn row_count(&self) -> usize {
        self.shared.rows.lock().model.as_ref().map_or(0, |model| model.row_count())
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Apply model or selection changes that arrived while the rows were busy.
    fn sync(&self) {
        let rebuild = self.shared.rebuild_pending.swap(false, Ordering::AcqRel);
        let remark = self.shared.selection_pending.swap(false, Ordering::AcqRel);
        if !rebuild && !remark {
            return;
        }
        let mut rows = self.shared.rows.lock();
        if rebuild {
            rows.selection = self.selection.selection().clone();
            rows.rebuild();
        } else {
            rows.remark_all(self.selection.selection());
        }
        self.shared.layout_dirty.store(true, Ordering::Release);
    }

    /// Number of row delegates.
    pub fn delegate_count(&self) -> usize {
        self.sync();
        self.shared.rows.lock().delegates.len()
    }

    /// Whether the delegate for `row` shows the selected state.
    pub fn is_row_marked_selected(&self, row: usize) -> bool {
        self.sync();
        self.shared
            .rows
            .lock()
            .delegates
            .get(row)
            .is_some_and(|delegate| delegate.is_selected())
    }

    /// Geometry of the delegate for `row`, in content coordinates.
    pub fn row_rect(&self, row: usize) -> Option<Rect> {
        self.shared
            .rows
            .lock()
            .delegates
            .get(row)
            .map(|delegate| delegate.widget().geometry())
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    /// Vertical scroll offset in pixels.
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset.load(Ordering::Acquire)
    }

    /// The vertical scroll bar.
    pub fn scroll_bar(&self) -> &ScrollBar {
        &self.scroll_bar
    }

    /// Scroll to `offset` pixels, clamped to the scroll range.
    pub fn set_scroll_offset(&mut self, offset: i32) {
        self.scroll_bar.set_value(offset);
        self.base.update();
    }

    /// The area rows are shown in: the widget minus its border.
    pub fn viewport_rect(&self) -> Rect {
        let border = self.base.style().border_width;
        self.base.rect().inset(border, border, border, border)
    }

    /// Scroll so that `row` is fully visible, if it exists.
    pub fn ensure_visible(&mut self, row: usize) {
        let Some(rect) = self.row_rect(row) else {
            return;
        };
        let viewport = self.viewport_rect().height();
        let offset = self.scroll_offset() as f32;
        if rect.top() < offset {
            self.set_scroll_offset(rect.top().floor() as i32);
        } else if rect.bottom() > offset + viewport {
            self.set_scroll_offset((rect.bottom() - viewport).ceil() as i32);
        }
    }

    fn content_height(delegates: &[Box<dyn ItemDelegate>], spacing: f32) -> f32 {
        let rows: f32 = delegates
            .iter()
            .map(|delegate| delegate.widget().size_hint().preferred.height)
            .sum();
        rows + spacing * delegates.len().saturating_sub(1) as f32
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Index of the row under `point` (widget-local), or `None`.
    ///
    /// Rows are tested in list order and the first match wins.
    pub fn find_item_index_at(&self, point: Point) -> Option<ModelIndex> {
        self.sync();
        let viewport = self.viewport_rect();
        if !viewport.contains(point) {
            return None;
        }
        let content = Point::new(
            point.x - viewport.left(),
            point.y - viewport.top() + self.scroll_offset() as f32,
        );
        self.shared
            .rows
            .lock()
            .delegates
            .iter()
            .find(|delegate| delegate.widget().geometry().contains(content))
            .map(|delegate| delegate.index())
    }

    // =========================================================================
    // Input handling
    // =========================================================================

    fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let hit = self.find_item_index_at(event.local_pos);
        let ctrl = event.modifiers.control;

        match self.selection_mode {
            SelectionMode::None => return hit.is_some(),
            SelectionMode::Single => {
                if ctrl && hit.is_some_and(|index| self.selection.is_selected(index)) {
                    self.selection.clear_selection();
                } else {
                    self.selection.replace(hit);
                }
            }
            SelectionMode::Extended => match (ctrl, hit) {
                (true, Some(index)) => {
                    self.selection.toggle(index);
                }
                (true, None) => {}
                (false, _) => {
                    self.selection.replace(hit);
                }
            },
        }

        if hit.is_some() {
            self.set_current(hit);
        }
        self.base.update();
        true
    }

    fn handle_double_click(&mut self, event: &MouseDoubleClickEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        let Some(index) = self.find_item_index_at(event.local_pos) else {
            return false;
        };
        tracing::debug!(target: targets::WIDGET, list = %self.base.id(), row = index.row(), "double clicked");
        self.double_clicked.emit(index);
        true
    }

    fn handle_wheel(&mut self, event: &WheelEvent) -> bool {
        if !self.scroll_bar.is_visible() || event.delta_y == 0.0 {
            return false;
        }
        let delta = (event.delta_y * self.scroll_bar.wheel_step() as f32).round() as i32;
        let before = self.scroll_bar.value();
        self.set_scroll_offset(before - delta);
        self.scroll_bar.value() != before
    }

    fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if !self.selection_mode.allows_selection() {
            return false;
        }
        let count = self.row_count();
        if count == 0 {
            return false;
        }

        if event.key == Key::A && event.modifiers.control {
            if self.selection_mode != SelectionMode::Extended {
                return false;
            }
            self.selection
                .set_selection(Selection::from_indexes((0..count).map(ModelIndex::new)));
            self.base.update();
            return true;
        }

        let current = self
            .current
            .or_else(|| self.selection.selection().first())
            .map(|index| index.row().min(count - 1));
        let target = match event.key {
            Key::ArrowUp => current.map_or(0, |row| row.saturating_sub(1)),
            Key::ArrowDown => current.map_or(0, |row| (row + 1).min(count - 1)),
            Key::Home => 0,
            Key::End => count - 1,
            _ => return false,
        };

        let index = ModelIndex::new(target);
        self.selection.replace(Some(index));
        self.set_current(Some(index));
        self.ensure_visible(target);
        self.base.update();
        true
    }
}

impl Widget for ListView {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        let border = self.base.style().border_width * 2.0;
        let rows = self.shared.rows.lock();
        let width = rows
            .delegates
            .iter()
            .map(|delegate| delegate.widget().size_hint().preferred.width)
            .fold(0.0_f32, f32::max);
        let height = Self::content_height(&rows.delegates, self.row_spacing);
        SizeHint::new(Size::new(
            width + self.scroll_bar.thickness() + border,
            height + border,
        ))
        .with_minimum(Size::new(self.scroll_bar.thickness() * 3.0, self.scroll_bar.thickness() * 3.0))
    }

    fn layout(&mut self) {
        self.sync();
        let viewport = self.viewport_rect();
        let mut rows = self.shared.rows.lock();

        let content = Self::content_height(&rows.delegates, self.row_spacing);
        let range = (content - viewport.height()).ceil().max(0.0) as i32;

        let mut row_width = viewport.width();
        if range == 0 {
            self.scroll_bar.set_visible(false);
            self.scroll_bar.set_geometry(Rect::ZERO);
            self.scroll_bar.set_range(0, 0);
        } else {
            let thickness = self.scroll_bar.thickness().min(viewport.width());
            row_width -= thickness;
            self.scroll_bar.set_visible(true);
            self.scroll_bar.set_geometry(Rect::new(
                viewport.right() - thickness,
                viewport.top(),
                thickness,
                viewport.height(),
            ));
            self.scroll_bar.set_range(0, range);
            self.scroll_bar.set_page_step(viewport.height() as i32);
        }

        let mut y = 0.0;
        for delegate in rows.delegates.iter_mut() {
            let height = delegate.widget().size_hint().preferred.height;
            delegate.widget_mut().set_geometry(Rect::new(0.0, y, row_width, height));
            y += height + self.row_spacing;
        }
        drop(rows);

        tracing::trace!(target: targets::LAYOUT, list = %self.base.id(), content, range, "list laid out");
        self.shared.layout_dirty.store(false, Ordering::Release);
        self.base.update();
    }

    fn needs_layout(&self) -> bool {
        self.base.needs_layout()
            || self.shared.layout_dirty.load(Ordering::Acquire)
            || self.shared.rebuild_pending.load(Ordering::Acquire)
            || self.shared.selection_pending.load(Ordering::Acquire)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let style = self.base.style();
        ctx.draw_frame(style.background, style.border_color, style.border_width);

        let viewport = self.viewport_rect();
        let offset = self.scroll_offset() as f32;
        let visible = Rect::new(0.0, offset, viewport.width(), viewport.height());

        let (renderer, metrics) = ctx.split();
        renderer.save();
        renderer.clip_rect(viewport);
        renderer.translate(viewport.left(), viewport.top() - offset);
        let mut rows = self.shared.rows.lock();
        for delegate in rows.delegates.iter_mut() {
            if delegate.widget().geometry().intersect(&visible).is_some() {
                paint_tree(delegate.widget_mut(), &mut *renderer, metrics);
            }
        }
        drop(rows);
        renderer.restore();

        if self.base.has_focus() {
            ctx.draw_focus_indicator(1.0, style.focus_color);
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event {
            WidgetEvent::MousePress(e) => self.handle_mouse_press(e),
            WidgetEvent::DoubleClick(e) => self.handle_double_click(e),
            WidgetEvent::Wheel(e) => self.handle_wheel(e),
            WidgetEvent::KeyPress(e) => self.handle_key_press(e),
            _ => false,
        };
        if handled {
            event.accept();
        }
        handled
    }

    fn child_count(&self) -> usize {
        1
    }

    fn child_at(&self, index: usize) -> Option<&dyn Widget> {
        (index == 0).then_some(&self.scroll_bar as &dyn Widget)
    }

    fn child_at_mut(&mut self, index: usize) -> Option<&mut dyn Widget> {
        match index {
            0 => Some(&mut self.scroll_bar),
            _ => None,
        }
    }
}

static_assertions::assert_impl_all!(ListView: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListModel;
    use crate::widget::{KeyboardModifiers, layout_tree};
    use horizon_trellis_render::RecordingRenderer;
    use std::sync::atomic::AtomicUsize;

    fn names(rows: usize) -> Arc<ListModel<String>> {
        Arc::new(ListModel::new((0..rows).map(|i| format!("item {i}")).collect()))
    }

    fn setup(rows: usize, mode: SelectionMode) -> (ListView, Arc<ListModel<String>>) {
        let ctx = UiContext::headless();
        let model = names(rows);
        let mut list = ListView::new(&ctx)
            .with_model(model.clone())
            .with_selection_mode(mode);
        list.set_geometry(Rect::new(0.0, 0.0, 200.0, 400.0));
        layout_tree(&mut list);
        (list, model)
    }

    fn row_center(list: &ListView, row: usize) -> Point {
        let rect = list.row_rect(row).unwrap();
        let viewport = list.viewport_rect();
        Point::new(
            viewport.left() + rect.center().x,
            viewport.top() + rect.center().y - list.scroll_offset() as f32,
        )
    }

    fn press(list: &mut ListView, pos: Point, modifiers: KeyboardModifiers) -> bool {
        list.event(&mut WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            pos,
            pos,
            modifiers,
        )))
    }

    fn sel(rows: &[usize]) -> Selection {
        rows.iter().map(|row| ModelIndex::new(*row)).collect()
    }

    #[test]
    fn test_rows_follow_model() {
        let (list, model) = setup(5, SelectionMode::Single);
        assert_eq!(list.delegate_count(), 5);

        model.set_items(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(list.delegate_count(), 3);
        assert!(list.needs_layout());
    }

    #[test]
    fn test_single_press_replaces() {
        let (mut list, _model) = setup(4, SelectionMode::Single);
        let p = row_center(&list, 2);

        assert!(press(&mut list, p, KeyboardModifiers::NONE));
        assert_eq!(list.selection(), &sel(&[2]));
        assert!(list.is_row_marked_selected(2));

        assert!(press(&mut list, p, KeyboardModifiers::NONE));
        assert_eq!(list.selection(), &sel(&[2]));

        assert!(press(&mut list, p, KeyboardModifiers::CTRL));
        assert_eq!(list.selection(), &Selection::EMPTY);
        assert!(!list.is_row_marked_selected(2));
    }

    #[test]
    fn test_single_press_on_empty_space_clears() {
        let (mut list, _model) = setup(2, SelectionMode::Single);
        list.select_row(0).unwrap();

        press(&mut list, Point::new(50.0, 390.0), KeyboardModifiers::NONE);
        assert_eq!(list.selection(), &Selection::EMPTY);
    }

    #[test]
    fn test_extended_ctrl_toggles() {
        let (mut list, _model) = setup(4, SelectionMode::Extended);
        let a = row_center(&list, 0);
        let b = row_center(&list, 3);

        press(&mut list, a, KeyboardModifiers::NONE);
        press(&mut list, b, KeyboardModifiers::CTRL);
        assert_eq!(list.selection(), &sel(&[3, 0]));

        press(&mut list, a, KeyboardModifiers::CTRL);
        assert_eq!(list.selection(), &sel(&[3]));
        assert!(!list.is_row_marked_selected(0));
        assert!(list.is_row_marked_selected(3));

        press(&mut list, Point::new(50.0, 390.0), KeyboardModifiers::CTRL);
        assert_eq!(list.selection(), &sel(&[3]));
    }

    #[test]
    fn test_none_mode_never_selects() {
        let (mut list, _model) = setup(3, SelectionMode::None);
        let p = row_center(&list, 1);

        assert!(press(&mut list, p, KeyboardModifiers::NONE));
        assert!(list.selection().is_empty());
        assert!(!press(&mut list, Point::new(50.0, 390.0), KeyboardModifiers::NONE));
    }

    #[test]
    fn test_double_click_reports_row() {
        let (mut list, _model) = setup(3, SelectionMode::Single);
        let hits = Arc::new(Mutex::new(Vec::new()));
        let h = hits.clone();
        list.double_clicked.connect(move |index| h.lock().push(index.row()));

        let p = row_center(&list, 1);
        let mut event = WidgetEvent::DoubleClick(MouseDoubleClickEvent::new(
            MouseButton::Left,
            p,
            p,
            KeyboardModifiers::NONE,
        ));
        assert!(list.event(&mut event));
        assert_eq!(*hits.lock(), vec![1]);
        assert!(list.selection().is_empty());
    }

    #[test]
    fn test_select_row_validates() {
        let ctx = UiContext::headless();
        let mut empty = ListView::new(&ctx);
        assert_eq!(empty.select_row(0), Err(ModelError::NoModel));

        let (mut list, _model) = setup(2, SelectionMode::Single);
        assert_eq!(
            list.select_row(2),
            Err(ModelError::RowOutOfRange { row: 2, row_count: 2 })
        );
        assert!(list.select_row(1).is_ok());
        assert_eq!(list.current_index(), Some(ModelIndex::new(1)));
    }

    #[test]
    fn test_stale_selection_survives_shrink() {
        let (mut list, model) = setup(5, SelectionMode::Single);
        list.select_row(4).unwrap();

        model.remove(4);
        assert_eq!(list.delegate_count(), 4);
        assert_eq!(list.selection(), &sel(&[4]));
        assert!(!list.is_row_marked_selected(3));

        // Leaving the stale row must not touch any delegate.
        list.select_row(0).unwrap();
        assert!(list.is_row_marked_selected(0));
    }

    #[test]
    fn test_scroll_bar_hidden_when_content_fits() {
        let (list, _model) = setup(3, SelectionMode::Single);
        assert!(!list.scroll_bar().is_visible());
        assert_eq!(list.scroll_bar().range(), (0, 0));
        assert_eq!(list.scroll_bar().geometry(), Rect::ZERO);
    }

    #[test]
    fn test_scrolling_offsets_hit_testing() {
        let (mut list, _model) = setup(100, SelectionMode::Single);
        assert!(list.scroll_bar().is_visible());
        let (min, max) = list.scroll_bar().range();
        assert_eq!(min, 0);
        assert!(max > 0);

        let row_height = list.row_rect(0).unwrap().height();
        list.set_scroll_offset((row_height * 10.0) as i32);
        assert_eq!(list.scroll_offset(), (row_height * 10.0) as i32);

        let top = list.viewport_rect().top();
        let hit = list.find_item_index_at(Point::new(10.0, top + 1.0));
        assert_eq!(hit, Some(ModelIndex::new(10)));
    }

    #[test]
    fn test_wheel_scrolls_by_configured_step() {
        let (mut list, _model) = setup(100, SelectionMode::Single);
        let step = list.scroll_bar().wheel_step();
        let p = Point::new(10.0, 10.0);
        let mut event = WidgetEvent::Wheel(WheelEvent::new(p, p, 0.0, -1.0, KeyboardModifiers::NONE));
        assert!(list.event(&mut event));
        assert_eq!(list.scroll_offset(), step);
    }

    #[test]
    fn test_keyboard_navigation() {
        let (mut list, _model) = setup(100, SelectionMode::Extended);
        fn key(list: &mut ListView, key: Key, modifiers: KeyboardModifiers) -> bool {
            list.event(&mut WidgetEvent::KeyPress(KeyPressEvent::new(key, modifiers, "")))
        }

        assert!(key(&mut list, Key::ArrowDown, KeyboardModifiers::NONE));
        assert_eq!(list.selection(), &sel(&[0]));
        assert!(key(&mut list, Key::ArrowDown, KeyboardModifiers::NONE));
        assert_eq!(list.selection(), &sel(&[1]));

        assert!(key(&mut list, Key::End, KeyboardModifiers::NONE));
        assert_eq!(list.selection(), &sel(&[99]));
        assert_eq!(list.scroll_offset(), list.scroll_bar().maximum());

        assert!(key(&mut list, Key::A, KeyboardModifiers::CTRL));
        assert_eq!(list.selection().len(), 100);
    }

    #[test]
    fn test_deferred_rebuild_from_renderer() {
        let ctx = UiContext::headless();
        let model = names(2);
        let calls = Arc::new(AtomicUsize::new(0));

        let inner = DefaultItemRenderer::new(&ctx);
        let grow = model.clone();
        let counter = calls.clone();
        let renderer = move |index: ModelIndex, m: &dyn ItemModel| -> Box<dyn ItemDelegate> {
            // The first delegate built adds a row while the view is rebuilding.
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                grow.push("late".to_string());
            }
            inner.create_delegate(index, m)
        };

        let mut list = ListView::new(&ctx).with_renderer(renderer);
        list.set_model(model.clone());
        assert!(list.needs_layout());
        assert_eq!(list.delegate_count(), 3);
    }

    #[test]
    fn test_hit_testing_applies_deferred_rebuild() {
        let ctx = UiContext::headless();
        let model = names(2);
        let calls = Arc::new(AtomicUsize::new(0));

        let inner = DefaultItemRenderer::new(&ctx);
        let grow = model.clone();
        let counter = calls.clone();
        let renderer = move |index: ModelIndex, m: &dyn ItemModel| -> Box<dyn ItemDelegate> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                grow.push("late".to_string());
            }
            let mut delegate = inner.create_delegate(index, m);
            let top = index.row() as f32 * 20.0;
            delegate.widget_mut().set_geometry(Rect::new(0.0, top, 200.0, 20.0));
            delegate
        };

        let mut list = ListView::new(&ctx).with_renderer(renderer);
        list.set_geometry(Rect::new(0.0, 0.0, 200.0, 400.0));
        list.set_model(model.clone());

        // The third row only exists once the deferred rebuild is applied.
        let viewport = list.viewport_rect();
        let point = Point::new(viewport.left() + 10.0, viewport.top() + 50.0);
        assert_eq!(list.find_item_index_at(point), Some(ModelIndex::new(2)));
    }

    #[test]
    fn test_changing_selection_mode_clears_selection() {
        let (mut list, _model) = setup(3, SelectionMode::Extended);
        let p0 = row_center(&list, 0);
        press(&mut list, p0, KeyboardModifiers::NONE);
        let p2 = row_center(&list, 2);
        press(&mut list, p2, KeyboardModifiers::CTRL);
        assert_eq!(list.selection(), &sel(&[2, 0]));

        list.set_selection_mode(SelectionMode::Extended);
        assert_eq!(list.selection().len(), 2);

        list.set_selection_mode(SelectionMode::Single);
        assert!(list.selection().is_empty());
        assert_eq!(list.current_index(), None);
        assert!(!list.is_row_marked_selected(0));
        assert!(!list.is_row_marked_selected(2));
    }

    #[test]
    fn test_dropping_view_disconnects_model() {
        let ctx = UiContext::headless();
        let model = names(2);
        {
            let _list = ListView::new(&ctx).with_model(model.clone());
            assert_eq!(model.signals().changed.connection_count(), 1);
        }
        assert_eq!(model.signals().changed.connection_count(), 0);
    }

    #[test]
    fn test_paints_visible_rows_only() {
        let (mut list, _model) = setup(100, SelectionMode::Single);
        let ctx = UiContext::headless();
        let mut renderer = RecordingRenderer::new();
        crate::widget::paint_tree(&mut list, &mut renderer, ctx.metrics().as_ref());

        let texts = renderer.texts();
        assert!(texts.contains(&"item 0"));
        assert!(!texts.contains(&"item 99"));
    }
}
