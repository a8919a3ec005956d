//! Integration tests for list view selection, rebuilds and scrolling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use horizon_trellis::model::{ItemDelegate, ItemModel, ListModel, ModelIndex, Selection, SelectionMode};
use horizon_trellis::widget::{
    InputEvent, KeyboardModifiers, PaintContext, SizeHint, Widget, WidgetBase, layout_tree,
};
use horizon_trellis::widgets::ListView;
use horizon_trellis::{Ui, UiContext};
use horizon_trellis_render::{Point, Rect, Size};

/// A row widget with a fixed height.
struct FixedRow {
    base: WidgetBase,
    height: f32,
}

impl Widget for FixedRow {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::from_dimensions(80.0, self.height)
    }

    fn paint(&self, _ctx: &mut PaintContext<'_>) {}
}

struct FixedDelegate {
    index: ModelIndex,
    selected: bool,
    row: FixedRow,
}

impl ItemDelegate for FixedDelegate {
    fn index(&self) -> ModelIndex {
        self.index
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn widget(&self) -> &dyn Widget {
        &self.row
    }

    fn widget_mut(&mut self) -> &mut dyn Widget {
        &mut self.row
    }
}

fn model(rows: usize) -> Arc<ListModel<String>> {
    Arc::new(ListModel::new((0..rows).map(|i| format!("row {i}")).collect()))
}

/// A list whose rows are `row_height` tall and whose viewport is 200px high.
fn fixed_list(ctx: &UiContext, rows: usize, row_height: f32) -> (ListView, Arc<ListModel<String>>) {
    let model = model(rows);
    let row_ctx = ctx.clone();
    let renderer = move |index: ModelIndex, _model: &dyn ItemModel| -> Box<dyn ItemDelegate> {
        Box::new(FixedDelegate {
            index,
            selected: false,
            row: FixedRow {
                base: WidgetBase::new(&row_ctx, "FixedRow"),
                height: row_height,
            },
        })
    };
    let mut list = ListView::new(ctx).with_renderer(renderer).with_model(model.clone());
    let border = list.widget_base().style().border_width;
    list.set_geometry(Rect::new(0.0, 0.0, 240.0, 200.0 + 2.0 * border));
    layout_tree(&mut list);
    (list, model)
}

fn sel(rows: &[usize]) -> Selection {
    rows.iter().map(|row| ModelIndex::new(*row)).collect()
}

#[test]
fn test_single_mode_ctrl_press_on_selected_item_clears() {
    let ctx = UiContext::headless();
    let (mut list, _model) = fixed_list(&ctx, 6, 20.0);
    list.set_selection_mode(SelectionMode::Single);

    let p = row_point(&list, 2);
    press(&mut list, p, KeyboardModifiers::NONE);
    assert_eq!(list.selection(), &sel(&[2]));

    // Pressing again without ctrl keeps the same single-item selection.
    press(&mut list, p, KeyboardModifiers::NONE);
    assert_eq!(list.selection(), &sel(&[2]));

    press(&mut list, p, KeyboardModifiers::CTRL);
    assert_eq!(list.selection(), &Selection::EMPTY);
    assert!(!list.is_row_marked_selected(2));
}

#[test]
fn test_extended_mode_ctrl_press_prepends() {
    let ctx = UiContext::headless();
    let (list, _model) = fixed_list(&ctx, 6, 20.0);
    let mut list = list.with_selection_mode(SelectionMode::Extended);

    let a = row_point(&list, 1);
    let b = row_point(&list, 4);
    press(&mut list, a, KeyboardModifiers::NONE);
    press(&mut list, b, KeyboardModifiers::CTRL);

    assert_eq!(list.selection(), &sel(&[4, 1]));
    assert!(list.is_row_marked_selected(1));
    assert!(list.is_row_marked_selected(4));
}

#[test]
fn test_lists_default_to_extended_selection() {
    let ctx = UiContext::headless();
    let (list, _model) = fixed_list(&ctx, 3, 20.0);
    assert_eq!(list.selection_mode(), SelectionMode::Extended);
}

#[test]
fn test_switching_mode_drops_the_selection() {
    let ctx = UiContext::headless();
    let (list, _model) = fixed_list(&ctx, 3, 20.0);
    let mut list = list.with_selection_mode(SelectionMode::Extended);

    let first = row_point(&list, 0);
    let last = row_point(&list, 2);
    press(&mut list, first, KeyboardModifiers::NONE);
    press(&mut list, last, KeyboardModifiers::CTRL);
    assert_eq!(list.selection(), &sel(&[2, 0]));

    list.set_selection_mode(SelectionMode::Single);
    assert_eq!(list.selection(), &Selection::EMPTY);
    assert_eq!(list.current_index(), None);
    assert!(!list.is_row_marked_selected(0));
    assert!(!list.is_row_marked_selected(2));
}

#[test]
fn test_rebuild_replaces_every_delegate() {
    let ctx = UiContext::headless();
    let (list, model) = fixed_list(&ctx, 5, 20.0);
    assert_eq!(list.delegate_count(), 5);

    model.set_items(vec!["a".into(), "b".into(), "c".into()]);
    assert_eq!(list.delegate_count(), 3);
    assert_eq!(list.row_rect(3), None);
}

#[test]
fn test_scroll_range_tracks_content_height() {
    let ctx = UiContext::headless();

    // 5 rows of 100px in a 200px viewport.
    let (list, _model) = fixed_list(&ctx, 5, 100.0);
    assert_eq!(list.viewport_rect().height(), 200.0);
    assert!(list.scroll_bar().is_visible());
    assert_eq!(list.scroll_bar().range(), (0, 300));

    // 3 rows of 50px fit.
    let (list, _model) = fixed_list(&ctx, 3, 50.0);
    assert!(!list.scroll_bar().is_visible());
    assert_eq!(list.scroll_bar().range(), (0, 0));
    assert_eq!(list.scroll_bar().geometry(), Rect::ZERO);
}

#[test]
fn test_range_collapses_after_model_shrinks() {
    let ctx = UiContext::headless();
    let (mut list, model) = fixed_list(&ctx, 5, 100.0);
    list.set_scroll_offset(250);
    assert_eq!(list.scroll_offset(), 250);

    model.set_items(vec!["only".into()]);
    layout_tree(&mut list);
    assert_eq!(list.scroll_bar().range(), (0, 0));
    assert_eq!(list.scroll_offset(), 0);
}

#[test]
fn test_clicks_through_ui_select_rows() {
    let ctx = UiContext::headless();
    let (list, _model) = fixed_list(&ctx, 6, 20.0);
    let list = list.with_selection_mode(SelectionMode::Extended);

    let latest = Arc::new(Mutex::new(Selection::EMPTY));
    let sink = latest.clone();
    list.selection_model()
        .selection_changed
        .connect(move |(_, new)| *sink.lock() = new.clone());

    let mut ui = Ui::new(ctx, list);
    ui.resize(Size::new(240.0, 202.0));

    // Clicks a second apart never form a double click.
    let mut clock = Instant::now();
    let mut click = |ui: &mut Ui, row: usize, modifiers: KeyboardModifiers| {
        clock += Duration::from_secs(1);
        let y = 1.0 + row as f32 * 20.0 + 10.0;
        let result = ui.dispatch_at(InputEvent::press_with(50.0, y, modifiers), clock);
        ui.dispatch_at(InputEvent::release(50.0, y), clock);
        result
    };

    assert!(click(&mut ui, 0, KeyboardModifiers::NONE).was_handled());
    click(&mut ui, 3, KeyboardModifiers::CTRL);
    click(&mut ui, 5, KeyboardModifiers::CTRL);
    assert_eq!(*latest.lock(), sel(&[5, 3, 0]));

    click(&mut ui, 3, KeyboardModifiers::CTRL);
    assert_eq!(*latest.lock(), sel(&[5, 0]));

    // The list took focus on the first click.
    assert_eq!(ui.focused(), Some(ui.root().id()));
}

#[test]
fn test_double_click_through_ui_reports_row() {
    let ctx = UiContext::headless();
    let (list, _model) = fixed_list(&ctx, 6, 20.0);

    let opened = Arc::new(Mutex::new(Vec::new()));
    let sink = opened.clone();
    list.double_clicked.connect(move |index| sink.lock().push(index.row()));

    let mut ui = Ui::new(ctx, list);
    ui.resize(Size::new(240.0, 202.0));

    let start = Instant::now();
    let y = 1.0 + 2.0 * 20.0 + 10.0;
    ui.dispatch_at(InputEvent::press(50.0, y), start);
    ui.dispatch_at(InputEvent::release(50.0, y), start);
    let later = start + Duration::from_millis(100);
    assert!(ui.dispatch_at(InputEvent::press(50.0, y), later).was_handled());
    ui.dispatch_at(InputEvent::release(50.0, y), later);

    assert_eq!(*opened.lock(), vec![2]);
}

fn row_point(list: &ListView, row: usize) -> Point {
    let rect = list.row_rect(row).expect("row exists");
    let viewport = list.viewport_rect();
    Point::new(viewport.left() + rect.center().x, viewport.top() + rect.center().y)
}

fn press(list: &mut ListView, pos: Point, modifiers: KeyboardModifiers) {
    use horizon_trellis::widget::{MouseButton, MousePressEvent, WidgetEvent};
    list.event(&mut WidgetEvent::MousePress(MousePressEvent::new(
        MouseButton::Left,
        pos,
        pos,
        modifiers,
    )));
}
