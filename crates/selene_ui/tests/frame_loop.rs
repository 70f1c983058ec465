//! End-to-end frame loop tests.
//!
//! These drive a real scene the way a host loop would: build a tree, feed
//! per-frame input snapshots through the dispatcher, paint into a
//! recording renderer and assert on the observable results.
//!
//! Run with: cargo test --test frame_loop

use selene_core::{Rect, Vec2};
use selene_ui::widgets::{Button, Dropdown, Label, Panel, ScrollFrame};
use selene_ui::{
    render_root, Axis, CommandList, DrawCommand, Element, FrameInput, InputDispatcher,
    LayoutStrategy, ThemeRegistry,
};
use std::cell::Cell;
use std::rc::Rc;

fn frame(pointer: (f32, f32), pressed: bool) -> FrameInput {
    FrameInput::new(0.016).with_pointer(pointer, pressed)
}

#[test]
fn button_in_panel_full_click_lifecycle() {
    let clicks = Rc::new(Cell::new(0u32));
    let seen = Rc::clone(&clicks);

    let mut panel = Panel::new(Rect::new(100.0, 100.0, 300.0, 200.0));
    panel.add_child(Box::new(
        Button::new(Rect::new(20.0, 20.0, 120.0, 40.0), "Start")
            .with_callback(move || seen.set(seen.get() + 1)),
    ));

    let mut dispatcher = InputDispatcher::new();

    // The button occupies absolute [120, 240) x [120, 160).
    let over = (150.0, 140.0);
    let miss = (50.0, 50.0);

    dispatcher.update(&mut panel, &frame(miss, false));
    dispatcher.update(&mut panel, &frame(over, false));
    dispatcher.update(&mut panel, &frame(over, true));
    dispatcher.update(&mut panel, &frame(over, true));
    dispatcher.update(&mut panel, &frame(over, false));
    assert_eq!(clicks.get(), 1);

    // Press inside, drag out, release: nothing fires.
    dispatcher.update(&mut panel, &frame(over, true));
    dispatcher.update(&mut panel, &frame(miss, true));
    dispatcher.update(&mut panel, &frame(miss, false));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn theme_broadcast_reaches_nested_children() {
    let mut panel = Panel::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let mut inner = Panel::new(Rect::new(10.0, 10.0, 200.0, 100.0));
    inner.add_child(Box::new(Label::new(Vec2::new(5.0, 5.0), "deep")));
    panel.add_child(Box::new(inner));

    panel.update_theme("matrix");

    fn assert_subtree(element: &dyn Element, expected: &str) {
        assert_eq!(element.base().theme.as_deref(), Some(expected));
        for child in element.base().children() {
            assert_subtree(child.as_ref(), expected);
        }
    }
    assert_subtree(&panel, "matrix");

    // Unknown theme names still render: the registry falls back.
    panel.update_theme("not-a-theme");
    let themes = ThemeRegistry::new();
    let mut list = CommandList::new();
    render_root(&panel, &mut list, &themes);
    assert!(!list.is_empty());
}

#[test]
fn expanded_dropdown_paints_after_siblings() {
    let mut panel = Panel::new(Rect::new(0.0, 0.0, 400.0, 300.0));
    let options = (0..8).map(|i| format!("item {i}")).collect();
    panel.add_child(Box::new(Dropdown::new(
        Rect::new(20.0, 20.0, 120.0, 30.0),
        options,
    )));
    // Sibling added after the dropdown, covering the area its list
    // expands into.
    panel.add_child(Box::new(
        Panel::new(Rect::new(20.0, 60.0, 200.0, 100.0)).with_color(selene_core::Color::BLACK),
    ));

    let mut dispatcher = InputDispatcher::new();
    dispatcher.update(&mut panel, &frame((60.0, 30.0), true));
    dispatcher.update(&mut panel, &frame((60.0, 30.0), false));

    let themes = ThemeRegistry::new();
    let mut list = CommandList::new();
    render_root(&panel, &mut list, &themes);

    // The expanded list region: rows start at absolute y=50. Find the
    // last rect drawn that starts there; it must come after the sibling
    // panel's fill (the black rect at y=60).
    let sibling_index = list
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::Rect { rect, .. } if rect.y == 60.0))
        .expect("sibling panel fill recorded");
    let row_index = list
        .commands()
        .iter()
        .rposition(|c| matches!(c, DrawCommand::Rect { rect, .. } if rect.y == 50.0))
        .expect("dropdown list recorded");
    assert!(
        row_index > sibling_index,
        "dropdown list must draw above the sibling"
    );
}

#[test]
fn dropdown_window_stays_bounded_with_huge_option_count() {
    let options: Vec<String> = (0..100_000).map(|i| format!("entry {i}")).collect();
    let mut dd = Dropdown::new(Rect::new(0.0, 0.0, 160.0, 30.0), options).with_max_visible(6);

    let mut dispatcher = InputDispatcher::new();
    dispatcher.update(&mut dd, &frame((80.0, 15.0), true));
    dispatcher.update(&mut dd, &frame((80.0, 15.0), false));
    assert!(dd.is_expanded());

    dd.handle_scroll(-99_000.0);
    assert_eq!(dd.visible_range(), 99_000..99_006);

    let themes = ThemeRegistry::new();
    let mut list = CommandList::new();
    render_root(&dd, &mut list, &themes);

    // Six rows and six row labels, plus main box, backdrop, scrollbar and
    // borders: far under the option count.
    assert!(list.len() < 40, "recorded {} commands", list.len());
}

#[test]
fn scroll_frame_clips_children_to_viewport() {
    let mut sf = ScrollFrame::new(Rect::new(50.0, 50.0, 100.0, 100.0));
    let mut column = Panel::new(Rect::new(0.0, 0.0, 80.0, 400.0)).with_layout(
        LayoutStrategy::Linear {
            axis: Axis::Vertical,
            spacing: 10.0,
            cross_offset: 0.0,
        },
    );
    for i in 0..10 {
        column.add_child(Box::new(Label::new(Vec2::ZERO, format!("row {i}"))));
    }
    sf.add_child(Box::new(column));
    sf.set_scroll(Vec2::new(0.0, 120.0));

    let themes = ThemeRegistry::new();
    let mut list = CommandList::new();
    render_root(&sf, &mut list, &themes);

    // All child content is recorded between the clip push and pop, with
    // the clip equal to the viewport.
    let push = list
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::PushClip { rect } if *rect == Rect::new(50.0, 50.0, 100.0, 100.0)))
        .expect("viewport clip pushed");
    let pop = list
        .commands()
        .iter()
        .position(|c| matches!(c, DrawCommand::PopClip))
        .expect("viewport clip popped");
    let texts: Vec<usize> = list
        .commands()
        .iter()
        .enumerate()
        .filter(|(_, c)| matches!(c, DrawCommand::Text { .. }))
        .map(|(i, _)| i)
        .collect();
    assert!(!texts.is_empty());
    assert!(texts.iter().all(|&i| i > push && i < pop));

    // Scrolled by 120: the first row's text sits 120 above the viewport.
    let first_text_y = list.commands().iter().find_map(|c| match c {
        DrawCommand::Text { position, .. } => Some(position.y),
        _ => None,
    });
    assert_eq!(first_text_y, Some(-70.0));
}

#[test]
fn grid_layout_flows_into_scroll_frame() {
    let mut sf = ScrollFrame::new(Rect::new(0.0, 0.0, 200.0, 100.0));
    let params = selene_ui::GridParams::new(3, selene_core::Size::new(60.0, 40.0), 5.0, 5.0)
        .expect("valid grid");
    let mut grid =
        Panel::new(Rect::new(0.0, 0.0, 200.0, 300.0)).with_layout(LayoutStrategy::Grid(params));
    for i in 0..7 {
        grid.add_child(Box::new(Button::new(Rect::ZERO, format!("b{i}"))));
    }
    let grid_id = grid.id();
    sf.add_child(Box::new(grid));

    // Seventh cell: row 2, col 0.
    let sf_base = sf.base();
    let grid_ref = sf_base.child(grid_id).expect("grid child");
    let cell = grid_ref.base().children()[6].base();
    assert_eq!(cell.position(), Vec2::new(0.0, 90.0));
    assert_eq!(cell.size(), selene_core::Size::new(60.0, 40.0));
}
