//! Scenario drills: whole gesture sequences checked against the painted
//! canvas.

use std::cell::Cell;
use std::rc::Rc;

use super::engine::{EditMode, MenuEngine, RangeHint};
use super::item::{CommandOutcome, MenuItem, RangeAdjust, ToggleAction};
use super::render::SelectionStyle;
use super::tree::{MenuTree, TableId};
use crate::core::config::MenuConfig;
use crate::display::canvas::TextCanvas;

fn engine_with(tree: MenuTree, width: u16, config: &MenuConfig) -> MenuEngine<TextCanvas> {
    let mut engine = MenuEngine::new(tree, TextCanvas::new(width, 48), config).expect("engine");
    engine.draw_menu();
    engine.display_mut().reset_stats();
    engine
}

fn engine(tree: MenuTree) -> MenuEngine<TextCanvas> {
    engine_with(tree, 84, &MenuConfig::default())
}

fn row(engine: &MenuEngine<TextCanvas>, n: u16) -> String {
    engine.display().row_text(n).trim_end().to_string()
}

/// Range callback over a shared value; counts commits.
fn shared_range(
    value: &Rc<Cell<i16>>,
    commits: &Rc<Cell<u32>>,
) -> impl FnMut(RangeAdjust) -> i16 + use<> {
    let value = Rc::clone(value);
    let commits = Rc::clone(commits);
    move |adjust| {
        match adjust {
            RangeAdjust::Query => {}
            RangeAdjust::Step(delta) => value.set(value.get().saturating_add(delta)),
            RangeAdjust::Commit => commits.set(commits.get() + 1),
        }
        value.get()
    }
}

// ──────────────────── header, descent, back ────────────────────

#[test]
fn header_menu_descends_and_comes_back() {
    let hook_hits = Rc::new(Cell::new(0));
    let hits = Rc::clone(&hook_hits);

    let mut tree = MenuTree::new();
    let main = tree.reserve();
    let settings = tree.push_table(vec![MenuItem::back_with("Back", move |_| {
        hits.set(hits.get() + 1);
    })]);
    tree.set_items(
        main,
        vec![
            MenuItem::header("Main"),
            MenuItem::menu("Settings", settings),
            MenuItem::command("Save", |_| false),
            MenuItem::back("Exit"),
        ],
    );

    let mut menu = engine(tree);
    assert_eq!(menu.current_index(), 1);
    assert_eq!(menu.base_offset(), 1);
    assert_eq!(row(&menu, 0), "♦    Main    ♦");
    assert_eq!(row(&menu, 1), "►Settings    »");
    assert_eq!(row(&menu, 2), " Save");
    assert_eq!(row(&menu, 3), " Exit");

    menu.enter();
    assert_eq!(menu.current_table(), settings);
    assert_eq!(menu.current_index(), 0);
    assert_eq!(menu.scroll_offset(), 0);
    assert_eq!(menu.back_link(settings), Some(main));
    assert_eq!(row(&menu, 0), "►Back");

    menu.up();
    menu.enter();
    assert_eq!(hook_hits.get(), 1);
    assert_eq!(menu.current_table(), main);
    assert_eq!(menu.current_index(), 1);
    assert_eq!(row(&menu, 1), "►Settings    »");
}

#[test]
fn back_links_reach_any_depth() {
    let mut tree = MenuTree::new();
    let main = tree.reserve();
    let a = tree.reserve();
    let b = tree.push_table(vec![MenuItem::back("Up")]);
    tree.set_items(a, vec![MenuItem::menu("B", b), MenuItem::back("Up")]);
    tree.set_items(main, vec![MenuItem::menu("A", a), MenuItem::back("Exit")]);

    let mut menu = engine(tree);
    menu.enter();
    menu.enter();
    assert_eq!(menu.current_table(), b);

    menu.enter();
    assert_eq!(menu.current_table(), a);
    assert!(menu.return_stack().is_empty());
    menu.down();
    menu.enter();
    assert_eq!(menu.current_table(), main);
    assert_eq!(menu.current_index(), 0);
}

#[test]
fn back_link_follows_latest_parent() {
    let mut tree = MenuTree::new();
    let main = tree.reserve();
    let other = tree.reserve();
    let shared = tree.push_table(vec![MenuItem::back("Back")]);
    tree.set_items(other, vec![MenuItem::menu("Shared", shared), MenuItem::back("Up")]);
    tree.set_items(
        main,
        vec![
            MenuItem::menu("Shared", shared),
            MenuItem::menu("Other", other),
            MenuItem::back("Exit"),
        ],
    );

    let mut menu = engine(tree);
    menu.enter();
    menu.enter();
    assert_eq!(menu.current_table(), main);
    menu.down();
    menu.enter();
    menu.enter();
    assert_eq!(menu.current_table(), shared);
    menu.enter();
    assert_eq!(menu.current_table(), other);
}

// ──────────────────── commands and the return stack ────────────────────

fn three_levels() -> (MenuTree, TableId, TableId, TableId) {
    let mut tree = MenuTree::new();
    let main = tree.reserve();
    let a = tree.reserve();
    let b = tree.push_table(vec![
        MenuItem::command("Done", |_| CommandOutcome::Return),
        MenuItem::back("Up"),
    ]);
    tree.set_items(
        a,
        vec![
            MenuItem::menu("B", b),
            MenuItem::command("Done", |_| true),
            MenuItem::back("Up"),
        ],
    );
    tree.set_items(
        main,
        vec![
            MenuItem::command("Idle", |_| false),
            MenuItem::menu("A", a),
            MenuItem::back("Exit"),
        ],
    );
    (tree, main, a, b)
}

#[test]
fn single_level_return_by_default() {
    let (tree, _, a, b) = three_levels();
    let mut menu = engine(tree);
    menu.down();
    menu.enter();
    menu.enter();
    assert_eq!(menu.current_table(), b);
    assert_eq!(menu.return_stack().len(), 1);

    menu.enter();
    assert_eq!(menu.current_table(), a);
    assert_eq!(menu.current_index(), 0);

    menu.down();
    menu.enter();
    assert_eq!(menu.current_table(), a, "nothing left to return to");
}

#[test]
fn deeper_return_stack_unwinds_each_level() {
    let (tree, main, a, _) = three_levels();
    let mut config = MenuConfig::default();
    config.navigation.return_depth = 4;
    let mut menu = engine_with(tree, 84, &config);
    menu.down();
    menu.enter();
    menu.enter();
    menu.enter();
    assert_eq!(menu.current_table(), a);
    menu.down();
    menu.enter();
    assert_eq!(menu.current_table(), main);
    assert_eq!(menu.current_index(), 1);
}

// ──────────────────── range editing ────────────────────

fn volume_tree(value: &Rc<Cell<i16>>, commits: &Rc<Cell<u32>>) -> MenuTree {
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::range("Volume", shared_range(value, commits)).with_bounds(0, 100),
        MenuItem::back("Back"),
    ]);
    tree
}

#[test]
fn meter_changes_only_on_cell_boundaries() {
    let value = Rc::new(Cell::new(50));
    let commits = Rc::new(Cell::new(0));
    let mut menu = engine_with(volume_tree(&value, &commits), 72, &MenuConfig::default());
    assert_eq!(menu.geometry().box_columns, 10);

    menu.enter();
    assert!(matches!(
        menu.edit_mode(),
        EditMode::RangeEdit { meter_level: Some(5), .. }
    ));
    // The box starts 2px down, so its label shares cell row 0 with the
    // selection marker the box does not cover.
    assert_eq!(row(&menu, 0), "►  Volume");
    assert_eq!(row(&menu, 2), "     50");
    assert_eq!(row(&menu, 3), " ▄▄▄▄▄█████");

    menu.display_mut().reset_stats();
    menu.up();
    assert_eq!(value.get(), 51);
    assert_eq!(row(&menu, 2), "     51");
    assert_eq!(menu.display().touched_rows(), vec![2], "meter untouched");

    for _ in 0..8 {
        menu.up();
    }
    assert_eq!(value.get(), 59);
    assert_eq!(row(&menu, 3), " ▄▄▄▄▄█████");

    menu.display_mut().reset_stats();
    menu.up();
    assert_eq!(value.get(), 60);
    assert_eq!(row(&menu, 3), " ▄▄▄▄▄▄████");
    assert_eq!(menu.display().touched_rows(), vec![2, 3]);

    menu.down();
    menu.down();
    assert_eq!(value.get(), 58);
    assert_eq!(row(&menu, 3), " ▄▄▄▄▄█████");
}

#[test]
fn range_commit_returns_to_menu() {
    let value = Rc::new(Cell::new(50));
    let commits = Rc::new(Cell::new(0));
    let mut menu = engine(volume_tree(&value, &commits));
    menu.enter();
    let clears = menu.display().clears();
    menu.enter();
    assert_eq!(commits.get(), 1);
    assert_eq!(menu.edit_mode(), EditMode::Navigate);
    assert_eq!(menu.current_index(), 0);
    assert_eq!(menu.display().clears(), clears + 1);
    assert_eq!(row(&menu, 0), "►Volume");
}

#[test]
fn gesture_hints_supply_bounds_and_step() {
    let value = Rc::new(Cell::new(0));
    let commits = Rc::new(Cell::new(0));
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::range("Trim", shared_range(&value, &commits)),
        MenuItem::back("Back"),
    ]);
    let mut menu = engine_with(tree, 72, &MenuConfig::default());

    menu.enter();
    assert!(matches!(
        menu.edit_mode(),
        EditMode::RangeEdit { meter_level: None, bounds: None }
    ));
    menu.enter();

    menu.enter_with(RangeHint::bounds(0, 10));
    assert_eq!(row(&menu, 3), " ██████████");
    menu.up_with(RangeHint::step(3));
    assert_eq!(value.get(), 3);
    assert_eq!(row(&menu, 3), " ▄▄▄███████");
    menu.down();
    assert_eq!(value.get(), 2);
    assert_eq!(row(&menu, 3), " ▄▄████████");
}

#[test]
fn degenerate_bounds_draw_no_meter() {
    let value = Rc::new(Cell::new(7));
    let commits = Rc::new(Cell::new(0));
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::range("Fixed", shared_range(&value, &commits)).with_bounds(7, 7),
        MenuItem::back("Back"),
    ]);
    let mut menu = engine_with(tree, 72, &MenuConfig::default());
    menu.enter();
    assert_eq!(row(&menu, 3), "");
    assert_eq!(row(&menu, 2), "     7");
}

// ──────────────────── toggles ────────────────────

#[test]
fn toggle_redraws_only_its_row() {
    let state = Rc::new(Cell::new(false));
    let shared = Rc::clone(&state);
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::command("Save", |_| false),
        MenuItem::toggle("Wifi", move |action| {
            if action == ToggleAction::Flip {
                shared.set(!shared.get());
            }
            shared.get()
        }),
        MenuItem::back("Back"),
    ]);
    let mut menu = engine(tree);
    assert_eq!(row(&menu, 1), " Wifi        ○");
    menu.down();
    menu.display_mut().reset_stats();

    menu.enter();
    assert!(state.get());
    assert_eq!(menu.scroll_offset(), 0);
    assert_eq!(menu.display().clears(), 0);
    assert_eq!(menu.display().touched_rows(), vec![1]);
    assert_eq!(row(&menu, 1), "►Wifi        ●");
}

// ──────────────────── disabled items ────────────────────

#[test]
fn disabled_notice_blocks_until_dismissed() {
    let ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&ran);
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::command("Save", |_| false),
        MenuItem::command("Wipe", move |_| {
            flag.set(true);
            false
        })
        .disabled_with("Locked"),
        MenuItem::back("Back"),
    ]);
    let mut menu = engine(tree);
    menu.down();
    menu.display_mut().reset_stats();

    menu.enter();
    assert_eq!(menu.edit_mode(), EditMode::DisabledNotice);
    assert_eq!(menu.display().clears(), 0);
    assert_eq!(row(&menu, 2), "   Locked");
    assert!(!ran.get());

    menu.down();
    menu.up();
    assert_eq!(menu.current_index(), 1);

    menu.enter();
    assert_eq!(menu.edit_mode(), EditMode::Navigate);
    assert_eq!(menu.display().clears(), 1);
    assert_eq!(row(&menu, 1), "►Wipe");
    assert!(!ran.get());
}

#[test]
fn disabled_notice_falls_back_to_configured_text() {
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::unlinked_menu("Later").disabled(),
        MenuItem::back("Back"),
    ]);
    let mut config = MenuConfig::default();
    config.text.disabled = "Nope".to_string();
    let mut menu = engine_with(tree, 84, &config);
    menu.enter();
    assert_eq!(row(&menu, 2), "    Nope");
}

#[test]
fn disabled_notice_fits_single_line_box() {
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::command("Wipe", |_| false).disabled_with("Locked"),
        MenuItem::back("Back"),
    ]);
    let mut menu =
        MenuEngine::new(tree, TextCanvas::new(84, 20), &MenuConfig::default()).expect("engine");
    assert_eq!(menu.geometry().box_lines, 1);
    menu.draw_menu();
    menu.enter();
    assert_eq!(menu.edit_mode(), EditMode::DisabledNotice);
    assert!(menu.display().frame().contains("Locked"));
}

// ──────────────────── presentation ────────────────────

#[test]
fn inverted_selection_moves_with_cursor() {
    let mut tree = MenuTree::new();
    tree.push_table(vec![
        MenuItem::command("One", |_| false),
        MenuItem::command("Two", |_| false),
        MenuItem::back("Back"),
    ]);
    let mut menu = engine(tree);
    menu.set_selection_style(SelectionStyle::Inverted);
    menu.down();
    assert!(!menu.display().row_inverted(0));
    assert!(menu.display().row_inverted(1));
    assert_eq!(row(&menu, 1), " Two");
}

#[test]
fn long_tables_scroll_under_a_pinned_header() {
    let mut tree = MenuTree::new();
    let mut items = vec![MenuItem::header("List")];
    items.extend((1..=8).map(|i| MenuItem::command(format!("Entry {i}"), |_| false)));
    items.push(MenuItem::back("Back"));
    tree.push_table(items);
    let mut menu = engine(tree);

    for _ in 0..5 {
        menu.down();
    }
    assert_eq!(menu.current_index(), 6);
    assert_eq!(menu.scroll_offset(), 1);
    assert_eq!(row(&menu, 0), "♦    List    ♦");
    assert_eq!(row(&menu, 1), " Entry 2");
    assert_eq!(row(&menu, 5), "►Entry 6");

    for _ in 0..5 {
        menu.up();
    }
    assert_eq!(menu.current_index(), 1);
    assert_eq!(menu.scroll_offset(), 0);
    assert_eq!(row(&menu, 1), "►Entry 1");
}
