//! Property-based tests for navigation invariants.
//!
//! Arbitrary gesture sequences over arbitrary tables must keep the cursor on
//! a selectable item, the cursor inside the viewport, and the edit modes
//! well-behaved.

use proptest::prelude::*;

use super::engine::{EditMode, MenuEngine};
use super::item::{MenuItem, RangeAdjust};
use super::tree::MenuTree;
use crate::core::config::MenuConfig;
use crate::display::canvas::TextCanvas;

// ──────────────────── strategies ────────────────────

#[derive(Debug, Clone, Copy)]
enum Gesture {
    Down,
    Up,
    Enter,
}

fn arb_gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        3 => Just(Gesture::Down),
        3 => Just(Gesture::Up),
        1 => Just(Gesture::Enter),
    ]
}

#[derive(Debug, Clone, Copy)]
enum Filler {
    Command,
    Toggle,
    Range,
    Disabled,
}

fn arb_filler() -> impl Strategy<Value = Filler> {
    prop_oneof![
        Just(Filler::Command),
        Just(Filler::Toggle),
        Just(Filler::Range),
        Just(Filler::Disabled),
    ]
}

fn build_table(header: bool, fillers: &[Filler]) -> MenuTree {
    let mut items = Vec::with_capacity(fillers.len() + 2);
    if header {
        items.push(MenuItem::header("Title"));
    }
    for (i, filler) in fillers.iter().enumerate() {
        let label = format!("Row {i}");
        items.push(match filler {
            Filler::Command => MenuItem::command(label, |_| false),
            Filler::Toggle => {
                let mut on = false;
                MenuItem::toggle(label, move |action| {
                    if action == super::item::ToggleAction::Flip {
                        on = !on;
                    }
                    on
                })
            }
            Filler::Range => {
                let mut value = 0i16;
                MenuItem::range(label, move |adjust| {
                    if let RangeAdjust::Step(delta) = adjust {
                        value = value.saturating_add(delta).clamp(-10, 10);
                    }
                    value
                })
                .with_bounds(-10, 10)
            }
            Filler::Disabled => MenuItem::command(label, |_| false).disabled(),
        });
    }
    items.push(MenuItem::back("Back"));
    let mut tree = MenuTree::new();
    tree.push_table(items);
    tree
}

fn engine_for(tree: MenuTree, height: u16) -> MenuEngine<TextCanvas> {
    let mut engine = MenuEngine::new(tree, TextCanvas::new(84, height), &MenuConfig::default())
        .expect("usable geometry");
    engine.draw_menu();
    engine
}

fn apply(engine: &mut MenuEngine<TextCanvas>, gesture: Gesture) {
    match gesture {
        Gesture::Down => engine.down(),
        Gesture::Up => engine.up(),
        Gesture::Enter => engine.enter(),
    }
}

fn assert_viewport(engine: &MenuEngine<TextCanvas>) {
    let index = engine.current_index();
    let offset = engine.scroll_offset();
    let rows = engine.visible_rows();
    assert!(
        offset + engine.base_offset() <= index,
        "offset {offset} + base {} > index {index}",
        engine.base_offset()
    );
    assert!(index < offset + rows, "index {index} beyond offset {offset} + rows {rows}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn down_climbs_to_terminator_then_holds(
        header in any::<bool>(),
        fillers in prop::collection::vec(arb_filler(), 0..20),
        extra in 0usize..5,
    ) {
        let terminator = fillers.len() + usize::from(header);
        let mut engine = engine_for(build_table(header, &fillers), 48);
        let mut previous = engine.current_index();
        prop_assert_eq!(previous, usize::from(header));
        for _ in previous..terminator {
            engine.down();
            prop_assert!(engine.current_index() > previous);
            previous = engine.current_index();
        }
        prop_assert_eq!(engine.current_index(), terminator);
        for _ in 0..=extra {
            engine.down();
            prop_assert_eq!(engine.current_index(), terminator);
        }
    }

    #[test]
    fn up_never_reaches_header(
        header in any::<bool>(),
        fillers in prop::collection::vec(arb_filler(), 0..20),
        downs in 0usize..25,
        ups in 0usize..30,
    ) {
        let mut engine = engine_for(build_table(header, &fillers), 48);
        for _ in 0..downs {
            engine.down();
        }
        for _ in 0..ups {
            engine.up();
        }
        let floor = usize::from(header);
        prop_assert!(engine.current_index() >= floor);
        if ups >= downs + 1 {
            prop_assert_eq!(engine.current_index(), floor);
            prop_assert_eq!(engine.scroll_offset(), 0);
        }
    }

    #[test]
    fn viewport_holds_under_arbitrary_navigation(
        header in any::<bool>(),
        fillers in prop::collection::vec(arb_filler(), 0..30),
        height in prop_oneof![Just(16u16), Just(24), Just(48), Just(64)],
        gestures in prop::collection::vec(
            prop_oneof![Just(Gesture::Down), Just(Gesture::Up)],
            0..80,
        ),
    ) {
        let mut engine = engine_for(build_table(header, &fillers), height);
        assert_viewport(&engine);
        for gesture in gestures {
            apply(&mut engine, gesture);
            assert_viewport(&engine);
        }
    }

    #[test]
    fn random_gestures_never_panic(
        header in any::<bool>(),
        fillers in prop::collection::vec(arb_filler(), 0..15),
        gestures in prop::collection::vec(arb_gesture(), 0..120),
    ) {
        let mut engine = engine_for(build_table(header, &fillers), 48);
        for gesture in gestures {
            apply(&mut engine, gesture);
            if engine.edit_mode().is_navigating() {
                assert_viewport(&engine);
            }
        }
    }

    #[test]
    fn range_commit_keeps_cursor(
        before in 0usize..8,
        steps in prop::collection::vec(any::<bool>(), 0..30),
    ) {
        let fillers: Vec<Filler> = std::iter::repeat_n(Filler::Command, before)
            .chain(std::iter::once(Filler::Range))
            .collect();
        let mut engine = engine_for(build_table(false, &fillers), 48);
        for _ in 0..before {
            engine.down();
        }
        let index = engine.current_index();
        let offset = engine.scroll_offset();
        engine.enter();
        let entered_edit = matches!(engine.edit_mode(), EditMode::RangeEdit { .. });
        prop_assert!(entered_edit);
        for up in steps {
            if up { engine.up() } else { engine.down() }
            prop_assert_eq!(engine.current_index(), index);
        }
        engine.enter();
        prop_assert_eq!(engine.edit_mode(), EditMode::Navigate);
        prop_assert_eq!(engine.current_index(), index);
        prop_assert_eq!(engine.scroll_offset(), offset);
    }

    #[test]
    fn text_scale_changes_preserve_viewport(
        fillers in prop::collection::vec(arb_filler(), 1..25),
        downs in 0usize..25,
        scales in prop::collection::vec(0u8..5, 1..6),
    ) {
        let mut engine = engine_for(build_table(true, &fillers), 64);
        for _ in 0..downs {
            engine.down();
        }
        for scale in scales {
            engine.set_text_scale(scale);
            assert_viewport(&engine);
        }
    }
}
