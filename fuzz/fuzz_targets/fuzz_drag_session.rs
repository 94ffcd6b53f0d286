#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sortkit_core::config::SortableConfig;
use sortkit_core::edge::Axis;
use sortkit_core::reorder::IndexPolicy;
use sortkit_dnd::monitor::DropMonitor;
use sortkit_dnd::session::DragController;
use sortkit_dnd::sortable::Sortable;
use sortkit_dnd::target::{ListGeometry, Position};

#[derive(Debug, Arbitrary)]
enum Input {
    Press(u16, u16),
    Motion(u16, u16),
    Release(u16, u16),
    Cancel,
    Relayout(Vec<u8>),
    Detach,
}

#[derive(Debug, Arbitrary)]
struct Script {
    len: u8,
    legacy: bool,
    horizontal: bool,
    threshold: u8,
    inputs: Vec<Input>,
}

fn key(x: &u16, _idx: usize) -> u16 {
    *x
}

fuzz_target!(|script: Script| {
    let len = usize::from(script.len % 32);
    let axis = if script.horizontal {
        Axis::Horizontal
    } else {
        Axis::Vertical
    };
    let config = SortableConfig {
        index_policy: if script.legacy {
            IndexPolicy::Legacy
        } else {
            IndexPolicy::Adjusted
        },
        axis,
        drag_threshold: u16::from(script.threshold % 8),
        ..SortableConfig::default()
    };

    let monitor = DropMonitor::new();
    let list = Sortable::new((0..len as u16).collect(), key as fn(&u16, usize) -> u16)
        .with_config(&config);
    let mut sub = Some(list.attach(&monitor));
    let mut ctl =
        DragController::new(ListGeometry::uniform(axis, 0, 2, len), monitor.clone()).with_config(&config);

    for input in script.inputs.iter().take(256) {
        let items = list.items();
        match input {
            Input::Press(x, y) => {
                if let Some(index) = ctl.press(Position::new(*x, *y)) {
                    assert!(index < ctl.geometry().len(), "press outside geometry");
                }
            }
            Input::Motion(x, y) => {
                if let Some(ind) = ctl.motion(Position::new(*x, *y), &items) {
                    assert!(ind.index < items.len(), "indicator past the end");
                }
            }
            Input::Release(x, y) => {
                ctl.release(Position::new(*x, *y), &items);
                assert!(!ctl.is_dragging(), "still dragging after release");
            }
            Input::Cancel => {
                ctl.cancel();
                assert!(!ctl.is_dragging(), "still dragging after cancel");
            }
            Input::Relayout(extents) => {
                let extents = extents.iter().take(64).map(|&e| u16::from(e % 6)).collect();
                ctl.set_geometry(ListGeometry::new(axis, 0, extents));
            }
            Input::Detach => {
                sub = None;
            }
        }

        // Post-conditions that must always hold:
        let mut now = list.items();
        now.sort_unstable();
        assert_eq!(now, (0..len as u16).collect::<Vec<_>>(), "items lost or duplicated");
        assert_eq!(monitor.listener_count(), usize::from(sub.is_some()));
    }
});
