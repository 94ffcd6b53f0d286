#![forbid(unsafe_code)]

//! End-to-end drop lifecycle: pointer input through a [`DragController`],
//! fan-out on a shared [`DropMonitor`], and reordering in [`Sortable`] lists.

use std::sync::{Arc, Mutex};

use sortkit_core::config::SortableConfig;
use sortkit_core::edge::{Axis, Edge};
use sortkit_core::reorder::IndexPolicy;
use sortkit_dnd::event::DropEvent;
use sortkit_dnd::monitor::DropMonitor;
use sortkit_dnd::session::{DragController, DropIndicator, ReleaseOutcome};
use sortkit_dnd::sortable::Sortable;
use sortkit_dnd::target::{ListGeometry, Position};

#[derive(Debug, Clone, PartialEq)]
struct Task {
    id: u32,
    title: String,
}

type Column = Sortable<Task, fn(&Task, usize) -> u32>;

fn task(id: u32) -> Task {
    Task {
        id,
        title: format!("task #{id}"),
    }
}

fn task_key(t: &Task, _idx: usize) -> u32 {
    t.id
}

fn column(ids: &[u32]) -> Column {
    Sortable::new(
        ids.iter().copied().map(task).collect(),
        task_key as fn(&Task, usize) -> u32,
    )
}

fn ids(items: &[Task]) -> Vec<u32> {
    items.iter().map(|t| t.id).collect()
}

/// Rows of height 2 starting at y = 0.
fn rows(count: usize) -> ListGeometry {
    ListGeometry::uniform(Axis::Vertical, 0, 2, count)
}

/// Press, drag, and release along the list axis.
fn drag(ctl: &mut DragController<Task>, list: &Column, from_y: u16, to_y: u16) -> ReleaseOutcome {
    let items = list.items();
    ctl.press(Position::new(0, from_y));
    ctl.motion(Position::new(0, to_y), &items);
    ctl.release(Position::new(0, to_y), &items)
}

// ═══════════════════════════════════════════════════════════════════════════
// Single list
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn drags_reorder_attached_list() {
    let monitor = DropMonitor::new();
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&snapshots);
    let list = column(&[1, 2, 3, 4]).on_change(move |items: &[Task]| {
        sink.lock().unwrap().push(ids(items));
    });
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(4), monitor.clone());

    // Task 1 onto the lower half of task 3.
    let outcome = drag(&mut ctl, &list, 0, 5);
    assert_eq!(
        outcome,
        ReleaseOutcome::Dropped {
            notified: 1,
            on_target: true
        }
    );
    assert_eq!(ids(&list.items()), [2, 3, 1, 4]);

    // Task 4 onto the upper half of the first row, resolved against the new order.
    drag(&mut ctl, &list, 6, 0);
    assert_eq!(ids(&list.items()), [4, 2, 3, 1]);

    assert_eq!(
        *snapshots.lock().unwrap(),
        vec![vec![2, 3, 1, 4], vec![4, 2, 3, 1]]
    );
}

#[test]
fn indicator_tracks_hover_during_drag() {
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3]);
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(3), monitor);
    let items = list.items();

    ctl.press(Position::new(0, 0));
    assert_eq!(
        ctl.motion(Position::new(0, 3), &items),
        Some(DropIndicator {
            index: 1,
            edge: Edge::After
        })
    );
    // Back over the dragged item: no indicator.
    assert_eq!(ctl.motion(Position::new(0, 1), &items), None);
    assert!(ctl.is_dragging());
}

#[test]
fn click_and_cancel_leave_order_alone() {
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3]);
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(3), monitor);

    assert_eq!(drag(&mut ctl, &list, 0, 1), ReleaseOutcome::Click { index: 0 });

    let items = list.items();
    ctl.press(Position::new(0, 0));
    ctl.motion(Position::new(0, 5), &items);
    assert!(ctl.cancel());
    assert_eq!(ctl.release(Position::new(0, 5), &items), ReleaseOutcome::Idle);

    assert_eq!(ids(&list.items()), [1, 2, 3]);
}

#[test]
fn drop_outside_list_is_a_no_op() {
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3]);
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(3), monitor);

    let outcome = drag(&mut ctl, &list, 0, 40);
    assert_eq!(
        outcome,
        ReleaseOutcome::Dropped {
            notified: 1,
            on_target: false
        }
    );
    assert_eq!(ids(&list.items()), [1, 2, 3]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Shared monitor
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sibling_lists_ignore_foreign_items() {
    let monitor = DropMonitor::new();
    let todo = column(&[1, 2, 3, 4]);
    let done = column(&[10, 11]);
    let _todo_sub = todo.attach(&monitor);
    let _done_sub = done.attach(&monitor);
    let mut ctl = DragController::new(rows(4), monitor.clone());

    let outcome = drag(&mut ctl, &todo, 0, 5);
    assert_eq!(
        outcome,
        ReleaseOutcome::Dropped {
            notified: 2,
            on_target: true
        }
    );
    assert_eq!(ids(&todo.items()), [2, 3, 1, 4]);
    assert_eq!(ids(&done.items()), [10, 11]);
}

#[test]
fn detached_list_stops_reordering() {
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3]);
    {
        let _sub = list.attach(&monitor);
        monitor.dispatch(&DropEvent::onto(task(3), task(1), Edge::Before));
        assert_eq!(monitor.listener_count(), 1);
    }
    assert_eq!(monitor.listener_count(), 0);
    assert_eq!(ids(&list.items()), [3, 1, 2]);

    let mut ctl = DragController::new(rows(3), monitor);
    let outcome = drag(&mut ctl, &list, 0, 5);
    assert_eq!(
        outcome,
        ReleaseOutcome::Dropped {
            notified: 0,
            on_target: true
        }
    );
    assert_eq!(ids(&list.items()), [3, 1, 2]);
}

#[test]
fn subscription_survives_panicking_owner() {
    let monitor = DropMonitor::new();
    let list = column(&[1, 2]);
    let attach_then_panic = {
        let monitor = monitor.clone();
        let list = list.clone();
        move || {
            let _sub = list.attach(&monitor);
            panic!("owner torn down");
        }
    };
    assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(attach_then_panic)).is_err());
    assert_eq!(monitor.listener_count(), 0);
    assert_eq!(monitor.dispatch(&DropEvent::onto(task(2), task(1), Edge::Before)), 0);
    assert_eq!(ids(&list.items()), [1, 2]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn legacy_policy_overshoots_forward_after_drops() {
    let config = SortableConfig {
        index_policy: IndexPolicy::Legacy,
        ..SortableConfig::default()
    };
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3, 4]).with_config(&config);
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(4), monitor).with_config(&config);

    drag(&mut ctl, &list, 0, 5);
    assert_eq!(ids(&list.items()), [2, 3, 4, 1]);
}

#[test]
fn configured_threshold_gates_drag_start() {
    let config = SortableConfig {
        drag_threshold: 6,
        ..SortableConfig::default()
    };
    let monitor = DropMonitor::new();
    let list = column(&[1, 2, 3, 4]);
    let _sub = list.attach(&monitor);
    let mut ctl = DragController::new(rows(4), monitor).with_config(&config);

    assert_eq!(drag(&mut ctl, &list, 0, 5), ReleaseOutcome::Click { index: 0 });
    assert_eq!(ids(&list.items()), [1, 2, 3, 4]);

    drag(&mut ctl, &list, 0, 7);
    assert_eq!(ids(&list.items()), [2, 3, 4, 1]);
}
