// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waypoint list with satellite dropzones, activated by following the pointer.
//!
//! This example shows how to combine:
//! - `understory_drop_target` for lazily measured dropzone geometry and the portal overlay layout,
//! - `understory_drag_session` for frame-coalesced pointer tracking and the lane lock,
//! - `understory_reorder` for committing reorders of the main list.
//!
//! Frames are driven by hand with a `ManualScheduler`; a real host would call
//! `DragSession::on_frame` from its animation-frame callback. Set `RUST_LOG=trace` to see the
//! session's own events.
//!
//! Run:
//! - `cargo run -p understory_demos --example waypoint_dropzones`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_drag_session::{DragFlags, DragSession, DropzoneMode, ManualScheduler};
use understory_drop_target::{DropzoneLayout, GeometryRegistry};
use understory_reorder::{DragOutcome, Item, ItemCollection, ItemId, Location, apply_outcome};

const ROW_HEIGHT: f64 = 60.0;
const LIST_RIGHT: f64 = 300.0;
const ZONE_LEFT: f64 = 320.0;
const ZONE_RIGHT: f64 = 440.0;

fn waypoints() -> ItemCollection {
    let items = [
        ("waypoint-1", "Mistral Anchor", "Secure the relay"),
        ("waypoint-2", "Shatterline", "Hold the breach"),
        ("waypoint-3", "Ivory Canal", "Guard the convoy"),
        ("waypoint-4", "Obsidian Gate", "Seal the rift"),
        ("waypoint-5", "Sunken Loom", "Recover the cache"),
    ]
    .into_iter()
    .map(|(id, title, note)| Item::simple(id, title, note))
    .collect();
    match ItemCollection::new(items) {
        Ok(items) => items,
        Err(err) => panic!("seed data is invalid: {err}"),
    }
}

/// Register one dropzone per waypoint, to the right of its row.
///
/// Rectangles are computed on demand from the shared scroll offset, the way a host would read
/// live layout.
fn register_dropzones(
    registry: &mut GeometryRegistry<ItemId>,
    items: &ItemCollection,
    scroll: &Rc<Cell<f64>>,
) {
    registry.clear();
    for (row, item) in items.iter().enumerate() {
        let top = row as f64 * ROW_HEIGHT;
        let laid_out = Rect::new(ZONE_LEFT, top + 10.0, ZONE_RIGHT, top + ROW_HEIGHT - 10.0);
        let scroll = Rc::clone(scroll);
        registry.register(item.id().clone(), move || {
            Some(laid_out - Vec2::new(0.0, scroll.get()))
        });
    }
}

fn run_frames(session: &mut DragSession<ItemId, ManualScheduler>, registry: &GeometryRegistry<ItemId>) {
    for ticket in session.scheduler_mut().take_frames() {
        if let Some(change) = session.on_frame(ticket, registry) {
            println!("   target {:?} -> {:?}", change.previous, change.current);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut items = waypoints();
    let scroll = Rc::new(Cell::new(0.0));
    let mut registry = GeometryRegistry::new();
    register_dropzones(&mut registry, &items, &scroll);

    let mut session = DragSession::new(ManualScheduler::new());
    assert!(session.set_dropzone_mode(DropzoneMode::Portal));

    // Portal overlay: positions relative to the list container, published only on change.
    let container = Rect::new(0.0, 0.0, ZONE_RIGHT, 5.0 * ROW_HEIGHT);
    let mut layout = DropzoneLayout::new();
    let changed = layout.refresh(&registry, container, Vec2::new(0.0, scroll.get()));
    println!("overlay published: {changed}, {} zones", layout.positions().len());

    // Drag "waypoint-2" right, out of the main list and over "waypoint-4"'s dropzone.
    let dragged = ItemId::from("waypoint-2");
    session.set_root_right(Some(LIST_RIGHT));
    session.on_gesture_start(dragged.clone());
    // Mode switches are refused mid-drag.
    assert!(!session.set_dropzone_mode(DropzoneMode::Inline));

    println!("-- drag {dragged}");
    for x in [150.0, 250.0, 330.0, 360.0] {
        session.on_pointer_move(Point::new(x, 90.0));
    }
    // Four samples, one frame. Over its own dropzone: never a target.
    run_frames(&mut session, &registry);
    println!("   over own zone, drop disabled: {}", session.is_drop_disabled(&dragged));
    assert_eq!(session.active_target(), None);
    assert!(session.flags().contains(DragFlags::MAIN_LOCKED));

    // Scroll the list by one row; geometry is re-read on the next frame.
    scroll.set(ROW_HEIGHT);
    session.on_pointer_move(Point::new(360.0, 150.0));
    run_frames(&mut session, &registry);
    // Overlay positions are content-relative, so scrolling alone publishes nothing.
    let changed = layout.refresh(&registry, container, Vec2::new(0.0, scroll.get()));
    println!("   overlay changed by scroll: {changed}");
    assert_eq!(session.active_target(), Some(&ItemId::from("waypoint-4")));

    println!("   flags: {:?}", session.flags());
    let Some(ended) = session.on_gesture_end() else {
        unreachable!("a drag was in progress");
    };
    assert!(session.flags().is_empty());
    match ended.last_target {
        // Dropzone releases belong to the host; the collection does not change.
        Some(owner) => println!("-- released {} onto the dropzone of {owner}", ended.dragged),
        None => println!("-- released {} nowhere", ended.dragged),
    }

    // A plain reorder in the main list.
    let outcome = DragOutcome::new("waypoint-5", Location::top_level(4), Some(Location::top_level(1)));
    items = apply_outcome(&items, &outcome).into_owned();
    register_dropzones(&mut registry, &items, &scroll);
    let order: Vec<&str> = items.iter().map(|item| item.id().as_str()).collect();
    println!("-- reordered: {order:?}");
}
