// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dropzone activation from the gesture layer's own destination reports.
//!
//! Some gesture layers already know which droppable is under the dragged item. With
//! `TrackingPolicy::GestureUpdates` the session takes the active target from those reports
//! instead of hit-testing geometry: a `dropzone-<owner>` destination activates `<owner>`,
//! anything else clears it.
//!
//! Run:
//! - `cargo run -p understory_demos --example gesture_updates`

use understory_drag_session::{DragSession, ManualScheduler, SessionConfig, TrackingPolicy};
use understory_reorder::{DragOutcome, DroppableId, Item, ItemCollection, ItemId, apply_outcome};

fn main() {
    let items = ItemCollection::new(vec![
        Item::simple("waypoint-1", "Mistral Anchor", "Secure the relay"),
        Item::simple("waypoint-2", "Shatterline", "Hold the breach"),
        Item::simple("waypoint-3", "Ivory Canal", "Guard the convoy"),
    ]);
    let items = match items {
        Ok(items) => items,
        Err(err) => panic!("seed data is invalid: {err}"),
    };

    let config = SessionConfig::with_tracking(TrackingPolicy::GestureUpdates);
    let mut session: DragSession<ItemId, _> = DragSession::with_config(ManualScheduler::new(), config);
    session.on_gesture_start(ItemId::from("waypoint-1"));

    // What the gesture layer reports as the drag moves down the list.
    let reports = [
        Some("main"),
        Some("dropzone-waypoint-1"),
        Some("dropzone-waypoint-2"),
        Some("dropzone-waypoint-3"),
        None,
        Some("dropzone-waypoint-3"),
    ];
    for report in reports {
        let destination = report.map(str::parse::<DroppableId>).transpose();
        let owner = match destination {
            Ok(destination) => destination.as_ref().and_then(DroppableId::dropzone_owner).cloned(),
            Err(err) => {
                println!("   ignoring report: {err}");
                continue;
            }
        };
        session.on_gesture_update(owner);
        println!(
            "{:<22} active target: {:?}",
            report.unwrap_or("(nothing)"),
            session.active_target().map(ItemId::as_str),
        );
    }

    // Pointer frames are never scheduled under this policy.
    assert_eq!(session.scheduler_mut().pending(), 0);

    let Some(ended) = session.on_gesture_end() else {
        unreachable!("a drag was in progress");
    };
    println!("-- released {} onto {:?}", ended.dragged, ended.last_target);

    // The gesture layer's drop names the dropzone; the collection is left to the host.
    let outcome = DragOutcome::from_gesture(
        ended.dragged,
        (DroppableId::Main, 0),
        Some((DroppableId::Dropzone(ItemId::from("waypoint-3")), 0)),
    );
    if let Some(outcome) = outcome {
        let next = apply_outcome(&items, &outcome);
        assert_eq!(*next, items);
    }
}
