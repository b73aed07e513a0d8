// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested containers: reorder, move across levels, and demote a container.
//!
//! This example drives `understory_reorder` the way a gesture layer would, with
//! `(droppable, index)` pairs named by strings, and prints the list after each drop.
//!
//! Run:
//! - `cargo run -p understory_demos --example nested_containers`

use std::borrow::Cow;

use understory_reorder::{DragOutcome, DroppableId, Item, ItemCollection, ItemData, apply_outcome};

fn seed() -> ItemCollection {
    let items = vec![
        Item::container(
            "container-1",
            "Waypoint Alpha",
            "Container with nested items",
            vec![
                ItemData::new("nested-1", "Sub-task A", "First nested item"),
                ItemData::new("nested-2", "Sub-task B", "Second nested item"),
            ],
        ),
        Item::simple("simple-1", "Waypoint Beta", "Simple item - no nesting"),
        Item::container(
            "container-2",
            "Waypoint Gamma",
            "Another container",
            vec![ItemData::new("nested-3", "Sub-task C", "Third nested item")],
        ),
        Item::simple("simple-2", "Waypoint Delta", "Another simple item"),
        Item::container("container-3", "Waypoint Epsilon", "Empty container", vec![]),
    ];
    match ItemCollection::new(items) {
        Ok(items) => items,
        Err(err) => panic!("seed data is invalid: {err}"),
    }
}

fn print(items: &ItemCollection) {
    for item in items {
        let marker = if item.is_container() { "▣" } else { "□" };
        println!("  {marker} {} ({})", item.data().title, item.id());
        for child in item.children() {
            println!("      · {} ({})", child.title, child.id);
        }
    }
}

/// One drop as the gesture layer reports it.
fn release(
    items: ItemCollection,
    dragged: &str,
    source: (&str, usize),
    destination: Option<(&str, usize)>,
) -> ItemCollection {
    let parse = |(droppable, index): (&str, usize)| match droppable.parse::<DroppableId>() {
        Ok(id) => (id, index),
        Err(err) => panic!("bad droppable: {err}"),
    };
    let Some(outcome) =
        DragOutcome::from_gesture(dragged, parse(source), destination.map(parse))
    else {
        println!("-- {dragged}: dropzones are not drag sources");
        return items;
    };
    let next = match apply_outcome(&items, &outcome) {
        Cow::Borrowed(_) => None,
        Cow::Owned(next) => Some(next),
    };
    match next {
        None => {
            println!("-- {dragged}: no change");
            items
        }
        Some(next) => {
            println!("-- {dragged}: {source:?} -> {destination:?}");
            print(&next);
            next
        }
    }
}

fn main() {
    let mut items = seed();
    println!("initial:");
    print(&items);

    // Same-level reorder.
    items = release(items, "simple-2", ("main", 3), Some(("main", 0)));
    // Nested child out to the top level.
    items = release(items, "nested-2", ("nested-container-1", 1), Some(("main", 2)));
    // Simple item into a container.
    items = release(items, "simple-1", ("main", 3), Some(("nested-container-3", 0)));
    // Container into another container: demoted, "nested-1" goes with it.
    items = release(items, "container-1", ("main", 1), Some(("nested-container-2", 1)));
    // Released outside every list.
    items = release(items, "container-2", ("main", 2), None);
    // Onto a satellite dropzone: owned by the host, not the collection.
    items = release(items, "simple-2", ("main", 0), Some(("dropzone-container-3", 0)));

    assert!(items.locate("nested-1").is_none());
    println!("final: {} top-level items", items.len());
}
