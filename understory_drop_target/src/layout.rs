// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay positions for dropzones drawn outside their owner's subtree.
//!
//! Some hosts render dropzones in a single absolutely positioned overlay (a "portal") instead
//! of inline beneath each item. The overlay needs each target's rectangle expressed relative to
//! the scrolling container, and should only re-render when those rectangles actually move.

use alloc::vec::Vec;

use kurbo::{Rect, Vec2};

use crate::registry::GeometryRegistry;

/// Measure every registered target relative to `container`, accounting for `scroll`.
///
/// Each rectangle is translated so that `container`'s origin becomes `(0, 0)`, then offset by
/// the container's scroll position so content-space coordinates are returned. Targets without
/// current geometry are omitted.
pub fn measure_relative<K: Clone>(
    registry: &GeometryRegistry<K>,
    container: Rect,
    scroll: Vec2,
) -> Vec<(K, Rect)> {
    let offset = scroll - container.origin().to_vec2();
    registry
        .rects()
        .map(|(id, rect)| (id.clone(), rect + offset))
        .collect()
}

/// Last published overlay positions, with change detection.
#[derive(Clone, Debug)]
pub struct DropzoneLayout<K> {
    positions: Vec<(K, Rect)>,
}

impl<K> Default for DropzoneLayout<K> {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
        }
    }
}

impl<K: Clone + PartialEq> DropzoneLayout<K> {
    /// Create an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-measure the registry and publish the result if anything moved.
    ///
    /// Returns `true` when the set of targets or any rectangle differs from the previous
    /// snapshot. When it returns `false` the stored snapshot is left untouched, so hosts can skip
    /// re-rendering the overlay.
    pub fn refresh(&mut self, registry: &GeometryRegistry<K>, container: Rect, scroll: Vec2) -> bool {
        let next = measure_relative(registry, container, scroll);
        if !self.differs_from(&next) {
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(targets = next.len(), "dropzone overlay moved");
        self.positions = next;
        true
    }

    fn differs_from(&self, next: &[(K, Rect)]) -> bool {
        if next.len() != self.positions.len() {
            return true;
        }
        next.iter()
            .any(|(id, rect)| self.position_of(id) != Some(*rect))
    }

    /// The overlay rectangle of `id` from the last published snapshot.
    pub fn position_of(&self, id: &K) -> Option<Rect> {
        self.positions
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, rect)| *rect)
    }

    /// All published positions, in registration order.
    pub fn positions(&self) -> &[(K, Rect)] {
        &self.positions
    }

    /// Forget the published snapshot.
    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[test]
    fn positions_are_container_relative_with_scroll() {
        let mut registry = GeometryRegistry::new();
        registry.register(1_u32, Rect::new(110.0, 250.0, 210.0, 290.0));
        let container = Rect::new(100.0, 200.0, 400.0, 600.0);

        let measured = measure_relative(&registry, container, Vec2::new(0.0, 30.0));
        assert_eq!(measured, [(1, Rect::new(10.0, 80.0, 110.0, 120.0))]);
    }

    #[test]
    fn refresh_reports_only_real_changes() {
        let live = Rc::new(Cell::new(Some(Rect::new(0.0, 0.0, 50.0, 20.0))));
        let handle = live.clone();
        let mut registry = GeometryRegistry::new();
        registry.register("a", move || handle.get());
        registry.register("b", Rect::new(0.0, 40.0, 50.0, 60.0));

        let container = Rect::new(0.0, 0.0, 500.0, 500.0);
        let mut layout = DropzoneLayout::new();
        assert!(layout.refresh(&registry, container, Vec2::ZERO));
        assert!(!layout.refresh(&registry, container, Vec2::ZERO));

        live.set(Some(Rect::new(0.0, 5.0, 50.0, 25.0)));
        assert!(layout.refresh(&registry, container, Vec2::ZERO));
        assert_eq!(layout.position_of(&"a"), Some(Rect::new(0.0, 5.0, 50.0, 25.0)));

        // Unmounted geometry drops out of the overlay.
        live.set(None);
        assert!(layout.refresh(&registry, container, Vec2::ZERO));
        assert_eq!(layout.positions().len(), 1);
        assert_eq!(layout.position_of(&"a"), None);

        // Same count, different ids: "b" swapped for "c" at the same spot within one frame.
        live.set(Some(Rect::new(0.0, 5.0, 50.0, 25.0)));
        assert!(layout.refresh(&registry, container, Vec2::ZERO));
        assert!(registry.unregister(&"b"));
        registry.register("c", Rect::new(0.0, 40.0, 50.0, 60.0));
        assert!(layout.refresh(&registry, container, Vec2::ZERO));
        assert_eq!(layout.positions().len(), 2);
        assert_eq!(layout.position_of(&"b"), None);
        assert_eq!(layout.position_of(&"c"), Some(Rect::new(0.0, 40.0, 50.0, 60.0)));
    }

    #[test]
    fn scrolling_moves_every_position() {
        let mut registry = GeometryRegistry::new();
        registry.register(7_u8, Rect::new(0.0, 0.0, 10.0, 10.0));
        let container = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut layout = DropzoneLayout::new();
        layout.refresh(&registry, container, Vec2::ZERO);
        assert!(layout.refresh(&registry, container, Vec2::new(0.0, 12.0)));
        assert_eq!(layout.position_of(&7), Some(Rect::new(0.0, 12.0, 10.0, 22.0)));
    }
}
