// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry registry: logical target identifiers mapped to live rectangle sources.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Rect;
use smallvec::SmallVec;

/// A live view of a drop target's rendered rectangle.
///
/// Implementations are queried on every resolution pass and must not assume the rectangle is
/// stable between calls. Returning `None` means the target has no geometry right now (for
/// example, its element was unmounted mid-drag); the target is skipped for that pass.
///
/// Implemented for:
/// - [`Rect`], a fixed rectangle (handy in tests and for static layouts).
/// - Closures `Fn() -> Option<Rect>`, typically capturing a handle to the host's element.
pub trait RectSource {
    /// Current bounding rectangle in the host's pointer coordinate space.
    fn current_rect(&self) -> Option<Rect>;
}

impl RectSource for Rect {
    fn current_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl<F> RectSource for F
where
    F: Fn() -> Option<Rect>,
{
    fn current_rect(&self) -> Option<Rect> {
        self()
    }
}

struct Entry<K> {
    id: K,
    source: Box<dyn RectSource>,
}

/// Mapping from target identifier to its [`RectSource`], in registration order.
///
/// The registry is an explicit object owned by the drag surface and passed by reference to the
/// [`Resolver`](crate::Resolver); it is not a global. Mount and unmount of targets may race in
/// host frameworks, so both [`register`](Self::register) and
/// [`unregister`](Self::unregister) are idempotent.
///
/// Re-registering an identifier replaces its source but keeps its original position, which is
/// what determines tie-breaking between overlapping targets.
pub struct GeometryRegistry<K> {
    entries: SmallVec<[Entry<K>; 8]>,
}

impl<K: fmt::Debug> fmt::Debug for GeometryRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryRegistry")
            .field("ids", &self.entries.iter().map(|e| &e.id).collect::<SmallVec<[&K; 8]>>())
            .finish_non_exhaustive()
    }
}

impl<K> Default for GeometryRegistry<K> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<K> GeometryRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered targets, including ones currently without geometry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registered identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|e| &e.id)
    }

    /// Identifiers paired with their current rectangle, in registration order.
    ///
    /// Rectangles are read now; targets whose source reports no geometry are skipped.
    pub fn rects(&self) -> impl Iterator<Item = (&K, Rect)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.source.current_rect().map(|rect| (&e.id, rect)))
    }
}

impl<K: PartialEq> GeometryRegistry<K> {
    /// Associate `id` with a live rectangle source.
    ///
    /// Returns `true` if `id` was newly registered, `false` if an existing registration was
    /// replaced in place.
    pub fn register(&mut self, id: K, source: impl RectSource + 'static) -> bool {
        let source: Box<dyn RectSource> = Box::new(source);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.source = source;
            return false;
        }
        self.entries.push(Entry { id, source });
        #[cfg(feature = "tracing")]
        tracing::trace!(targets = self.entries.len(), "drop target registered");
        true
    }

    /// Remove the registration for `id`.
    ///
    /// Unregistering an identifier that is not present is a no-op and returns `false`.
    pub fn unregister(&mut self, id: &K) -> bool {
        let Some(pos) = self.entries.iter().position(|e| e.id == *id) else {
            return false;
        };
        self.entries.remove(pos);
        #[cfg(feature = "tracing")]
        tracing::trace!(targets = self.entries.len(), "drop target unregistered");
        true
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.iter().any(|e| e.id == *id)
    }

    /// The current rectangle of `id`, read from its source now.
    ///
    /// Returns `None` if `id` is not registered or its source has no geometry.
    pub fn current_rect(&self, id: &K) -> Option<Rect> {
        self.entries
            .iter()
            .find(|e| e.id == *id)
            .and_then(|e| e.source.current_rect())
    }
}
