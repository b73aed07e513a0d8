// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer → drop target resolution.
//!
//! ## Algorithm
//!
//! - Walk the [`GeometryRegistry`] in registration order.
//! - Skip the excluded identifier and any target without current geometry.
//! - Expand each rectangle by `margin_fraction` of its width and height, half on each side.
//! - Return the first candidate whose expanded rectangle contains the pointer (edges inclusive).
//!
//! Resolution has no memory. A pointer outside every candidate resolves to `None`, and callers
//! must clear any previously active target when that happens.

use kurbo::{Point, Rect};

use crate::registry::GeometryRegistry;

/// Configuration for [`Resolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolverConfig {
    /// Fraction of a target's width and height added around it for hit testing.
    ///
    /// Half of the expansion is applied on each side, so `0.25` on a 40px tall target adds 5px
    /// above and 5px below. Makes small or thin targets easier to hit. Negative and non-finite
    /// values are treated as `0.0`.
    pub margin_fraction: f64,
}

impl ResolverConfig {
    /// Default margin: 25% of each dimension.
    pub const DEFAULT_MARGIN_FRACTION: f64 = 0.25;

    /// Configuration with an explicit margin fraction.
    pub fn with_margin(margin_fraction: f64) -> Self {
        Self { margin_fraction }
    }

    /// Configuration that tests against unexpanded rectangles.
    pub fn exact() -> Self {
        Self::with_margin(0.0)
    }

    /// The margin fraction actually applied, after sanitizing.
    pub fn effective_margin(&self) -> f64 {
        sanitize_margin(self.margin_fraction)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::with_margin(Self::DEFAULT_MARGIN_FRACTION)
    }
}

fn sanitize_margin(margin_fraction: f64) -> f64 {
    if margin_fraction.is_finite() && margin_fraction > 0.0 {
        margin_fraction
    } else {
        0.0
    }
}

/// Expand `rect` symmetrically by `margin_fraction` of its size.
///
/// The rectangle is normalized first, so inverted inputs behave like their positive
/// counterparts.
///
/// ```
/// use kurbo::Rect;
/// use understory_drop_target::expand_rect;
///
/// let r = expand_rect(Rect::new(0.0, 0.0, 100.0, 40.0), 0.25);
/// assert_eq!(r, Rect::new(-12.5, -5.0, 112.5, 45.0));
/// ```
pub fn expand_rect(rect: Rect, margin_fraction: f64) -> Rect {
    let rect = rect.abs();
    let margin = sanitize_margin(margin_fraction);
    rect.inflate(rect.width() * margin * 0.5, rect.height() * margin * 0.5)
}

/// Axis-aligned containment with inclusive edges.
///
/// Unlike [`Rect::contains`], points on the right and bottom edges are inside. NaN coordinates
/// are never contained.
pub fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}

/// Resolves the single active drop target for a pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: ResolverConfig) {
        self.config = config;
    }

    /// Find the first registered target whose margin-expanded rectangle contains `pointer`.
    ///
    /// `exclude` is the dragged item's own target, if it exposes one; it is never returned.
    pub fn resolve<K>(
        &self,
        registry: &GeometryRegistry<K>,
        pointer: Point,
        exclude: Option<&K>,
    ) -> Option<K>
    where
        K: PartialEq + Clone,
    {
        let margin = self.config.effective_margin();
        registry
            .rects()
            .filter(|(id, _)| exclude != Some(*id))
            .find(|(_, rect)| contains_inclusive(expand_rect(*rect, margin), pointer))
            .map(|(id, _)| id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rows() -> GeometryRegistry<u32> {
        let mut registry = GeometryRegistry::new();
        registry.register(1, Rect::new(0.0, 0.0, 100.0, 40.0));
        registry.register(2, Rect::new(0.0, 60.0, 100.0, 100.0));
        registry
    }

    #[test]
    fn point_inside_resolves() {
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve(&two_rows(), Point::new(10.0, 10.0), None), Some(1));
        assert_eq!(resolver.resolve(&two_rows(), Point::new(10.0, 90.0), None), Some(2));
    }

    #[test]
    fn margin_extends_hit_area() {
        let registry = two_rows();
        let point = Point::new(50.0, 44.0);
        assert_eq!(Resolver::default().resolve(&registry, point, None), Some(1));
        assert_eq!(Resolver::new(ResolverConfig::exact()).resolve(&registry, point, None), None);
    }

    #[test]
    fn edges_are_inclusive() {
        let resolver = Resolver::new(ResolverConfig::exact());
        assert_eq!(resolver.resolve(&two_rows(), Point::new(100.0, 40.0), None), Some(1));
        assert_eq!(resolver.resolve(&two_rows(), Point::new(100.01, 40.0), None), None);
    }

    #[test]
    fn outside_everything_is_none() {
        let resolver = Resolver::default();
        assert_eq!(resolver.resolve(&two_rows(), Point::new(500.0, 500.0), None), None);
        assert_eq!(resolver.resolve(&two_rows(), Point::new(f64::NAN, 10.0), None), None);
    }

    #[test]
    fn excluded_target_is_skipped() {
        let resolver = Resolver::default();
        let registry = two_rows();
        assert_eq!(resolver.resolve(&registry, Point::new(10.0, 10.0), Some(&1)), None);
        assert_eq!(resolver.resolve(&registry, Point::new(10.0, 90.0), Some(&1)), Some(2));
    }

    #[test]
    fn first_registered_wins_overlap() {
        let mut registry = GeometryRegistry::new();
        registry.register("first", Rect::new(0.0, 0.0, 50.0, 50.0));
        registry.register("second", Rect::new(0.0, 0.0, 100.0, 100.0));
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&registry, Point::new(25.0, 25.0), None),
            Some("first")
        );
        // Excluding the winner falls through to the next candidate.
        assert_eq!(
            resolver.resolve(&registry, Point::new(25.0, 25.0), Some(&"first")),
            Some("second")
        );
    }

    #[test]
    fn missing_geometry_is_skipped() {
        let mut registry = GeometryRegistry::new();
        registry.register(1_u32, || None::<Rect>);
        registry.register(2_u32, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(Resolver::default().resolve(&registry, Point::new(5.0, 5.0), None), Some(2));
    }

    #[test]
    fn bad_margins_are_sanitized() {
        assert_eq!(ResolverConfig::with_margin(-1.0).effective_margin(), 0.0);
        assert_eq!(ResolverConfig::with_margin(f64::NAN).effective_margin(), 0.0);
        assert_eq!(ResolverConfig::with_margin(f64::INFINITY).effective_margin(), 0.0);
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(expand_rect(r, -0.5), r);
    }

    #[test]
    fn inverted_rect_is_normalized() {
        let r = expand_rect(Rect::new(10.0, 10.0, 0.0, 0.0), 0.0);
        assert!(contains_inclusive(r, Point::new(5.0, 5.0)));
    }
}
