// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session state machine.
//!
//! ## Transitions
//!
//! - `Idle → Dragging` on [`DragSession::on_gesture_start`]: records the dragged id, clears the
//!   active target, and starts the pointer tracker.
//! - `Dragging → Dragging` on every resolution pass ([`DragSession::on_frame`] or
//!   [`DragSession::on_gesture_update`]): sets or clears the active target.
//! - `Dragging → Idle` on [`DragSession::on_gesture_end`]: stops the tracker and clears
//!   everything, whether or not the gesture produced a destination.
//!
//! Any other event is ignored: a second start while dragging, an end while idle, or a frame
//! that arrives after the drag ended.

use core::fmt;

use kurbo::Point;
use understory_drop_target::{GeometryRegistry, Resolver};

use crate::config::{DropzoneMode, SessionConfig, TrackingPolicy};
use crate::scheduler::{FrameScheduler, FrameTicket};
use crate::tracker::PointerTracker;

bitflags::bitflags! {
    /// Derived flags for the rendering layer.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct DragFlags: u8 {
        /// A drag is in progress.
        const DRAGGING       = 0b0000_0001;
        /// The pointer is over a drop target (an active target is set).
        const TARGET_ENTERED = 0b0000_0010;
        /// The pointer is beyond the main list's right edge; the main list refuses drops.
        const MAIN_LOCKED    = 0b0000_0100;
    }
}

/// Current phase of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragPhase<K> {
    /// No drag in progress.
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Identifier of the item being dragged.
        dragged: K,
        /// Drop target currently containing the pointer, if any.
        active_target: Option<K>,
    },
}

#[expect(
    clippy::derivable_impls,
    reason = "deriving would require `K: Default`, which item identifiers need not implement"
)]
impl<K> Default for DragPhase<K> {
    fn default() -> Self {
        Self::Idle
    }
}

/// Reported when a resolution pass changes the active target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetChange<K> {
    /// Target before this pass.
    pub previous: Option<K>,
    /// Target after this pass.
    pub current: Option<K>,
}

/// Summary of a drag that just ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd<K> {
    /// Identifier of the item that was dragged.
    pub dragged: K,
    /// Active target at the moment the gesture ended.
    pub last_target: Option<K>,
}

/// Drag session: phase, pointer tracker, and derived flags.
///
/// ## Usage
///
/// - Forward the gesture layer's callbacks to [`on_gesture_start`](Self::on_gesture_start),
///   [`on_gesture_update`](Self::on_gesture_update), and [`on_gesture_end`](Self::on_gesture_end).
/// - Forward raw pointer samples to [`on_pointer_move`](Self::on_pointer_move).
/// - When the scheduler fires, call [`on_frame`](Self::on_frame) with the ticket and the live
///   [`GeometryRegistry`].
/// - Render from [`flags`](Self::flags) and [`active_target`](Self::active_target).
pub struct DragSession<K, S: FrameScheduler> {
    phase: DragPhase<K>,
    tracker: PointerTracker<S>,
    resolver: Resolver,
    config: SessionConfig,
    root_right: Option<f64>,
    pointer_x: Option<f64>,
}

impl<K: fmt::Debug, S: FrameScheduler> fmt::Debug for DragSession<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("phase", &self.phase)
            .field("tracker", &self.tracker)
            .field("config", &self.config)
            .field("root_right", &self.root_right)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + PartialEq + fmt::Debug, S: FrameScheduler> DragSession<K, S> {
    /// Create an idle session with the default configuration.
    pub fn new(scheduler: S) -> Self {
        Self::with_config(scheduler, SessionConfig::default())
    }

    /// Create an idle session with an explicit configuration.
    pub fn with_config(scheduler: S, config: SessionConfig) -> Self {
        Self {
            phase: DragPhase::Idle,
            tracker: PointerTracker::new(scheduler),
            resolver: Resolver::new(config.resolver),
            config,
            root_right: None,
            pointer_x: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Switch dropzone presentation.
    ///
    /// Refused (returns `false`) while a drag is in progress.
    pub fn set_dropzone_mode(&mut self, mode: DropzoneMode) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.config.dropzone_mode = mode;
        true
    }

    /// Record the main list's right edge for the lane lock. `None` disables the lock.
    ///
    /// Hosts re-read this on drag start and on resize.
    pub fn set_root_right(&mut self, right: Option<f64>) {
        self.root_right = right;
    }

    /// Gesture layer: a drag started on `dragged`.
    ///
    /// Returns `false` and changes nothing if a drag is already in progress.
    pub fn on_gesture_start(&mut self, dragged: K) -> bool {
        if self.is_dragging() {
            #[cfg(feature = "tracing")]
            tracing::debug!(?dragged, "ignoring gesture start while dragging");
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?dragged, "gesture start");
        self.phase = DragPhase::Dragging {
            dragged,
            active_target: None,
        };
        self.pointer_x = None;
        if self.config.tracking == TrackingPolicy::PointerFollow {
            self.tracker.start();
        }
        true
    }

    /// Raw pointer sample during a drag.
    ///
    /// Updates the lane lock immediately; under [`TrackingPolicy::PointerFollow`] also feeds the
    /// tracker, which requests at most one frame. Ignored while idle.
    pub fn on_pointer_move(&mut self, point: Point) {
        if !self.is_dragging() {
            return;
        }
        self.pointer_x = Some(point.x);
        self.tracker.sample(point);
    }

    /// Scheduler callback: resolve the active target from the latest pointer sample.
    ///
    /// Returns the change, if the active target differs from before. Stale tickets and frames
    /// delivered while idle are ignored.
    pub fn on_frame(
        &mut self,
        ticket: FrameTicket,
        registry: &GeometryRegistry<K>,
    ) -> Option<TargetChange<K>> {
        let point = self.tracker.take_frame(ticket)?;
        let next = match &self.phase {
            DragPhase::Dragging { dragged, .. } => {
                self.resolver.resolve(registry, point, Some(dragged))
            }
            DragPhase::Idle => return None,
        };
        self.set_active_target(next)
    }

    /// Gesture layer: the destination under the drag changed.
    ///
    /// `destination` is the owner of the satellite dropzone the gesture layer reports, or `None`
    /// when it reports no dropzone (main list, nested list, or nothing). Only honoured under
    /// [`TrackingPolicy::GestureUpdates`]; the dragged item's own dropzone is never activated.
    pub fn on_gesture_update(&mut self, destination: Option<K>) -> Option<TargetChange<K>> {
        if self.config.tracking != TrackingPolicy::GestureUpdates {
            return None;
        }
        let next = match &self.phase {
            DragPhase::Dragging { dragged, .. } => destination.filter(|d| d != dragged),
            DragPhase::Idle => return None,
        };
        self.set_active_target(next)
    }

    /// Gesture layer: the drag ended (dropped or cancelled).
    ///
    /// Always returns the session to idle. Returns `None` if no drag was in progress.
    pub fn on_gesture_end(&mut self) -> Option<DragEnd<K>> {
        let DragPhase::Dragging {
            dragged,
            active_target,
        } = core::mem::take(&mut self.phase)
        else {
            #[cfg(feature = "tracing")]
            tracing::debug!("ignoring gesture end while idle");
            return None;
        };
        self.tracker.stop();
        self.pointer_x = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(?dragged, ?active_target, "gesture end");
        Some(DragEnd {
            dragged,
            last_target: active_target,
        })
    }

    fn set_active_target(&mut self, next: Option<K>) -> Option<TargetChange<K>> {
        let DragPhase::Dragging { active_target, .. } = &mut self.phase else {
            return None;
        };
        if *active_target == next {
            return None;
        }
        let previous = core::mem::replace(active_target, next.clone());
        #[cfg(feature = "tracing")]
        tracing::trace!(?previous, current = ?next, "active target changed");
        Some(TargetChange {
            previous,
            current: next,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> &DragPhase<K> {
        &self.phase
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The item being dragged.
    pub fn dragged(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Dragging { dragged, .. } => Some(dragged),
            DragPhase::Idle => None,
        }
    }

    /// The drop target currently containing the pointer.
    pub fn active_target(&self) -> Option<&K> {
        match &self.phase {
            DragPhase::Dragging { active_target, .. } => active_target.as_ref(),
            DragPhase::Idle => None,
        }
    }

    /// Whether `target` should refuse drops right now: it is the dragged item's own target.
    pub fn is_drop_disabled(&self, target: &K) -> bool {
        self.dragged() == Some(target)
    }

    /// Whether the pointer is past the main list's right edge during a drag.
    pub fn is_beyond_root(&self) -> bool {
        match (self.pointer_x, self.root_right) {
            (Some(x), Some(right)) => self.is_dragging() && x > right,
            _ => false,
        }
    }

    /// Derived rendering flags.
    pub fn flags(&self) -> DragFlags {
        let mut flags = DragFlags::empty();
        flags.set(DragFlags::DRAGGING, self.is_dragging());
        flags.set(DragFlags::TARGET_ENTERED, self.active_target().is_some());
        flags.set(DragFlags::MAIN_LOCKED, self.is_beyond_root());
        flags
    }

    /// The pointer tracker.
    pub fn tracker(&self) -> &PointerTracker<S> {
        &self.tracker
    }

    /// Mutable access to the scheduler, for hosts that drain it directly.
    pub fn scheduler_mut(&mut self) -> &mut S {
        self.tracker.scheduler_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualScheduler;
    use kurbo::Rect;

    fn registry() -> GeometryRegistry<u32> {
        let mut registry = GeometryRegistry::new();
        registry.register(1, Rect::new(0.0, 0.0, 100.0, 40.0));
        registry.register(2, Rect::new(0.0, 60.0, 100.0, 100.0));
        registry
    }

    fn run_frames(session: &mut DragSession<u32, ManualScheduler>, registry: &GeometryRegistry<u32>) {
        for ticket in session.scheduler_mut().take_frames() {
            session.on_frame(ticket, registry);
        }
    }

    #[test]
    fn start_update_end_cycle() {
        let registry = registry();
        let mut session = DragSession::new(ManualScheduler::new());
        assert!(session.on_gesture_start(1));
        assert_eq!(session.flags(), DragFlags::DRAGGING);
        assert!(session.tracker().is_active());

        session.on_pointer_move(Point::new(50.0, 80.0));
        let ticket = session.scheduler_mut().next_frame().unwrap();
        let change = session.on_frame(ticket, &registry);
        assert_eq!(
            change,
            Some(TargetChange {
                previous: None,
                current: Some(2)
            })
        );
        assert_eq!(session.flags(), DragFlags::DRAGGING | DragFlags::TARGET_ENTERED);

        let end = session.on_gesture_end();
        assert_eq!(
            end,
            Some(DragEnd {
                dragged: 1,
                last_target: Some(2)
            })
        );
        assert_eq!(session.phase(), &DragPhase::Idle);
        assert!(!session.tracker().is_active());
    }

    #[test]
    fn leaving_a_target_clears_it() {
        let registry = registry();
        let mut session = DragSession::new(ManualScheduler::new());
        session.on_gesture_start(1);
        session.on_pointer_move(Point::new(50.0, 80.0));
        run_frames(&mut session, &registry);
        assert_eq!(session.active_target(), Some(&2));

        session.on_pointer_move(Point::new(500.0, 500.0));
        run_frames(&mut session, &registry);
        assert_eq!(session.active_target(), None);
        assert!(!session.flags().contains(DragFlags::TARGET_ENTERED));
    }

    #[test]
    fn dragged_item_never_targets_itself() {
        let registry = registry();
        let mut session = DragSession::new(ManualScheduler::new());
        session.on_gesture_start(2);
        session.on_pointer_move(Point::new(50.0, 80.0));
        run_frames(&mut session, &registry);
        assert_eq!(session.active_target(), None);
        assert!(session.is_drop_disabled(&2));
        assert!(!session.is_drop_disabled(&1));
    }

    #[test]
    fn end_before_frame_discards_stale_sample() {
        let registry = registry();
        let mut session = DragSession::new(ManualScheduler::ignoring_cancel());
        session.on_gesture_start(1);
        session.on_pointer_move(Point::new(50.0, 80.0));
        session.on_gesture_end();

        // A new drag starts before the old callback fires.
        session.on_gesture_start(1);
        run_frames(&mut session, &registry);
        assert_eq!(session.active_target(), None);
    }

    #[test]
    fn end_while_idle_is_noop() {
        let mut session: DragSession<u32, _> = DragSession::new(ManualScheduler::new());
        assert_eq!(session.on_gesture_end(), None);
        assert_eq!(session.on_gesture_end(), None);
        assert!(session.flags().is_empty());
    }

    #[test]
    fn second_start_is_ignored() {
        let mut session = DragSession::new(ManualScheduler::new());
        assert!(session.on_gesture_start(1_u32));
        assert!(!session.on_gesture_start(2));
        assert_eq!(session.dragged(), Some(&1));
    }

    #[test]
    fn lane_lock_follows_raw_pointer() {
        let mut session = DragSession::new(ManualScheduler::new());
        session.set_root_right(Some(300.0));
        session.on_pointer_move(Point::new(400.0, 0.0));
        assert!(!session.is_beyond_root());

        session.on_gesture_start(1_u32);
        session.on_pointer_move(Point::new(350.0, 10.0));
        assert!(session.flags().contains(DragFlags::MAIN_LOCKED));
        session.on_pointer_move(Point::new(250.0, 10.0));
        assert!(!session.flags().contains(DragFlags::MAIN_LOCKED));
        session.on_pointer_move(Point::new(301.0, 10.0));
        session.on_gesture_end();
        assert!(!session.flags().contains(DragFlags::MAIN_LOCKED));
    }

    #[test]
    fn gesture_updates_policy() {
        let mut session = DragSession::with_config(
            ManualScheduler::new(),
            SessionConfig::with_tracking(TrackingPolicy::GestureUpdates),
        );
        session.on_gesture_start(1_u32);
        assert!(!session.tracker().is_active());

        // No frames are scheduled under this policy.
        session.on_pointer_move(Point::new(10.0, 10.0));
        assert_eq!(session.scheduler_mut().pending(), 0);

        assert!(session.on_gesture_update(Some(3)).is_some());
        assert_eq!(session.active_target(), Some(&3));
        // Own dropzone is refused and clears the target.
        session.on_gesture_update(Some(1));
        assert_eq!(session.active_target(), None);
        session.on_gesture_update(Some(3));
        session.on_gesture_update(None);
        assert_eq!(session.active_target(), None);
    }

    #[test]
    fn pointer_follow_ignores_gesture_updates() {
        let mut session = DragSession::new(ManualScheduler::new());
        session.on_gesture_start(1_u32);
        assert_eq!(session.on_gesture_update(Some(2)), None);
        assert_eq!(session.active_target(), None);
    }

    #[test]
    fn dropzone_mode_locked_while_dragging() {
        let mut session = DragSession::new(ManualScheduler::new());
        assert!(session.set_dropzone_mode(DropzoneMode::Portal));
        session.on_gesture_start(1_u32);
        assert!(!session.set_dropzone_mode(DropzoneMode::Inline));
        assert_eq!(session.config().dropzone_mode, DropzoneMode::Portal);
        session.on_gesture_end();
        assert!(session.set_dropzone_mode(DropzoneMode::Inline));
    }

    #[test]
    fn unchanged_target_reports_no_change() {
        let registry = registry();
        let mut session = DragSession::new(ManualScheduler::new());
        session.on_gesture_start(1);
        session.on_pointer_move(Point::new(50.0, 80.0));
        run_frames(&mut session, &registry);
        session.on_pointer_move(Point::new(55.0, 85.0));
        let ticket = session.scheduler_mut().next_frame().unwrap();
        assert_eq!(session.on_frame(ticket, &registry), None);
        assert_eq!(session.active_target(), Some(&2));
    }

    #[test]
    fn keys_need_not_implement_default() {
        #[derive(Clone, Debug, PartialEq)]
        struct Key(u8);

        assert_eq!(DragPhase::<Key>::default(), DragPhase::Idle);

        let mut session = DragSession::new(ManualScheduler::new());
        session.on_gesture_start(Key(1));
        let ended = session.on_gesture_end().unwrap();
        assert_eq!(ended.dragged, Key(1));
        assert_eq!(session.phase(), &DragPhase::Idle);
    }
}
