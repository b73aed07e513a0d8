// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-coalesced pointer sampling.

use core::fmt;

use kurbo::Point;

use crate::scheduler::{FrameScheduler, FrameTicket};

/// Coalesces raw pointer samples into at most one pending frame.
///
/// ## Rules
///
/// - Samples are only recorded between [`start`](Self::start) and [`stop`](Self::stop).
/// - Every sample overwrites the latest-known position (last write wins).
/// - A frame is requested for the first sample after the previous frame ran; later samples in
///   the same frame do not request another.
/// - [`stop`](Self::stop) cancels the pending request and invalidates every ticket issued so far.
pub struct PointerTracker<S: FrameScheduler> {
    scheduler: S,
    active: bool,
    epoch: u64,
    latest: Option<Point>,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler> fmt::Debug for PointerTracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerTracker")
            .field("active", &self.active)
            .field("epoch", &self.epoch)
            .field("latest", &self.latest)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: FrameScheduler> PointerTracker<S> {
    /// Create an inactive tracker driving `scheduler`.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active: false,
            epoch: 0,
            latest: None,
            pending: None,
        }
    }

    /// Begin sampling. Any previous sampling run is stopped first.
    pub fn start(&mut self) {
        self.stop();
        self.epoch = self.epoch.wrapping_add(1);
        self.active = true;
    }

    /// End sampling and cancel any pending frame.
    ///
    /// Idempotent. Returns `true` if the tracker was active.
    pub fn stop(&mut self) -> bool {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.latest = None;
        core::mem::replace(&mut self.active, false)
    }

    /// Record a raw pointer sample.
    ///
    /// Returns `true` if this sample requested a new frame.
    pub fn sample(&mut self, point: Point) -> bool {
        if !self.active {
            return false;
        }
        self.latest = Some(point);
        if self.pending.is_some() {
            return false;
        }
        let ticket = FrameTicket { epoch: self.epoch };
        self.pending = Some(self.scheduler.request_frame(ticket));
        true
    }

    /// Consume a delivered frame and return the position to resolve against.
    ///
    /// Returns `None` for stale tickets (issued before the last [`stop`](Self::stop) or
    /// [`start`](Self::start)) and when no sample has been recorded.
    pub fn take_frame(&mut self, ticket: FrameTicket) -> Option<Point> {
        if !self.active || ticket.epoch != self.epoch {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                ticket = ticket.epoch,
                current = self.epoch,
                "discarding stale frame"
            );
            return None;
        }
        self.pending = None;
        self.latest
    }

    /// Whether the tracker is sampling.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recent sample of the current run.
    pub fn latest(&self) -> Option<Point> {
        self.latest
    }

    /// Shared access to the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that drain it directly.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
