// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred-work scheduling: "run once on the next frame".

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Stamp carried by a frame request back into [`PointerTracker::take_frame`].
///
/// Tickets identify the drag that requested them. A ticket from an earlier drag is stale and is
/// ignored, which keeps late callbacks from touching state after the drag has ended.
///
/// [`PointerTracker::take_frame`]: crate::PointerTracker::take_frame
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket {
    pub(crate) epoch: u64,
}

/// A host primitive that runs one unit of deferred work on the next frame or tick.
///
/// In a browser this is `requestAnimationFrame`/`cancelAnimationFrame`; in a native loop it can
/// be a flag checked before the next redraw. When the frame fires, the host hands the ticket to
/// [`DragSession::on_frame`](crate::DragSession::on_frame).
pub trait FrameScheduler {
    /// Handle used to cancel a request.
    type Handle;

    /// Request that `ticket` be delivered on the next frame.
    fn request_frame(&mut self, ticket: FrameTicket) -> Self::Handle;

    /// Best-effort cancellation of a pending request.
    ///
    /// Hosts may fail to cancel a callback that is already on its way; the ticket check in the
    /// tracker covers that case.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Handle returned by [`ManualScheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// A queue-backed [`FrameScheduler`] that the host drains explicitly.
///
/// Useful for native event loops that poll once per redraw, and for tests that need to control
/// exactly when frames fire.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    queued: VecDeque<(FrameHandle, FrameTicket)>,
    ignore_cancel: bool,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose cancellation never takes effect.
    ///
    /// Models hosts where a callback can already be dispatched by the time it is cancelled.
    pub fn ignoring_cancel() -> Self {
        Self {
            ignore_cancel: true,
            ..Self::default()
        }
    }

    /// Number of frame requests waiting to run.
    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    /// Pop the oldest pending frame.
    pub fn next_frame(&mut self) -> Option<FrameTicket> {
        self.queued.pop_front().map(|(_, ticket)| ticket)
    }

    /// Drain every pending frame, oldest first.
    pub fn take_frames(&mut self) -> Vec<FrameTicket> {
        self.queued.drain(..).map(|(_, ticket)| ticket).collect()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = FrameHandle;

    fn request_frame(&mut self, ticket: FrameTicket) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next = self.next.wrapping_add(1);
        self.queued.push_back((handle, ticket));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.ignore_cancel {
            return;
        }
        self.queued.retain(|(h, _)| *h != handle);
    }
}
