use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_time::Instant;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(Instant)>;

#[derive(Default)]
struct ClockInner {
    next_id: FrameCallbackId,
    pending: Vec<(FrameCallbackId, FrameCallback)>,
    last_frame_time: Option<Instant>,
}

/// Display-refresh clock shared by every simulation of one host page.
///
/// Callbacks are one-shot: a component that wants to run every frame
/// re-registers itself from inside its callback (see [`crate::FrameLoop`]).
/// The host calls [`FrameClock::drain_frame_callbacks`] once per refresh.
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` to run on the next drained frame.
    pub fn with_frame(&self, callback: impl FnOnce(Instant) + 'static) -> FrameCallbackRegistration {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.pending.push((id, Box::new(callback)));
            id
        };
        FrameCallbackRegistration::new(Rc::downgrade(&self.inner), id)
    }

    /// Runs every callback registered before this call.
    ///
    /// Callbacks registered while draining run on the following frame, and a
    /// callback cancelled by an earlier one in the same batch does not run.
    pub fn drain_frame_callbacks(&self, frame_time: Instant) {
        let ids: Vec<FrameCallbackId> = {
            let mut inner = self.inner.borrow_mut();
            inner.last_frame_time = Some(frame_time);
            inner.pending.iter().map(|(id, _)| *id).collect()
        };

        for id in ids {
            let callback = {
                let mut inner = self.inner.borrow_mut();
                inner
                    .pending
                    .iter()
                    .position(|(pending_id, _)| *pending_id == id)
                    .map(|index| inner.pending.remove(index).1)
            };
            if let Some(callback) = callback {
                callback(frame_time);
            }
        }
    }

    pub fn has_pending_callbacks(&self) -> bool {
        !self.inner.borrow().pending.is_empty()
    }

    pub fn pending_callback_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Timestamp of the most recently drained frame.
    pub fn last_frame_time(&self) -> Option<Instant> {
        self.inner.borrow().last_frame_time
    }
}

fn cancel_frame_callback(inner: &RefCell<ClockInner>, id: FrameCallbackId) {
    inner
        .borrow_mut()
        .pending
        .retain(|(pending_id, _)| *pending_id != id);
}

/// Handle to a pending frame callback. Dropping it cancels the callback.
pub struct FrameCallbackRegistration {
    clock: Weak<RefCell<ClockInner>>,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(clock: Weak<RefCell<ClockInner>>, id: FrameCallbackId) -> Self {
        Self {
            clock,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<FrameCallbackId> {
        self.id
    }

    pub fn cancel(mut self) {
        self.cancel_in_place();
    }

    fn cancel_in_place(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(clock) = self.clock.upgrade() {
                cancel_frame_callback(&clock, id);
            }
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        self.cancel_in_place();
    }
}
