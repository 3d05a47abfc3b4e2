//! Recurring per-frame driver for simulations.
//!
//! A [`FrameLoop`] re-registers its component on the [`FrameClock`] after every
//! frame until it is stopped or dropped. Within one frame the component is
//! always measured first, then integrated, then asked to publish.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_time::Instant;

use crate::frame_clock::{FrameCallbackRegistration, FrameClock};

/// A simulation stepped once per display refresh.
pub trait FrameComponent {
    /// Refreshes bounds from live measurements.
    ///
    /// Returning `false` skips integration and publishing for this frame; the
    /// loop tries again on the next one.
    fn measure(&mut self, _frame_time: Instant) -> bool {
        true
    }

    /// Advances the simulation toward its targets.
    fn integrate(&mut self, frame_time: Instant);

    /// Writes derived outputs to the host. Implementations only notify the
    /// host when a value changed meaningfully.
    fn publish(&mut self) {}
}

/// Runs one frame of `component`. Returns `false` when the frame was skipped.
pub fn run_frame<C: FrameComponent + ?Sized>(component: &mut C, frame_time: Instant) -> bool {
    if !component.measure(frame_time) {
        log::trace!("frame skipped: measurement unavailable");
        return false;
    }
    component.integrate(frame_time);
    component.publish();
    true
}

type RegistrationSlot = RefCell<Option<FrameCallbackRegistration>>;

/// Owns a component and keeps it ticking on a [`FrameClock`].
///
/// `start` and `stop` are idempotent, and dropping the loop stops it, so a
/// host surface can tie the loop to its mount lifetime directly.
pub struct FrameLoop<C: FrameComponent + 'static> {
    component: Rc<RefCell<C>>,
    clock: FrameClock,
    registration: Rc<RegistrationSlot>,
}

impl<C: FrameComponent + 'static> FrameLoop<C> {
    pub fn new(clock: FrameClock, component: C) -> Self {
        Self::from_shared(clock, Rc::new(RefCell::new(component)))
    }

    pub fn from_shared(clock: FrameClock, component: Rc<RefCell<C>>) -> Self {
        Self {
            component,
            clock,
            registration: Rc::new(RefCell::new(None)),
        }
    }

    /// Shared handle to the driven component, for input handlers.
    pub fn component(&self) -> Rc<RefCell<C>> {
        Rc::clone(&self.component)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.component.borrow_mut())
    }

    pub fn is_running(&self) -> bool {
        self.registration.borrow().is_some()
    }

    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        schedule(
            &self.clock,
            Rc::downgrade(&self.component),
            Rc::downgrade(&self.registration),
        );
    }

    pub fn stop(&self) {
        let registration = self.registration.borrow_mut().take();
        if let Some(registration) = registration {
            registration.cancel();
        }
    }
}

impl<C: FrameComponent + 'static> Drop for FrameLoop<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule<C: FrameComponent + 'static>(
    clock: &FrameClock,
    component: Weak<RefCell<C>>,
    slot: Weak<RegistrationSlot>,
) {
    let next_clock = clock.clone();
    let next_component = component.clone();
    let next_slot = slot.clone();
    let own_slot = slot.clone();

    let registration = clock.with_frame(move |frame_time| {
        let (Some(component), Some(slot)) = (component.upgrade(), slot.upgrade()) else {
            return;
        };
        if slot.borrow().is_none() {
            return;
        }
        match component.try_borrow_mut() {
            Ok(mut component) => {
                run_frame(&mut *component, frame_time);
            }
            Err(_) => log::trace!("frame skipped: component busy"),
        }
        schedule(&next_clock, next_component, next_slot);
    });

    match own_slot.upgrade() {
        Some(slot) => *slot.borrow_mut() = Some(registration),
        None => registration.cancel(),
    }
}
