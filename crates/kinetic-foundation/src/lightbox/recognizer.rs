use kinetic_core::Timer;
use kinetic_graphics::Point;
use smallvec::smallvec;
use web_time::Instant;

use super::config::{LightboxConfig, ZoomBounds};
use super::transform::{LightboxEvent, LightboxEvents, ViewTransform};
use crate::device::DeviceClass;
use crate::gesture_constants::MIN_PINCH_DISTANCE;
use crate::input::{PointerEvent, TouchEvent, TouchId, TouchPoint, WheelEvent};

/// What the recognizer currently believes the user is doing.
///
/// Exactly one session is live at a time; starting a pinch replaces a
/// one-finger pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSession {
    Idle,
    /// Mouse pressed, hold delay not yet elapsed.
    PendingDrag { press: Point },
    Dragging {
        origin: Point,
        last_point: Point,
        /// Translation when the pan started.
        start_pan: Point,
        /// `None` for mouse pans.
        touch: Option<TouchId>,
    },
    Pinching {
        ids: [TouchId; 2],
        start_distance: f32,
        start_scale: f32,
    },
}

/// Turns pointer, wheel and touch streams on the open image viewer into
/// transform updates and a close signal.
///
/// Handlers return the events to apply; timers are checked against event
/// timestamps and by [`poll`](Self::poll), which the host calls once per
/// frame while the viewer is open.
pub struct LightboxGestures {
    config: LightboxConfig,
    bounds: ZoomBounds,
    session: GestureSession,
    transform: ViewTransform,
    hold_timer: Timer,
    wheel_settle_timer: Timer,
    /// The current touch pan has stayed within tap slop.
    tap_candidate: bool,
    last_tap: Option<Instant>,
}

impl LightboxGestures {
    pub fn new(config: LightboxConfig, device: DeviceClass) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("invalid lightbox config ({err}); using defaults");
                LightboxConfig::default()
            }
        };
        Self {
            bounds: config.zoom_bounds(device),
            config,
            session: GestureSession::Idle,
            transform: ViewTransform::IDENTITY,
            hold_timer: Timer::new(),
            wheel_settle_timer: Timer::new(),
            tap_candidate: false,
            last_tap: None,
        }
    }

    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    pub fn set_device_class(&mut self, device: DeviceClass) {
        self.bounds = self.config.zoom_bounds(device);
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Forgets any gesture in progress and returns to the identity transform.
    pub fn reset(&mut self) {
        self.session = GestureSession::Idle;
        self.transform = ViewTransform::IDENTITY;
        self.hold_timer.cancel();
        self.wheel_settle_timer.cancel();
        self.tap_candidate = false;
        self.last_tap = None;
    }

    /// Fires due timers: the hold delay arms panning, the wheel settle delay
    /// brings an elastic zoom back within bounds.
    pub fn poll(&mut self, now: Instant) -> LightboxEvents {
        let mut events = LightboxEvents::new();
        self.poll_hold(now);
        if self.wheel_settle_timer.fire_if_due(now) {
            let settled = self.bounds.clamp(self.transform.scale);
            if settled != self.transform.scale {
                log::trace!("wheel zoom settling {} -> {}", self.transform.scale, settled);
                events.push(self.settle_to(self.transform.with_scale(settled)));
            }
        }
        events
    }

    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> LightboxEvents {
        if event.is_primary() && self.session == GestureSession::Idle {
            self.session = GestureSession::PendingDrag {
                press: event.position,
            };
            self.hold_timer.arm(event.time, self.config.hold_delay());
        }
        LightboxEvents::new()
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> LightboxEvents {
        self.poll_hold(event.time);
        match self.session {
            GestureSession::Dragging { touch: None, .. } => self.pan_to(event.position),
            _ => LightboxEvents::new(),
        }
    }

    /// A press released before the hold delay closes the viewer.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> LightboxEvents {
        if !event.is_primary() {
            return LightboxEvents::new();
        }
        self.poll_hold(event.time);
        match self.session {
            GestureSession::PendingDrag { .. } => self.close(),
            GestureSession::Dragging { touch: None, .. } => {
                self.session = GestureSession::Idle;
                LightboxEvents::new()
            }
            _ => LightboxEvents::new(),
        }
    }

    pub fn on_double_click(&mut self) -> LightboxEvents {
        self.close()
    }

    /// Elastic zoom: the scale may overshoot the nominal range until the
    /// wheel has been quiet for the settle delay.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> LightboxEvents {
        if !event.delta_y.is_finite() {
            return LightboxEvents::new();
        }
        let overshoot = self.config.wheel_overshoot;
        let lower = self.bounds.min * (1.0 - overshoot);
        let upper = self.bounds.max * (1.0 + overshoot);
        let factor = (-event.delta_y * self.config.wheel_zoom_gain).exp();
        self.transform.scale = (self.transform.scale * factor).clamp(lower, upper);
        self.wheel_settle_timer
            .arm(event.time, self.config.wheel_settle_delay());
        smallvec![LightboxEvent::Transform(self.transform)]
    }

    pub fn on_touch_start(&mut self, event: &TouchEvent) -> LightboxEvents {
        match event.touches.as_slice() {
            [] => {}
            [only] => {
                if self.session == GestureSession::Idle {
                    self.begin_pan(only.position, Some(only.id));
                    self.tap_candidate = true;
                }
            }
            [first, second, ..] => {
                if !matches!(self.session, GestureSession::Pinching { .. }) {
                    self.begin_pinch(*first, *second);
                }
            }
        }
        LightboxEvents::new()
    }

    pub fn on_touch_move(&mut self, event: &TouchEvent) -> LightboxEvents {
        match self.session {
            GestureSession::Pinching {
                ids,
                start_distance,
                start_scale,
            } => {
                let (Some(a), Some(b)) = (event.touch(ids[0]), event.touch(ids[1])) else {
                    return LightboxEvents::new();
                };
                let raw = start_scale * a.position.distance_to(b.position) / start_distance;
                self.transform.scale = self.resist(raw);
                smallvec![LightboxEvent::Transform(self.transform)]
            }
            GestureSession::Dragging {
                origin,
                touch: Some(id),
                ..
            } => {
                let Some(touch) = event.touch(id) else {
                    return LightboxEvents::new();
                };
                if touch.position.distance_to(origin) > self.config.tap_slop {
                    self.tap_candidate = false;
                }
                self.pan_to(touch.position)
            }
            _ => LightboxEvents::new(),
        }
    }

    /// `event.touches` holds the fingers still down.
    pub fn on_touch_end(&mut self, event: &TouchEvent) -> LightboxEvents {
        match self.session {
            GestureSession::Pinching { ids, .. } => {
                if ids.iter().all(|id| event.touch(*id).is_some()) {
                    return LightboxEvents::new();
                }
                log::debug!("pinch ended at scale {}", self.transform.scale);
                let events = self.correct_scale(true);
                if self.session != GestureSession::Idle {
                    self.resume_with(&event.touches);
                }
                events
            }
            GestureSession::Dragging {
                touch: Some(id), ..
            } => {
                if event.touch(id).is_some() {
                    return LightboxEvents::new();
                }
                let events = self.correct_scale(true);
                if self.session == GestureSession::Idle {
                    return events;
                }
                if self.tap_candidate {
                    let window = self.config.double_tap_window();
                    match self.last_tap {
                        Some(last) if event.time.saturating_duration_since(last) <= window => {
                            log::debug!("double tap");
                            return self.close();
                        }
                        _ => self.last_tap = Some(event.time),
                    }
                }
                self.resume_with(&event.touches);
                events
            }
            _ => LightboxEvents::new(),
        }
    }

    /// The platform took the touches away; settle back within bounds but
    /// never close.
    pub fn on_touch_cancel(&mut self, _event: &TouchEvent) -> LightboxEvents {
        self.session = GestureSession::Idle;
        self.tap_candidate = false;
        self.correct_scale(false)
    }

    fn poll_hold(&mut self, now: Instant) {
        if !self.hold_timer.fire_if_due(now) {
            return;
        }
        if let GestureSession::PendingDrag { press } = self.session {
            log::debug!("lightbox hold elapsed; panning armed");
            self.begin_pan(press, None);
        }
    }

    fn begin_pan(&mut self, point: Point, touch: Option<TouchId>) {
        self.hold_timer.cancel();
        self.session = GestureSession::Dragging {
            origin: point,
            last_point: point,
            start_pan: self.transform.translation(),
            touch,
        };
    }

    fn begin_pinch(&mut self, first: TouchPoint, second: TouchPoint) {
        let start_distance = first
            .position
            .distance_to(second.position)
            .max(MIN_PINCH_DISTANCE);
        log::debug!("pinch started at scale {}", self.transform.scale);
        self.hold_timer.cancel();
        self.tap_candidate = false;
        self.session = GestureSession::Pinching {
            ids: [first.id, second.id],
            start_distance,
            start_scale: self.transform.scale,
        };
    }

    /// Continues with whatever fingers are left after a lift.
    fn resume_with(&mut self, touches: &[TouchPoint]) {
        self.tap_candidate = false;
        match touches {
            [] => self.session = GestureSession::Idle,
            [only] => self.begin_pan(only.position, Some(only.id)),
            [first, second, ..] => self.begin_pinch(*first, *second),
        }
    }

    fn pan_to(&mut self, point: Point) -> LightboxEvents {
        let GestureSession::Dragging {
            origin,
            start_pan,
            ref mut last_point,
            ..
        } = self.session
        else {
            return LightboxEvents::new();
        };
        *last_point = point;
        self.transform = self
            .transform
            .with_translation(start_pan + (point - origin));
        smallvec![LightboxEvent::Transform(self.transform)]
    }

    /// Beyond the ceiling only a fraction of the raw scale is applied.
    fn resist(&self, raw: f32) -> f32 {
        let max = self.bounds.max;
        if raw > max {
            max + (raw - max) * self.config.pinch_resistance
        } else {
            raw
        }
    }

    /// End-of-gesture correction. Closing resets the recognizer to idle.
    fn correct_scale(&mut self, allow_close: bool) -> LightboxEvents {
        let scale = self.transform.scale;
        if scale > self.bounds.max {
            smallvec![self.settle_to(self.transform.with_scale(self.bounds.max))]
        } else if allow_close && scale < self.config.close_threshold {
            self.close()
        } else if scale < self.bounds.min {
            smallvec![self.settle_to(ViewTransform::IDENTITY.with_scale(self.bounds.min))]
        } else {
            LightboxEvents::new()
        }
    }

    fn settle_to(&mut self, target: ViewTransform) -> LightboxEvent {
        self.transform = target;
        LightboxEvent::Settle {
            target,
            transition: self.config.settle,
        }
    }

    fn close(&mut self) -> LightboxEvents {
        log::debug!("lightbox close");
        self.reset();
        smallvec![LightboxEvent::Close]
    }
}
