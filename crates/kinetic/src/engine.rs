//! Wires every simulation onto one frame clock.
//!
//! The host owns the platform: it forwards raw input, reports the viewport,
//! and calls [`MotionEngine::frame`] once per display refresh. The engine owns
//! the frame loops and routes input to whichever components care about it.

use std::cell::RefCell;
use std::rc::Rc;

use kinetic_ambient::{AmbientField, PointerTrail};
use kinetic_core::{ConfigError, FrameClock, FrameComponent, FrameLoop};
use kinetic_foundation::{
    DeviceBreakpoints, DeviceClass, LightboxEvent, LightboxEvents, LightboxGestures,
    MomentumScroll, NestedScroll, PointerButton, PointerButtons, PointerEvent, PointerEventKind,
    ScrollSink, SurfaceGeometry, TouchEvent, TouchPhase, WheelEvent,
};
use kinetic_graphics::{Color, DrawingSurface, Point, Size};
use web_time::Instant;

use crate::config::MotionConfig;

/// Key of a mounted scroll surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

/// Shared handle to a component driven by an engine loop.
///
/// Input handlers reach the component through [`with`](Self::with); the loop
/// keeps stepping it until the surface is unmounted.
pub struct Mounted<C> {
    id: SurfaceId,
    component: Rc<RefCell<C>>,
}

impl<C> Mounted<C> {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.component.borrow_mut())
    }
}

impl<C> Clone for Mounted<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            component: Rc::clone(&self.component),
        }
    }
}

/// Start/stop over loops of different component types.
trait Lifecycle {
    fn start(&self);
    fn stop(&self);
}

impl<C: FrameComponent + 'static> Lifecycle for FrameLoop<C> {
    fn start(&self) {
        FrameLoop::start(self);
    }

    fn stop(&self) {
        FrameLoop::stop(self);
    }
}

pub struct MotionEngine {
    config: MotionConfig,
    clock: FrameClock,
    viewport: Size,
    device: DeviceClass,
    accent: Option<Color>,
    running: bool,
    next_id: u64,
    surfaces: Vec<(SurfaceId, Box<dyn Lifecycle>)>,
    field: Option<FrameLoop<AmbientField>>,
    trail: Option<FrameLoop<PointerTrail>>,
    lightbox: Option<LightboxGestures>,
    buttons_pressed: PointerButtons,
}

impl MotionEngine {
    /// Components replace invalid sections of `config` with their defaults.
    pub fn new(config: MotionConfig) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("invalid motion config ({err}); affected components use defaults");
        }
        Self::with_clock(FrameClock::new(), config)
    }

    /// Rejects invalid configuration instead of sanitising it.
    pub fn try_new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_clock(FrameClock::new(), config))
    }

    pub fn with_clock(clock: FrameClock, mut config: MotionConfig) -> Self {
        if let Err(err) = config.devices.validate() {
            log::warn!("invalid device breakpoints ({err}); using defaults");
            config.devices = DeviceBreakpoints::default();
        }
        Self {
            config,
            clock,
            viewport: Size::ZERO,
            device: DeviceClass::default(),
            accent: None,
            running: true,
            next_id: 0,
            surfaces: Vec::new(),
            field: None,
            trail: None,
            lightbox: None,
            buttons_pressed: PointerButtons::NONE,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn clock(&self) -> FrameClock {
        self.clock.clone()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn device_class(&self) -> DeviceClass {
        self.device
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Reclassifies the device. A class change retunes the lightbox and
    /// replaces the ambient field.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        let device = DeviceClass::classify(viewport, &self.config.devices);
        if device == self.device {
            return;
        }
        log::debug!("device class {:?} -> {:?}", self.device, device);
        self.device = device;
        if let Some(lightbox) = self.lightbox.as_mut() {
            lightbox.set_device_class(device);
        }
        if let Some(field) = &self.field {
            field.with(AmbientField::regenerate);
        }
    }

    /// The ambient field and trail drift toward the new accent.
    pub fn set_accent(&mut self, accent: Color) {
        self.accent = Some(accent);
        if let Some(field) = &self.field {
            field.with(|field| field.set_accent(accent));
        }
        let alpha = self.config.trail.color.a();
        if let Some(trail) = &self.trail {
            trail.with(|trail| trail.set_color(accent.with_alpha(alpha)));
        }
    }

    /// Builds a controller with the engine's scroll tunables.
    pub fn scroll_controller(
        &self,
        geometry: Rc<dyn SurfaceGeometry>,
        sink: impl ScrollSink + 'static,
    ) -> MomentumScroll {
        MomentumScroll::new(geometry, self.config.scroll).with_sink(sink)
    }

    pub fn mount_scroll_surface(
        &mut self,
        geometry: Rc<dyn SurfaceGeometry>,
        sink: impl ScrollSink + 'static,
    ) -> Mounted<MomentumScroll> {
        let controller = self.scroll_controller(geometry, sink);
        self.mount(controller)
    }

    /// Mounts a narrative panel (`primary`) that hands input over to an
    /// image panel (`secondary`) at its bounds.
    pub fn mount_nested_scroll(
        &mut self,
        primary: (Rc<dyn SurfaceGeometry>, impl ScrollSink + 'static),
        secondary: (Rc<dyn SurfaceGeometry>, impl ScrollSink + 'static),
    ) -> Mounted<NestedScroll> {
        let nested = NestedScroll::new(
            self.scroll_controller(primary.0, primary.1),
            self.scroll_controller(secondary.0, secondary.1),
            self.config.handoff,
        );
        self.mount(nested)
    }

    /// Stops and drops the loop of a mounted surface. Unknown ids are ignored.
    pub fn unmount(&mut self, id: SurfaceId) {
        self.surfaces.retain(|(surface, _)| *surface != id);
    }

    pub fn mounted_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn attach_ambient(&mut self, surface: impl DrawingSurface + 'static, seed: Option<u64>) {
        let mut field = AmbientField::new(surface, self.config.field, self.config.devices);
        if let Some(seed) = seed {
            field = field.with_seed(seed);
        }
        if let Some(accent) = self.accent {
            field = field.with_accent(accent);
        }
        let frame_loop = FrameLoop::new(self.clock.clone(), field);
        if self.running {
            frame_loop.start();
        }
        self.field = Some(frame_loop);
    }

    pub fn detach_ambient(&mut self) {
        self.field = None;
    }

    pub fn ambient(&self) -> Option<Rc<RefCell<AmbientField>>> {
        self.field.as_ref().map(FrameLoop::component)
    }

    pub fn attach_trail(&mut self, surface: impl DrawingSurface + 'static) {
        let mut trail = PointerTrail::new(surface, self.config.trail);
        if let Some(accent) = self.accent {
            trail.set_color(accent.with_alpha(self.config.trail.color.a()));
        }
        let frame_loop = FrameLoop::new(self.clock.clone(), trail);
        if self.running {
            frame_loop.start();
        }
        self.trail = Some(frame_loop);
    }

    pub fn detach_trail(&mut self) {
        self.trail = None;
    }

    pub fn trail(&self) -> Option<Rc<RefCell<PointerTrail>>> {
        self.trail.as_ref().map(FrameLoop::component)
    }

    /// Starts gesture recognition for the image viewer. Reopening resets it.
    pub fn open_lightbox(&mut self) {
        log::debug!("lightbox opened on {:?}", self.device);
        self.lightbox = Some(LightboxGestures::new(self.config.lightbox, self.device));
    }

    pub fn close_lightbox(&mut self) {
        if self.lightbox.take().is_some() {
            log::debug!("lightbox closed by host");
        }
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox.is_some()
    }

    pub fn lightbox(&self) -> Option<&LightboxGestures> {
        self.lightbox.as_ref()
    }

    /// Resumes every loop. Loops attached while stopped stay idle until then.
    pub fn start_all(&mut self) {
        self.running = true;
        for (_, surface) in &self.surfaces {
            surface.start();
        }
        if let Some(field) = &self.field {
            field.start();
        }
        if let Some(trail) = &self.trail {
            trail.start();
        }
    }

    /// Cancels every pending frame callback. Idempotent.
    pub fn stop_all(&mut self) {
        self.running = false;
        for (_, surface) in &self.surfaces {
            surface.stop();
        }
        if let Some(field) = &self.field {
            field.stop();
        }
        if let Some(trail) = &self.trail {
            trail.stop();
        }
    }

    /// One display refresh: due lightbox timers first, then every loop.
    pub fn frame(&mut self, now: Instant) -> LightboxEvents {
        let events = match self.lightbox.as_mut() {
            Some(lightbox) => lightbox.poll(now),
            None => LightboxEvents::new(),
        };
        self.clock.drain_frame_callbacks(now);
        events
    }

    /// Feeds the ambient effects and, while open, the lightbox.
    ///
    /// Scroll surfaces receive their input through their [`Mounted`] handle,
    /// since only the host knows which surface a pointer is over.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> LightboxEvents {
        match event.kind {
            PointerEventKind::Down => {
                if let Some(button) = event.button {
                    self.buttons_pressed.insert(button);
                }
                if event.is_primary() {
                    self.primary_press(event.position, event.time);
                }
            }
            PointerEventKind::Move => self.pointer_moved(event.position, event.time),
            PointerEventKind::Up | PointerEventKind::Cancel => {
                if let Some(button) = event.button {
                    self.buttons_pressed.remove(button);
                }
            }
        }

        let events = match self.lightbox.as_mut() {
            Some(lightbox) => match event.kind {
                PointerEventKind::Down => lightbox.on_pointer_down(event),
                PointerEventKind::Move => lightbox.on_pointer_move(event),
                PointerEventKind::Up => lightbox.on_pointer_up(event),
                _ => LightboxEvents::new(),
            },
            None => LightboxEvents::new(),
        };
        self.after_lightbox(events)
    }

    /// The pointer left the page; repulsion and the trail segment end.
    pub fn on_pointer_leave(&mut self) {
        if let Some(field) = &self.field {
            field.with(AmbientField::on_pointer_leave);
        }
        if let Some(trail) = &self.trail {
            trail.with(PointerTrail::on_pointer_leave);
        }
    }

    pub fn on_double_click(&mut self) -> LightboxEvents {
        let events = match self.lightbox.as_mut() {
            Some(lightbox) => lightbox.on_double_click(),
            None => LightboxEvents::new(),
        };
        self.after_lightbox(events)
    }

    /// Wheel input only concerns the engine while the lightbox is open.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> LightboxEvents {
        let events = match self.lightbox.as_mut() {
            Some(lightbox) => lightbox.on_wheel(event),
            None => LightboxEvents::new(),
        };
        self.after_lightbox(events)
    }

    pub fn on_touch(&mut self, event: &TouchEvent) -> LightboxEvents {
        if let (TouchPhase::Start, [only]) = (event.phase, event.touches.as_slice()) {
            self.primary_press(only.position, event.time);
        }
        let events = match self.lightbox.as_mut() {
            Some(lightbox) => match event.phase {
                TouchPhase::Start => lightbox.on_touch_start(event),
                TouchPhase::Move => lightbox.on_touch_move(event),
                TouchPhase::End => lightbox.on_touch_end(event),
                TouchPhase::Cancel => lightbox.on_touch_cancel(event),
            },
            None => LightboxEvents::new(),
        };
        self.after_lightbox(events)
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.buttons_pressed.contains(button)
    }

    fn mount<C: FrameComponent + 'static>(&mut self, component: C) -> Mounted<C> {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        let frame_loop = FrameLoop::new(self.clock.clone(), component);
        if self.running {
            frame_loop.start();
        }
        let mounted = Mounted {
            id,
            component: frame_loop.component(),
        };
        log::debug!("mounted surface {id:?}");
        self.surfaces.push((id, Box::new(frame_loop)));
        mounted
    }

    fn primary_press(&mut self, position: Point, time: Instant) {
        if let Some(field) = &self.field {
            field.with(|field| field.on_primary_press(position, time));
        }
        if let Some(trail) = &self.trail {
            trail.with(|trail| trail.on_primary_press(position, time));
        }
    }

    fn pointer_moved(&mut self, position: Point, time: Instant) {
        if let Some(field) = &self.field {
            field.with(|field| field.on_pointer_move(position, time));
        }
        if let Some(trail) = &self.trail {
            trail.with(|trail| trail.on_pointer_move(position, time));
        }
    }

    /// A recognizer that asked to close is dropped; the host hides the viewer.
    fn after_lightbox(&mut self, events: LightboxEvents) -> LightboxEvents {
        if events.contains(&LightboxEvent::Close) {
            log::debug!("lightbox closed by gesture");
            self.lightbox = None;
        }
        events
    }
}
