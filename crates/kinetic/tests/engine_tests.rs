use std::rc::Rc;

use kinetic::{
    Color, DeviceClass, Instant, LightboxEvent, MotionConfig, MotionEngine, Point, PointerEvent,
    ScrollConfig, Size, SurfaceGeometry, TouchEvent, TouchPhase, TouchPoint, Transition,
    ViewTransform, WheelEvent,
};
use kinetic_testing::{assert_approx_eq, FakeScrollSurface, RecordingSurface};
use web_time::Duration;

const VIEWPORT: Size = Size::new(600.0, 800.0);

struct Session {
    engine: MotionEngine,
    now: Instant,
}

impl Session {
    fn new(config: MotionConfig) -> Self {
        Self {
            engine: MotionEngine::new(config),
            now: Instant::now(),
        }
    }

    fn frames(&mut self, count: usize) -> Vec<LightboxEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            self.now += Duration::from_millis(16);
            events.extend(self.engine.frame(self.now));
        }
        events
    }
}

fn quiet_scroll() -> MotionConfig {
    MotionConfig::default().with_scroll(ScrollConfig::default().without_snapping())
}

#[test]
fn mounted_surface_is_stepped_by_engine_frames() {
    let mut session = Session::new(quiet_scroll());
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let scroll = session
        .engine
        .mount_scroll_surface(Rc::new(surface.clone()), surface.clone());

    scroll.with(|scroll| scroll.on_wheel(500.0));
    session.frames(300);

    assert_approx_eq(surface.applied_offset(), 500.0, 0.01, "offset");
    assert_approx_eq(surface.last_progress().unwrap_or_default(), 0.25, 1e-4, "progress");
}

#[test]
fn stop_all_freezes_every_loop_until_started_again() {
    let mut session = Session::new(quiet_scroll());
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let scroll = session
        .engine
        .mount_scroll_surface(Rc::new(surface.clone()), surface.clone());
    let canvas = RecordingSurface::new(Size::new(1920.0, 1080.0));
    session.engine.attach_ambient(canvas.clone(), Some(4));
    session.frames(2);
    let painted = canvas.frame_count();

    session.engine.stop_all();
    session.engine.stop_all();
    assert!(!session.engine.clock().has_pending_callbacks());
    scroll.with(|scroll| scroll.on_wheel(400.0));
    session.frames(50);
    assert_eq!(surface.applied_offset(), 0.0);
    assert_eq!(canvas.frame_count(), painted);

    session.engine.start_all();
    session.frames(300);
    assert_approx_eq(surface.applied_offset(), 400.0, 0.01, "resumed");
    assert!(canvas.frame_count() > painted);
}

#[test]
fn unmount_cancels_the_surface_loop() {
    let mut session = Session::new(quiet_scroll());
    let first = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let second = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let a = session
        .engine
        .mount_scroll_surface(Rc::new(first.clone()), first.clone());
    let b = session
        .engine
        .mount_scroll_surface(Rc::new(second.clone()), second.clone());
    assert_ne!(a.id(), b.id());
    assert_eq!(session.engine.clock().pending_callback_count(), 2);

    session.engine.unmount(a.id());
    assert_eq!(session.engine.mounted_count(), 1);
    assert_eq!(session.engine.clock().pending_callback_count(), 1);

    a.with(|scroll| scroll.on_wheel(300.0));
    session.frames(100);
    assert_eq!(first.applied_offset(), 0.0);
}

#[test]
fn nested_surfaces_hand_off_through_the_engine() {
    let mut session = Session::new(quiet_scroll());
    let narrative = FakeScrollSurface::new(VIEWPORT, 1600.0);
    let images = FakeScrollSurface::new(VIEWPORT, 4800.0);
    let narrative_geometry: Rc<dyn SurfaceGeometry> = Rc::new(narrative.clone());
    let images_geometry: Rc<dyn SurfaceGeometry> = Rc::new(images.clone());
    let nested = session.engine.mount_nested_scroll(
        (narrative_geometry, narrative.clone()),
        (images_geometry, images.clone()),
    );

    nested.with(|nested| {
        nested.on_wheel(5000.0);
        nested.on_wheel(200.0);
    });
    session.frames(300);

    assert_approx_eq(narrative.applied_offset(), 800.0, 0.01, "narrative at bottom");
    assert_approx_eq(images.applied_offset(), 200.0, 0.01, "images took the rest");
}

#[test]
fn viewport_resize_reclassifies_and_retunes_lightbox() {
    let mut session = Session::new(MotionConfig::default());
    session.engine.set_viewport(Size::new(1920.0, 1080.0));
    session.engine.open_lightbox();
    assert_eq!(session.engine.device_class(), DeviceClass::Desktop);
    assert_eq!(session.engine.lightbox().map(|lightbox| lightbox.bounds().max), Some(3.0));

    session.engine.set_viewport(Size::new(390.0, 844.0));

    assert_eq!(session.engine.device_class(), DeviceClass::Mobile);
    assert_eq!(session.engine.lightbox().map(|lightbox| lightbox.bounds().max), Some(1.5));
}

#[test]
fn viewport_class_change_regenerates_ambient_field() {
    let mut session = Session::new(MotionConfig::default());
    let canvas = RecordingSurface::new(Size::new(1920.0, 1080.0));
    session.engine.set_viewport(Size::new(1920.0, 1080.0));
    session.engine.attach_ambient(canvas.clone(), Some(21));
    session.frames(1);
    let Some(field) = session.engine.ambient() else {
        panic!("field attached");
    };
    let desktop_spots = field.borrow().spots().len();
    assert!(desktop_spots >= 6);

    canvas.resize(Size::new(390.0, 844.0));
    session.engine.set_viewport(Size::new(390.0, 844.0));
    session.frames(1);

    assert!(field.borrow().spots().len() <= 4);
    assert_eq!(field.borrow().device_class(), DeviceClass::Mobile);
}

#[test]
fn quick_click_closes_lightbox() {
    let mut session = Session::new(MotionConfig::default());
    session.engine.open_lightbox();
    let t0 = session.now;

    let down = session.engine.on_pointer(&PointerEvent::down(Point::new(10.0, 10.0), t0));
    assert!(down.is_empty());
    let up = session.engine.on_pointer(&PointerEvent::up(
        Point::new(10.0, 10.0),
        t0 + Duration::from_millis(80),
    ));

    assert_eq!(up.as_slice(), &[LightboxEvent::Close]);
    assert!(!session.engine.is_lightbox_open());
}

#[test]
fn wheel_zoom_settles_on_a_later_frame() {
    let mut session = Session::new(MotionConfig::default());
    session.engine.open_lightbox();
    let t0 = session.now;

    let events = session.engine.on_wheel(&WheelEvent::new(-1000.0, t0));
    let [LightboxEvent::Transform(zoomed)] = events.as_slice() else {
        panic!("expected a transform, got {events:?}");
    };
    assert_approx_eq(zoomed.scale, 3.75, 1e-4, "elastic overshoot");

    let settled = session.frames(12);
    let [LightboxEvent::Settle { target, transition }] = settled.as_slice() else {
        panic!("expected one settle, got {settled:?}");
    };
    assert_eq!(target.scale, 3.0);

    let settle = Transition::new(*zoomed, *target, *transition, session.now);
    let midway = settle.value_at(session.now + transition.duration() / 2);
    assert!(midway.scale < 3.75 && midway.scale > 3.0);
    assert_eq!(settle.value_at(session.now + transition.duration()), *target);
    assert!(session.engine.is_lightbox_open());
}

#[test]
fn pinch_release_below_threshold_closes() {
    let mut session = Session::new(MotionConfig::default());
    session.engine.open_lightbox();
    let t = session.now;
    let touches = |a: f32, b: f32| [TouchPoint::new(1, a, 400.0), TouchPoint::new(2, b, 400.0)];

    session
        .engine
        .on_touch(&TouchEvent::new(TouchPhase::Start, &touches(200.0, 400.0), t));
    let moved = session
        .engine
        .on_touch(&TouchEvent::new(TouchPhase::Move, &touches(260.0, 380.0), t));
    let [LightboxEvent::Transform(ViewTransform { scale, .. })] = moved.as_slice() else {
        panic!("expected a transform, got {moved:?}");
    };
    assert_approx_eq(*scale, 0.6, 1e-4, "pinched in");

    let ended = session.engine.on_touch(&TouchEvent::new(
        TouchPhase::End,
        &[TouchPoint::new(2, 380.0, 400.0)],
        t,
    ));
    assert!(ended.contains(&LightboxEvent::Close));
    assert!(!session.engine.is_lightbox_open());
}

#[test]
fn presses_drive_ambient_effects() {
    let mut session = Session::new(MotionConfig::default());
    let field_canvas = RecordingSurface::new(Size::new(1920.0, 1080.0));
    let trail_canvas = RecordingSurface::new(Size::new(1920.0, 1080.0));
    session.engine.attach_ambient(field_canvas.clone(), Some(2));
    session.engine.attach_trail(trail_canvas.clone());
    let t0 = session.now;

    session.engine.on_pointer(&PointerEvent::moved(Point::new(100.0, 100.0), t0));
    session.engine.on_pointer(&PointerEvent::moved(Point::new(110.0, 100.0), t0));
    session.engine.on_pointer(&PointerEvent::down(Point::new(110.0, 100.0), t0));
    assert!(session.engine.is_pressed(kinetic::PointerButton::Primary));

    let (Some(field), Some(trail)) = (session.engine.ambient(), session.engine.trail()) else {
        panic!("effects attached");
    };
    assert_eq!(field.borrow().shockwave(), 3000.0);
    assert_eq!(trail.borrow().trail_ripples().count(), 6);
    assert_eq!(trail.borrow().click_ripples().count(), 1);

    session.frames(3);
    assert_eq!(field_canvas.frame_count(), 3);
    assert_eq!(trail_canvas.frame_count(), 3);

    session.engine.on_pointer(&PointerEvent::up(Point::new(110.0, 100.0), session.now));
    assert!(!session.engine.is_pressed(kinetic::PointerButton::Primary));
}

#[test]
fn single_finger_tap_sends_shockwave() {
    let mut session = Session::new(MotionConfig::default());
    session
        .engine
        .attach_ambient(RecordingSurface::new(Size::new(390.0, 844.0)), Some(3));
    let t = session.now;

    session.engine.on_touch(&TouchEvent::new(
        TouchPhase::Start,
        &[TouchPoint::new(7, 200.0, 300.0)],
        t,
    ));

    let shockwave = session
        .engine
        .ambient()
        .map(|field| field.borrow().shockwave());
    assert_eq!(shockwave, Some(3000.0));
}

#[test]
fn accent_reaches_attached_effects() {
    let mut session = Session::new(MotionConfig::default());
    session
        .engine
        .attach_ambient(RecordingSurface::new(Size::new(1920.0, 1080.0)), Some(5));
    session.engine.set_accent(Color::rgb(0.0, 0.0, 1.0));
    session.frames(600);

    let hue = session
        .engine
        .ambient()
        .map(|field| field.borrow().color().h)
        .unwrap_or_default();
    assert_approx_eq(hue, 240.0, 0.5, "field hue");

    // Effects attached later start from the current accent.
    session
        .engine
        .attach_ambient(RecordingSurface::new(Size::new(1920.0, 1080.0)), Some(6));
    let hue = session
        .engine
        .ambient()
        .map(|field| field.borrow().color().h)
        .unwrap_or_default();
    assert_approx_eq(hue, 240.0, 1e-3, "fresh field hue");
}

#[test]
fn try_new_rejects_invalid_config() {
    let config =
        MotionConfig::default().with_scroll(ScrollConfig::default().with_wheel_gain(f32::NAN));
    assert!(MotionEngine::try_new(config).is_err());
    assert!(MotionEngine::try_new(MotionConfig::default()).is_ok());
}
