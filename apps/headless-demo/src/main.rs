//! Drives a scripted portfolio session through the Kinetic engine and logs
//! what a browser host would receive: offsets, progress, active items,
//! lightbox transforms and canvas frames.
//!
//! Pass a TOML file as the first argument to override the defaults.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use kinetic::prelude::*;
use kinetic::{LightboxEvents, TouchPhase};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
struct PageState {
    viewport: Option<Rect>,
    content_extent: f32,
    sections: Vec<(ItemId, Rect)>,
    offset: f32,
}

/// A scroll container laid out as equally tall sections.
#[derive(Clone)]
struct Page {
    name: &'static str,
    state: Rc<RefCell<PageState>>,
}

impl Page {
    fn new(name: &'static str, viewport: Rect, sections: &[&str], section_height: f32) -> Self {
        let sections = sections
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let top = index as f32 * section_height;
                (ItemId::new(id), Rect::new(0.0, top, viewport.width, section_height))
            })
            .collect::<Vec<_>>();
        let state = PageState {
            viewport: Some(viewport),
            content_extent: sections.len() as f32 * section_height,
            sections,
            offset: 0.0,
        };
        Self {
            name,
            state: Rc::new(RefCell::new(state)),
        }
    }

    fn ids(&self) -> Vec<ItemId> {
        self.state.borrow().sections.iter().map(|(id, _)| id.clone()).collect()
    }

    fn offset(&self) -> f32 {
        self.state.borrow().offset
    }
}

impl SurfaceGeometry for Page {
    fn viewport_rect(&self) -> Option<Rect> {
        self.state.borrow().viewport
    }

    fn content_extent(&self) -> Option<f32> {
        Some(self.state.borrow().content_extent)
    }

    fn item_rect(&self, id: &ItemId) -> Option<Rect> {
        let state = self.state.borrow();
        let viewport = state.viewport?;
        state
            .sections
            .iter()
            .find(|(section, _)| section == id)
            .map(|(_, rect)| rect.translate(viewport.x, viewport.y - state.offset))
    }
}

impl ScrollSink for Page {
    fn apply_offset(&mut self, offset: f32) {
        self.state.borrow_mut().offset = offset;
    }

    fn progress_changed(&mut self, progress: f32) {
        log::trace!("{} progress {:.3}", self.name, progress);
    }

    fn active_item_changed(&mut self, item: Option<&ItemId>) {
        match item {
            Some(item) => log::info!("{} active section: {}", self.name, item),
            None => log::info!("{} active section cleared", self.name),
        }
    }
}

/// Counts what would have been drawn.
struct ConsoleCanvas {
    name: &'static str,
    size: Size,
    frames: Rc<RefCell<usize>>,
}

impl DrawingSurface for ConsoleCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn paint(&mut self, list: &DisplayList) {
        let circles = list
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count();
        *self.frames.borrow_mut() += 1;
        log::trace!("{} painted {} circles", self.name, circles);
    }
}

struct Session {
    engine: MotionEngine,
    now: Instant,
}

impl Session {
    fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.now += FRAME;
            for event in self.engine.frame(self.now) {
                report(&event);
            }
        }
    }
}

fn report_all(events: LightboxEvents) {
    for event in &events {
        report(event);
    }
}

fn report(event: &LightboxEvent) {
    match event {
        LightboxEvent::Close => log::info!("lightbox: close"),
        LightboxEvent::Transform(transform) => log::info!(
            "lightbox: scale {:.2} at ({:.0}, {:.0})",
            transform.scale,
            transform.translate_x,
            transform.translate_y
        ),
        LightboxEvent::Settle { target, transition } => log::info!(
            "lightbox: settle to {:.2} over {:?}",
            target.scale,
            transition.duration()
        ),
    }
}

fn load_config() -> anyhow::Result<MotionConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(MotionConfig::default());
    };
    let source =
        std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
    MotionConfig::from_toml_str(&source).with_context(|| format!("parsing config {path}"))
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = load_config()?;
    let viewport = Size::new(1440.0, 900.0);
    let mut session = Session {
        engine: MotionEngine::try_new(config)?,
        now: Instant::now(),
    };
    session.engine.set_viewport(viewport);
    log::info!("device class: {:?}", session.engine.device_class());

    let home = Page::new(
        "home",
        Rect::from_size(viewport),
        &["intro", "work", "about", "contact"],
        viewport.height,
    );
    let home_scroll = session
        .engine
        .mount_scroll_surface(Rc::new(home.clone()), home.clone());
    home_scroll.with(|scroll| scroll.set_items(home.ids()));

    let field_frames = Rc::new(RefCell::new(0));
    let trail_frames = Rc::new(RefCell::new(0));
    session.engine.attach_ambient(
        ConsoleCanvas {
            name: "field",
            size: viewport,
            frames: field_frames.clone(),
        },
        Some(7),
    );
    session.engine.attach_trail(ConsoleCanvas {
        name: "trail",
        size: viewport,
        frames: trail_frames.clone(),
    });
    session.engine.set_accent(Color::rgb(0.95, 0.45, 0.2));

    log::info!("-- wheel through the home page");
    for _ in 0..6 {
        home_scroll.with(|scroll| scroll.on_wheel(240.0));
        session.frames(4);
    }
    session.frames(240);
    log::info!("home settled at {:.1}", home.offset());

    log::info!("-- pointer sweep and click");
    for step in 0..30 {
        let point = Point::new(200.0 + step as f32 * 30.0, 450.0);
        session.engine.on_pointer(&PointerEvent::moved(point, session.now));
        session.frames(1);
    }
    let click = Point::new(1100.0, 450.0);
    session.engine.on_pointer(&PointerEvent::down(click, session.now));
    session.engine.on_pointer(&PointerEvent::up(click, session.now));
    session.frames(60);
    session.engine.on_pointer_leave();

    log::info!("-- project page with narrative and image panels");
    session.engine.unmount(home_scroll.id());
    let half = Size::new(viewport.width / 2.0, viewport.height);
    let narrative = Page::new(
        "narrative",
        Rect::from_size(half),
        &["brief", "process", "outcome"],
        half.height * 0.8,
    );
    let images = Page::new(
        "images",
        Rect::new(half.width, 0.0, half.width, half.height),
        &["hero", "detail-1", "detail-2", "detail-3", "detail-4"],
        half.height,
    );
    let narrative_geometry: Rc<dyn SurfaceGeometry> = Rc::new(narrative.clone());
    let images_geometry: Rc<dyn SurfaceGeometry> = Rc::new(images.clone());
    let project = session.engine.mount_nested_scroll(
        (narrative_geometry, narrative.clone()),
        (images_geometry, images.clone()),
    );
    project.with(|nested| {
        nested.primary_mut().set_items(narrative.ids());
        nested.secondary_mut().set_items(images.ids());
    });
    for _ in 0..12 {
        project.with(|nested| nested.on_wheel(300.0));
        session.frames(6);
    }
    session.frames(240);
    log::info!(
        "narrative at {:.1}, images at {:.1}",
        narrative.offset(),
        images.offset()
    );

    log::info!("-- lightbox: wheel zoom, drag, double click, pinch in to close");
    session.engine.open_lightbox();
    let zoom = session.engine.on_wheel(&WheelEvent::new(-600.0, session.now));
    report_all(zoom);
    session.frames(20);

    let start = Point::new(700.0, 400.0);
    let down = session.engine.on_pointer(&PointerEvent::down(start, session.now));
    report_all(down);
    session.frames(15);
    for step in 1..=10 {
        let point = Point::new(start.x + step as f32 * 12.0, start.y + step as f32 * 4.0);
        let moved = session.engine.on_pointer(&PointerEvent::moved(point, session.now));
        report_all(moved);
        session.frames(1);
    }
    let up = session
        .engine
        .on_pointer(&PointerEvent::up(Point::new(820.0, 440.0), session.now));
    report_all(up);
    session.frames(20);

    let closed = session.engine.on_double_click();
    report_all(closed);
    session.engine.open_lightbox();
    let fingers = |spread: f32| {
        [
            TouchPoint::new(1, 720.0 - spread, 450.0),
            TouchPoint::new(2, 720.0 + spread, 450.0),
        ]
    };
    let began = session
        .engine
        .on_touch(&TouchEvent::new(TouchPhase::Start, &fingers(200.0), session.now));
    report_all(began);
    for spread in [180.0, 150.0, 120.0, 100.0] {
        let pinched = session
            .engine
            .on_touch(&TouchEvent::new(TouchPhase::Move, &fingers(spread), session.now));
        report_all(pinched);
        session.frames(1);
    }
    let ended = session
        .engine
        .on_touch(&TouchEvent::new(TouchPhase::End, &[], session.now));
    report_all(ended);
    log::info!("lightbox open: {}", session.engine.is_lightbox_open());

    session.engine.stop_all();
    session.frames(10);
    log::info!(
        "done: {} field frames, {} trail frames",
        field_frames.borrow(),
        trail_frames.borrow()
    );
    Ok(())
}
