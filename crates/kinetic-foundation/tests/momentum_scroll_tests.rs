use std::rc::Rc;

use kinetic_core::{run_frame, FrameLoop, Instant};
use kinetic_foundation::{ItemId, MomentumScroll, ScrollConfig, SurfaceGeometry};
use kinetic_graphics::{Rect, Size};
use kinetic_testing::{
    assert_approx_eq, assert_rect_approx_eq, assert_within, FakeScrollSurface, FrameDriver,
};
use web_time::Duration;

const VIEWPORT: Size = Size::new(400.0, 800.0);

fn mount(surface: &FakeScrollSurface, config: ScrollConfig) -> MomentumScroll {
    MomentumScroll::new(Rc::new(surface.clone()), config).with_sink(surface.clone())
}

fn tick(scroll: &mut MomentumScroll, now: &mut Instant) -> bool {
    *now += Duration::from_millis(16);
    run_frame(scroll, *now)
}

fn settle(scroll: &mut MomentumScroll, now: &mut Instant, max_frames: usize) {
    for _ in 0..max_frames {
        tick(scroll, now);
        if scroll.is_settled() {
            return;
        }
    }
    panic!("scroll did not settle: {:?}", scroll.state());
}

#[test]
fn wheel_from_rest_settles_on_scaled_delta() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    assert_eq!(scroll.state().max_scroll(), 2000.0);

    scroll.on_wheel(500.0);
    assert_eq!(scroll.state().target(), 500.0);

    settle(&mut scroll, &mut now, 400);
    assert_eq!(scroll.state().target(), 500.0);
    assert_eq!(scroll.offset(), 500.0);
    assert_approx_eq(surface.applied_offset(), 500.0, 0.01, "applied offset");
    assert_approx_eq(scroll.progress(), 0.25, 1e-4, "progress");
}

#[test]
fn wheel_gain_scales_and_bounds_clamp() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default().with_wheel_gain(2.0));
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_wheel(300.0);
    assert_eq!(scroll.state().target(), 600.0);

    scroll.on_wheel(5000.0);
    assert_eq!(scroll.state().target(), 2000.0);

    scroll.on_wheel(-9000.0);
    assert_eq!(scroll.state().target(), 0.0);
}

#[test]
fn wheel_before_first_frame_is_kept() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();

    scroll.on_wheel(500.0);
    assert_eq!(scroll.state().target(), 500.0);

    settle(&mut scroll, &mut now, 400);
    assert_eq!(scroll.offset(), 500.0);
    assert_approx_eq(scroll.progress(), 0.25, 1e-4, "progress");
}

#[test]
fn input_clamps_against_grown_content_between_frames() {
    let surface = FakeScrollSurface::new(VIEWPORT, 1200.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    assert_eq!(scroll.state().max_scroll(), 400.0);

    surface.set_content_extent(2800.0);
    scroll.on_wheel(900.0);
    assert_eq!(scroll.state().target(), 900.0);

    scroll.scroll_to_target(1700.0);
    assert_eq!(scroll.state().target(), 1700.0);

    scroll.on_drag_start(600.0);
    scroll.on_drag_move(200.0);
    assert_eq!(scroll.state().target(), 2000.0);
}

#[test]
fn offsets_stay_in_bounds_for_mixed_input() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2000.0)
        .with_item("a", 0.0, 700.0)
        .with_item("b", 700.0, 700.0)
        .with_item("c", 1400.0, 600.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    scroll.set_items(["a", "b", "c"]);
    let mut now = Instant::now();

    let mut pointer = 400.0;
    for step in 0..600 {
        match step % 50 {
            0 => scroll.on_wheel(700.0),
            10 => scroll.on_wheel(-1500.0),
            20 => scroll.on_drag_start(pointer),
            21..=30 => {
                pointer -= 90.0;
                scroll.on_drag_move(pointer);
            }
            31 => scroll.on_drag_end(),
            40 => scroll.scroll_to_target(5000.0),
            _ => {}
        }
        tick(&mut scroll, &mut now);

        let state = scroll.state();
        assert_within(state.current(), 0.0, state.max_scroll(), "current");
        assert_within(state.target(), 0.0, state.max_scroll(), "target");
        for offset in surface.offsets() {
            assert_within(offset, 0.0, 1200.0, "published offset");
        }
    }
}

#[test]
fn idle_ticks_at_rest_change_nothing() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    scroll.on_wheel(320.0);
    settle(&mut scroll, &mut now, 400);

    let at_rest = scroll.state();
    let published = surface.offsets().len();
    for _ in 0..100 {
        tick(&mut scroll, &mut now);
        assert_eq!(scroll.state(), at_rest);
    }
    assert_eq!(surface.offsets().len(), published);
}

#[test]
fn release_momentum_decays_monotonically_to_zero() {
    let surface = FakeScrollSurface::new(VIEWPORT, 20_000.0);
    let mut scroll = mount(&surface, ScrollConfig::default().without_snapping());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_drag_start(600.0);
    scroll.on_drag_move(550.0);
    tick(&mut scroll, &mut now);
    scroll.on_drag_move(480.0);
    scroll.on_drag_end();

    let initial = scroll.state().momentum();
    assert_approx_eq(initial, 84.0, 1e-3, "release momentum");

    let mut previous = initial.abs();
    let mut frames = 0;
    while scroll.state().momentum() != 0.0 {
        tick(&mut scroll, &mut now);
        let magnitude = scroll.state().momentum().abs();
        assert!(magnitude <= previous, "{magnitude} > {previous}");
        previous = magnitude;
        frames += 1;
        assert!(frames < 400, "momentum never died out");
    }
    assert!(scroll.state().target() > 1000.0);
}

#[test]
fn release_velocity_is_capped() {
    let surface = FakeScrollSurface::new(VIEWPORT, 20_000.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_drag_start(700.0);
    scroll.on_drag_move(100.0);
    scroll.on_drag_end();

    assert_eq!(scroll.state().momentum(), scroll.config().max_momentum);
}

#[test]
fn hitting_a_bound_zeroes_momentum() {
    let surface = FakeScrollSurface::new(VIEWPORT, 1800.0);
    let mut scroll = mount(&surface, ScrollConfig::default().without_snapping());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_drag_start(700.0);
    scroll.on_drag_move(600.0);
    scroll.on_drag_end();
    assert!(scroll.state().momentum() > 0.0);

    let mut frames = 0;
    while scroll.state().target() < 1000.0 {
        tick(&mut scroll, &mut now);
        frames += 1;
        assert!(frames < 200, "never reached the bound");
    }
    assert_eq!(scroll.state().momentum(), 0.0);
    settle(&mut scroll, &mut now, 400);
    assert_eq!(scroll.offset(), 1000.0);
    assert_eq!(scroll.progress(), 1.0);
}

#[test]
fn drag_moves_target_by_pointer_travel() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_drag_start(500.0);
    scroll.on_drag_move(450.0);
    let state = scroll.state();
    assert!(state.is_dragging());
    assert_approx_eq(state.target(), 60.0, 1e-4, "target");
    assert_approx_eq(state.velocity(), 60.0, 1e-4, "velocity");

    tick(&mut scroll, &mut now);
    let expected = 60.0 * scroll.config().active_convergence;
    assert_approx_eq(scroll.offset(), expected, 1e-4, "drag converges fast");
}

#[test]
fn short_content_pins_offset_to_zero() {
    let surface = FakeScrollSurface::new(VIEWPORT, 500.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();

    scroll.on_wheel(300.0);
    scroll.scroll_to_target(200.0);
    for _ in 0..10 {
        tick(&mut scroll, &mut now);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.state().target(), 0.0);
    }
    assert_eq!(scroll.progress(), 0.0);
    assert!(!scroll.state().is_programmatic_scrub());
}

#[test]
fn unmounted_surface_skips_frames() {
    let surface = FakeScrollSurface::unmounted();
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();

    assert!(!tick(&mut scroll, &mut now));
    assert!(surface.offsets().is_empty());

    surface.mount(kinetic_graphics::Rect::from_size(VIEWPORT), 1600.0);
    assert!(tick(&mut scroll, &mut now));
    assert_eq!(surface.offsets(), vec![0.0]);
}

#[test]
fn reflow_clamps_existing_offset() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    scroll.on_wheel(1800.0);
    settle(&mut scroll, &mut now, 400);

    surface.set_content_extent(1800.0);
    tick(&mut scroll, &mut now);

    assert_eq!(scroll.state().max_scroll(), 1000.0);
    assert_eq!(scroll.offset(), 1000.0);
    assert_eq!(scroll.state().target(), 1000.0);
}

#[test]
fn idle_target_snaps_to_nearest_item_centre() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2400.0)
        .with_item("a", 0.0, 800.0)
        .with_item("b", 800.0, 800.0)
        .with_item("c", 1600.0, 800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    scroll.set_items(["a", "b", "c"]);
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    assert_eq!(scroll.snap_offsets(), &[0.0, 800.0, 1600.0]);

    scroll.on_wheel(550.0);
    settle(&mut scroll, &mut now, 1000);

    assert_approx_eq(scroll.state().target(), 800.0, 0.5, "snapped target");
    assert_eq!(scroll.active_item(), Some(&ItemId::new("b")));
    assert_eq!(surface.active_item(), Some(ItemId::new("b")));
    let Some(centred) = surface.item_rect(&ItemId::new("b")) else {
        panic!("item b is laid out");
    };
    assert_rect_approx_eq(centred, Rect::from_size(VIEWPORT), 0.5, "item b fills the viewport");
}

#[test]
fn snapping_waits_for_pointer_release() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2400.0)
        .with_item("a", 0.0, 800.0)
        .with_item("b", 800.0, 800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    scroll.set_items(["a", "b"]);
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.on_drag_start(500.0);
    scroll.on_drag_move(250.0);
    for _ in 0..100 {
        tick(&mut scroll, &mut now);
    }
    assert_approx_eq(scroll.state().target(), 300.0, 1e-3, "held target");
}

#[test]
fn programmatic_scrub_suspends_momentum_until_reached() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);

    scroll.scroll_to_target(1234.0);
    assert!(scroll.state().is_programmatic_scrub());
    tick(&mut scroll, &mut now);
    assert_approx_eq(
        scroll.offset(),
        1234.0 * scroll.config().active_convergence,
        1e-3,
        "scrub converges at the active rate",
    );

    settle(&mut scroll, &mut now, 200);
    assert_eq!(scroll.offset(), 1234.0);
    assert!(!scroll.state().is_programmatic_scrub());
}

#[test]
fn changing_items_resets_to_top() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default().without_snapping());
    scroll.set_items(["one", "two"]);
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    scroll.on_wheel(900.0);
    settle(&mut scroll, &mut now, 400);

    scroll.set_items(["one", "two"]);
    assert_eq!(scroll.offset(), 900.0);

    scroll.set_items(["three"]);
    assert_eq!(scroll.offset(), 0.0);
    assert_eq!(scroll.state().target(), 0.0);
    tick(&mut scroll, &mut now);
    assert_eq!(surface.applied_offset(), 0.0);
}

#[test]
fn non_finite_input_is_ignored() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut scroll = mount(&surface, ScrollConfig::default());
    let mut now = Instant::now();
    tick(&mut scroll, &mut now);
    scroll.on_wheel(200.0);

    scroll.on_wheel(f32::NAN);
    scroll.scroll_to_target(f32::INFINITY);
    scroll.on_drag_start(f32::NAN);
    scroll.on_drag_move(10.0);

    assert_eq!(scroll.state().target(), 200.0);
    assert!(!scroll.state().is_dragging());
}

#[test]
fn frame_loop_publishes_until_stopped() {
    let surface = FakeScrollSurface::new(VIEWPORT, 2800.0);
    let mut driver = FrameDriver::new();
    let frame_loop = FrameLoop::new(driver.clock(), mount(&surface, ScrollConfig::default()));
    frame_loop.start();

    frame_loop.with(|scroll| scroll.on_wheel(400.0));
    assert!(driver.run_until(400, || frame_loop.with(|scroll| scroll.is_settled())));
    assert_approx_eq(surface.applied_offset(), 400.0, 0.01, "applied offset");
    assert_approx_eq(surface.last_progress().unwrap_or_default(), 0.2, 1e-3, "progress");

    frame_loop.stop();
    frame_loop.with(|scroll| scroll.on_wheel(400.0));
    let published = surface.offsets().len();
    driver.frames(30);
    assert_eq!(surface.offsets().len(), published);
}
