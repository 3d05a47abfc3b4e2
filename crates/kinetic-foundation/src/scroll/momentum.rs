//! Inertial scrolling with soft snapping for one surface.
//!
//! Input handlers only move `target`; the frame step converges `current`
//! toward it, decays release momentum and, once momentum has died down,
//! nudges `target` toward the nearest item centre.

use std::rc::Rc;

use kinetic_animation::approach_or_snap;
use kinetic_core::{ChangeGate, FloatGate, FrameComponent};
use kinetic_graphics::Rect;
use web_time::Instant;

use super::config::ScrollConfig;
use super::state::{sanitize_extent, ScrollState};
use crate::geometry_query::{ItemId, SurfaceGeometry};

/// Receives the outputs of a [`MomentumScroll`] during its publish phase.
///
/// Each method is only called when the value changed.
pub trait ScrollSink {
    /// The scroll offset to assign to the host surface.
    fn apply_offset(&mut self, offset: f32);

    fn progress_changed(&mut self, _progress: f32) {}

    fn active_item_changed(&mut self, _item: Option<&ItemId>) {}
}

const OFFSET_EPSILON: f32 = 0.001;
const PROGRESS_EPSILON: f32 = 0.0001;

pub struct MomentumScroll {
    config: ScrollConfig,
    state: ScrollState,
    geometry: Rc<dyn SurfaceGeometry>,
    items: Vec<ItemId>,
    snap_offsets: Vec<f32>,
    active_item: Option<ItemId>,
    last_pointer_y: Option<f32>,
    published_offset: f32,
    offset_gate: FloatGate,
    progress_gate: FloatGate,
    active_gate: ChangeGate<Option<ItemId>>,
    sink: Option<Box<dyn ScrollSink>>,
}

impl MomentumScroll {
    pub fn new(geometry: Rc<dyn SurfaceGeometry>, config: ScrollConfig) -> Self {
        Self {
            config: config.sanitized(),
            state: ScrollState::default(),
            geometry,
            items: Vec::new(),
            snap_offsets: Vec::new(),
            active_item: None,
            last_pointer_y: None,
            published_offset: 0.0,
            offset_gate: FloatGate::new(OFFSET_EPSILON),
            progress_gate: FloatGate::new(PROGRESS_EPSILON),
            active_gate: ChangeGate::new(),
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: impl ScrollSink + 'static) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink(&mut self, sink: impl ScrollSink + 'static) {
        self.sink = Some(Box::new(sink));
        self.offset_gate.reset();
        self.progress_gate.reset();
        self.active_gate.reset();
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Registers the items whose centres act as snap points.
    ///
    /// A different set means different content, so the surface returns to
    /// the top.
    pub fn set_items<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Into<ItemId>,
    {
        let items: Vec<ItemId> = items.into_iter().map(Into::into).collect();
        if items == self.items {
            return;
        }
        log::debug!("scroll content changed ({} items); resetting", items.len());
        self.items = items;
        self.snap_offsets.clear();
        self.active_item = None;
        self.reset();
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_pointer_y = None;
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.scroll_by(delta_y * self.config.wheel_gain);
    }

    /// Moves `target` by an already scaled delta.
    pub fn scroll_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.refresh_bounds();
        self.state.is_programmatic_scrub = false;
        self.state.target += delta;
        self.state.clamp();
    }

    pub fn on_drag_start(&mut self, pointer_y: f32) {
        if !pointer_y.is_finite() {
            return;
        }
        self.begin_drag();
        self.last_pointer_y = Some(pointer_y);
    }

    pub fn on_drag_move(&mut self, pointer_y: f32) {
        let Some(last) = self.last_pointer_y else {
            return;
        };
        if !pointer_y.is_finite() {
            return;
        }
        self.last_pointer_y = Some(pointer_y);
        self.drag_by((last - pointer_y) * self.config.drag_gain);
    }

    pub fn on_drag_end(&mut self) {
        self.end_drag(true);
    }

    /// Presses the pointer without a position; the caller feeds deltas
    /// through [`drag_by`](Self::drag_by).
    pub fn begin_drag(&mut self) {
        self.state.is_pointer_down = true;
        self.state.is_dragging = false;
        self.state.is_programmatic_scrub = false;
        self.state.momentum = 0.0;
        self.state.velocity = 0.0;
    }

    /// Applies one drag step of an already scaled delta and records it as
    /// the instantaneous velocity.
    pub fn drag_by(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.refresh_bounds();
        self.state.is_pointer_down = true;
        self.state.is_dragging = true;
        self.state.target += delta;
        self.state.velocity = delta;
        self.state.clamp();
    }

    /// Replaces the drag velocity, e.g. with motion inherited from another
    /// surface. Ignored unless a drag is in progress.
    pub fn carry_velocity(&mut self, velocity: f32) {
        if self.state.is_dragging && velocity.is_finite() {
            self.state.velocity = velocity;
        }
    }

    /// Releases the pointer. With `impart`, the last drag velocity becomes
    /// release momentum.
    pub fn end_drag(&mut self, impart: bool) {
        let was_dragging = self.state.is_dragging;
        self.state.is_pointer_down = false;
        self.state.is_dragging = false;
        self.last_pointer_y = None;
        self.state.momentum = if impart && was_dragging {
            let max = self.config.max_momentum;
            self.state.velocity.clamp(-max, max)
        } else {
            0.0
        };
        self.state.velocity = 0.0;
    }

    /// Stops any release momentum; `current` still converges on `target`.
    pub fn halt(&mut self) {
        self.state.momentum = 0.0;
        self.state.velocity = 0.0;
    }

    /// Programmatic scrub: momentum and snapping stay suspended until
    /// `current` reaches `offset`.
    pub fn scroll_to_target(&mut self, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        self.refresh_bounds();
        self.state.target = offset;
        self.state.momentum = 0.0;
        self.state.is_programmatic_scrub = true;
        self.state.clamp();
    }

    pub fn has_room(&mut self, delta: f32, epsilon: f32) -> bool {
        self.refresh_bounds();
        self.state.has_room(delta, epsilon)
    }

    pub fn offset(&self) -> f32 {
        self.state.current
    }

    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn active_item(&self) -> Option<&ItemId> {
        self.active_item.as_ref()
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Snap offsets from the last measurement, in registration order.
    pub fn snap_offsets(&self) -> &[f32] {
        &self.snap_offsets
    }

    /// No motion left: `current` sits on `target` and nothing is pushing it.
    pub fn is_settled(&self) -> bool {
        self.state.current == self.state.target
            && self.state.momentum == 0.0
            && !self.state.is_dragging
            && !self.state.is_programmatic_scrub
    }

    /// Re-reads the scroll range from the host so input between frames
    /// clamps against the live content size. Returns the viewport used.
    fn refresh_bounds(&mut self) -> Option<Rect> {
        let viewport = self.geometry.viewport_rect()?;
        let content = self.geometry.content_extent()?;
        if !viewport.is_finite() {
            return None;
        }
        self.state
            .set_max_scroll(sanitize_extent(content) - viewport.height);
        Some(viewport)
    }

    fn measure_items(&mut self, viewport: Rect) {
        let center_y = viewport.center().y;
        let max_scroll = self.state.max_scroll;
        let mut nearest: Option<(f32, &ItemId)> = None;
        self.snap_offsets.clear();

        for id in &self.items {
            let Some(rect) = self.geometry.item_rect(id) else {
                continue;
            };
            if !rect.is_finite() {
                continue;
            }
            let from_center = rect.center().y - center_y;
            self.snap_offsets
                .push((self.published_offset + from_center).clamp(0.0, max_scroll));
            let distance = from_center.abs();
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, id));
            }
        }

        self.active_item = nearest.map(|(_, id)| id.clone());
    }
}

impl FrameComponent for MomentumScroll {
    fn measure(&mut self, _frame_time: Instant) -> bool {
        let Some(viewport) = self.refresh_bounds() else {
            return false;
        };
        self.measure_items(viewport);
        true
    }

    fn integrate(&mut self, _frame_time: Instant) {
        let config = self.config;
        let state = &mut self.state;

        if state.max_scroll <= 0.0 {
            state.current = 0.0;
            state.target = 0.0;
            state.momentum = 0.0;
            state.velocity = 0.0;
            state.is_programmatic_scrub = false;
            return;
        }

        if !state.is_dragging && !state.is_programmatic_scrub {
            if state.momentum.abs() >= config.momentum_threshold {
                state.target += state.momentum;
                state.momentum *= config.momentum_decay;
            } else {
                state.momentum = 0.0;
                if config.snap_enabled && !state.is_pointer_down {
                    if let Some(snap) = nearest_offset(&self.snap_offsets, state.target) {
                        let gap = snap - state.target;
                        if gap.abs() >= config.settle_epsilon {
                            state.target += gap * config.snap_strength;
                        }
                    }
                }
            }
        }

        state.clamp();
        if state.target <= 0.0 || state.target >= state.max_scroll {
            state.momentum = 0.0;
        }

        let rate = if state.is_dragging || state.is_programmatic_scrub {
            config.active_convergence
        } else {
            config.idle_convergence
        };
        let step = approach_or_snap(state.current, state.target, rate, config.settle_epsilon);
        state.current = step.value;
        if step.settled {
            state.momentum = 0.0;
            if state.is_programmatic_scrub {
                log::trace!("scrub reached {}", state.target);
                state.is_programmatic_scrub = false;
            }
        }
        state.clamp();
    }

    fn publish(&mut self) {
        let offset = self.state.current;
        let progress = self.state.progress();
        self.published_offset = offset;

        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if self.offset_gate.update(offset) {
            sink.apply_offset(offset);
        }
        if self.progress_gate.update(progress) {
            sink.progress_changed(progress);
        }
        if self.active_gate.update(&self.active_item) {
            sink.active_item_changed(self.active_item.as_ref());
        }
    }
}

fn nearest_offset(offsets: &[f32], target: f32) -> Option<f32> {
    offsets
        .iter()
        .copied()
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
}
