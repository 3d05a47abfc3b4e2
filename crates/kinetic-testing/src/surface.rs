//! Fake host surfaces.

use std::cell::RefCell;
use std::rc::Rc;

use kinetic_foundation::{ItemId, ScrollSink, SurfaceGeometry};
use kinetic_graphics::{DisplayList, DrawingSurface, Rect, Size};

#[derive(Default)]
struct ScrollSurfaceInner {
    viewport: Option<Rect>,
    content_extent: Option<f32>,
    /// Item rectangles relative to the top of the content.
    items: Vec<(ItemId, Rect)>,
    applied_offset: f32,
    offsets: Vec<f32>,
    progress: Vec<f32>,
    active: Vec<Option<ItemId>>,
}

/// A scroll container that answers geometry queries and records what the
/// engine publishes.
///
/// Applying an offset shifts every item rectangle, the way a real layout
/// would after `scrollTop` is assigned. Clones share state, so one clone can
/// be handed to the controller as geometry and another as its sink.
#[derive(Clone, Default)]
pub struct FakeScrollSurface {
    inner: Rc<RefCell<ScrollSurfaceInner>>,
}

impl FakeScrollSurface {
    /// A mounted viewport at the client origin.
    pub fn new(viewport: Size, content_extent: f32) -> Self {
        let surface = Self::default();
        {
            let mut inner = surface.inner.borrow_mut();
            inner.viewport = Some(Rect::from_size(viewport));
            inner.content_extent = Some(content_extent);
        }
        surface
    }

    /// Not mounted yet: every geometry query answers `None`.
    pub fn unmounted() -> Self {
        Self::default()
    }

    /// Adds an item spanning `top..top + height` of the content.
    pub fn with_item(self, id: impl Into<ItemId>, top: f32, height: f32) -> Self {
        self.add_item(id, top, height);
        self
    }

    pub fn add_item(&self, id: impl Into<ItemId>, top: f32, height: f32) {
        let mut inner = self.inner.borrow_mut();
        let width = inner.viewport.map_or(0.0, |viewport| viewport.width);
        inner.items.push((id.into(), Rect::new(0.0, top, width, height)));
    }

    pub fn mount(&self, viewport: Rect, content_extent: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.viewport = Some(viewport);
        inner.content_extent = Some(content_extent);
    }

    pub fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.viewport = None;
        inner.content_extent = None;
    }

    /// Simulates reflow, e.g. an image finishing loading.
    pub fn set_content_extent(&self, extent: f32) {
        self.inner.borrow_mut().content_extent = Some(extent);
    }

    pub fn applied_offset(&self) -> f32 {
        self.inner.borrow().applied_offset
    }

    /// Every offset the engine published, in order.
    pub fn offsets(&self) -> Vec<f32> {
        self.inner.borrow().offsets.clone()
    }

    pub fn last_progress(&self) -> Option<f32> {
        self.inner.borrow().progress.last().copied()
    }

    pub fn progress_updates(&self) -> usize {
        self.inner.borrow().progress.len()
    }

    pub fn active_item(&self) -> Option<ItemId> {
        self.inner.borrow().active.last().cloned().flatten()
    }

    pub fn active_item_updates(&self) -> usize {
        self.inner.borrow().active.len()
    }
}

impl SurfaceGeometry for FakeScrollSurface {
    fn viewport_rect(&self) -> Option<Rect> {
        self.inner.borrow().viewport
    }

    fn content_extent(&self) -> Option<f32> {
        self.inner.borrow().content_extent
    }

    fn item_rect(&self, id: &ItemId) -> Option<Rect> {
        let inner = self.inner.borrow();
        let viewport = inner.viewport?;
        inner
            .items
            .iter()
            .find(|(item, _)| item == id)
            .map(|(_, rect)| rect.translate(viewport.x, viewport.y - inner.applied_offset))
    }
}

impl ScrollSink for FakeScrollSurface {
    fn apply_offset(&mut self, offset: f32) {
        let mut inner = self.inner.borrow_mut();
        inner.applied_offset = offset;
        inner.offsets.push(offset);
    }

    fn progress_changed(&mut self, progress: f32) {
        self.inner.borrow_mut().progress.push(progress);
    }

    fn active_item_changed(&mut self, item: Option<&ItemId>) {
        self.inner.borrow_mut().active.push(item.cloned());
    }
}

/// A drawing surface that keeps every painted frame.
#[derive(Clone)]
pub struct RecordingSurface {
    size: Rc<RefCell<Size>>,
    frames: Rc<RefCell<Vec<DisplayList>>>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size: Rc::new(RefCell::new(size)),
            frames: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn resize(&self, size: Size) {
        *self.size.borrow_mut() = size;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn last_frame(&self) -> Option<DisplayList> {
        self.frames.borrow().last().cloned()
    }

    pub fn frames(&self) -> Vec<DisplayList> {
        self.frames.borrow().clone()
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        *self.size.borrow()
    }

    fn paint(&mut self, list: &DisplayList) {
        self.frames.borrow_mut().push(list.clone());
    }
}
