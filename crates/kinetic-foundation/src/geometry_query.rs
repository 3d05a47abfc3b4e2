//! Geometry the scroll controllers measure every frame.
//!
//! The engine never touches a rendering tree directly. The host implements
//! [`SurfaceGeometry`] over whatever it renders with and answers queries with
//! live layout, so reflow (late image loads, font swaps) is picked up on the
//! next frame.

use std::fmt;
use std::rc::Rc;

use kinetic_graphics::Rect;

/// Opaque key of a content item (a project section, an image).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(Rc<str>);

impl ItemId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

/// Read-only layout queries for one scrollable surface.
///
/// Every method returns `None` while the surface (or item) is not mounted;
/// callers skip the frame instead of failing.
pub trait SurfaceGeometry {
    /// Visible rectangle of the scroll container, in client coordinates.
    fn viewport_rect(&self) -> Option<Rect>;

    /// Total content extent along the scroll axis.
    fn content_extent(&self) -> Option<f32>;

    /// Client rectangle of an item as currently laid out, i.e. already
    /// shifted by the scroll offset last applied by the host.
    fn item_rect(&self, id: &ItemId) -> Option<Rect>;
}

impl<G: SurfaceGeometry + ?Sized> SurfaceGeometry for Rc<G> {
    fn viewport_rect(&self) -> Option<Rect> {
        (**self).viewport_rect()
    }

    fn content_extent(&self) -> Option<f32> {
        (**self).content_extent()
    }

    fn item_rect(&self, id: &ItemId) -> Option<Rect> {
        (**self).item_rect(id)
    }
}
