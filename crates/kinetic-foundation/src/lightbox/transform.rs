use kinetic_animation::{AnimationSpec, Lerp};
use kinetic_graphics::Point;
use smallvec::SmallVec;

/// Transform the host applies to the displayed image.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn translation(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_translation(mut self, translation: Point) -> Self {
        self.translate_x = translation.x;
        self.translate_y = translation.y;
        self
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Lerp for ViewTransform {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Self {
            scale: self.scale.lerp(&target.scale, fraction),
            translate_x: self.translate_x.lerp(&target.translate_x, fraction),
            translate_y: self.translate_y.lerp(&target.translate_y, fraction),
        }
    }
}

/// Output of the lightbox recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightboxEvent {
    /// Close the viewer.
    Close,
    /// Apply this transform immediately (continuous gesture feedback).
    Transform(ViewTransform),
    /// Ease from the applied transform to `target` over `transition`.
    Settle {
        target: ViewTransform,
        transition: AnimationSpec,
    },
}

pub type LightboxEvents = SmallVec<[LightboxEvent; 2]>;
