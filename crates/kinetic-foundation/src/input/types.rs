use kinetic_graphics::Point;
use smallvec::SmallVec;
use web_time::Instant;

pub type TouchId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary = 0,
    Secondary = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerButtons(u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);

    pub fn new() -> Self {
        Self::NONE
    }

    pub fn with(mut self, button: PointerButton) -> Self {
        self.insert(button);
        self
    }

    pub fn insert(&mut self, button: PointerButton) {
        self.0 |= 1 << (button as u8);
    }

    pub fn remove(&mut self, button: PointerButton) {
        self.0 &= !(1 << (button as u8));
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        (self.0 & (1 << (button as u8))) != 0
    }
}

impl Default for PointerButtons {
    fn default() -> Self {
        Self::NONE
    }
}

/// Mouse or pen event in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
    /// Button that changed state (`Down`/`Up`); `None` for moves.
    pub button: Option<PointerButton>,
    /// Buttons held after this event.
    pub buttons: PointerButtons,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time: Instant) -> Self {
        Self {
            kind,
            position,
            button: None,
            buttons: PointerButtons::NONE,
            time,
        }
    }

    /// Primary-button press.
    pub fn down(position: Point, time: Instant) -> Self {
        Self {
            button: Some(PointerButton::Primary),
            buttons: PointerButtons::new().with(PointerButton::Primary),
            ..Self::new(PointerEventKind::Down, position, time)
        }
    }

    pub fn moved(position: Point, time: Instant) -> Self {
        Self::new(PointerEventKind::Move, position, time)
    }

    /// Primary-button release.
    pub fn up(position: Point, time: Instant) -> Self {
        Self {
            button: Some(PointerButton::Primary),
            ..Self::new(PointerEventKind::Up, position, time)
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == Some(PointerButton::Primary)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Vertical wheel delta in pixels; positive scrolls content down.
    pub delta_y: f32,
    pub position: Point,
    pub time: Instant,
}

impl WheelEvent {
    pub fn new(delta_y: f32, time: Instant) -> Self {
        Self {
            delta_y,
            position: Point::ZERO,
            time,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: TouchId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

pub type TouchList = SmallVec<[TouchPoint; 4]>;

/// Touch event carrying every finger still on the surface.
///
/// For `End`/`Cancel` the list holds the remaining fingers, like the DOM
/// `touches` list, so a lifted finger is detected by its absence.
#[derive(Clone, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: TouchList,
    pub time: Instant,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: &[TouchPoint], time: Instant) -> Self {
        Self {
            phase,
            touches: touches.iter().copied().collect(),
            time,
        }
    }

    pub fn touch(&self, id: TouchId) -> Option<&TouchPoint> {
        self.touches.iter().find(|touch| touch.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_set_tracks_membership() {
        let mut buttons = PointerButtons::new().with(PointerButton::Primary);
        assert!(buttons.contains(PointerButton::Primary));
        buttons.insert(PointerButton::Middle);
        buttons.remove(PointerButton::Primary);
        assert!(!buttons.contains(PointerButton::Primary));
        assert!(buttons.contains(PointerButton::Middle));
    }

    #[test]
    fn press_helpers_mark_primary_button() {
        let now = Instant::now();
        assert!(PointerEvent::down(Point::ZERO, now).is_primary());
        assert!(!PointerEvent::moved(Point::ZERO, now).is_primary());
        assert!(!PointerEvent::down(Point::ZERO, now)
            .with_button(PointerButton::Secondary)
            .is_primary());
    }
}
