//! Pointer tracking and drag ownership for the two sliders

use super::Rect;

/// Which slider a drag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderId {
    Heading,
    Pitch,
}

/// Left-button pointer sample for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub held: bool,
    /// Went down this frame
    pub pressed: bool,
}

impl Pointer {
    pub fn new(x: f32, y: f32, held: bool, was_held: bool) -> Self {
        Self { x, y, held, pressed: held && !was_held }
    }

    pub fn over(&self, rect: &Rect) -> bool {
        rect.contains(self.x, self.y)
    }

    pub fn pressed_on(&self, rect: &Rect) -> bool {
        self.pressed && self.over(rect)
    }
}

/// Which slider owns the pointer between press and release.
/// A drag keeps its owner even when the pointer leaves the strip.
#[derive(Debug, Default)]
pub struct DragState {
    pub pointer: Pointer,
    owner: Option<SliderId>,
    last_held: bool,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's raw mouse state. Releasing the button drops the owner.
    pub fn update(&mut self, x: f32, y: f32, held: bool) {
        self.pointer = Pointer::new(x, y, held, self.last_held);
        self.last_held = held;
        if !held {
            self.owner = None;
        }
    }

    /// True while `id` owns the drag; a press inside `rect` claims it
    pub fn track(&mut self, id: SliderId, rect: &Rect) -> bool {
        if self.owner.is_none() && self.pointer.pressed_on(rect) {
            self.owner = Some(id);
        }
        self.owner == Some(id)
    }

    /// Hover highlight, suppressed while another slider is dragged
    pub fn hovering(&self, id: SliderId, rect: &Rect) -> bool {
        self.pointer.over(rect) && self.owner.map_or(true, |owner| owner == id)
    }

    pub fn owner(&self) -> Option<SliderId> {
        self.owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 20.0)
    }

    #[test]
    fn test_press_claims_and_release_drops() {
        let mut drag = DragState::new();
        drag.update(50.0, 10.0, true);
        assert!(drag.pointer.pressed);
        assert!(drag.track(SliderId::Heading, &strip()));

        // Still owned after leaving the strip
        drag.update(500.0, 300.0, true);
        assert!(!drag.pointer.pressed);
        assert!(drag.track(SliderId::Heading, &strip()));

        drag.update(500.0, 300.0, false);
        assert_eq!(drag.owner(), None);
        assert!(!drag.track(SliderId::Heading, &strip()));
    }

    #[test]
    fn test_held_button_does_not_claim() {
        let mut drag = DragState::new();
        drag.update(500.0, 300.0, true);
        drag.update(50.0, 10.0, true);
        assert!(!drag.track(SliderId::Pitch, &strip()));
    }

    #[test]
    fn test_hover_blocked_while_other_drags() {
        let mut drag = DragState::new();
        drag.update(50.0, 10.0, true);
        drag.track(SliderId::Pitch, &strip());
        assert!(!drag.hovering(SliderId::Heading, &strip()));
        assert!(drag.hovering(SliderId::Pitch, &strip()));
    }
}
