//! Minimal immediate-mode UI for the viewer window
//!
//! Just enough for two angle sliders: a rect type, mouse tracking with
//! drag ownership, and the slider widget itself.

mod input;
mod slider;

pub use input::*;
pub use slider::*;

/// Screen-space rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Largest rect of the given aspect ratio centered inside this one
    pub fn fit_aspect(&self, aspect: f32) -> Self {
        if self.h <= 0.0 || aspect <= 0.0 {
            return *self;
        }
        if self.w / self.h > aspect {
            let w = self.h * aspect;
            Self::new(self.x + (self.w - w) * 0.5, self.y, w, self.h)
        } else {
            let h = self.w / aspect;
            Self::new(self.x, self.y + (self.h - h) * 0.5, self.w, h)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_aspect_letterboxes() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0).fit_aspect(1.0);
        assert_eq!(r, Rect::new(50.0, 0.0, 100.0, 100.0));
        let r = Rect::new(0.0, 0.0, 100.0, 300.0).fit_aspect(1.0);
        assert_eq!(r, Rect::new(0.0, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains(10.0, 14.9));
        assert!(!r.contains(15.0, 12.0));
    }
}
